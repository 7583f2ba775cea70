//! Order processor.

use serde::Serialize;
use stock_block_core::{AdjustmentPlan, InventoryAdjustment, OrderContext, ProductInfo, SkippedLineItem};
use tracing::{error, info, instrument, warn};

use super::{BlockApi, BlockError};
use crate::config::BlockSettings;
use crate::shopify::{AdminShopifyError, InventoryAdjustInput};

/// Result of a processing run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessOutcome {
    /// The order was tagged and stock was deducted.
    Adjusted {
        changes: Vec<InventoryAdjustment>,
        skipped: Vec<SkippedLineItem>,
    },
    /// The order was tagged but no line item resolved to an inventory item.
    NothingToAdjust { skipped: Vec<SkippedLineItem> },
}

impl ProcessOutcome {
    /// Line items that were left out of the adjustment.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedLineItem] {
        match self {
            Self::Adjusted { skipped, .. } | Self::NothingToAdjust { skipped } => skipped,
        }
    }
}

/// Tag the order, then deduct its line items from the configured location.
///
/// Deltas come only from `products`, the snapshot already loaded for the
/// view. The tag is not rolled back when the adjustment fails unless
/// `settings.compensate_tag_on_failure` is set.
///
/// # Errors
///
/// - `BlockError::MissingOrderId` before any call if the order ID is unknown
/// - `BlockError::TagRejected` if Shopify rejects the tag (stock untouched)
/// - `BlockError::AdjustRejected` if Shopify rejects the adjustment
/// - `BlockError::Process` for transport or response failures
#[instrument(skip_all, fields(order_id = ?order.id, location_id = %settings.location_id))]
pub async fn process_order<A: BlockApi>(
    api: &A,
    settings: &BlockSettings,
    order: &OrderContext,
    products: &[ProductInfo],
) -> Result<ProcessOutcome, BlockError> {
    let Some(order_id) = order.id.as_ref() else {
        return Err(BlockError::MissingOrderId);
    };

    let tags = vec![settings.processed_tag.clone()];
    api.add_tags(order_id, &tags)
        .await
        .map_err(|e| classify(e, BlockError::TagRejected))?;

    let plan = AdjustmentPlan::deduct(&order.line_items, products);
    for line in &plan.skipped {
        warn!(
            variant_id = %line.variant_id,
            quantity = line.quantity,
            "Line item has no inventory item; not deducted"
        );
    }

    if plan.is_empty() {
        info!("No adjustable line items");
        return Ok(ProcessOutcome::NothingToAdjust {
            skipped: plan.skipped,
        });
    }

    let input = InventoryAdjustInput::fulfillment(plan.changes, settings.location_id.clone());
    if let Err(e) = api.adjust_inventory(&input).await {
        if settings.compensate_tag_on_failure {
            match api.remove_tags(order_id, &tags).await {
                Ok(()) => info!("Removed order tag after failed adjustment"),
                Err(remove_err) => error!(error = %remove_err, "Failed to remove order tag"),
            }
        }
        return Err(classify(e, BlockError::AdjustRejected));
    }

    info!(changes = input.changes.len(), "Inventory adjusted");
    Ok(ProcessOutcome::Adjusted {
        changes: input.changes,
        skipped: plan.skipped,
    })
}

/// User errors map to the step's own error; everything else is generic.
fn classify(err: AdminShopifyError, rejected: fn(AdminShopifyError) -> BlockError) -> BlockError {
    if err.is_user_error() {
        rejected(err)
    } else {
        BlockError::Process(err)
    }
}
