//! Block view state.

use serde::Serialize;
use stock_block_core::{LocationGid, OrderContext, OrderGid, ProductInfo};
use tracing::{debug, warn};

use super::{BlockApi, BlockError, ProcessOutcome, load_inventory, process_order};
use crate::config::BlockSettings;

/// A loaded order and its products, as cached between requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSnapshot {
    pub order: OrderContext,
    pub products: Vec<ProductInfo>,
}

/// What the block renders for one order.
///
/// Every operation leaves `is_loading` and `is_processing` cleared when it
/// returns, whatever the outcome. Failures are shown through `error` as a
/// generic localized message; the cause is only logged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBlockView {
    pub order: OrderContext,
    pub products: Vec<ProductInfo>,
    pub is_loading: bool,
    pub is_processing: bool,
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_outcome: Option<ProcessOutcome>,
}

impl OrderBlockView {
    /// A view for an order with nothing loaded yet.
    #[must_use]
    pub fn new(order: OrderContext) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    /// Read an order and load its products.
    ///
    /// Returns `None` if Shopify has no such order.
    ///
    /// # Errors
    ///
    /// Returns `BlockError::Load` if the order or its stock cannot be read.
    pub async fn open<A: BlockApi>(
        api: &A,
        order_id: &OrderGid,
        location_id: &LocationGid,
    ) -> Result<Option<Self>, BlockError> {
        let order = match api.order_context(order_id).await {
            Ok(Some(order)) => order,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!(error = %e, order_id = %order_id, "Order lookup failed");
                return Err(BlockError::Load(e));
            }
        };

        let mut view = Self::new(order);
        view.load(api, location_id).await?;
        Ok(Some(view))
    }

    /// A view restored from a cached snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &BlockSnapshot) -> Self {
        Self {
            order: snapshot.order.clone(),
            products: snapshot.products.clone(),
            ..Self::default()
        }
    }

    /// The order and products currently shown.
    #[must_use]
    pub fn snapshot(&self) -> BlockSnapshot {
        BlockSnapshot {
            order: self.order.clone(),
            products: self.products.clone(),
        }
    }

    /// Load products for the order, replacing what is shown.
    ///
    /// # Errors
    ///
    /// Returns `BlockError::Load` if loading fails; the product list is
    /// cleared in that case.
    pub async fn load<A: BlockApi>(
        &mut self,
        api: &A,
        location_id: &LocationGid,
    ) -> Result<(), BlockError> {
        self.is_loading = true;
        self.error = None;

        let result = load_inventory(api, location_id, &self.order).await;
        self.is_loading = false;

        match result {
            Ok(products) => {
                self.products = products;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Inventory load failed");
                self.products.clear();
                self.error = Some(e.user_message().to_string());
                Err(e)
            }
        }
    }

    /// Process the order against the products currently shown, then reload
    /// them if stock was deducted.
    ///
    /// A failed reload is shown through `error` but does not turn a completed
    /// adjustment into an error.
    ///
    /// # Errors
    ///
    /// Returns the processor's `BlockError`; see [`process_order`].
    pub async fn process<A: BlockApi>(
        &mut self,
        api: &A,
        settings: &BlockSettings,
    ) -> Result<ProcessOutcome, BlockError> {
        self.is_processing = true;
        self.error = None;

        let result = process_order(api, settings, &self.order, &self.products).await;

        match &result {
            Ok(outcome) => {
                self.last_outcome = Some(outcome.clone());
                if matches!(outcome, ProcessOutcome::Adjusted { .. })
                    && let Err(e) = self.load(api, &settings.location_id).await
                {
                    debug!(error = %e, "Reload after adjustment failed");
                }
            }
            Err(e) => {
                warn!(error = %e, "Order processing failed");
                self.error = Some(e.user_message().to_string());
            }
        }

        self.is_processing = false;
        result
    }
}
