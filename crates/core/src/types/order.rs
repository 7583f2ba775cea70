//! Order context types.

use serde::{Deserialize, Serialize};

use super::gid::{OrderGid, VariantGid};

/// A single order line as seen by the stock block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Variant the line was sold as.
    pub variant_id: VariantGid,
    /// Units ordered.
    pub quantity: i64,
}

/// The order a block view is rendered for.
///
/// `id` is optional because the host context may not resolve the order;
/// processing refuses to run without it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderContext {
    /// Order ID.
    pub id: Option<OrderGid>,
    /// Order name (e.g., "#1001").
    pub name: Option<String>,
    /// Line items that reference a variant, in order.
    pub line_items: Vec<LineItem>,
}

impl OrderContext {
    /// Create a context for a known order.
    #[must_use]
    pub const fn new(id: OrderGid, line_items: Vec<LineItem>) -> Self {
        Self {
            id: Some(id),
            name: None,
            line_items,
        }
    }

    /// Variant IDs of every line item, duplicates included.
    #[must_use]
    pub fn variant_ids(&self) -> Vec<VariantGid> {
        self.line_items
            .iter()
            .map(|item| item.variant_id.clone())
            .collect()
    }
}
