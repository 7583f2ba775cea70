//! Domain types returned by and sent to the Admin API client.

use serde::{Deserialize, Serialize};
use stock_block_core::{InventoryAdjustment, InventoryItemGid, LocationGid, VariantGid};

// =============================================================================
// Location Types
// =============================================================================

/// A physical location for inventory storage and fulfillment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Location ID.
    pub id: LocationGid,
    /// Location name.
    pub name: String,
    /// Whether the location is active.
    pub is_active: bool,
}

// =============================================================================
// Inventory Types
// =============================================================================

/// A line item variant's stock and bundle metafield at one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantStock {
    /// Variant ID.
    pub id: VariantGid,
    /// Display name ("Product - Variant").
    pub display_name: String,
    /// Backing inventory item, if any.
    pub inventory_item_id: Option<InventoryItemGid>,
    /// Available quantity, if the item is stocked at the location.
    pub available: Option<i64>,
    /// Raw `bundle.components` metafield value.
    pub bundle_metafield: Option<String>,
}

/// A bundle component's stock at one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentStock {
    /// Component variant ID.
    pub id: VariantGid,
    /// Display name.
    pub display_name: String,
    /// Available quantity, if the item is stocked at the location.
    pub available: Option<i64>,
}

/// Reason recorded for a stock deduction made by the block.
pub const ADJUSTMENT_REASON: &str = "fulfillment";

/// Actor label recorded for a stock deduction made by the block.
pub const ADJUSTMENT_NAME: &str = "web";

/// Input for the `inventoryAdjustQuantities` mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryAdjustInput {
    /// Reason code.
    pub reason: String,
    /// Actor label.
    pub name: String,
    /// Changes to apply.
    pub changes: Vec<InventoryAdjustment>,
    /// Location all changes apply to.
    pub location_id: LocationGid,
}

impl InventoryAdjustInput {
    /// Build the fulfillment deduction for a set of changes.
    #[must_use]
    pub fn fulfillment(changes: Vec<InventoryAdjustment>, location_id: LocationGid) -> Self {
        Self {
            reason: ADJUSTMENT_REASON.to_string(),
            name: ADJUSTMENT_NAME.to_string(),
            changes,
            location_id,
        }
    }
}

/// A field-level error returned by a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserError {
    /// Path to the offending input field.
    pub field: Option<Vec<String>>,
    /// Human-readable message.
    pub message: String,
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) if !field.is_empty() => write!(f, "{}: {}", field.join("."), self.message),
            _ => f.write_str(&self.message),
        }
    }
}
