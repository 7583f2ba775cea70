//! Display-ready product and bundle component types.

use serde::{Deserialize, Serialize};

use super::gid::{InventoryItemGid, VariantGid};

/// A line item's variant with its stock at the configured location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    /// Variant ID.
    pub id: VariantGid,
    /// Product and variant title as shown in the admin.
    pub display_name: String,
    /// Backing inventory item, if the variant tracks one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_item_id: Option<InventoryItemGid>,
    /// Available quantity at the location, if a level exists there.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_quantity: Option<i64>,
    /// Components declared by the bundle metafield.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_components: Option<Vec<BundleComponentInfo>>,
}

/// A variant that a bundle is composed of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleComponentInfo {
    /// Component variant ID.
    pub id: VariantGid,
    /// Display name, or the ID when the component could not be fetched.
    pub display_name: String,
    /// Available quantity at the location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_quantity: Option<i64>,
    /// Units of this component in one bundle.
    pub quantity_per_bundle: i64,
}
