//! Inventory adjustment planning.
//!
//! Adjustments are derived only from the product snapshot already loaded for
//! the view; nothing here performs I/O.

use serde::{Deserialize, Serialize};

use super::gid::{InventoryItemGid, VariantGid};
use super::order::LineItem;
use super::product::ProductInfo;

/// A single change to an inventory item's available quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryAdjustment {
    /// Inventory item to adjust.
    pub inventory_item_id: InventoryItemGid,
    /// Signed change to the available quantity.
    pub available_delta: i64,
}

/// A line item that could not be matched to an inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedLineItem {
    /// Variant the line item references.
    pub variant_id: VariantGid,
    /// Units that were not deducted.
    pub quantity: i64,
}

/// Changes to submit plus the line items left out of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentPlan {
    /// One change per resolvable line item, in line-item order.
    pub changes: Vec<InventoryAdjustment>,
    /// Line items with no loaded product or no inventory item.
    pub skipped: Vec<SkippedLineItem>,
}

impl AdjustmentPlan {
    /// Build the plan that deducts every line item from stock.
    ///
    /// Each line item is matched against `products` by variant ID; the first
    /// match wins. Duplicate line items produce duplicate changes.
    #[must_use]
    pub fn deduct(line_items: &[LineItem], products: &[ProductInfo]) -> Self {
        let mut plan = Self::default();

        for item in line_items {
            let inventory_item_id = products
                .iter()
                .find(|p| p.id == item.variant_id)
                .and_then(|p| p.inventory_item_id.clone());

            match inventory_item_id {
                Some(inventory_item_id) => plan.changes.push(InventoryAdjustment {
                    inventory_item_id,
                    available_delta: -item.quantity,
                }),
                None => plan.skipped.push(SkippedLineItem {
                    variant_id: item.variant_id.clone(),
                    quantity: item.quantity,
                }),
            }
        }

        plan
    }

    /// Whether there is nothing to submit.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(variant: &str, inventory_item: Option<&str>) -> ProductInfo {
        ProductInfo {
            id: VariantGid::new(variant),
            display_name: variant.to_string(),
            inventory_item_id: inventory_item.map(InventoryItemGid::new),
            inventory_quantity: Some(10),
            bundle_components: None,
        }
    }

    fn line(variant: &str, quantity: i64) -> LineItem {
        LineItem {
            variant_id: VariantGid::new(variant),
            quantity,
        }
    }

    #[test]
    fn test_deduct_negates_quantities_in_line_order() {
        let products = vec![product("v/b", Some("inv/b")), product("v/a", Some("inv/a"))];
        let plan = AdjustmentPlan::deduct(&[line("v/a", 1), line("v/b", 3)], &products);

        assert_eq!(
            plan.changes,
            vec![
                InventoryAdjustment {
                    inventory_item_id: InventoryItemGid::new("inv/a"),
                    available_delta: -1,
                },
                InventoryAdjustment {
                    inventory_item_id: InventoryItemGid::new("inv/b"),
                    available_delta: -3,
                },
            ]
        );
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn test_deduct_skips_products_without_inventory_item() {
        let products = vec![product("v/a", None), product("v/b", Some("inv/b"))];
        let plan = AdjustmentPlan::deduct(&[line("v/a", 2), line("v/b", 1)], &products);

        assert_eq!(plan.changes.len(), 1);
        assert_eq!(
            plan.skipped,
            vec![SkippedLineItem {
                variant_id: VariantGid::new("v/a"),
                quantity: 2,
            }]
        );
    }

    #[test]
    fn test_deduct_skips_unloaded_variants() {
        let plan = AdjustmentPlan::deduct(&[line("v/missing", 5)], &[]);
        assert!(plan.is_empty());
        assert_eq!(plan.skipped.len(), 1);
    }

    #[test]
    fn test_deduct_first_match_wins() {
        let products = vec![product("v/a", Some("inv/first")), product("v/a", Some("inv/second"))];
        let plan = AdjustmentPlan::deduct(&[line("v/a", 1)], &products);
        assert_eq!(
            plan.changes.first().map(|c| c.inventory_item_id.as_str()),
            Some("inv/first")
        );
    }

    #[test]
    fn test_deduct_keeps_duplicate_line_items() {
        let products = vec![product("v/a", Some("inv/a"))];
        let plan = AdjustmentPlan::deduct(&[line("v/a", 1), line("v/a", 2)], &products);
        let deltas: Vec<i64> = plan.changes.iter().map(|c| c.available_delta).collect();
        assert_eq!(deltas, vec![-1, -2]);
    }
}
