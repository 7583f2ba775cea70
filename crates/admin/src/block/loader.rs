//! Inventory loader.

use std::collections::HashMap;

use stock_block_core::bundle::{BundleEntry, component_ids, parse_bundle_components};
use stock_block_core::{BundleComponentInfo, LocationGid, OrderContext, ProductInfo, VariantGid};
use tracing::{debug, instrument};

use super::{BlockApi, BlockError};
use crate::shopify::{ComponentStock, VariantStock};

/// Load display-ready stock for an order's line items.
///
/// Products come back in line-item order; a variant referenced by two line
/// items appears twice. Any failure discards everything loaded so far.
///
/// # Errors
///
/// Returns `BlockError::Load` if either fetch fails.
#[instrument(skip_all, fields(order_id = ?order.id, lines = order.line_items.len(), location_id = %location_id))]
pub async fn load_inventory<A: BlockApi>(
    api: &A,
    location_id: &LocationGid,
    order: &OrderContext,
) -> Result<Vec<ProductInfo>, BlockError> {
    if order.line_items.is_empty() {
        return Ok(Vec::new());
    }

    let variants = api
        .variant_stock(&order.variant_ids(), location_id)
        .await
        .map_err(BlockError::Load)?;

    let bundles: Vec<Option<Vec<BundleEntry>>> = variants
        .iter()
        .map(|v| parse_bundle_components(v.bundle_metafield.as_deref()))
        .collect();

    let ids = component_ids(bundles.iter().flatten().map(Vec::as_slice));
    let components: HashMap<VariantGid, ComponentStock> = if ids.is_empty() {
        HashMap::new()
    } else {
        debug!(components = ids.len(), "Fetching bundle components");
        api.component_stock(&ids, location_id)
            .await
            .map_err(BlockError::Load)?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect()
    };

    Ok(variants
        .into_iter()
        .zip(bundles)
        .map(|(variant, entries)| to_product(variant, entries, &components))
        .collect())
}

fn to_product(
    variant: VariantStock,
    entries: Option<Vec<BundleEntry>>,
    components: &HashMap<VariantGid, ComponentStock>,
) -> ProductInfo {
    let bundle_components = entries.map(|entries| {
        entries
            .into_iter()
            .map(|entry| {
                let found = components.get(&entry.variant_id);
                BundleComponentInfo {
                    display_name: found.map_or_else(
                        || entry.variant_id.to_string(),
                        |c| c.display_name.clone(),
                    ),
                    inventory_quantity: found.and_then(|c| c.available),
                    quantity_per_bundle: entry.quantity,
                    id: entry.variant_id,
                }
            })
            .collect()
    });

    ProductInfo {
        id: variant.id,
        display_name: variant.display_name,
        inventory_item_id: variant.inventory_item_id,
        inventory_quantity: variant.available,
        bundle_components,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::block::fake::{Call, FakeApi, inventory_item, location, variant};
    use stock_block_core::{LineItem, OrderGid};

    fn order(lines: &[(u32, i64)]) -> OrderContext {
        OrderContext::new(
            OrderGid::new("gid://shopify/Order/1"),
            lines
                .iter()
                .map(|&(n, quantity)| LineItem {
                    variant_id: variant(n),
                    quantity,
                })
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_empty_order_makes_no_calls() {
        let api = FakeApi::new();
        let products = load_inventory(&api, &location(), &OrderContext::default())
            .await
            .unwrap();

        assert!(products.is_empty());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_plain_variants_keep_line_order() {
        let api = FakeApi::new()
            .with_variant(2, "Oolong", 4)
            .with_variant(1, "Sencha", 9);

        let products = load_inventory(&api, &location(), &order(&[(1, 1), (2, 1)]))
            .await
            .unwrap();

        let names: Vec<_> = products.iter().map(|p| p.display_name.as_str()).collect();
        assert_eq!(names, vec!["Sencha", "Oolong"]);
        assert_eq!(products.first().unwrap().inventory_quantity, Some(9));
        assert!(products.iter().all(|p| p.bundle_components.is_none()));
        assert_eq!(
            api.calls(),
            vec![Call::VariantStock(vec![variant(1), variant(2)], location())]
        );
    }

    #[tokio::test]
    async fn test_untracked_variant_has_no_quantity() {
        let api = FakeApi::new().with_untracked_variant(3, "Gift card");
        let products = load_inventory(&api, &location(), &order(&[(3, 1)]))
            .await
            .unwrap();

        let product = products.first().unwrap();
        assert!(product.inventory_item_id.is_none());
        assert!(product.inventory_quantity.is_none());
    }

    #[tokio::test]
    async fn test_bundle_components_are_resolved() {
        let api = FakeApi::new()
            .with_variant(10, "Tasting set", 2)
            .with_metafield(
                10,
                r#"[{"variantId":"gid://shopify/ProductVariant/1","quantity":2}]"#,
            )
            .with_component(1, "Sencha - 50g", Some(14));

        let products = load_inventory(&api, &location(), &order(&[(10, 1)]))
            .await
            .unwrap();

        let components = products.first().unwrap().bundle_components.clone().unwrap();
        assert_eq!(
            components,
            vec![BundleComponentInfo {
                id: variant(1),
                display_name: "Sencha - 50g".to_string(),
                inventory_quantity: Some(14),
                quantity_per_bundle: 2,
            }]
        );
        assert_eq!(
            api.count(|c| matches!(c, Call::ComponentStock(..))),
            1,
            "components are fetched in one batch"
        );
    }

    #[tokio::test]
    async fn test_missing_component_falls_back_to_id() {
        let api = FakeApi::new().with_variant(10, "Tasting set", 2).with_metafield(
            10,
            r#"[{"variantId":"gid://shopify/ProductVariant/404","quantity":1}]"#,
        );

        let products = load_inventory(&api, &location(), &order(&[(10, 1)]))
            .await
            .unwrap();

        let components = products.first().unwrap().bundle_components.clone().unwrap();
        let component = components.first().unwrap();
        assert_eq!(component.display_name, "gid://shopify/ProductVariant/404");
        assert_eq!(component.inventory_quantity, None);
    }

    #[tokio::test]
    async fn test_malformed_metafield_means_no_bundle() {
        let api = FakeApi::new()
            .with_variant(1, "Sencha", 5)
            .with_metafield(1, "{not json")
            .with_variant(2, "Oolong", 5)
            .with_metafield(2, r#"{"variantId":"x","quantity":1}"#);

        let products = load_inventory(&api, &location(), &order(&[(1, 1), (2, 1)]))
            .await
            .unwrap();

        assert!(products.iter().all(|p| p.bundle_components.is_none()));
        assert_eq!(api.count(|c| matches!(c, Call::ComponentStock(..))), 0);
    }

    #[tokio::test]
    async fn test_shared_components_are_requested_once() {
        let set = r#"[{"variantId":"gid://shopify/ProductVariant/1","quantity":1}]"#;
        let api = FakeApi::new()
            .with_variant(10, "Set A", 1)
            .with_metafield(10, set)
            .with_variant(11, "Set B", 1)
            .with_metafield(11, set)
            .with_component(1, "Sencha", Some(3));

        load_inventory(&api, &location(), &order(&[(10, 1), (11, 1)]))
            .await
            .unwrap();

        assert!(
            api.calls()
                .contains(&Call::ComponentStock(vec![variant(1)], location()))
        );
    }

    #[tokio::test]
    async fn test_duplicate_line_items_are_not_deduplicated() {
        let api = FakeApi::new().with_variant(1, "Sencha", 5);
        let products = load_inventory(&api, &location(), &order(&[(1, 1), (1, 2)]))
            .await
            .unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(
            products.first().unwrap().inventory_item_id,
            Some(inventory_item(1))
        );
    }

    #[tokio::test]
    async fn test_variant_failure_aborts_load() {
        let mut api = FakeApi::new().with_variant(1, "Sencha", 5);
        api.fail_variant_stock = true;

        let err = load_inventory(&api, &location(), &order(&[(1, 1)]))
            .await
            .unwrap_err();
        assert!(matches!(err, BlockError::Load(_)));
    }

    #[tokio::test]
    async fn test_component_failure_discards_products() {
        let mut api = FakeApi::new().with_variant(10, "Set", 1).with_metafield(
            10,
            r#"[{"variantId":"gid://shopify/ProductVariant/1","quantity":1}]"#,
        );
        api.fail_component_stock = true;

        let result = load_inventory(&api, &location(), &order(&[(10, 1)])).await;
        assert!(matches!(result, Err(BlockError::Load(_))));
    }
}
