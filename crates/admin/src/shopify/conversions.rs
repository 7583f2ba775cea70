//! Wire response shapes and their conversion to domain types.

use serde::Deserialize;
use stock_block_core::{InventoryItemGid, LineItem, LocationGid, OrderContext, OrderGid, VariantGid};

use super::types::{ComponentStock, Location, UserError, VariantStock};

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct OrderResponse {
    pub order: Option<OrderNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct OrderNode {
    pub id: String,
    pub name: Option<String>,
    pub line_items: NodeList<LineItemNode>,
}

#[derive(Debug, Deserialize)]
pub(super) struct NodeList<T> {
    pub nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LineItemNode {
    pub quantity: i64,
    pub variant: Option<IdNode>,
}

#[derive(Debug, Deserialize)]
pub(super) struct IdNode {
    pub id: String,
}

/// Response of a `nodes(ids:)` query; unknown IDs come back as `null` and
/// non-variant nodes as `{}`.
#[derive(Debug, Deserialize)]
pub(super) struct NodesResponse<T> {
    pub nodes: Vec<Option<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct VariantNode {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub inventory_item: Option<InventoryItemNode>,
    pub metafield: Option<MetafieldNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct InventoryItemNode {
    pub id: Option<String>,
    pub inventory_level: Option<InventoryLevelNode>,
}

#[derive(Debug, Deserialize)]
pub(super) struct InventoryLevelNode {
    #[serde(default)]
    pub quantities: Vec<QuantityNode>,
}

#[derive(Debug, Deserialize)]
pub(super) struct QuantityNode {
    pub name: String,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct MetafieldNode {
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LocationsResponse {
    pub locations: NodeList<LocationNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LocationNode {
    pub id: String,
    pub name: String,
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserErrorsPayload {
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TagsAddResponse {
    pub tags_add: Option<UserErrorsPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TagsRemoveResponse {
    pub tags_remove: Option<UserErrorsPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct InventoryAdjustResponse {
    pub inventory_adjust_quantities: Option<UserErrorsPayload>,
}

// =============================================================================
// Conversions
// =============================================================================

/// Convert an order node, dropping lines without a variant (custom items).
pub(super) fn convert_order(node: OrderNode) -> OrderContext {
    let line_items = node
        .line_items
        .nodes
        .into_iter()
        .filter_map(|line| {
            line.variant.map(|variant| LineItem {
                variant_id: VariantGid::new(variant.id),
                quantity: line.quantity,
            })
        })
        .collect();

    OrderContext {
        id: Some(OrderGid::new(node.id)),
        name: node.name,
        line_items,
    }
}

fn available_quantity(level: Option<&InventoryLevelNode>) -> Option<i64> {
    level?
        .quantities
        .iter()
        .find(|q| q.name == "available")
        .map(|q| q.quantity)
}

/// Convert variant nodes, keeping response order and dropping null or
/// non-variant nodes.
pub(super) fn convert_variant_nodes(nodes: Vec<Option<VariantNode>>) -> Vec<VariantStock> {
    nodes
        .into_iter()
        .flatten()
        .filter_map(|node| {
            let id = node.id?;
            let inventory_item = node.inventory_item.as_ref();
            Some(VariantStock {
                display_name: node.display_name.unwrap_or_else(|| id.clone()),
                inventory_item_id: inventory_item
                    .and_then(|item| item.id.clone())
                    .map(InventoryItemGid::new),
                available: available_quantity(
                    inventory_item.and_then(|item| item.inventory_level.as_ref()),
                ),
                bundle_metafield: node.metafield.and_then(|m| m.value),
                id: VariantGid::new(id),
            })
        })
        .collect()
}

/// Convert component nodes the same way as variant nodes.
pub(super) fn convert_component_nodes(nodes: Vec<Option<VariantNode>>) -> Vec<ComponentStock> {
    convert_variant_nodes(nodes)
        .into_iter()
        .map(|variant| ComponentStock {
            id: variant.id,
            display_name: variant.display_name,
            available: variant.available,
        })
        .collect()
}

pub(super) fn convert_locations(response: LocationsResponse) -> Vec<Location> {
    response
        .locations
        .nodes
        .into_iter()
        .map(|node| Location {
            id: LocationGid::new(node.id),
            name: node.name,
            is_active: node.is_active,
        })
        .collect()
}

/// Join user errors into the message carried by `AdminShopifyError::UserError`.
pub(super) fn format_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_convert_variant_nodes_reads_available_level() {
        let response: NodesResponse<VariantNode> = serde_json::from_value(json!({
            "nodes": [
                {
                    "id": "gid://shopify/ProductVariant/1",
                    "displayName": "Sencha - 100g",
                    "inventoryItem": {
                        "id": "gid://shopify/InventoryItem/11",
                        "inventoryLevel": {
                            "quantities": [{"name": "available", "quantity": 7}]
                        }
                    },
                    "metafield": {"value": "[]"}
                },
                null,
                {},
                {
                    "id": "gid://shopify/ProductVariant/2",
                    "displayName": "Gift card",
                    "inventoryItem": null,
                    "metafield": null
                }
            ]
        }))
        .unwrap();

        let variants = convert_variant_nodes(response.nodes);
        assert_eq!(variants.len(), 2);

        let first = variants.first().unwrap();
        assert_eq!(first.display_name, "Sencha - 100g");
        assert_eq!(
            first.inventory_item_id.as_ref().map(InventoryItemGid::as_str),
            Some("gid://shopify/InventoryItem/11")
        );
        assert_eq!(first.available, Some(7));
        assert_eq!(first.bundle_metafield.as_deref(), Some("[]"));

        let second = variants.get(1).unwrap();
        assert!(second.inventory_item_id.is_none());
        assert!(second.available.is_none());
    }

    #[test]
    fn test_convert_variant_nodes_without_level_at_location() {
        let response: NodesResponse<VariantNode> = serde_json::from_value(json!({
            "nodes": [{
                "id": "gid://shopify/ProductVariant/3",
                "displayName": "Matcha",
                "inventoryItem": {"id": "gid://shopify/InventoryItem/33", "inventoryLevel": null}
            }]
        }))
        .unwrap();

        let variants = convert_variant_nodes(response.nodes);
        let variant = variants.first().unwrap();
        assert!(variant.inventory_item_id.is_some());
        assert_eq!(variant.available, None);
    }

    #[test]
    fn test_convert_order_drops_custom_lines() {
        let response: OrderResponse = serde_json::from_value(json!({
            "order": {
                "id": "gid://shopify/Order/5",
                "name": "#1005",
                "lineItems": {"nodes": [
                    {"quantity": 2, "variant": {"id": "gid://shopify/ProductVariant/1"}},
                    {"quantity": 1, "variant": null}
                ]}
            }
        }))
        .unwrap();

        let order = convert_order(response.order.unwrap());
        assert_eq!(order.name.as_deref(), Some("#1005"));
        assert_eq!(order.line_items.len(), 1);
        assert_eq!(order.line_items.first().unwrap().quantity, 2);
    }

    #[test]
    fn test_format_user_errors() {
        let errors = vec![
            UserError {
                field: Some(vec!["id".to_string()]),
                message: "Order does not exist".to_string(),
            },
            UserError {
                field: None,
                message: "Try again".to_string(),
            },
        ];
        assert_eq!(
            format_user_errors(&errors),
            "id: Order does not exist; Try again"
        );
    }
}
