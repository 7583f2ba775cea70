//! Location and inventory operations for the Admin API.

use serde_json::json;
use stock_block_core::{LocationGid, VariantGid, bundle};
use tracing::instrument;

use super::{
    AdminClient, AdminShopifyError,
    conversions::{
        InventoryAdjustResponse, LocationsResponse, NodesResponse, VariantNode,
        convert_component_nodes, convert_locations, convert_variant_nodes,
    },
    orders::check_payload,
    queries::{
        BLOCK_BUNDLE_COMPONENTS, BLOCK_LOCATIONS, BLOCK_VARIANTS, INVENTORY_ADJUST_QUANTITIES,
    },
    types::{ComponentStock, InventoryAdjustInput, Location, VariantStock},
};

impl AdminClient {
    /// Get the store's locations.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_locations(&self, first: i64) -> Result<Vec<Location>, AdminShopifyError> {
        let response: LocationsResponse = self
            .execute(BLOCK_LOCATIONS, json!({ "first": first }))
            .await?;

        Ok(convert_locations(response))
    }

    /// Get variants with their stock at a location and their bundle metafield.
    ///
    /// IDs are sent as given, duplicates included; unknown IDs are dropped
    /// from the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, ids), fields(count = ids.len(), location_id = %location_id))]
    pub async fn get_variant_stock(
        &self,
        ids: &[VariantGid],
        location_id: &LocationGid,
    ) -> Result<Vec<VariantStock>, AdminShopifyError> {
        let response: NodesResponse<VariantNode> = self
            .execute(
                BLOCK_VARIANTS,
                json!({
                    "ids": ids,
                    "locationId": location_id,
                    "bundleNamespace": bundle::METAFIELD_NAMESPACE,
                    "bundleKey": bundle::METAFIELD_KEY,
                }),
            )
            .await?;

        Ok(convert_variant_nodes(response.nodes))
    }

    /// Get bundle component names and stock at a location.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, ids), fields(count = ids.len(), location_id = %location_id))]
    pub async fn get_component_stock(
        &self,
        ids: &[VariantGid],
        location_id: &LocationGid,
    ) -> Result<Vec<ComponentStock>, AdminShopifyError> {
        let response: NodesResponse<VariantNode> = self
            .execute(
                BLOCK_BUNDLE_COMPONENTS,
                json!({ "ids": ids, "locationId": location_id }),
            )
            .await?;

        Ok(convert_component_nodes(response.nodes))
    }

    /// Adjust available quantities at one location in a single batch.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::UserError` if Shopify rejects the changes.
    #[instrument(
        skip(self, input),
        fields(location_id = %input.location_id, changes = input.changes.len())
    )]
    pub async fn adjust_inventory_quantities(
        &self,
        input: &InventoryAdjustInput,
    ) -> Result<(), AdminShopifyError> {
        let response: InventoryAdjustResponse = self
            .execute(INVENTORY_ADJUST_QUANTITIES, json!({ "input": input }))
            .await?;

        check_payload(
            response.inventory_adjust_quantities,
            "Inventory adjustment failed",
        )
    }
}
