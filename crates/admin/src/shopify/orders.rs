//! Order read and tagging operations for the Admin API.

use serde_json::json;
use stock_block_core::{OrderContext, OrderGid};
use tracing::instrument;

use super::{
    AdminClient, AdminShopifyError, GraphQLError,
    conversions::{
        OrderResponse, TagsAddResponse, TagsRemoveResponse, UserErrorsPayload, convert_order,
        format_user_errors,
    },
    queries::{BLOCK_ORDER, TAGS_ADD, TAGS_REMOVE},
};

impl AdminClient {
    /// Get an order's line items.
    ///
    /// Returns `None` if the order does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get_order_context(
        &self,
        id: &OrderGid,
    ) -> Result<Option<OrderContext>, AdminShopifyError> {
        let response: OrderResponse = self
            .execute(BLOCK_ORDER, json!({ "id": id.as_str() }))
            .await?;

        Ok(response.order.map(convert_order))
    }

    /// Add tags to an order.
    ///
    /// # Arguments
    ///
    /// * `id` - Shopify order ID
    /// * `tags` - Tags to add
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::UserError` if Shopify rejects the tags.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn add_tags_to_order(
        &self,
        id: &OrderGid,
        tags: &[String],
    ) -> Result<(), AdminShopifyError> {
        let response: TagsAddResponse = self
            .execute(TAGS_ADD, json!({ "id": id.as_str(), "tags": tags }))
            .await?;

        check_payload(response.tags_add, "Tags add failed")
    }

    /// Remove tags from an order.
    ///
    /// # Arguments
    ///
    /// * `id` - Shopify order ID
    /// * `tags` - Tags to remove
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::UserError` if Shopify rejects the request.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn remove_tags_from_order(
        &self,
        id: &OrderGid,
        tags: &[String],
    ) -> Result<(), AdminShopifyError> {
        let response: TagsRemoveResponse = self
            .execute(TAGS_REMOVE, json!({ "id": id.as_str(), "tags": tags }))
            .await?;

        check_payload(response.tags_remove, "Tags remove failed")
    }
}

/// Turn a mutation payload into `Ok` or the matching error.
pub(super) fn check_payload(
    payload: Option<UserErrorsPayload>,
    missing: &str,
) -> Result<(), AdminShopifyError> {
    let Some(payload) = payload else {
        return Err(AdminShopifyError::GraphQL(vec![GraphQLError {
            message: missing.to_string(),
            locations: vec![],
            path: vec![],
        }]));
    };

    if payload.user_errors.is_empty() {
        Ok(())
    } else {
        Err(AdminShopifyError::UserError(format_user_errors(
            &payload.user_errors,
        )))
    }
}
