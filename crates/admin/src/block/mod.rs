//! Order stock block.
//!
//! The block shows stock for an order's line items (including bundle
//! components) and, on request, tags the order and deducts its line items
//! from the configured location.
//!
//! # Flow
//!
//! ```text
//! load:    order context -> variant stock -> [component stock] -> products
//! process: tagsAdd -> plan from loaded products -> inventoryAdjustQuantities -> reload
//! ```
//!
//! All Shopify access goes through [`BlockApi`], implemented by
//! [`AdminClient`] and by an in-memory fake in tests.

mod loader;
mod processor;
mod view;

#[cfg(test)]
pub(crate) mod fake;

use std::future::Future;

use stock_block_core::{LocationGid, OrderContext, OrderGid, VariantGid};
use thiserror::Error;

use crate::shopify::{
    AdminClient, AdminShopifyError, ComponentStock, InventoryAdjustInput, VariantStock,
};

pub use loader::load_inventory;
pub use processor::{ProcessOutcome, process_order};
pub use view::{BlockSnapshot, OrderBlockView};

/// Shown when stock could not be loaded.
pub const MSG_LOAD_FAILED: &str = "Не вдалося завантажити залишки товарів";
/// Shown when the order behind the block is unknown.
pub const MSG_MISSING_ORDER: &str = "Не вдалося визначити замовлення";
/// Shown when Shopify rejects the order tag.
pub const MSG_TAG_FAILED: &str = "Не вдалося додати тег до замовлення";
/// Shown when Shopify rejects the stock deduction.
pub const MSG_ADJUST_FAILED: &str = "Не вдалося списати товари зі складу";
/// Shown for any other processing failure.
pub const MSG_PROCESS_FAILED: &str = "Під час обробки замовлення сталася помилка";
/// Shown when a second run is started while one is in flight.
pub const MSG_ALREADY_PROCESSING: &str = "Замовлення вже обробляється";

/// Admin API operations the block depends on.
pub trait BlockApi: Send + Sync {
    /// Read an order's variant-backed line items.
    fn order_context(
        &self,
        id: &OrderGid,
    ) -> impl Future<Output = Result<Option<OrderContext>, AdminShopifyError>> + Send;

    /// Read variants with stock at a location and their bundle metafield.
    fn variant_stock(
        &self,
        ids: &[VariantGid],
        location_id: &LocationGid,
    ) -> impl Future<Output = Result<Vec<VariantStock>, AdminShopifyError>> + Send;

    /// Read bundle component names and stock at a location.
    fn component_stock(
        &self,
        ids: &[VariantGid],
        location_id: &LocationGid,
    ) -> impl Future<Output = Result<Vec<ComponentStock>, AdminShopifyError>> + Send;

    /// Add tags to an order.
    fn add_tags(
        &self,
        id: &OrderGid,
        tags: &[String],
    ) -> impl Future<Output = Result<(), AdminShopifyError>> + Send;

    /// Remove tags from an order.
    fn remove_tags(
        &self,
        id: &OrderGid,
        tags: &[String],
    ) -> impl Future<Output = Result<(), AdminShopifyError>> + Send;

    /// Submit one batched stock adjustment.
    fn adjust_inventory(
        &self,
        input: &InventoryAdjustInput,
    ) -> impl Future<Output = Result<(), AdminShopifyError>> + Send;
}

impl BlockApi for AdminClient {
    async fn order_context(&self, id: &OrderGid) -> Result<Option<OrderContext>, AdminShopifyError> {
        self.get_order_context(id).await
    }

    async fn variant_stock(
        &self,
        ids: &[VariantGid],
        location_id: &LocationGid,
    ) -> Result<Vec<VariantStock>, AdminShopifyError> {
        self.get_variant_stock(ids, location_id).await
    }

    async fn component_stock(
        &self,
        ids: &[VariantGid],
        location_id: &LocationGid,
    ) -> Result<Vec<ComponentStock>, AdminShopifyError> {
        self.get_component_stock(ids, location_id).await
    }

    async fn add_tags(&self, id: &OrderGid, tags: &[String]) -> Result<(), AdminShopifyError> {
        self.add_tags_to_order(id, tags).await
    }

    async fn remove_tags(&self, id: &OrderGid, tags: &[String]) -> Result<(), AdminShopifyError> {
        self.remove_tags_from_order(id, tags).await
    }

    async fn adjust_inventory(&self, input: &InventoryAdjustInput) -> Result<(), AdminShopifyError> {
        self.adjust_inventory_quantities(input).await
    }
}

/// Errors raised while loading or processing a block.
#[derive(Debug, Error)]
pub enum BlockError {
    /// Loading stock failed; partial results were discarded.
    #[error("Inventory load failed: {0}")]
    Load(#[source] AdminShopifyError),

    /// Processing was requested for an order without an ID.
    #[error("Order ID is unknown")]
    MissingOrderId,

    /// Shopify rejected the order tag; no stock was touched.
    #[error("Order tag rejected: {0}")]
    TagRejected(#[source] AdminShopifyError),

    /// Shopify rejected the stock adjustment.
    #[error("Inventory adjustment rejected: {0}")]
    AdjustRejected(#[source] AdminShopifyError),

    /// Transport or schema failure while processing.
    #[error("Order processing failed: {0}")]
    Process(#[source] AdminShopifyError),

    /// Another run for the same order is in flight.
    #[error("Order is already being processed")]
    AlreadyProcessing,
}

impl BlockError {
    /// Localized message shown in the block.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Load(_) => MSG_LOAD_FAILED,
            Self::MissingOrderId => MSG_MISSING_ORDER,
            Self::TagRejected(_) => MSG_TAG_FAILED,
            Self::AdjustRejected(_) => MSG_ADJUST_FAILED,
            Self::Process(_) => MSG_PROCESS_FAILED,
            Self::AlreadyProcessing => MSG_ALREADY_PROCESSING,
        }
    }
}
