//! In-memory [`BlockApi`] that records every call.

use std::collections::HashMap;
use std::sync::Mutex;

use stock_block_core::{InventoryItemGid, LocationGid, OrderContext, OrderGid, VariantGid};

use super::BlockApi;
use crate::shopify::{AdminShopifyError, ComponentStock, InventoryAdjustInput, VariantStock};

/// A recorded API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    OrderContext(OrderGid),
    VariantStock(Vec<VariantGid>, LocationGid),
    ComponentStock(Vec<VariantGid>, LocationGid),
    AddTags(OrderGid, Vec<String>),
    RemoveTags(OrderGid, Vec<String>),
    Adjust(InventoryAdjustInput),
}

/// How a fake mutation responds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Reply {
    #[default]
    Ok,
    UserError,
    Transport,
}

impl Reply {
    fn into_result(self) -> Result<(), AdminShopifyError> {
        match self {
            Self::Ok => Ok(()),
            Self::UserError => Err(AdminShopifyError::UserError("field: rejected".to_string())),
            Self::Transport => Err(AdminShopifyError::Unauthorized("token revoked".to_string())),
        }
    }
}

#[derive(Default)]
pub struct FakeApi {
    pub orders: HashMap<OrderGid, OrderContext>,
    pub variants: HashMap<VariantGid, VariantStock>,
    pub components: HashMap<VariantGid, ComponentStock>,
    pub fail_variant_stock: bool,
    pub fail_component_stock: bool,
    pub tag_reply: Reply,
    pub adjust_reply: Reply,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a variant backed by `gid://shopify/InventoryItem/<n>_inv`.
    pub fn with_variant(mut self, n: u32, name: &str, available: i64) -> Self {
        let id = variant(n);
        self.variants.insert(
            id.clone(),
            VariantStock {
                id,
                display_name: name.to_string(),
                inventory_item_id: Some(inventory_item(n)),
                available: Some(available),
                bundle_metafield: None,
            },
        );
        self
    }

    /// Register a variant that tracks no inventory item.
    pub fn with_untracked_variant(mut self, n: u32, name: &str) -> Self {
        let id = variant(n);
        self.variants.insert(
            id.clone(),
            VariantStock {
                id,
                display_name: name.to_string(),
                inventory_item_id: None,
                available: None,
                bundle_metafield: None,
            },
        );
        self
    }

    /// Attach a raw bundle metafield value to a registered variant.
    pub fn with_metafield(mut self, n: u32, value: &str) -> Self {
        if let Some(v) = self.variants.get_mut(&variant(n)) {
            v.bundle_metafield = Some(value.to_string());
        }
        self
    }

    pub fn with_component(mut self, n: u32, name: &str, available: Option<i64>) -> Self {
        let id = variant(n);
        self.components.insert(
            id.clone(),
            ComponentStock {
                id,
                display_name: name.to_string(),
                available,
            },
        );
        self
    }

    pub fn with_order(mut self, order: OrderContext) -> Self {
        if let Some(id) = order.id.clone() {
            self.orders.insert(id, order);
        }
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

pub fn variant(n: u32) -> VariantGid {
    VariantGid::new(format!("gid://shopify/ProductVariant/{n}"))
}

pub fn inventory_item(n: u32) -> InventoryItemGid {
    InventoryItemGid::new(format!("gid://shopify/InventoryItem/{n}_inv"))
}

pub fn location() -> LocationGid {
    LocationGid::new("gid://shopify/Location/77")
}

impl BlockApi for FakeApi {
    async fn order_context(&self, id: &OrderGid) -> Result<Option<OrderContext>, AdminShopifyError> {
        self.record(Call::OrderContext(id.clone()));
        Ok(self.orders.get(id).cloned())
    }

    async fn variant_stock(
        &self,
        ids: &[VariantGid],
        location_id: &LocationGid,
    ) -> Result<Vec<VariantStock>, AdminShopifyError> {
        self.record(Call::VariantStock(ids.to_vec(), location_id.clone()));
        if self.fail_variant_stock {
            return Err(AdminShopifyError::RateLimited(1));
        }
        Ok(ids.iter().filter_map(|id| self.variants.get(id).cloned()).collect())
    }

    async fn component_stock(
        &self,
        ids: &[VariantGid],
        location_id: &LocationGid,
    ) -> Result<Vec<ComponentStock>, AdminShopifyError> {
        self.record(Call::ComponentStock(ids.to_vec(), location_id.clone()));
        if self.fail_component_stock {
            return Err(AdminShopifyError::NotFound("components".to_string()));
        }
        Ok(ids.iter().filter_map(|id| self.components.get(id).cloned()).collect())
    }

    async fn add_tags(&self, id: &OrderGid, tags: &[String]) -> Result<(), AdminShopifyError> {
        self.record(Call::AddTags(id.clone(), tags.to_vec()));
        self.tag_reply.into_result()
    }

    async fn remove_tags(&self, id: &OrderGid, tags: &[String]) -> Result<(), AdminShopifyError> {
        self.record(Call::RemoveTags(id.clone(), tags.to_vec()));
        Ok(())
    }

    async fn adjust_inventory(&self, input: &InventoryAdjustInput) -> Result<(), AdminShopifyError> {
        self.record(Call::Adjust(input.clone()));
        self.adjust_reply.into_result()
    }
}
