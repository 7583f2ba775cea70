//! Application state shared across handlers.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use moka::future::Cache;
use stock_block_core::OrderGid;

use crate::block::BlockSnapshot;
use crate::config::BlockConfig;
use crate::shopify::AdminClient;

/// How long a loaded block stays cached.
const SNAPSHOT_TTL: Duration = Duration::from_secs(300);

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: BlockConfig,
    shopify: AdminClient,
    snapshots: Cache<OrderGid, Arc<BlockSnapshot>>,
    processing: Mutex<HashSet<OrderGid>>,
}

impl AppState {
    /// Create a new application state with a client built from `config`.
    #[must_use]
    pub fn new(config: BlockConfig) -> Self {
        let shopify = AdminClient::new(&config.shopify);
        Self::with_client(config, shopify)
    }

    /// Create a new application state around an existing client.
    #[must_use]
    pub fn with_client(config: BlockConfig, shopify: AdminClient) -> Self {
        let snapshots = Cache::builder()
            .max_capacity(1000)
            .time_to_live(SNAPSHOT_TTL)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                shopify,
                snapshots,
                processing: Mutex::new(HashSet::new()),
            }),
        }
    }

    /// Get a reference to the block configuration.
    #[must_use]
    pub fn config(&self) -> &BlockConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify Admin API client.
    #[must_use]
    pub fn shopify(&self) -> &AdminClient {
        &self.inner.shopify
    }

    /// Get the cached snapshot for an order.
    pub async fn snapshot(&self, order_id: &OrderGid) -> Option<Arc<BlockSnapshot>> {
        self.inner.snapshots.get(order_id).await
    }

    /// Cache a freshly loaded snapshot.
    pub async fn store_snapshot(&self, order_id: OrderGid, snapshot: BlockSnapshot) {
        self.inner
            .snapshots
            .insert(order_id, Arc::new(snapshot))
            .await;
    }

    /// Drop the cached snapshot for an order.
    pub async fn invalidate_snapshot(&self, order_id: &OrderGid) {
        self.inner.snapshots.invalidate(order_id).await;
    }

    /// Mark an order as being processed.
    ///
    /// Returns `None` if a run for the order is already in flight. The mark
    /// is cleared when the guard drops.
    #[must_use]
    pub fn begin_processing(&self, order_id: &OrderGid) -> Option<ProcessingGuard> {
        let mut processing = self
            .inner
            .processing
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        processing
            .insert(order_id.clone())
            .then(|| ProcessingGuard {
                state: Arc::clone(&self.inner),
                order_id: order_id.clone(),
            })
    }
}

/// Clears an order's in-flight mark on drop.
pub struct ProcessingGuard {
    state: Arc<AppStateInner>,
    order_id: OrderGid,
}

impl Drop for ProcessingGuard {
    fn drop(&mut self) {
        self.state
            .processing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.order_id);
    }
}
