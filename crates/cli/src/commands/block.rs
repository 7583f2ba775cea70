//! Order block commands.
//!
//! # Usage
//!
//! ```bash
//! sb-cli inventory 5123456789
//! sb-cli process 5123456789
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPIFY_STORE` - Store domain
//! - `SHOPIFY_ADMIN_ACCESS_TOKEN` - Admin API access token
//! - `INVENTORY_LOCATION_ID` - Location stock is read from and deducted at
//! - `BLOCK_PROCESSED_TAG` - Tag applied to processed orders (optional)
//! - `BLOCK_COMPENSATE_TAG` - Remove the tag if the stock write fails (optional)

use stock_block_admin::{block::OrderBlockView, config::BlockSettings, shopify::AdminClient};
use stock_block_core::OrderGid;

use super::{CliError, admin_client, print_json};

/// Load and print the block for an order.
pub async fn inventory(order: &str) -> Result<(), CliError> {
    let order_id = OrderGid::parse(order)?;
    let client = admin_client()?;
    let settings = BlockSettings::from_env()?;

    let view = load_view(&client, &settings, &order_id).await?;
    print_json(&view)
}

/// Load the block for an order, process it, and print the result.
pub async fn process(order: &str) -> Result<(), CliError> {
    let order_id = OrderGid::parse(order)?;
    let client = admin_client()?;
    let settings = BlockSettings::from_env()?;

    let mut view = load_view(&client, &settings, &order_id).await?;

    tracing::info!(
        order_id = %order_id,
        tag = %settings.processed_tag,
        location_id = %settings.location_id,
        "Processing order"
    );
    view.process(&client, &settings).await?;

    if let Some(error) = &view.error {
        tracing::warn!("Processed, but reload failed: {error}");
    }
    print_json(&view)
}

async fn load_view(
    client: &AdminClient,
    settings: &BlockSettings,
    order_id: &OrderGid,
) -> Result<OrderBlockView, CliError> {
    OrderBlockView::open(client, order_id, &settings.location_id)
        .await?
        .ok_or_else(|| CliError::OrderNotFound(order_id.to_string()))
}
