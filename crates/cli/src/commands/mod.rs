//! CLI subcommands.

pub mod block;
pub mod locations;

use serde::Serialize;
use stock_block_admin::{
    block::BlockError,
    config::{ConfigError, ShopifyAdminConfig},
    shopify::{AdminClient, AdminShopifyError},
};
use stock_block_core::GidError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The order argument is not an order ID.
    #[error("Invalid order ID: {0}")]
    InvalidOrderId(#[from] GidError),

    /// The order does not exist.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Shopify API call failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] AdminShopifyError),

    /// Loading or processing the block failed.
    #[error("{msg}: {0}", msg = .0.user_message())]
    Block(#[from] BlockError),

    /// Output could not be serialised.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Build an Admin API client from the environment.
fn admin_client() -> Result<AdminClient, CliError> {
    dotenvy::dotenv().ok();
    let config = ShopifyAdminConfig::from_env()?;
    tracing::debug!(store = %config.store, "Using store");
    Ok(AdminClient::new(&config))
}

/// Print a value as pretty JSON on stdout.
#[allow(clippy::print_stdout)]
fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
