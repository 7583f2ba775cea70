//! Stock Block CLI - operator tools for the order stock block.
//!
//! # Usage
//!
//! ```bash
//! # Show stock for an order's line items
//! sb-cli inventory 5123456789
//!
//! # Tag an order and deduct its line items from stock
//! sb-cli process gid://shopify/Order/5123456789
//!
//! # List locations (to pick INVENTORY_LOCATION_ID)
//! sb-cli locations
//! ```
//!
//! # Commands
//!
//! - `inventory` - Load and print the block for an order
//! - `process` - Load, process and print the block for an order
//! - `locations` - List the store's locations

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sb-cli")]
#[command(author, version, about = "Stock Block CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show stock for an order's line items
    Inventory {
        /// Order GID or numeric order ID
        order: String,
    },
    /// Tag an order and deduct its line items from stock
    Process {
        /// Order GID or numeric order ID
        order: String,
    },
    /// List the store's locations
    Locations {
        /// Maximum number of locations to list
        #[arg(short, long, default_value_t = 50)]
        first: i64,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Inventory { order } => commands::block::inventory(&order).await,
        Commands::Process { order } => commands::block::process(&order).await,
        Commands::Locations { first } => commands::locations::list(first).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_locations_default_limit() {
        let cli = Cli::try_parse_from(["sb-cli", "locations"]).unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(cli.command, Commands::Locations { first: 50 }));
    }
}
