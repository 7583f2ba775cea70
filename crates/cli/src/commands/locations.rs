//! Location listing.
//!
//! Prints every location with its ID so the operator can set
//! `INVENTORY_LOCATION_ID`.

use super::{CliError, admin_client, print_json};

/// List the store's locations.
pub async fn list(first: i64) -> Result<(), CliError> {
    let client = admin_client()?;
    let locations = client.get_locations(first).await?;

    if locations.is_empty() {
        tracing::warn!("Store has no locations");
    }
    for location in locations.iter().filter(|l| !l.is_active) {
        tracing::warn!(location_id = %location.id, "Location {} is inactive", location.name);
    }

    print_json(&locations)
}
