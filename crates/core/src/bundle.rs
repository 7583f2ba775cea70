//! Bundle composition metafield.
//!
//! A bundle variant carries a `bundle.components` metafield whose value is a
//! JSON array such as:
//!
//! ```json
//! [{"variantId": "gid://shopify/ProductVariant/1", "quantity": 2}]
//! ```
//!
//! Anything that does not match that shape means "not a bundle" rather than
//! an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::VariantGid;

/// Metafield namespace holding bundle composition.
pub const METAFIELD_NAMESPACE: &str = "bundle";

/// Metafield key holding bundle composition.
pub const METAFIELD_KEY: &str = "components";

/// One entry of a bundle's composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    /// Component variant.
    pub variant_id: VariantGid,
    /// Units of the component per bundle.
    pub quantity: i64,
}

/// Parse a `bundle.components` metafield value.
///
/// Entries whose `variantId` is not a string or whose `quantity` is not a
/// number are dropped. Returns `None` when the value is absent, is not a JSON
/// array, or has no valid entries.
#[must_use]
pub fn parse_bundle_components(value: Option<&str>) -> Option<Vec<BundleEntry>> {
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(value?) else {
        return None;
    };

    let entries: Vec<BundleEntry> = items.iter().filter_map(parse_entry).collect();

    (!entries.is_empty()).then_some(entries)
}

fn parse_entry(item: &Value) -> Option<BundleEntry> {
    let variant_id = item.get("variantId")?.as_str()?;
    let quantity = item.get("quantity")?;

    let quantity = match quantity.as_i64() {
        Some(q) => q,
        None => {
            let q = quantity.as_f64()?;
            if !q.is_finite() {
                return None;
            }
            #[allow(clippy::cast_possible_truncation)] // Truncation toward zero is intended
            {
                q.trunc() as i64
            }
        }
    };

    Some(BundleEntry {
        variant_id: VariantGid::new(variant_id),
        quantity,
    })
}

/// Component variant IDs across every entry list, in first-seen order.
#[must_use]
pub fn component_ids<'a>(
    entries: impl IntoIterator<Item = &'a [BundleEntry]>,
) -> Vec<VariantGid> {
    let mut ids: Vec<VariantGid> = Vec::new();
    for entry in entries.into_iter().flatten() {
        if !ids.contains(&entry.variant_id) {
            ids.push(entry.variant_id.clone());
        }
    }
    ids
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_components() {
        let entries = parse_bundle_components(Some(
            r#"[{"variantId":"gid://shopify/ProductVariant/1","quantity":2}]"#,
        ))
        .unwrap();

        assert_eq!(
            entries,
            vec![BundleEntry {
                variant_id: VariantGid::new("gid://shopify/ProductVariant/1"),
                quantity: 2,
            }]
        );
    }

    #[test]
    fn test_parse_absent_value() {
        assert!(parse_bundle_components(None).is_none());
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(parse_bundle_components(Some("not json")).is_none());
        assert!(parse_bundle_components(Some("[{")).is_none());
    }

    #[test]
    fn test_parse_non_array_json() {
        assert!(parse_bundle_components(Some(r#"{"variantId":"x","quantity":1}"#)).is_none());
        assert!(parse_bundle_components(Some("42")).is_none());
        assert!(parse_bundle_components(Some("null")).is_none());
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_bundle_components(Some("[]")).is_none());
    }

    #[test]
    fn test_parse_drops_malformed_entries() {
        let entries = parse_bundle_components(Some(
            r#"[
                {"variantId": 5, "quantity": 1},
                {"variantId": "gid://shopify/ProductVariant/2", "quantity": "3"},
                {"variantId": "gid://shopify/ProductVariant/3"},
                "junk",
                null,
                {"variantId": "gid://shopify/ProductVariant/4", "quantity": 1}
            ]"#,
        ))
        .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries.first().unwrap().variant_id.as_str(),
            "gid://shopify/ProductVariant/4"
        );
    }

    #[test]
    fn test_parse_truncates_fractional_quantity() {
        let entries = parse_bundle_components(Some(
            r#"[{"variantId":"gid://shopify/ProductVariant/1","quantity":2.7}]"#,
        ))
        .unwrap();
        assert_eq!(entries.first().unwrap().quantity, 2);
    }

    #[test]
    fn test_component_ids_are_unique_and_ordered() {
        let a = parse_bundle_components(Some(
            r#"[{"variantId":"v/2","quantity":1},{"variantId":"v/1","quantity":1}]"#,
        ))
        .unwrap();
        let b = parse_bundle_components(Some(r#"[{"variantId":"v/1","quantity":3}]"#)).unwrap();

        let ids = component_ids([a.as_slice(), b.as_slice()]);
        let ids: Vec<&str> = ids.iter().map(VariantGid::as_str).collect();
        assert_eq!(ids, vec!["v/2", "v/1"]);
    }
}
