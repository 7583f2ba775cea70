//! Newtype Shopify global IDs for type-safe entity references.
//!
//! Use the `define_gid!` macro to create wrappers that prevent accidentally
//! passing a variant ID where an inventory item ID is expected.

/// Errors that can occur when parsing a global ID.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GidError {
    /// The input string is empty.
    #[error("id cannot be empty")]
    Empty,
    /// The input is neither a numeric id nor a gid of the expected type.
    #[error("expected a numeric id or gid://shopify/{expected}/..., got '{input}'")]
    WrongType {
        /// Resource type the ID must name.
        expected: &'static str,
        /// The rejected input.
        input: String,
    },
}

/// Macro to define a type-safe global ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `new()` for trusted wire values, `parse()` for user input
/// - `Display`, `FromStr` and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use stock_block_core::define_gid;
/// define_gid!(ShopGid, "Shop");
///
/// let gid: ShopGid = "42".parse().unwrap();
/// assert_eq!(gid.as_str(), "gid://shopify/Shop/42");
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident, $resource:literal) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Resource name used in the `gid://shopify/<resource>/` prefix.
            pub const RESOURCE: &'static str = $resource;

            /// Wrap an ID returned by the API without validation.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Parse user input, accepting a full gid or a bare numeric id.
            ///
            /// # Errors
            ///
            /// Returns an error if the input is empty, or is neither numeric
            /// nor a gid for this resource type.
            pub fn parse(input: &str) -> Result<Self, $crate::GidError> {
                $crate::types::gid::normalize(input, $resource).map(Self)
            }

            /// Get the full gid string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::GidError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_gid!(OrderGid, "Order");
define_gid!(VariantGid, "ProductVariant");
define_gid!(InventoryItemGid, "InventoryItem");
define_gid!(LocationGid, "Location");

/// Normalise user input to `gid://shopify/<resource>/<id>`.
#[doc(hidden)]
pub fn normalize(input: &str, resource: &'static str) -> Result<String, GidError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(GidError::Empty);
    }

    if input.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(format!("gid://shopify/{resource}/{input}"));
    }

    let tail = input
        .strip_prefix("gid://shopify/")
        .and_then(|rest| rest.strip_prefix(resource))
        .and_then(|rest| rest.strip_prefix('/'));

    match tail {
        Some(id) if !id.is_empty() => Ok(input.to_string()),
        _ => Err(GidError::WrongType {
            expected: resource,
            input: input.to_string(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_id() {
        let gid = OrderGid::parse("1001").unwrap();
        assert_eq!(gid.as_str(), "gid://shopify/Order/1001");
    }

    #[test]
    fn test_parse_full_gid() {
        let gid = VariantGid::parse("gid://shopify/ProductVariant/7").unwrap();
        assert_eq!(gid.to_string(), "gid://shopify/ProductVariant/7");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let gid = LocationGid::parse("  55 ").unwrap();
        assert_eq!(gid.as_str(), "gid://shopify/Location/55");
    }

    #[test]
    fn test_parse_rejects_other_resource() {
        let err = OrderGid::parse("gid://shopify/ProductVariant/7").unwrap_err();
        assert!(matches!(err, GidError::WrongType { .. }));
        assert!(err.to_string().contains("gid://shopify/Order/"));
    }

    #[test]
    fn test_parse_rejects_prefix_collision() {
        // "ProductVariant" must not satisfy a "Product" gid.
        define_gid!(ProductGid, "Product");
        assert!(ProductGid::parse("gid://shopify/ProductVariant/7").is_err());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(InventoryItemGid::parse("").unwrap_err(), GidError::Empty);
        assert!(InventoryItemGid::parse("gid://shopify/InventoryItem/").is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let gid = VariantGid::new("gid://shopify/ProductVariant/1");
        let json = serde_json::to_string(&gid).unwrap();
        assert_eq!(json, "\"gid://shopify/ProductVariant/1\"");
        let back: VariantGid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, gid);
    }
}
