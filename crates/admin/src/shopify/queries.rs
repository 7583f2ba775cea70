//! GraphQL documents for the Shopify Admin API.
//!
//! Field names and argument shapes follow the Admin API schema; response
//! shapes are mirrored by the wire types in [`super::conversions`].

// =============================================================================
// Order queries
// =============================================================================

/// An order's ID, name and variant-backed line items.
pub const BLOCK_ORDER: &str = r"
query BlockOrder($id: ID!) {
  order(id: $id) {
    id
    name
    lineItems(first: 250) {
      nodes {
        quantity
        variant {
          id
        }
      }
    }
  }
}
";

/// Add tags to an order.
pub const TAGS_ADD: &str = r"
mutation tagsAdd($id: ID!, $tags: [String!]!) {
  tagsAdd(id: $id, tags: $tags) {
    userErrors {
      field
      message
    }
  }
}
";

/// Remove tags from an order.
pub const TAGS_REMOVE: &str = r"
mutation tagsRemove($id: ID!, $tags: [String!]!) {
  tagsRemove(id: $id, tags: $tags) {
    userErrors {
      field
      message
    }
  }
}
";

// =============================================================================
// Inventory queries
// =============================================================================

/// Variants with their stock at one location and the bundle metafield.
pub const BLOCK_VARIANTS: &str = r#"
query BlockVariants(
  $ids: [ID!]!
  $locationId: ID!
  $bundleNamespace: String!
  $bundleKey: String!
) {
  nodes(ids: $ids) {
    ... on ProductVariant {
      id
      displayName
      inventoryItem {
        id
        inventoryLevel(locationId: $locationId) {
          quantities(names: ["available"]) {
            name
            quantity
          }
        }
      }
      metafield(namespace: $bundleNamespace, key: $bundleKey) {
        value
      }
    }
  }
}
"#;

/// Bundle component variants with their stock at one location.
pub const BLOCK_BUNDLE_COMPONENTS: &str = r#"
query BlockBundleComponents($ids: [ID!]!, $locationId: ID!) {
  nodes(ids: $ids) {
    ... on ProductVariant {
      id
      displayName
      inventoryItem {
        inventoryLevel(locationId: $locationId) {
          quantities(names: ["available"]) {
            name
            quantity
          }
        }
      }
    }
  }
}
"#;

/// Store locations.
pub const BLOCK_LOCATIONS: &str = r"
query BlockLocations($first: Int!) {
  locations(first: $first) {
    nodes {
      id
      name
      isActive
    }
  }
}
";

/// Adjust available quantities at a location in one batch.
pub const INVENTORY_ADJUST_QUANTITIES: &str = r"
mutation inventoryAdjustQuantities($input: InventoryAdjustQuantitiesInput!) {
  inventoryAdjustQuantities(input: $input) {
    userErrors {
      field
      message
    }
  }
}
";
