//! Stock Block Core - Shared types library.
//!
//! This crate provides the types used by every stock block component:
//! - `admin` - HTTP service hosting the order block and the log endpoint
//! - `cli` - Operator commands for loading and processing order blocks
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Adjustment planning and metafield parsing live here so they can
//! be tested without a Shopify store.
//!
//! # Modules
//!
//! - [`types`] - Global IDs, order context, product snapshot, adjustments
//! - [`bundle`] - Parsing of the `bundle.components` metafield

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod bundle;
pub mod types;

pub use types::*;
