//! Stock Block library.
//!
//! This crate provides the order stock block as a library, allowing it to be
//! tested and reused by the CLI.
//!
//! # Security
//!
//! This crate holds a HIGH PRIVILEGE Shopify Admin API token that can tag
//! orders and adjust inventory. Only deploy behind the admin's network
//! boundary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod block;
pub mod config;
pub mod error;
pub mod routes;
pub mod shopify;
pub mod state;
