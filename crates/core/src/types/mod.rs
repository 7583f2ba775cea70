//! Core types for the stock block.
//!
//! This module provides type-safe wrappers for orders, products and
//! inventory adjustments.

pub mod adjustment;
pub mod gid;
pub mod order;
pub mod product;

pub use adjustment::{AdjustmentPlan, InventoryAdjustment, SkippedLineItem};
pub use gid::*;
pub use order::{LineItem, OrderContext};
pub use product::{BundleComponentInfo, ProductInfo};
