//! Shipping package assignment for the nursery storefront.
//!
//! Given an order's item quantity and the administrator-defined package
//! catalog, decides which boxes the order ships in, what they weigh and how
//! the result reads on the checkout page.

pub mod api;
pub mod config;
pub mod model;
pub mod planner;
pub mod ranges;
pub mod selector;
pub mod store;
pub mod summary;
pub mod types;

pub use model::{PackageDefinition, PackageDraft, ValidationError};
pub use planner::{DecomposedPackage, ShippingPlan, calculate_packages};
pub use ranges::{RangeValidation, validate_quantity_ranges};
pub use selector::{SelectionTier, select_package_for_quantity};
pub use store::{MemoryBackend, PackageBackend, PackageStore, StoreError};
