//! Domain module - core types and business rules
//!
//! Contains the normalized product model, the raw-payload extraction routine
//! and the static crawl catalog (sub-departments, brands, stores) plus the
//! fixed constants of the search API contract.

pub mod catalog;
pub mod constants;
pub mod product;

// Re-export commonly used items
pub use catalog::{STORES, SUB_DEPARTMENTS, SubDepartment};
pub use product::{ExtractError, ProductRecord, load_product};
