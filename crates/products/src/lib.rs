//! Products module: the in-memory product list.
//!
//! Products are bare strings with no identity beyond their text; the list
//! lives for the lifetime of the process.

pub mod catalog;

pub use catalog::{PRODUCT_ADDED, ProductCatalog, deleted_message};
