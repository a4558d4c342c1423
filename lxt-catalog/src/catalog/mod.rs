//! Catalog data model and live store

pub mod models;
pub mod store;

pub use models::{
    BRANCHES, Branch, Cart, CartLine, CatalogEntry, RowOrigin, USED_CATEGORY, find_branch,
};
pub use store::Catalog;
