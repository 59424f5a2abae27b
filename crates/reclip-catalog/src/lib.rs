//! Catalog store for recordings and clips.
//!
//! The pipeline talks to the catalog through the [`CatalogStore`] trait
//! so tests can substitute an in-memory fake; [`SqliteCatalog`] is the
//! production implementation.

pub mod error;
pub mod metrics;
pub mod migrations;
pub mod sqlite;
pub mod store;

pub use error::{CatalogError, CatalogResult};
pub use sqlite::SqliteCatalog;
pub use store::CatalogStore;
