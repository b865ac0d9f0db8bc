//! Product catalog wiring.
//!
//! This module wraps the JSON catalog under `catalog/products.json` so the
//! query engine and compare tray can work from a validated snapshot with
//! consistent identifiers. Types here mirror the schema fields; callers use
//! `CatalogIndex` for lookups by product id and category.

pub mod identity;
pub mod index;
pub mod model;
pub mod money;

pub use identity::{CatalogKey, CategoryFilter, CategoryId, ProductId};
pub use index::{CATALOG_SCHEMA_VERSION, CatalogIndex};
pub use model::{
    Badge, Catalog, CategoryMeta, FeatureValue, FilterKind, FilterSpec, Product, SEED_CATALOG,
};
pub use money::{Money, format_inr};

pub use model::parse_catalog;
