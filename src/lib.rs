//! Shared library for the storefront compare screen.
//!
//! The crate exposes the product catalog (typed records plus a validated
//! index), the catalog query, and the bounded compare tray with its derived
//! comparison views. Public functions here form the contract the helper
//! binaries depend on: catalog loading, query, tray operations, and the
//! configuration and logging setup they share.

pub mod catalog;
pub mod comparison;
pub mod config;
pub mod logging;
pub mod query;
mod schema_loader;
pub mod selection;
pub mod session;

pub use catalog::{
    Catalog, CatalogIndex, CatalogKey, CategoryFilter, CategoryId, CategoryMeta, FeatureValue,
    Money, Product, ProductId, format_inr,
};
pub use comparison::{CellValue, ComparisonView, ProductCard, Row, comparison_rows};
pub use config::{CATALOG_ENV, CatalogSource, LOG_ENV, catalog_source};
pub use logging::init_logging;
pub use query::query;
pub use selection::{CompareTray, DisplayMode, TRAY_CAPACITY, TrayChange, TrayState};
pub use session::{CompareSession, SessionSnapshot};

/// Split comma- or whitespace-delimited argument lists into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_accepts_commas_and_spaces() {
        assert_eq!(split_list("ka-1, ka-2 ls-1"), ["ka-1", "ka-2", "ls-1"]);
        assert!(split_list(" , ").is_empty());
    }
}
