//! Category and free-text filtering over an indexed catalog.

use crate::catalog::{CatalogIndex, CategoryFilter, Product};
use tracing::debug;

/// Products admitted by `filter` whose name, description, or brand contains
/// `free_text` (trimmed, case-insensitive), in catalog order.
///
/// Total over its inputs: an unknown category filter yields no products and
/// blank text disables the text match.
pub fn query<'c>(
    catalog: &'c CatalogIndex,
    filter: &CategoryFilter,
    free_text: &str,
) -> Vec<&'c Product> {
    let needle = free_text.trim().to_lowercase();
    let results: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|product| filter.admits(product.category))
        .filter(|product| needle.is_empty() || matches_text(product, &needle))
        .collect();
    debug!(
        category = %filter,
        text = %needle,
        matches = results.len(),
        "catalog query"
    );
    results
}

fn matches_text(product: &Product, needle: &str) -> bool {
    [&product.name, &product.desc, &product.brand]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}
