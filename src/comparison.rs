//! Derived comparison views over a selection.
//!
//! Everything here is recomputed from the selected products and category
//! metadata on each call; nothing is cached between renders.

use crate::catalog::{
    CatalogIndex, CategoryFilter, CategoryId, CategoryMeta, FeatureValue, Product,
};
use crate::selection::{DisplayMode, TrayState};
use serde::Serialize;
use std::collections::BTreeSet;

/// Label used for mixed-category tables when the catalog declares no `all`
/// metadata.
const MIXED_LABEL: &str = "All";

/// One rendered cell of the comparison table.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// Presence/absence marker for boolean features.
    Flag(bool),
    Text(String),
    /// The product has no value for this feature.
    Absent,
}

impl CellValue {
    pub fn from_feature(value: Option<&FeatureValue>) -> Self {
        match value {
            Some(FeatureValue::Flag(flag)) => CellValue::Flag(*flag),
            Some(other) => CellValue::Text(other.to_string()),
            None => CellValue::Absent,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Row {
    pub feature_name: String,
    /// One cell per selected product, in selection order.
    pub values: Vec<CellValue>,
}

/// Card for the visual layout.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub desc: String,
    pub rating: f64,
    pub stars: u8,
    pub size: String,
    pub price: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ProductCard {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            desc: product.desc.clone(),
            rating: product.rating,
            stars: product.filled_stars(),
            size: product.size.clone(),
            price: product.display_price().to_string(),
            link: product.link(),
            image: product.image.clone(),
        }
    }
}

/// What the compare area shows for the current selection.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum ComparisonView {
    Placeholder {
        state: TrayState,
        prompt: &'static str,
    },
    Table {
        label: String,
        rows: Vec<Row>,
    },
    Visual {
        cards: Vec<ProductCard>,
    },
}

/// Rows for `features` in the given order, one cell per product.
pub fn comparison_rows(products: &[&Product], features: &[String]) -> Vec<Row> {
    features
        .iter()
        .map(|feature| Row {
            feature_name: feature.clone(),
            values: products
                .iter()
                .map(|product| CellValue::from_feature(product.feature(feature)))
                .collect(),
        })
        .collect()
}

/// Distinct categories of `products`, in first-seen order.
pub fn selected_categories(products: &[&Product]) -> Vec<CategoryId> {
    let mut seen = BTreeSet::new();
    products
        .iter()
        .map(|product| product.category)
        .filter(|category| seen.insert(*category))
        .collect()
}

/// Metadata the table should be rendered against.
///
/// A single-category selection uses that category's own metadata. Anything
/// else gets a synthetic `all` entry whose common features are the union of
/// each selected category's list, taken in selection order and then declared
/// order, without repeats.
pub fn meta_for_selection(catalog: &CatalogIndex, products: &[&Product]) -> CategoryMeta {
    let categories = selected_categories(products);
    match categories.as_slice() {
        [only] => catalog
            .category_meta(*only)
            .cloned()
            .unwrap_or_else(|| merged_meta(catalog, &categories)),
        _ => merged_meta(catalog, &categories),
    }
}

fn merged_meta(catalog: &CatalogIndex, categories: &[CategoryId]) -> CategoryMeta {
    let mut common_features: Vec<String> = Vec::new();
    for meta in categories.iter().filter_map(|id| catalog.category_meta(*id)) {
        for feature in &meta.common_features {
            if !common_features.contains(feature) {
                common_features.push(feature.clone());
            }
        }
    }
    let label = catalog
        .meta_for(&CategoryFilter::All)
        .map(|meta| meta.label.clone())
        .unwrap_or_else(|| MIXED_LABEL.to_string());
    CategoryMeta {
        id: CategoryFilter::All,
        label,
        slug: None,
        description: None,
        common_features,
        filters: Default::default(),
    }
}

/// Compose the compare area for `products` in `mode`.
pub fn build_view(
    catalog: &CatalogIndex,
    products: &[&Product],
    mode: DisplayMode,
) -> ComparisonView {
    let state = TrayState::for_len(products.len());
    match state {
        TrayState::Empty | TrayState::Single => ComparisonView::Placeholder {
            state,
            prompt: state.prompt(),
        },
        TrayState::Comparable => match mode {
            DisplayMode::Visual => ComparisonView::Visual {
                cards: products.iter().map(|p| ProductCard::from_product(p)).collect(),
            },
            DisplayMode::Table => {
                let meta = meta_for_selection(catalog, products);
                ComparisonView::Table {
                    rows: comparison_rows(products, &meta.common_features),
                    label: meta.label,
                }
            }
        },
    }
}
