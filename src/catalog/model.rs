//! Deserializable representation of a catalog document.
//!
//! The types mirror `schema/catalog.schema.json` so queries and the compare
//! tray work against typed records instead of raw JSON. Use `CatalogIndex`
//! for validation and id lookup; use these structs when the full record
//! surface is required (filters, shipping, SEO and so on).

use crate::catalog::identity::{CatalogKey, CategoryFilter, CategoryId, ProductId};
use crate::catalog::money::Money;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Seed catalog compiled into the crate.
pub const SEED_CATALOG: &str = include_str!("../../catalog/products.json");

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Full catalog document: category metadata plus products in display order.
pub struct Catalog {
    pub schema_version: CatalogKey,
    pub categories: Vec<CategoryMeta>,
    pub products: Vec<Product>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Per-category display metadata.
///
/// `common_features` fixes both the order and the row set of a comparison
/// table. `filters` only describes filter UI; nothing here enforces it.
pub struct CategoryMeta {
    pub id: CategoryFilter,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub common_features: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, FilterSpec>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(rename = "type")]
    pub kind: FilterKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Enum,
    Range,
    Boolean,
    Text,
}

/// A single feature value. Categories expose different feature sets, so the
/// values are heterogeneous.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Flag(value) => write!(f, "{value}"),
            FeatureValue::Number(value) => write!(f, "{value}"),
            FeatureValue::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub desc: String,
    pub size: String,
    pub brand: String,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_detail: Option<RatingDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    /// Display string as authored (e.g., `₹58,990`).
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_detail: Option<Money>,
    pub category: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    pub features: BTreeMap<String, FeatureValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Inventory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Shipping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_info: Option<WarrantyInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub badges: Vec<Badge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatingDetail {
    pub value: f64,
    pub count: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Media {
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Inventory {
    pub sku: String,
    pub in_stock: bool,
    /// `None` when stock is not tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_qty: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_stock_threshold: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Shipping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions_cm: Option<Dimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ships_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_estimate_days: Option<DeliveryEstimate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cod_available: Option<bool>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Dimensions {
    pub l: f64,
    pub w: f64,
    pub h: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeliveryEstimate {
    pub min: u32,
    pub max: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WarrantyInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Seo {
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_path: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Badge {
    New,
    Bestseller,
    Limited,
    #[serde(rename = "Online Exclusive")]
    OnlineExclusive,
    Clearance,
}

impl Product {
    pub fn feature(&self, name: &str) -> Option<&FeatureValue> {
        self.features.get(name)
    }

    /// Route to the product page, falling back to `/products/<id>`.
    pub fn link(&self) -> String {
        match &self.product_url {
            Some(url) => url.clone(),
            None => format!("/products/{}", self.id),
        }
    }

    /// Normalized price display when present, otherwise the authored string.
    pub fn display_price(&self) -> &str {
        match &self.price_detail {
            Some(money) => money.display.as_str(),
            None => self.price.as_str(),
        }
    }

    /// Number of filled stars in a five-star strip.
    pub fn filled_stars(&self) -> u8 {
        self.rating.clamp(0.0, 5.0).floor() as u8
    }
}

/// Parse a catalog document without additional validation.
pub fn parse_catalog(raw: &str) -> Result<Catalog> {
    let catalog: Catalog = serde_json::from_str(raw).context("parsing catalog document")?;
    Ok(catalog)
}
