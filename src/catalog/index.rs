//! Indexed, read-only view of a catalog document.
//!
//! The index enforces the expected catalog schema version and provides
//! lookup by product id and category. It is strict about duplicates and
//! dangling category references so queries and the compare tray can assume
//! every product resolves to exactly one category's metadata.

use crate::catalog::model::{Catalog, CategoryMeta, Product, SEED_CATALOG};
use crate::catalog::{CatalogKey, CategoryFilter, CategoryId, ProductId};
use crate::schema_loader::{
    CATALOG_SCHEMA, SchemaLoadOptions, compile_json_schema, validate_document,
};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

// Only one document layout exists; reject anything else rather than index
// records whose shape we have not checked.
pub const CATALOG_SCHEMA_VERSION: &str = "storefront_catalog_v1";

#[derive(Debug)]
/// Catalog plus derived indexes keyed by product id and category.
pub struct CatalogIndex {
    catalog_key: CatalogKey,
    catalog: Catalog,
    by_id: BTreeMap<ProductId, usize>,
    meta_by_category: BTreeMap<CategoryId, usize>,
    all_meta: Option<usize>,
}

impl CatalogIndex {
    /// Build the index from the catalog compiled into the crate.
    pub fn seed() -> Result<Self> {
        Self::from_json_str(SEED_CATALOG, "seed catalog")
    }

    /// Load, schema-check, and index a catalog document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_json_str(&raw, &path.display().to_string())
            .with_context(|| format!("loading {}", path.display()))
    }

    /// Schema-check and index a catalog document held in memory.
    pub fn from_json_str(raw: &str, label: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(raw).with_context(|| format!("parsing {label}"))?;
        validate_against_schema(&value, label)?;
        let catalog: Catalog =
            serde_json::from_value(value).with_context(|| format!("decoding {label}"))?;
        let index = Self::from_catalog(catalog)?;
        info!(
            catalog = label,
            products = index.catalog.products.len(),
            categories = index.meta_by_category.len(),
            "catalog indexed"
        );
        Ok(index)
    }

    /// Index an already-decoded catalog. Skips JSON Schema validation but
    /// applies every structural check.
    pub fn from_catalog(catalog: Catalog) -> Result<Self> {
        validate_schema_version(&catalog.schema_version)?;
        let (meta_by_category, all_meta) = build_category_index(&catalog.categories)?;
        let by_id = build_product_index(&catalog.products, &meta_by_category)?;
        Ok(Self {
            catalog_key: catalog.schema_version.clone(),
            catalog,
            by_id,
            meta_by_category,
            all_meta,
        })
    }

    /// The schema key declared in the loaded document.
    pub fn key(&self) -> &CatalogKey {
        &self.catalog_key
    }

    /// Products in catalog (insertion) order.
    pub fn products(&self) -> &[Product] {
        &self.catalog.products
    }

    /// Resolve a product by id.
    ///
    /// Returns `None` rather than erroring; callers decide whether an unknown
    /// id is a no-op or a usage error.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.by_id.get(id).map(|&idx| &self.catalog.products[idx])
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Metadata declared for a concrete category.
    pub fn category_meta(&self, id: CategoryId) -> Option<&CategoryMeta> {
        self.meta_by_category
            .get(&id)
            .map(|&idx| &self.catalog.categories[idx])
    }

    /// Metadata for a query filter: the category's own entry, the `all`
    /// entry when declared, or nothing for unknown filters.
    pub fn meta_for(&self, filter: &CategoryFilter) -> Option<&CategoryMeta> {
        match filter {
            CategoryFilter::All => self.all_meta.map(|idx| &self.catalog.categories[idx]),
            CategoryFilter::Category(id) => self.category_meta(*id),
            CategoryFilter::Unknown(_) => None,
        }
    }

    /// Product count for every declared category, zero counts included.
    pub fn count_by_category(&self) -> BTreeMap<CategoryId, usize> {
        let mut counts: BTreeMap<CategoryId, usize> =
            self.meta_by_category.keys().map(|id| (*id, 0)).collect();
        for product in &self.catalog.products {
            *counts.entry(product.category).or_default() += 1;
        }
        counts
    }
}

fn validate_against_schema(document: &Value, label: &str) -> Result<()> {
    let allowed = allowed_schema_versions();
    let schema = compile_json_schema(
        "catalog.schema.json",
        CATALOG_SCHEMA,
        SchemaLoadOptions {
            allowed_versions: Some(&allowed),
            ..Default::default()
        },
    )?;
    debug!(schema_version = %schema.schema_version, "validating {label}");
    validate_document(&schema, document, label)
}

fn allowed_schema_versions() -> BTreeSet<String> {
    BTreeSet::from_iter([CATALOG_SCHEMA_VERSION.to_string()])
}

fn validate_schema_version(key: &CatalogKey) -> Result<()> {
    if key.0.is_empty() {
        bail!("schema_version must not be empty");
    }

    if !key
        .0
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!("schema_version must match ^[A-Za-z0-9_.-]+$, got {}", key.0);
    }

    let allowed = allowed_schema_versions();
    if !allowed.contains(&key.0) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            key.0,
            allowed
        );
    }

    Ok(())
}

fn build_category_index(
    categories: &[CategoryMeta],
) -> Result<(BTreeMap<CategoryId, usize>, Option<usize>)> {
    let mut by_category = BTreeMap::new();
    let mut all_meta = None;

    for (idx, meta) in categories.iter().enumerate() {
        if meta.label.trim().is_empty() {
            bail!("category {} has an empty label", meta.id);
        }
        let mut seen = BTreeSet::new();
        for feature in &meta.common_features {
            if feature.trim().is_empty() {
                bail!("category {} lists an empty common feature", meta.id);
            }
            if !seen.insert(feature.as_str()) {
                bail!(
                    "category {} lists common feature '{}' twice",
                    meta.id,
                    feature
                );
            }
        }

        match &meta.id {
            CategoryFilter::All => {
                if all_meta.replace(idx).is_some() {
                    bail!("duplicate metadata for category all");
                }
            }
            CategoryFilter::Category(id) => {
                if by_category.insert(*id, idx).is_some() {
                    bail!("duplicate metadata for category {id}");
                }
            }
            CategoryFilter::Unknown(raw) => {
                bail!("category metadata declares unknown id '{raw}'");
            }
        }
    }

    Ok((by_category, all_meta))
}

fn build_product_index(
    products: &[Product],
    categories: &BTreeMap<CategoryId, usize>,
) -> Result<BTreeMap<ProductId, usize>> {
    if products.is_empty() {
        bail!("catalog contains no products");
    }

    let mut map = BTreeMap::new();
    for (idx, product) in products.iter().enumerate() {
        if product.id.0.trim().is_empty() {
            bail!("encountered product with no id");
        }
        if map.contains_key(&product.id) {
            bail!("duplicate product id {}", product.id);
        }
        if !categories.contains_key(&product.category) {
            bail!(
                "product {} references category {} with no declared metadata",
                product.id,
                product.category
            );
        }
        if !(0.0..=5.0).contains(&product.rating) {
            bail!(
                "product {} has rating {} outside 0.0..=5.0",
                product.id,
                product.rating
            );
        }
        map.insert(product.id.clone(), idx);
    }
    Ok(map)
}
