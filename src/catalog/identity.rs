use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Versioned key for a catalog document (e.g., `storefront_catalog_v1`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogKey(pub String);

/// Stable identifier for a product (e.g., `ka-1`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed set of product categories.
///
/// Unlike query filters, product records may not carry an unknown category:
/// deserialization fails instead of preserving the raw string.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum CategoryId {
    KitchenAppliances,
    ArchitecturalHardware,
    KitchenStorage,
    LocksSecurity,
    BathroomFittings,
}

/// Category restriction applied by a catalog query.
///
/// `All` is the synthetic pseudo-category; `Unknown` keeps whatever the caller
/// asked for so the query can answer "no match" rather than fail.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(CategoryId),
    Unknown(String),
}

const CATEGORY_NAMES: &[&str] = &[
    "kitchen-appliances",
    "architectural-hardware",
    "kitchen-storage",
    "locks-security",
    "bathroom-fittings",
];

const ALL_FILTER: &str = "all";

impl CategoryId {
    /// Every category in declaration order.
    pub const ALL: [CategoryId; 5] = [
        CategoryId::KitchenAppliances,
        CategoryId::ArchitecturalHardware,
        CategoryId::KitchenStorage,
        CategoryId::LocksSecurity,
        CategoryId::BathroomFittings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryId::KitchenAppliances => "kitchen-appliances",
            CategoryId::ArchitecturalHardware => "architectural-hardware",
            CategoryId::KitchenStorage => "kitchen-storage",
            CategoryId::LocksSecurity => "locks-security",
            CategoryId::BathroomFittings => "bathroom-fittings",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "kitchen-appliances" => Some(CategoryId::KitchenAppliances),
            "architectural-hardware" => Some(CategoryId::ArchitecturalHardware),
            "kitchen-storage" => Some(CategoryId::KitchenStorage),
            "locks-security" => Some(CategoryId::LocksSecurity),
            "bathroom-fittings" => Some(CategoryId::BathroomFittings),
            _ => None,
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CategoryId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategoryId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).ok_or_else(|| de::Error::unknown_variant(&value, CATEGORY_NAMES))
    }
}

impl CategoryFilter {
    /// Interpret a raw filter string. Never fails; unrecognized ids become
    /// `Unknown`.
    pub fn parse(value: &str) -> Self {
        if value == ALL_FILTER {
            return CategoryFilter::All;
        }
        match CategoryId::parse(value) {
            Some(id) => CategoryFilter::Category(id),
            None => CategoryFilter::Unknown(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_FILTER,
            CategoryFilter::Category(id) => id.as_str(),
            CategoryFilter::Unknown(value) => value.as_str(),
        }
    }

    /// Whether a product in `category` passes this filter.
    pub fn admits(&self, category: CategoryId) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(id) => *id == category,
            CategoryFilter::Unknown(_) => false,
        }
    }
}

impl From<CategoryId> for CategoryFilter {
    fn from(id: CategoryId) -> Self {
        CategoryFilter::Category(id)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}
