//! Environment configuration shared across binaries.
//!
//! Centralizes which catalog a helper opens and where its log filter comes
//! from so CLIs resolve both the same way instead of re-implementing it.
//! Command-line flags win over the environment; the environment wins over
//! the compiled-in seed catalog.

use crate::catalog::CatalogIndex;
use anyhow::Result;
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Alternate catalog document to load instead of the seed.
pub const CATALOG_ENV: &str = "STOREFRONT_CATALOG";
/// `tracing` filter directives for the helpers (e.g. `storefront_compare=debug`).
pub const LOG_ENV: &str = "STOREFRONT_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CatalogSource {
    Seed,
    File(PathBuf),
}

impl CatalogSource {
    pub fn open(&self) -> Result<CatalogIndex> {
        match self {
            CatalogSource::Seed => CatalogIndex::seed(),
            CatalogSource::File(path) => CatalogIndex::load(path),
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Seed => f.write_str("seed catalog"),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Pick the catalog for this process: `cli` when given, then
/// `STOREFRONT_CATALOG` when set and non-empty, else the seed.
pub fn catalog_source(cli: Option<PathBuf>) -> CatalogSource {
    let env_value = env::var_os(CATALOG_ENV).map(PathBuf::from);
    let source = resolve_catalog_source(cli, env_value);
    debug!(source = %source, "catalog source resolved");
    source
}

fn resolve_catalog_source(cli: Option<PathBuf>, env_value: Option<PathBuf>) -> CatalogSource {
    cli.or(env_value.filter(|path| !path.as_os_str().is_empty()))
        .map(CatalogSource::File)
        .unwrap_or(CatalogSource::Seed)
}

/// Log filter directives from `STOREFRONT_LOG`, defaulting to warnings only.
pub fn log_filter() -> String {
    env::var(LOG_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_environment() {
        let source = resolve_catalog_source(
            Some(PathBuf::from("cli.json")),
            Some(PathBuf::from("env.json")),
        );
        assert_eq!(source, CatalogSource::File(PathBuf::from("cli.json")));
    }

    #[test]
    fn environment_overrides_seed() {
        assert_eq!(
            resolve_catalog_source(None, Some(PathBuf::from("env.json"))),
            CatalogSource::File(PathBuf::from("env.json"))
        );
        assert_eq!(
            resolve_catalog_source(None, Some(PathBuf::new())),
            CatalogSource::Seed
        );
        assert_eq!(resolve_catalog_source(None, None), CatalogSource::Seed);
    }

    #[test]
    fn seed_source_opens() {
        let index = CatalogSource::Seed.open().expect("seed opens");
        assert!(!index.products().is_empty());
        assert_eq!(CatalogSource::Seed.to_string(), "seed catalog");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = CatalogSource::File(PathBuf::from("/nonexistent/catalog.json"))
            .open()
            .expect_err("missing file");
        assert!(format!("{err:#}").contains("/nonexistent/catalog.json"));
    }
}
