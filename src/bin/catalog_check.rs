//! Catalog validator.
//!
//! Schema-checks and indexes a catalog document, then prints a summary with
//! per-category product counts. Exits non-zero with the full error chain when
//! the document is rejected.

use anyhow::{Result, bail};
use serde::Serialize;
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use storefront_compare::{CatalogIndex, catalog_source, init_logging};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

#[derive(Serialize)]
struct Summary {
    source: String,
    schema_version: String,
    products: usize,
    categories: BTreeMap<String, CategorySummary>,
}

#[derive(Serialize)]
struct CategorySummary {
    label: String,
    products: usize,
    common_features: usize,
}

fn run() -> Result<()> {
    init_logging();
    let args = CliArgs::parse()?;
    let source = catalog_source(args.catalog);
    let catalog = source.open()?;
    let summary = summarize(&source.to_string(), &catalog);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn summarize(source: &str, catalog: &CatalogIndex) -> Summary {
    let counts = catalog.count_by_category();
    let categories = counts
        .iter()
        .filter_map(|(id, count)| {
            catalog.category_meta(*id).map(|meta| {
                (
                    id.to_string(),
                    CategorySummary {
                        label: meta.label.clone(),
                        products: *count,
                        common_features: meta.common_features.len(),
                    },
                )
            })
        })
        .collect();
    Summary {
        source: source.to_string(),
        schema_version: catalog.key().0.clone(),
        products: catalog.products().len(),
        categories,
    }
}

struct CliArgs {
    catalog: Option<PathBuf>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut catalog: Option<PathBuf> = None;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--catalog" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("missing value for --catalog"))?;
                    catalog = Some(PathBuf::from(value));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        Ok(CliArgs { catalog })
    }
}

fn print_usage() {
    print!(
        "Usage: catalog-check [--catalog PATH]\n\
Validates a catalog document (schema, duplicate ids, category metadata) and prints a per-category summary as JSON.\n"
    );
}
