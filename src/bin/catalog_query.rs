//! Catalog query helper.
//!
//! Loads the catalog (seed, `STOREFRONT_CATALOG`, or `--catalog`), applies a
//! category filter and free-text search, and prints the matching products as
//! a JSON array in catalog order.

use anyhow::{Result, bail};
use std::env;
use std::path::PathBuf;
use storefront_compare::{CategoryFilter, catalog_source, init_logging, query};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    init_logging();
    let args = CliArgs::parse()?;
    let catalog = catalog_source(args.catalog).open()?;
    let results = query(&catalog, &args.category, &args.text);
    if args.ids_only {
        let ids: Vec<&str> = results.iter().map(|p| p.id.as_str()).collect();
        println!("{}", serde_json::to_string(&ids)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }
    Ok(())
}

struct CliArgs {
    catalog: Option<PathBuf>,
    category: CategoryFilter,
    text: String,
    ids_only: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut catalog: Option<PathBuf> = None;
        let mut category = CategoryFilter::All;
        let mut text = String::new();
        let mut ids_only = false;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--catalog" => {
                    catalog = Some(PathBuf::from(next_value(&mut args, "--catalog")?));
                }
                "--category" => {
                    category = CategoryFilter::parse(&next_value(&mut args, "--category")?);
                }
                "--query" => {
                    text = next_value(&mut args, "--query")?;
                }
                "--ids" => ids_only = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        Ok(CliArgs {
            catalog,
            category,
            text,
            ids_only,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = std::ffi::OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: catalog-query [--catalog PATH] [--category ID|all] [--query TEXT] [--ids]\n\
Filters the catalog by category and case-insensitive text (name, description, brand) and prints the matches as JSON. An unknown category matches nothing.\n"
}

fn print_usage() {
    print!("{}", usage());
}
