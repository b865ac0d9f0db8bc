//! Compare tray driver.
//!
//! Builds a fresh compare session, applies tray actions in the order they
//! appear on the command line, and prints the resulting session snapshot
//! (results, selection, tray state, mode, capacity readout, and the derived
//! comparison view) as JSON.

use anyhow::{Result, bail};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use storefront_compare::{
    CategoryFilter, CompareSession, DisplayMode, ProductId, TrayChange, catalog_source,
    init_logging, split_list,
};
use tracing::info;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    init_logging();
    let args = CliArgs::parse_from(env::args_os().skip(1))?;
    let catalog = catalog_source(args.catalog.clone()).open()?;

    let mut session = CompareSession::new(&catalog);
    session.set_category(args.category.clone());
    session.set_query(args.text.clone());

    for action in &args.actions {
        match action {
            Action::Toggle(id) => {
                if session.toggle(id) == TrayChange::Ignored {
                    info!(product = %id, "toggle left the tray unchanged");
                }
            }
            Action::Remove(id) => {
                session.remove(id);
            }
            Action::Mode(mode) => session.set_mode(*mode),
            Action::Clear => session.clear(),
        }
    }

    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    Ok(())
}

#[derive(Debug, PartialEq)]
enum Action {
    Toggle(ProductId),
    Remove(ProductId),
    Mode(DisplayMode),
    Clear,
}

#[derive(Debug)]
struct CliArgs {
    catalog: Option<PathBuf>,
    category: CategoryFilter,
    text: String,
    actions: Vec<Action>,
}

impl CliArgs {
    fn parse_from(mut args: impl Iterator<Item = OsString>) -> Result<Self> {
        let mut catalog: Option<PathBuf> = None;
        let mut category = CategoryFilter::All;
        let mut text = String::new();
        let mut actions = Vec::new();

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
                "--toggle" => {
                    let raw = next_value(&mut args, "--toggle")?;
                    let ids = split_list(&raw);
                    if ids.is_empty() {
                        bail!("--toggle requires at least one product id");
                    }
                    actions.extend(ids.into_iter().map(|id| Action::Toggle(ProductId(id))));
                }
                "--remove" => {
                    let raw = next_value(&mut args, "--remove")?;
                    let ids = split_list(&raw);
                    if ids.is_empty() {
                        bail!("--remove requires at least one product id");
                    }
                    actions.extend(ids.into_iter().map(|id| Action::Remove(ProductId(id))));
                }
                "--mode" => {
                    let raw = next_value(&mut args, "--mode")?;
                    let Some(mode) = DisplayMode::parse(&raw) else {
                        bail!("unknown mode '{raw}' (expected table|visual)");
                    };
                    actions.push(Action::Mode(mode));
                }
                "--clear" => actions.push(Action::Clear),
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
            actions,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: compare-tray [--catalog PATH] [--category ID|all] [--query TEXT] [--toggle ID[,ID...]]... [--remove ID[,ID...]]... [--mode table|visual] [--clear]\n\
Applies tray actions in argument order to a fresh session (capacity 3; a fourth add is ignored) and prints the session snapshot as JSON.\n"
}

fn print_usage() {
    print!("{}", usage());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs> {
        CliArgs::parse_from(args.iter().map(OsString::from))
    }

    #[test]
    fn actions_keep_argument_order() {
        let args = parse(&[
            "--toggle",
            "ka-1,ka-2",
            "--mode",
            "table",
            "--remove",
            "ka-1",
            "--toggle",
            "ls-1",
        ])
        .unwrap();
        assert_eq!(
            args.actions,
            vec![
                Action::Toggle(ProductId::new("ka-1")),
                Action::Toggle(ProductId::new("ka-2")),
                Action::Mode(DisplayMode::Table),
                Action::Remove(ProductId::new("ka-1")),
                Action::Toggle(ProductId::new("ls-1")),
            ]
        );
    }

    #[test]
    fn category_and_query_are_parsed() {
        let args = parse(&["--category", "locks-security", "--query", " Godrej "]).unwrap();
        assert_eq!(args.category.as_str(), "locks-security");
        assert_eq!(args.text, " Godrej ");
        assert!(args.catalog.is_none());

        let unknown = parse(&["--category", "garden"]).unwrap();
        assert_eq!(unknown.category, CategoryFilter::Unknown("garden".into()));
    }

    #[test]
    fn rejects_bad_flags() {
        assert!(parse(&["--mode", "grid"]).is_err());
        assert!(parse(&["--toggle"]).is_err());
        assert!(parse(&["--toggle", " , "]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
    }
}
