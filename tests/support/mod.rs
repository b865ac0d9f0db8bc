use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use storefront_compare::catalog::SEED_CATALOG;
use storefront_compare::{CATALOG_ENV, LOG_ENV};
use tempfile::NamedTempFile;

/// Path to one of the crate's helper binaries, as built by cargo for tests.
pub fn helper_binary(name: &str) -> PathBuf {
    let path = match name {
        "catalog-query" => env!("CARGO_BIN_EXE_catalog-query"),
        "compare-tray" => env!("CARGO_BIN_EXE_compare-tray"),
        "catalog-check" => env!("CARGO_BIN_EXE_catalog-check"),
        other => panic!("unknown helper {other}"),
    };
    PathBuf::from(path)
}

/// Command for `name` with the catalog and log environment cleared so the
/// ambient shell cannot change what a test sees.
pub fn helper_command(name: &str) -> Command {
    let mut cmd = Command::new(helper_binary(name));
    cmd.env_remove(CATALOG_ENV).env_remove(LOG_ENV);
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Run `cmd` and parse its stdout as JSON.
pub fn run_json(cmd: Command) -> Result<Value> {
    let output = run_command(cmd)?;
    serde_json::from_slice(&output.stdout).context("helper stdout was not JSON")
}

/// The seed catalog as a mutable JSON document, for deriving fixtures.
pub fn seed_document() -> Value {
    serde_json::from_str(SEED_CATALOG).expect("seed catalog is valid JSON")
}

/// Write `document` to a temporary file that lives as long as the handle.
pub fn write_catalog(document: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to create catalog fixture")?;
    serde_json::to_writer_pretty(&mut file, document)?;
    file.flush()?;
    Ok(file)
}
