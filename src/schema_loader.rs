//! JSON Schema loading for catalog documents.
//!
//! The catalog schema ships inside the crate. Loading checks that the
//! schema's `schema_version` const is one we know how to index, compiles a
//! validator, and reports every violation at once so a bad fixture can be
//! fixed in one pass.

use anyhow::{Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeSet;

/// Canonical catalog schema compiled into the crate.
pub(crate) const CATALOG_SCHEMA: &str = include_str!("../schema/catalog.schema.json");

/// Result of loading and compiling a JSON Schema.
pub(crate) struct SchemaLoadResult {
    pub schema_version: String,
    pub compiled: JSONSchema,
}

/// Controls how schemas are checked before compilation.
pub(crate) struct SchemaLoadOptions<'a> {
    /// Where to find the schema_version const inside the schema payload.
    pub schema_version_pointer: &'a str,
    /// Allowed schema_version values; enforced when present.
    pub allowed_versions: Option<&'a BTreeSet<String>>,
}

impl<'a> Default for SchemaLoadOptions<'a> {
    fn default() -> Self {
        Self {
            schema_version_pointer: "/properties/schema_version/const",
            allowed_versions: None,
        }
    }
}

pub(crate) fn compile_json_schema(
    label: &str,
    raw: &str,
    options: SchemaLoadOptions<'_>,
) -> Result<SchemaLoadResult> {
    let schema: Value =
        serde_json::from_str(raw).map_err(|err| anyhow!("parsing schema {label}: {err}"))?;

    let schema_version = schema
        .pointer(options.schema_version_pointer)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            anyhow!(
                "schema {label} has no string at {}",
                options.schema_version_pointer
            )
        })?
        .to_string();

    if let Some(allowed) = options.allowed_versions {
        if !allowed.contains(&schema_version) {
            bail!(
                "schema {label} declares schema_version '{}' not in allowed set {:?}",
                schema_version,
                allowed
            );
        }
    }

    let compiled = JSONSchema::compile(&schema)
        .map_err(|err| anyhow!("compiling schema {label}: {err}"))?;

    Ok(SchemaLoadResult {
        schema_version,
        compiled,
    })
}

/// Validate `document` and fold every violation into one error.
pub(crate) fn validate_document(
    schema: &SchemaLoadResult,
    document: &Value,
    label: &str,
) -> Result<()> {
    if let Err(errors) = schema.compiled.validate(document) {
        let details = errors
            .map(|err| format!("{}: {}", err.instance_path, err))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("{label} failed schema validation:\n{details}");
    }
    Ok(())
}
