//! Safe analytics query builder.
//!
//! Compiles a validated [`QuerySpec`] into a single KQL string scoped to one
//! managed cluster. Every value that reaches the output string has passed
//! either an enumerated-set check or the structural resource-ID pattern;
//! free-form agent text never lands in a query unescaped. The builder is a
//! pure function: identical specs produce byte-identical queries.

mod tables;

pub use tables::{KNOWN_CATEGORIES, SHARED_TABLE};

use crate::resource;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which destination-table family the cluster's diagnostic settings use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableMode {
    /// Multi-tenant AzureDiagnostics table, disambiguated by category.
    #[value(name = "shared")]
    SharedDiagnostics,
    /// Dedicated per-category tables (AKSAudit, AKSControlPlane, ...).
    ResourceSpecific,
}

/// One log-query request. Ephemeral: validated atomically by [`build`],
/// either fully valid or rejected, never partially constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySpec {
    pub category: String,
    /// "" (no filter), "info", "warning" or "error".
    #[serde(default)]
    pub log_level: String,
    pub max_records: u32,
    pub resource_id: String,
    pub table_mode: TableMode,
}

/// Rejection reasons for query building. The builder never returns a
/// partially constructed query alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("category '{0}' has no dedicated table in resource-specific mode")]
    UnsupportedCategoryForMode(String),
}

impl QueryError {
    /// Stable machine-readable name for the error kind, used in CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidParameter(_) => "invalid_parameter",
            Self::UnsupportedCategoryForMode(_) => "unsupported_category_for_mode",
        }
    }
}

/// Builder knobs. The shared-table fallback reproduces an older permissive
/// behavior and is off by default; see DESIGN.md.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryOptions {
    /// In resource-specific mode, query AzureDiagnostics instead of failing
    /// when a category has no dedicated table.
    pub shared_table_fallback: bool,
}

const MAX_RECORDS_LIMIT: u32 = 1000;

/// Build a query with the strict (default) options.
pub fn build(spec: &QuerySpec) -> Result<String, QueryError> {
    build_with_options(spec, &QueryOptions::default())
}

/// Build a KQL query for one cluster's diagnostic logs.
///
/// Validation is fail-fast and all-or-nothing; table resolution, predicates
/// and tail stages follow in a fixed order so output is deterministic.
pub fn build_with_options(spec: &QuerySpec, options: &QueryOptions) -> Result<String, QueryError> {
    validate_spec(spec)?;

    // Table resolution decides the destination, the identity field and the
    // canonical casing of the resource ID.
    let (table, resource_predicate) = match spec.table_mode {
        TableMode::ResourceSpecific => match tables::dedicated_table(&spec.category) {
            Some(table) => {
                let id = spec.resource_id.to_lowercase();
                (table, format!("where _ResourceId == '{id}'"))
            }
            None if options.shared_table_fallback => {
                tracing::debug!(
                    category = spec.category,
                    "no dedicated table, falling back to shared diagnostics"
                );
                shared_stage(spec)
            }
            None => {
                return Err(QueryError::UnsupportedCategoryForMode(spec.category.clone()));
            }
        },
        TableMode::SharedDiagnostics => shared_stage(spec),
    };

    let mut stages = vec![table.to_string(), resource_predicate];

    if !tables::is_audit_category(&spec.category) {
        if let Some(filter) = tables::level_filter(&spec.log_level) {
            let predicate = if table == SHARED_TABLE {
                format!("where log_s startswith '{}'", filter.message_prefix)
            } else {
                format!("where Level == '{}'", filter.level_value)
            };
            stages.push(predicate);
        }
    }

    stages.push("order by TimeGenerated desc".to_string());
    stages.push(format!("limit {}", spec.max_records));
    stages.push(format!("project {}", tables::projection(table)));

    Ok(stages.join(" | "))
}

/// Shared-table destination: category predicate plus uppercase resource ID.
fn shared_stage(spec: &QuerySpec) -> (&'static str, String) {
    let id = spec.resource_id.to_uppercase();
    (
        SHARED_TABLE,
        format!(
            "where Category == '{}' and ResourceId == '{id}'",
            spec.category
        ),
    )
}

fn validate_spec(spec: &QuerySpec) -> Result<(), QueryError> {
    if spec.category.is_empty() {
        return Err(QueryError::InvalidParameter("category must not be empty".into()));
    }
    // Unknown categories are allowed for forward compatibility, but since a
    // shared-mode category lands inside the query they must still be
    // structurally clean.
    if !is_well_formed_category(&spec.category) {
        return Err(QueryError::InvalidParameter(format!(
            "category '{}' contains characters outside [A-Za-z0-9_-]",
            spec.category
        )));
    }
    if !spec.log_level.is_empty() && tables::level_filter(&spec.log_level).is_none() {
        return Err(QueryError::InvalidParameter(format!(
            "log level '{}' is not one of info, warning, error",
            spec.log_level
        )));
    }
    if spec.max_records < 1 || spec.max_records > MAX_RECORDS_LIMIT {
        return Err(QueryError::InvalidParameter(format!(
            "max records {} outside [1, {MAX_RECORDS_LIMIT}]",
            spec.max_records
        )));
    }
    if !resource::is_managed_cluster_id(&spec.resource_id) {
        return Err(QueryError::InvalidParameter(format!(
            "resource id '{}' is not a managed-cluster resource id",
            spec.resource_id
        )));
    }
    Ok(())
}

fn is_well_formed_category(category: &str) -> bool {
    category
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
