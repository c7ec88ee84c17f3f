//! Command-line interface definitions.

use crate::query::TableMode;
use crate::security::AccessLevel;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "aks-guard")]
#[command(about = "Validate agent-issued az commands and build scoped cluster log queries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a command against the injection and access-level policy
    Check {
        /// The full command line to validate
        command: String,

        /// Access level configured for this process
        #[arg(long, value_enum, default_value = "read-only")]
        access_level: AccessLevel,
    },

    /// Build a KQL query for one cluster's diagnostic logs
    Query {
        /// Diagnostic category, e.g. kube-apiserver or kube-audit
        #[arg(long)]
        category: String,

        /// Log level filter: info, warning or error (empty for no filter)
        #[arg(long, default_value = "")]
        level: String,

        /// Maximum records to return, between 1 and 1000
        #[arg(long, default_value_t = 100)]
        max_records: u32,

        /// Full resource ID of the managed cluster
        #[arg(long)]
        resource_id: String,

        /// Destination-table family of the cluster's diagnostic settings
        #[arg(long, value_enum)]
        table_mode: TableMode,

        /// ISO-8601 start of the query window
        #[arg(long)]
        start: Option<String>,

        /// ISO-8601 end of the query window (defaults to now)
        #[arg(long, requires = "start")]
        end: Option<String>,

        /// Fall back to the shared diagnostics table when a category has no
        /// dedicated table in resource-specific mode
        #[arg(long)]
        shared_fallback: bool,
    },
}
