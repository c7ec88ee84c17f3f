//! Main entry point for the aks-guard CLI.
//!
//! Prints one JSON document per invocation: either the accepted command /
//! built query, or the typed rejection reason. Exits non-zero on rejection
//! so scripted callers cannot miss a refusal.

use aks_guard::cli::{Cli, Command};
use aks_guard::{query, security, timespan, utils};

use anyhow::Result;
use clap::Parser;
use serde_json::json;

fn main() -> Result<()> {
    utils::logger::init_logging();

    let cli = Cli::parse();
    let verdict = match cli.command {
        Command::Check { command, access_level } => run_check(&command, access_level),
        Command::Query {
            category,
            level,
            max_records,
            resource_id,
            table_mode,
            start,
            end,
            shared_fallback,
        } => {
            let spec = query::QuerySpec {
                category,
                log_level: level,
                max_records,
                resource_id,
                table_mode,
            };
            let options = query::QueryOptions { shared_table_fallback: shared_fallback };
            run_query(&spec, &options, start.as_deref(), end.as_deref())
        }
    };

    match verdict {
        Ok(document) => {
            println!("{}", serde_json::to_string_pretty(&document)?);
            Ok(())
        }
        Err(document) => {
            println!("{}", serde_json::to_string_pretty(&document)?);
            std::process::exit(1);
        }
    }
}

fn run_check(
    command: &str,
    access_level: security::AccessLevel,
) -> Result<serde_json::Value, serde_json::Value> {
    match security::validate(command, access_level) {
        Ok(()) => Ok(json!({
            "status": "allowed",
            "command": command,
        })),
        Err(e) => Err(json!({
            "status": "rejected",
            "error": e.kind(),
            "reason": e.to_string(),
        })),
    }
}

fn run_query(
    spec: &query::QuerySpec,
    options: &query::QueryOptions,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<serde_json::Value, serde_json::Value> {
    let built = query::build_with_options(spec, options).map_err(|e| {
        json!({
            "status": "rejected",
            "error": e.kind(),
            "reason": e.to_string(),
        })
    })?;

    let mut document = json!({
        "status": "ok",
        "query": built,
    });
    if let Some(start) = start {
        let span = timespan::format_timespan(start, end).map_err(|e| {
            json!({
                "status": "rejected",
                "error": "invalid_parameter",
                "reason": e.to_string(),
            })
        })?;
        document["timespan"] = json!(span);
    }
    Ok(document)
}
