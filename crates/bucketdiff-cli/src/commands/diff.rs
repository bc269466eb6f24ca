//! Diff command
//!
//! Usage: bucketdiff diff --head <FILE> --prev <FILE> --groups <FILE> [--group <ID>]

use clap::{Args, ValueEnum};
use std::path::PathBuf;

use bucketdiff_core::diff::{render_human_summary, render_report_summary};
use bucketdiff_core::logging_facility::{init, Profile};
use bucketdiff_core::{diff_bucket, diff_group, ExError};

use super::{load_bucket, load_config, load_groups};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Current snapshot (JSON object of arrays)
    #[arg(long)]
    pub head: PathBuf,

    /// Previous snapshot (JSON object of arrays)
    #[arg(long)]
    pub prev: PathBuf,

    /// Group schema (JSON, or TOML by `.toml` extension)
    #[arg(long)]
    pub groups: PathBuf,

    /// Diff a single group instead of every declared group
    #[arg(long)]
    pub group: Option<String>,

    /// Diff configuration (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit operation logs to stderr
    #[arg(long, value_enum)]
    pub log: Option<LogFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Reconciled diff as pretty-printed JSON
    Json,
    /// Markdown summary for humans
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable debug logs
    Pretty,
    /// JSON structured info logs
    Json,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.log {
        Some(LogFormat::Pretty) => init(Profile::Development),
        Some(LogFormat::Json) => init(Profile::Production),
        None => {}
    }

    let head = load_bucket(&args.head)?;
    let prev = load_bucket(&args.prev)?;
    let schema = load_groups(&args.groups)?;
    let config = load_config(args.config.as_deref())?;

    let rendered = match &args.group {
        Some(group_id) => {
            let diff =
                diff_group(&head, &prev, &schema, group_id, &config).map_err(ExError::from)?;
            match args.format {
                OutputFormat::Json => serde_json::to_string_pretty(&diff)?,
                OutputFormat::Summary => render_human_summary(&diff),
            }
        }
        None => {
            let report = diff_bucket(&head, &prev, &schema, &config).map_err(ExError::from)?;
            match args.format {
                OutputFormat::Json => serde_json::to_string_pretty(&report)?,
                OutputFormat::Summary => render_report_summary(&report),
            }
        }
    };

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, rendered)?;
        println!("✓ Diff written to {}", output_path.display());
    } else {
        println!("{}", rendered);
    }

    Ok(())
}
