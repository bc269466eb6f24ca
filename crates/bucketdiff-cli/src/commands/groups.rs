//! Groups command
//!
//! Usage: bucketdiff groups --groups <FILE> [--bucket <FILE>]

use clap::Args;
use std::path::PathBuf;

use bucketdiff_core::{Bucket, DiffConfig, DiffContext, ExError, GroupDescriptor, GroupedDiffContext};

use super::{load_bucket, load_groups};

#[derive(Debug, Args)]
pub struct GroupsArgs {
    /// Group schema (JSON, or TOML by `.toml` extension)
    #[arg(long)]
    pub groups: PathBuf,

    /// Snapshot to check member fields against
    #[arg(long)]
    pub bucket: Option<PathBuf>,
}

/// Execute groups command
///
/// Validates every declared group and lists its leaders and members. With
/// `--bucket`, members absent from the snapshot are reported.
pub fn execute(args: GroupsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let schema = load_groups(&args.groups)?;
    let bucket = match &args.bucket {
        Some(path) => load_bucket(path)?,
        None => Bucket::new(),
    };
    let config = DiffConfig::default();
    let context = DiffContext::new(&bucket, &bucket, &config);
    let present = context.field_names();

    let mut group_ids = schema.group_ids();
    group_ids.sort();
    for group_id in group_ids {
        let grouped =
            GroupedDiffContext::new(&context, &schema, &group_id).map_err(ExError::from)?;
        println!(
            "{}: leaders [{}], members [{}]",
            group_id,
            grouped.leaders().join(", "),
            grouped
                .members()
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        );
        if args.bucket.is_some() {
            for missing in grouped
                .members()
                .iter()
                .filter(|m| !present.contains(m.as_str()))
            {
                println!("  missing field: {}", missing);
            }
        }
    }

    Ok(())
}
