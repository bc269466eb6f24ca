pub mod diff;
pub mod groups;

use std::path::Path;

use bucketdiff_core::{Bucket, DiffConfig, ExError, GroupSchema};

/// Load a bucket snapshot from a JSON file
pub fn load_bucket(path: &Path) -> Result<Bucket, ExError> {
    Ok(Bucket::from_json_file(path)?)
}

/// Load a group schema; `.toml` files are parsed as TOML, anything else as JSON
pub fn load_groups(path: &Path) -> Result<GroupSchema, ExError> {
    Ok(GroupSchema::from_file(path)?)
}

/// Load a diff configuration, or the defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<DiffConfig, ExError> {
    match path {
        Some(path) => Ok(DiffConfig::from_toml_file(path)?),
        None => Ok(DiffConfig::default()),
    }
}
