//! Diff configuration.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::errors::{DiffError, Result};

/// Default value that truncates a field sequence when it appears in it.
pub const DEFAULT_DELETE_MARKER: &str = "__delete__";

/// Tunables shared by every diff operation.
///
/// Deserializes from TOML or JSON; missing keys take their defaults.
///
/// ```toml
/// delete_marker = "__delete__"
/// delete_marker_enabled = true
/// max_group_records = 500
/// ```
///
/// TOML has no null, so files turn truncation off with
/// `delete_marker_enabled = false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffConfig {
    /// A field sequence ends at its first occurrence of this value.
    /// `None` disables truncation.
    pub delete_marker: Option<Value>,
    /// `false` disables truncation whatever `delete_marker` holds.
    pub delete_marker_enabled: bool,
    /// Upper bound on records per group before reconciliation is refused.
    pub max_group_records: Option<usize>,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            delete_marker: Some(Value::String(DEFAULT_DELETE_MARKER.to_string())),
            delete_marker_enabled: true,
            max_group_records: None,
        }
    }
}

impl DiffConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` when the text is not valid TOML or has
    /// unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `Io` when the file cannot be read, otherwise as
    /// [`DiffConfig::from_toml_str`].
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| DiffError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// The marker truncation actually uses, if any.
    pub fn effective_delete_marker(&self) -> Option<&Value> {
        if self.delete_marker_enabled {
            self.delete_marker.as_ref()
        } else {
            None
        }
    }

    pub fn with_delete_marker(mut self, marker: Option<Value>) -> Self {
        self.delete_marker = marker;
        self
    }

    pub fn with_max_group_records(mut self, limit: usize) -> Self {
        self.max_group_records = Some(limit);
        self
    }
}
