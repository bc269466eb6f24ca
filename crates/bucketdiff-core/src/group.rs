//! Group descriptors: which fields share record indices, and which of them
//! identify a record.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::errors::{DiffError, Result};

/// Declares the groups of a bucket.
///
/// Unknown group ids yield `None`; the grouped diff context turns that into
/// a construction error.
pub trait GroupDescriptor {
    /// Every group id this descriptor knows about.
    fn group_ids(&self) -> Vec<String>;

    /// Member field names of a group.
    fn group_members(&self, group_id: &str) -> Option<BTreeSet<String>>;

    /// Leader field names of a group, in declaration order.
    fn group_leaders(&self, group_id: &str) -> Option<Vec<String>>;
}

/// Member and leader fields of one group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDefinition {
    pub members: BTreeSet<String>,
    pub leaders: Vec<String>,
}

impl GroupDefinition {
    pub fn new<M, L>(members: M, leaders: L) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        Self {
            members: members.into_iter().map(Into::into).collect(),
            leaders: leaders.into_iter().map(Into::into).collect(),
        }
    }
}

/// In-memory group descriptor, loadable from JSON or TOML.
///
/// ```toml
/// [groups.vehicles]
/// members = ["vin", "make", "year"]
/// leaders = ["vin"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSchema {
    #[serde(default)]
    pub groups: BTreeMap<String, GroupDefinition>,
}

impl GroupSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, group_id: impl Into<String>, definition: GroupDefinition) -> Self {
        self.groups.insert(group_id.into(), definition);
        self
    }

    /// # Errors
    ///
    /// Returns `Serialization` when the text is not a valid schema.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// # Errors
    ///
    /// Returns `Serialization` when the text is not a valid schema.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read a schema from a file: `.toml` as TOML, anything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns `Io` when the file cannot be read and `Serialization` when
    /// its content is not a valid schema.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| DiffError::io(path, e))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&text),
            _ => Self::from_json_str(&text),
        }
    }
}

impl GroupDescriptor for GroupSchema {
    fn group_ids(&self) -> Vec<String> {
        self.groups.keys().cloned().collect()
    }

    fn group_members(&self, group_id: &str) -> Option<BTreeSet<String>> {
        self.groups.get(group_id).map(|g| g.members.clone())
    }

    fn group_leaders(&self, group_id: &str) -> Option<Vec<String>> {
        self.groups.get(group_id).map(|g| g.leaders.clone())
    }
}
