//! Bucket snapshots and read access to their field sequences.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::errors::{DiffError, Result};

/// Read access to one bucket snapshot.
///
/// Implementations hand out shared borrows, so the data cannot change while
/// a diff holds on to it.
pub trait BucketAccessor {
    /// Values of a field, in record order. Absent fields yield an empty slice.
    fn data_by_name(&self, field: &str) -> &[Value];

    /// Names of every field present in this snapshot.
    fn field_names(&self) -> Vec<&str>;
}

/// An immutable snapshot mapping field names to value sequences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bucket {
    fields: BTreeMap<String, Vec<Value>>,
}

impl Bucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper to add (or replace) a field.
    pub fn with_field<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.fields
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Parse a bucket from a JSON object of arrays.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` for malformed JSON and `InvalidInput` when a
    /// field value is not an array.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(text)?;
        Self::from_json_value(raw)
    }

    /// Read a bucket from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `Io` when the file cannot be read, otherwise as
    /// [`Bucket::from_json_str`].
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| DiffError::io(path, e))?;
        Self::from_json_str(&text)
    }

    /// Build a bucket from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the value is not an object of arrays.
    pub fn from_json_value(raw: Value) -> Result<Self> {
        let Value::Object(map) = raw else {
            return Err(DiffError::InvalidInput {
                reason: "bucket JSON root must be an object".to_string(),
            });
        };

        let mut fields = BTreeMap::new();
        for (name, values) in map {
            match values {
                Value::Array(values) => {
                    fields.insert(name, values);
                }
                other => {
                    return Err(DiffError::InvalidInput {
                        reason: format!("field `{}` must be an array, got: {}", name, other),
                    });
                }
            }
        }
        Ok(Self { fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl BucketAccessor for Bucket {
    fn data_by_name(&self, field: &str) -> &[Value] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }
}

/// Cut a sequence at the first delete marker.
///
/// The marker and everything after it are not part of the effective
/// sequence. With no marker configured the sequence is returned whole.
pub fn truncate_at_delete_marker<'a>(values: &'a [Value], marker: Option<&Value>) -> &'a [Value] {
    match marker {
        Some(marker) => {
            let end = values
                .iter()
                .position(|v| v == marker)
                .unwrap_or(values.len());
            &values[..end]
        }
        None => values,
    }
}
