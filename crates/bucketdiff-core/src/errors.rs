use thiserror::Error;

/// Result type alias using DiffError
pub type Result<T> = std::result::Result<T, DiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// raised while diffing buckets. Each kind maps to a stable error code that
/// can be used for programmatic error handling, testing, and host responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Construction
    InvalidInput,
    GroupNotFound,
    InvalidGroup,

    // Reconciliation
    AmbiguousTransition,
    LimitExceeded,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::GroupNotFound => "ERR_GROUP_NOT_FOUND",
            ExErrorKind::InvalidGroup => "ERR_INVALID_GROUP",
            ExErrorKind::AmbiguousTransition => "ERR_AMBIGUOUS_TRANSITION",
            ExErrorKind::LimitExceeded => "ERR_LIMIT_EXCEEDED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification plus whatever diff context was known at the
/// point of failure (group, field, record index, candidate indices).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    group_id: Option<String>,
    field: Option<String>,
    index: Option<usize>,
    message: String,
    candidates: Option<Vec<usize>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            group_id: None,
            field: None,
            index: None,
            message: String::new(),
            candidates: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add group context
    pub fn with_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Add field name context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add record index context
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add candidate previous indices (populated on AmbiguousTransition)
    pub fn with_candidates(mut self, candidates: Vec<usize>) -> Self {
        self.candidates = Some(candidates);
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn candidates(&self) -> Option<&[usize]> {
        self.candidates.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(group_id) = &self.group_id {
            write!(f, " (group_id: {})", group_id)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        if let Some(index) = self.index {
            write!(f, " (index: {})", index)?;
        }
        if let Some(candidates) = &self.candidates {
            write!(f, " (candidates: {:?})", candidates)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for bucket diff operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiffError {
    // ===== Construction Errors =====
    /// The group descriptor has no group with this id
    #[error("Group not found: {group_id}")]
    GroupNotFound { group_id: String },

    /// A group without leaders can never support identity tracking
    #[error("Group {group_id} declares no leader fields")]
    GroupWithoutLeaders { group_id: String },

    /// A leader field is not one of the group's members
    #[error("Leader field {field} is not a member of group {group_id}")]
    LeaderNotMember { group_id: String, field: String },

    // ===== Reconciliation Errors =====
    /// More than one previous index matches the leader values of a changed
    /// current index. The only remedy is more distinguishing leader fields.
    #[error("Ambiguous index transition in group {group_id} at index {index}: candidates {candidates:?}")]
    AmbiguousIndexTransition {
        group_id: String,
        index: usize,
        candidates: Vec<usize>,
    },

    /// Group record count exceeds the configured reconciliation bound
    #[error("Group {group_id} has {records} records, limit is {limit}")]
    GroupTooLarge {
        group_id: String,
        records: usize,
        limit: usize,
    },

    // ===== Generic Errors =====
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },
}

impl From<DiffError> for ExError {
    fn from(err: DiffError) -> Self {
        match err {
            DiffError::GroupNotFound { group_id } => ExError::new(ExErrorKind::GroupNotFound)
                .with_group_id(group_id)
                .with_message("Group not found"),

            DiffError::GroupWithoutLeaders { group_id } => ExError::new(ExErrorKind::InvalidGroup)
                .with_group_id(group_id)
                .with_message("Group declares no leader fields"),

            DiffError::LeaderNotMember { group_id, field } => {
                ExError::new(ExErrorKind::InvalidGroup)
                    .with_group_id(group_id)
                    .with_field(field)
                    .with_message("Leader field is not a group member")
            }

            DiffError::AmbiguousIndexTransition {
                group_id,
                index,
                candidates,
            } => ExError::new(ExErrorKind::AmbiguousTransition)
                .with_op("create_index_map")
                .with_group_id(group_id)
                .with_index(index)
                .with_candidates(candidates)
                .with_message("Leader values match more than one previous index"),

            DiffError::GroupTooLarge {
                group_id,
                records,
                limit,
            } => ExError::new(ExErrorKind::LimitExceeded)
                .with_group_id(group_id)
                .with_message(format!("{} records exceed limit of {}", records, limit)),

            DiffError::InvalidInput { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }

            DiffError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            DiffError::Io { message } => ExError::new(ExErrorKind::Io).with_message(message),
        }
    }
}

impl From<serde_json::Error> for DiffError {
    fn from(err: serde_json::Error) -> Self {
        DiffError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DiffError {
    fn from(err: toml::de::Error) -> Self {
        DiffError::Serialization {
            message: err.to_string(),
        }
    }
}

impl DiffError {
    /// Failure to read an input file, naming the file.
    pub fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        DiffError::Io {
            message: format!("cannot read {}: {}", path.display(), err),
        }
    }
}
