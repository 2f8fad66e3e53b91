use thiserror::Error;

/// Result type alias using AssetLibError
pub type Result<T> = std::result::Result<T, AssetLibError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling,
/// testing and CLI output. Ambiguous matches and missing renditions are not
/// errors: they are reported through the delta itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    MissingField,
    DuplicatePath,
    InvalidTimestamp,

    // Snapshot manifest parsing
    /// Snapshot bytes are not valid UTF-8 JSON, or the root is not an object
    InvalidManifest,

    // Configuration
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::DuplicatePath => "ERR_DUPLICATE_PATH",
            ExErrorKind::InvalidTimestamp => "ERR_INVALID_TIMESTAMP",
            ExErrorKind::InvalidManifest => "ERR_INVALID_MANIFEST",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and context for
/// debugging (the operation that failed and the asset path involved).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity context (an asset or rendition path)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
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
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (path: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for asset-library operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetLibError {
    /// A record is missing a required field
    #[error("Record {path} is missing required field `{field}`")]
    MissingField { path: String, field: String },

    /// Two records in one snapshot subtree share a path
    #[error("Duplicate path in snapshot: {path}")]
    DuplicatePath { path: String },

    /// A timestamp could not be parsed
    #[error("Record {path} has unparsable `{field}` timestamp: {value}")]
    InvalidTimestamp {
        path: String,
        field: String,
        value: String,
    },

    /// A caller-supplied argument is unusable
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Rendition naming configuration is unusable
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Reading a configuration or snapshot file failed
    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<AssetLibError> for ExError {
    fn from(err: AssetLibError) -> Self {
        let message = err.to_string();
        match err {
            AssetLibError::MissingField { path, .. } => ExError::new(ExErrorKind::MissingField)
                .with_entity_id(path)
                .with_message(message),
            AssetLibError::DuplicatePath { path } => ExError::new(ExErrorKind::DuplicatePath)
                .with_entity_id(path)
                .with_message(message),
            AssetLibError::InvalidTimestamp { path, .. } => {
                ExError::new(ExErrorKind::InvalidTimestamp)
                    .with_entity_id(path)
                    .with_message(message)
            }
            AssetLibError::InvalidInput { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
            AssetLibError::InvalidConfig { .. } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(message)
            }
            AssetLibError::Io { .. } => ExError::new(ExErrorKind::Io).with_message(message),
            AssetLibError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for AssetLibError {
    fn from(err: serde_json::Error) -> Self {
        AssetLibError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AssetLibError {
    fn from(err: std::io::Error) -> Self {
        AssetLibError::Io {
            message: err.to_string(),
        }
    }
}
