//! Label engine error types.

use thiserror::Error;

/// Label engine operation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LabelError {
    /// Ingestion produced no record with a usable barcode
    #[error("Dataset contains no records with a non-empty barcode")]
    EmptyOrInvalidDataset,

    /// Geometry field is not positive
    #[error("Invalid geometry: '{field}' must be positive (got {value})")]
    InvalidGeometry { field: &'static str, value: f64 },

    /// Template name is empty or whitespace
    #[error("Template name must not be blank")]
    BlankName,

    /// Built-in templates cannot be overwritten or deleted
    #[error("Template '{name}' is built in and cannot be modified")]
    BuiltinTemplate { name: String },

    /// Template not found
    #[error("Template '{name}' not found")]
    TemplateNotFound { name: String },

    /// Store rejected a write; in-memory state is kept
    #[error("Failed to persist '{namespace}': {reason}")]
    PersistenceWriteFailure { namespace: String, reason: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Stored data failed integrity checks
    #[error("Data corruption detected: {0}")]
    DataCorruption(String),

    /// Lock poisoned (RwLock poisoned)
    #[error("Lock poisoned")]
    LockPoisoned,

    /// Disk full error during persistence
    #[error("Disk full: {0}")]
    DiskFull(String),

    /// I/O error during persistence
    #[error("I/O error: {0}")]
    IoError(String),

    /// Transient I/O error that may succeed on retry
    #[error("Transient I/O error: {0}")]
    TransientIoError(String),
}

impl LabelError {
    /// Wraps a store error as a write-through failure for `namespace`.
    pub(crate) fn write_failure(namespace: &str, source: LabelError) -> Self {
        match source {
            already @ LabelError::PersistenceWriteFailure { .. } => already,
            other => LabelError::PersistenceWriteFailure {
                namespace: namespace.to_string(),
                reason: other.to_string(),
            },
        }
    }
}
