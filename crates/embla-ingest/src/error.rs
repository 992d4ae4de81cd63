//! Error types for Embla recording ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a load, or the processing of one event store.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Configuration Errors ===
    /// No input directory was configured.
    #[error("input path is not set")]
    UnresolvedPath,

    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The required metadata container is missing or ambiguous.
    #[error("expected exactly one {expected} in {dir}, found {found}")]
    MissingRequiredFile {
        expected: String,
        dir: PathBuf,
        found: usize,
    },

    // === Container Errors ===
    /// Failed to open or read a named stream of a container.
    #[error("failed to read stream '{stream}' of {path}: {source}")]
    StreamRead {
        path: PathBuf,
        stream: String,
        #[source]
        source: std::io::Error,
    },

    /// The event-store decoder rejected a stream.
    #[error("failed to decode event store {path}: {message}")]
    EventStoreDecode { path: PathBuf, message: String },

    // === Document Errors ===
    /// Malformed recording document markup.
    #[error("malformed recording document: {message}")]
    Xml { message: String },

    /// A required metadata field is missing.
    #[error("missing metadata field {path}")]
    MissingField { path: String },

    /// A metadata field holds a value of the wrong type.
    #[error("metadata field {path} should be {expected}, found {found}")]
    FieldType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    // === Event Store Errors ===
    /// An event points past the end of the location catalog.
    #[error("location index {index} out of range for {len} locations")]
    ChannelUnresolved { index: usize, len: usize },

    /// Event records and start times are not paired one to one.
    #[error("{events} event records but {start_times} start times")]
    StructuralMismatch { events: usize, start_times: usize },
}

impl From<quick_xml::Error> for IngestError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml {
            message: err.to_string(),
        }
    }
}

/// Failure to decode one typed leaf. Both variants are recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The datatype tag is not one the codec knows.
    #[error("unknown datatype '{tag}'")]
    UnknownType { tag: String },

    /// The text does not parse as the tagged type.
    #[error("invalid {tag} value '{raw}': {reason}")]
    Malformed {
        tag: String,
        raw: String,
        reason: String,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::MissingRequiredFile {
            expected: "Recording.esrc".to_string(),
            dir: PathBuf::from("/data/night1"),
            found: 0,
        };
        assert_eq!(
            err.to_string(),
            "expected exactly one Recording.esrc in /data/night1, found 0"
        );
    }

    #[test]
    fn test_structural_mismatch_display() {
        let err = IngestError::StructuralMismatch {
            events: 3,
            start_times: 2,
        };
        assert_eq!(err.to_string(), "3 event records but 2 start times");
    }
}
