//! Configuration for loading an Embla recording.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Options controlling where recording files are looked up and which
/// container streams are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Directory holding the recording. Must be set before loading.
    pub input_path: Option<PathBuf>,

    /// File name of the required metadata container.
    pub metadata_file: String,

    /// Extension of event-store containers.
    pub event_store_extension: String,

    /// Extension of channel descriptor files. Their presence marks a
    /// directory as an Embla recording.
    pub channel_extension: String,

    /// Stream of the metadata container holding the recording document.
    pub metadata_stream: String,

    /// Stream of an event-store container holding the events.
    pub event_stream: String,

    /// Manufacturer reported for the recording device.
    pub manufacturer: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            input_path: None,
            metadata_file: "Recording.esrc".to_string(),
            event_store_extension: "esedb".to_string(),
            channel_extension: "ebm".to_string(),
            metadata_stream: "RecordingXML".to_string(),
            event_stream: "Event Store/Events".to_string(),
            manufacturer: "RemLogic".to_string(),
        }
    }
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = manufacturer.into();
        self
    }

    /// The configured input directory.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::UnresolvedPath`] when no input path is set.
    pub fn input_dir(&self) -> Result<&Path> {
        self.input_path.as_deref().ok_or(IngestError::UnresolvedPath)
    }
}
