//! Recording file discovery.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{IngestError, Result};
use crate::options::ExtractOptions;

/// Files of a recording directory, grouped by role. Each list is sorted by
/// file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingFiles {
    /// Directory the files were found in.
    pub dir: PathBuf,
    /// Candidates for the metadata container. Exactly one is required.
    pub metadata: Vec<PathBuf>,
    /// Event-store containers.
    pub event_stores: Vec<PathBuf>,
    /// Channel descriptor files.
    pub channels: Vec<PathBuf>,
}

impl RecordingFiles {
    /// The single metadata container.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::MissingRequiredFile`] unless exactly one
    /// candidate was found.
    pub fn require_metadata(&self, expected: &str) -> Result<&Path> {
        match self.metadata.as_slice() {
            [path] => Ok(path.as_path()),
            found => Err(IngestError::MissingRequiredFile {
                expected: expected.to_string(),
                dir: self.dir.clone(),
                found: found.len(),
            }),
        }
    }
}

/// Lists all regular files in a directory, sorted by file name.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        // Regular files only
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Classifies the files of a recording directory.
///
/// Names and extensions are matched case-insensitively.
pub fn discover_inputs(dir: &Path, options: &ExtractOptions) -> Result<RecordingFiles> {
    let mut found = RecordingFiles {
        dir: dir.to_path_buf(),
        ..RecordingFiles::default()
    };
    for path in list_files(dir)? {
        if has_file_name(&path, &options.metadata_file) {
            found.metadata.push(path);
        } else if has_extension(&path, &options.event_store_extension) {
            found.event_stores.push(path);
        } else if has_extension(&path, &options.channel_extension) {
            found.channels.push(path);
        }
    }
    Ok(found)
}

/// Checks whether a directory holds an Embla recording, i.e. at least one
/// channel descriptor file.
pub fn is_embla_recording(dir: &Path, options: &ExtractOptions) -> bool {
    let Ok(files) = list_files(dir) else {
        return false;
    };
    let detected = files
        .iter()
        .any(|path| has_extension(path, &options.channel_extension));
    if detected {
        info!(dir = %dir.display(), "detected Embla format");
    }
    detected
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

fn has_file_name(path: &Path, name: &str) -> bool {
    path.file_name()
        .and_then(|file_name| file_name.to_str())
        .map(|file_name| file_name.eq_ignore_ascii_case(name))
        .unwrap_or(false)
}
