//! Access to compound containers and their binary event stores.
//!
//! Reading the compound-file format and decoding the binary record format
//! of event stores are left to implementations of these traits.

use std::fmt;
use std::io::Read;
use std::path::Path;

use embla_model::EventStore;

use crate::error::{IngestError, Result};

/// Opens named streams inside container files.
pub trait ContainerSource {
    type Stream: Read;

    /// Opens `stream` inside the container at `container`.
    ///
    /// The returned handle is dropped as soon as the caller has read it.
    fn open_stream(&self, container: &Path, stream: &str) -> std::io::Result<Self::Stream>;
}

/// Decodes the binary event-store stream into its parallel parts.
pub trait EventStoreDecoder {
    type Error: fmt::Display;

    fn decode(&self, reader: &mut dyn Read) -> std::result::Result<EventStore, Self::Error>;
}

/// Reads a whole stream. The stream handle is closed before returning,
/// whether or not the read succeeded.
pub fn read_stream<S: ContainerSource + ?Sized>(
    source: &S,
    container: &Path,
    stream: &str,
) -> Result<Vec<u8>> {
    let stream_error = |source: std::io::Error| IngestError::StreamRead {
        path: container.to_path_buf(),
        stream: stream.to_string(),
        source,
    };
    let mut handle = source.open_stream(container, stream).map_err(stream_error)?;
    let mut bytes = Vec::new();
    handle.read_to_end(&mut bytes).map_err(stream_error)?;
    Ok(bytes)
}

/// Opens an event-store stream and decodes it. The stream handle is closed
/// before returning.
pub fn read_event_store<S, D>(
    source: &S,
    decoder: &D,
    container: &Path,
    stream: &str,
) -> Result<EventStore>
where
    S: ContainerSource + ?Sized,
    D: EventStoreDecoder + ?Sized,
{
    let mut handle = source
        .open_stream(container, stream)
        .map_err(|source| IngestError::StreamRead {
            path: container.to_path_buf(),
            stream: stream.to_string(),
            source,
        })?;
    decoder
        .decode(&mut handle)
        .map_err(|e| IngestError::EventStoreDecode {
            path: container.to_path_buf(),
            message: e.to_string(),
        })
}
