//! Loads a complete recording: metadata document plus every event store.

use embla_model::{GenericEvent, MetadataNode, RecordingInfo};
use tracing::{debug, info, info_span, warn};

use crate::condition::{Condition, ConditionSink};
use crate::container::{ContainerSource, EventStoreDecoder, read_event_store, read_stream};
use crate::discovery::{RecordingFiles, discover_inputs};
use crate::document::{decode_document, decode_recording_text};
use crate::error::Result;
use crate::metadata::extract_recording_info;
use crate::options::ExtractOptions;
use crate::reconstruct::reconstruct;

/// Everything extracted from one recording directory.
#[derive(Debug, Clone)]
pub struct EmblaRecording {
    pub files: RecordingFiles,
    /// The decoded recording document.
    pub metadata: MetadataNode,
    pub info: RecordingInfo,
    /// Events of all readable event stores, in file order.
    pub events: Vec<GenericEvent>,
}

/// Loads the recording configured in `options`.
///
/// The metadata container is required: a missing container, unreadable
/// stream, malformed document or missing recording field fails the load.
/// Event stores are optional: one that cannot be read, decoded or
/// reconstructed is reported to `sink` as [`Condition::EventStoreSkipped`]
/// and the remaining stores are still loaded.
///
/// # Errors
///
/// Returns the first error met while loading the metadata container, or
/// [`crate::IngestError::UnresolvedPath`] when no input path is configured.
pub fn load_recording<S, D>(
    options: &ExtractOptions,
    source: &S,
    decoder: &D,
    sink: &mut dyn ConditionSink,
) -> Result<EmblaRecording>
where
    S: ContainerSource + ?Sized,
    D: EventStoreDecoder + ?Sized,
{
    let dir = options.input_dir()?;
    let span = info_span!("recording", dir = %dir.display());
    let _guard = span.enter();

    let files = discover_inputs(dir, options)?;
    let metadata_path = files.require_metadata(&options.metadata_file)?;
    if files.event_stores.is_empty() {
        sink.report(Condition::NoEventStores {
            dir: dir.to_path_buf(),
        });
    }

    let bytes = read_stream(source, metadata_path, &options.metadata_stream)?;
    let xml = decode_recording_text(&bytes);
    let metadata = decode_document(&xml, sink)?;
    let info = extract_recording_info(&metadata, &options.manufacturer)?;
    info!(subject = %info.subject.id, "loaded recording metadata");

    let mut events = Vec::new();
    for path in &files.event_stores {
        let loaded = read_event_store(source, decoder, path, &options.event_stream)
            .and_then(|store| reconstruct(&store, &mut *sink));
        match loaded {
            Ok(mut store_events) => {
                debug!(path = %path.display(), count = store_events.len(), "read event store");
                events.append(&mut store_events);
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping event store");
                sink.report(Condition::EventStoreSkipped {
                    path: path.clone(),
                    reason: error.to_string(),
                });
            }
        }
    }
    info!(events = events.len(), "loaded recording events");

    Ok(EmblaRecording {
        files,
        metadata,
        info,
        events,
    })
}
