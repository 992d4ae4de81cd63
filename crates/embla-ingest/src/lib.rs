//! Embla recording ingestion.
//!
//! This crate turns the files of an Embla/RemLogic sleep recording into the
//! types of `embla-model`: a typed metadata tree, recording information and
//! a list of scored events.
//!
//! # Features
//!
//! - **Discovery**: Classify the files of a recording directory
//! - **Metadata Documents**: Decode the typed XML recording document
//! - **Event Reconstruction**: Rebuild events from decoded event stores
//! - **Conditions**: Report recoverable problems to an injected sink
//!
//! Reading compound containers and decoding the binary event-store format
//! are supplied by the caller through [`ContainerSource`] and
//! [`EventStoreDecoder`].
//!
//! # Example
//!
//! ```ignore
//! use embla_ingest::{ExtractOptions, TracingSink, load_recording};
//!
//! let options = ExtractOptions::new().with_input_path("recordings/night1");
//! let recording = load_recording(&options, &source, &decoder, &mut TracingSink)?;
//! println!("{} events", recording.events.len());
//! ```

mod codec;
mod condition;
mod container;
mod discovery;
mod document;
mod error;
mod loader;
mod metadata;
mod options;
mod reconstruct;
mod resolve;

// === Error Types ===
pub use error::{IngestError, Result, ValueError};

// === Configuration ===
pub use options::ExtractOptions;

// === Conditions ===
pub use condition::{CollectingSink, Condition, ConditionSink, TracingSink};

// === File Discovery ===
pub use discovery::{RecordingFiles, discover_inputs, is_embla_recording, list_files};

// === Metadata Documents ===
pub use codec::{decode_value, parse_timestamp};
pub use document::{
    DATATYPE_ATTRIBUTE, Element, decode_document, decode_element, decode_recording_text,
    parse_document,
};
pub use metadata::extract_recording_info;

// === Containers ===
pub use container::{ContainerSource, EventStoreDecoder, read_event_store, read_stream};

// === Event Reconstruction ===
pub use reconstruct::reconstruct;
pub use resolve::{
    CLASSIFICATION_HISTORY, CLASSIFICATION_ORDINAL, CLASSIFICATION_TYPE, NameUnresolved,
    resolve_channel, resolve_name,
};

// === Loading ===
pub use loader::{EmblaRecording, load_recording};
