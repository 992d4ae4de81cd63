//! Data model for Embla recording extraction.
//!
//! - [`TypedValue`] / [`MetadataNode`]: the decoded recording document
//! - [`EventStore`]: raw parallel streams of an event store
//! - [`GenericEvent`]: reconstructed timed events
//! - [`RecordingInfo`]: subject, device and session fields

pub mod error;
pub mod event;
pub mod node;
pub mod recording;
pub mod store;
pub mod value;

pub use error::{ModelError, Result};
pub use event::{AnyEvent, Embla, EventKind, Generic, GenericEvent};
pub use node::{MetadataGroup, MetadataNode};
pub use recording::{DeviceInfo, RecordingInfo, SessionInfo, SubjectInfo};
pub use store::{AuxTable, EventRecord, EventStore, LocationEntry, SignalType};
pub use value::{DATETIME_FORMAT, TypedValue, ValueType};
