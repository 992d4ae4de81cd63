//! Raw contents of an event store, before names and channels are resolved.
//!
//! An event store keeps its data in parallel streams: one record and one
//! start time per event (paired by position), plus shared catalogs the
//! records point into by index.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::node::MetadataNode;

/// Per-event record as stored in the `Events` stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Index into [`EventStore::locations`].
    pub location_index: usize,
    /// Index into [`EventStore::event_types`].
    pub group_type_index: usize,
    /// Key into [`EventStore::aux_data`].
    pub aux_data_id: u32,
    /// Duration in seconds.
    pub time_span: f64,
}

/// Compound signal type of a recording location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalType {
    pub main_type: String,
    pub sub_type: String,
}

impl SignalType {
    pub fn new(main_type: impl Into<String>, sub_type: impl Into<String>) -> Self {
        Self {
            main_type: main_type.into(),
            sub_type: sub_type.into(),
        }
    }
}

/// Renders `<main>_<sub>`, the channel identifier format.
impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.main_type, self.sub_type)
    }
}

/// Entry of the location catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub signal_type: SignalType,
}

impl LocationEntry {
    pub fn new(main_type: impl Into<String>, sub_type: impl Into<String>) -> Self {
        Self {
            signal_type: SignalType::new(main_type, sub_type),
        }
    }
}

/// Auxiliary classification data keyed by aux id. Each entry is a node tree
/// as decoded from the store.
pub type AuxTable = BTreeMap<u32, MetadataNode>;

/// The parallel streams of one event store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventStore {
    /// Event records, one per event.
    pub events: Vec<EventRecord>,
    /// Start times, paired with `events` by position.
    pub start_times: Vec<NaiveDateTime>,
    /// Fallback classification data.
    pub aux_data: AuxTable,
    /// Event type names indexed by group type.
    pub event_types: Vec<String>,
    /// Location catalog.
    pub locations: Vec<LocationEntry>,
}

impl EventStore {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.start_times.is_empty()
    }
}
