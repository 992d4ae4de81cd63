//! Recoverable conditions raised while decoding a recording.
//!
//! Nothing in this module aborts a load. Decoders hand each condition to a
//! [`ConditionSink`] chosen by the caller: [`TracingSink`] logs it,
//! [`CollectingSink`] keeps it for later inspection.

use std::fmt;
use std::path::PathBuf;

use tracing::warn;

/// A problem the decoder worked around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// A leaf carried a datatype tag the codec does not know; its raw text
    /// was kept.
    UnknownType { element: String, tag: String },
    /// A leaf's text did not parse as its datatype; its raw text was kept.
    DecodeFailure {
        element: String,
        tag: String,
        reason: String,
    },
    /// Neither the type catalog nor the aux data named an event; the event
    /// was kept with an empty name.
    NameUnresolved {
        group_type_index: usize,
        aux_data_id: u32,
    },
    /// The recording has no event stores.
    NoEventStores { dir: PathBuf },
    /// An event store failed and contributed no events.
    EventStoreSkipped { path: PathBuf, reason: String },
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType { element, tag } => {
                write!(f, "unknown datatype '{tag}' on <{element}>, kept raw text")
            }
            Self::DecodeFailure {
                element,
                tag,
                reason,
            } => write!(f, "invalid {tag} in <{element}> ({reason}), kept raw text"),
            Self::NameUnresolved { aux_data_id, .. } => {
                write!(f, "can't get event name for index {aux_data_id}")
            }
            Self::NoEventStores { dir } => write!(
                f,
                "no event stores found in {}, event list will be empty",
                dir.display()
            ),
            Self::EventStoreSkipped { path, reason } => {
                write!(f, "skipped event store {}: {reason}", path.display())
            }
        }
    }
}

/// Receiver for recoverable conditions.
pub trait ConditionSink {
    fn report(&mut self, condition: Condition);
}

/// Logs every condition as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ConditionSink for TracingSink {
    fn report(&mut self, condition: Condition) {
        warn!(%condition, "recoverable decode condition");
    }
}

/// Keeps every condition in report order.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    pub conditions: Vec<Condition>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }
}

impl ConditionSink for CollectingSink {
    fn report(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }
}

impl<S: ConditionSink + ?Sized> ConditionSink for &mut S {
    fn report(&mut self, condition: Condition) {
        (**self).report(condition);
    }
}
