//! Name and channel lookups for event records.

use embla_model::{AuxTable, LocationEntry, MetadataNode};

use crate::error::{IngestError, Result};

/// Child of an aux entry holding the classification history.
pub const CLASSIFICATION_HISTORY: &str = "Sub Classification History";

/// History entry consulted for the fallback name. Always the first one.
pub const CLASSIFICATION_ORDINAL: &str = "1";

/// Field of a history entry holding the event type name.
pub const CLASSIFICATION_TYPE: &str = "type";

/// Neither the type catalog nor the aux data named the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameUnresolved {
    pub group_type_index: usize,
    pub aux_data_id: u32,
}

/// Resolves the display name of an event.
///
/// The type catalog is indexed by `group_type_index`. Only when that index
/// is out of range is the aux data consulted, following
/// `aux_data[aux_data_id] / Sub Classification History / 1 / type`, which
/// must end in a text value.
///
/// # Errors
///
/// Returns [`NameUnresolved`] when both lookups fail.
pub fn resolve_name(
    group_type_index: usize,
    aux_data_id: u32,
    event_types: &[String],
    aux_data: &AuxTable,
) -> std::result::Result<String, NameUnresolved> {
    if let Some(name) = event_types.get(group_type_index) {
        return Ok(name.clone());
    }
    aux_data
        .get(&aux_data_id)
        .and_then(|entry| {
            entry.lookup(&[
                CLASSIFICATION_HISTORY,
                CLASSIFICATION_ORDINAL,
                CLASSIFICATION_TYPE,
            ])
        })
        .and_then(MetadataNode::as_text)
        .map(str::to_string)
        .ok_or(NameUnresolved {
            group_type_index,
            aux_data_id,
        })
}

/// Resolves the channel identifier `<main>_<sub>` of the location at
/// `location_index`.
///
/// # Errors
///
/// Returns [`IngestError::ChannelUnresolved`] when the index is out of range.
pub fn resolve_channel(location_index: usize, locations: &[LocationEntry]) -> Result<String> {
    locations
        .get(location_index)
        .map(|location| location.signal_type.to_string())
        .ok_or(IngestError::ChannelUnresolved {
            index: location_index,
            len: locations.len(),
        })
}
