//! Rebuilds timed events from the parallel streams of an event store.

use embla_model::{EventStore, GenericEvent};
use tracing::debug;

use crate::condition::{Condition, ConditionSink};
use crate::error::{IngestError, Result};
use crate::resolve::{NameUnresolved, resolve_channel, resolve_name};

/// Pairs each event record with the start time at the same position and
/// resolves its channel and name.
///
/// Events come out in record order. An event whose name cannot be resolved
/// is kept with an empty name and reported to `sink`.
///
/// # Errors
///
/// - [`IngestError::StructuralMismatch`] when there are not as many start
///   times as records; no event is produced.
/// - [`IngestError::ChannelUnresolved`] when a record points past the
///   location catalog.
pub fn reconstruct(
    store: &EventStore,
    sink: &mut dyn ConditionSink,
) -> Result<Vec<GenericEvent>> {
    if store.events.len() != store.start_times.len() {
        return Err(IngestError::StructuralMismatch {
            events: store.events.len(),
            start_times: store.start_times.len(),
        });
    }

    let mut events = Vec::with_capacity(store.events.len());
    for (record, &time) in store.events.iter().zip(&store.start_times) {
        let channel = resolve_channel(record.location_index, &store.locations)?;
        let name = match resolve_name(
            record.group_type_index,
            record.aux_data_id,
            &store.event_types,
            &store.aux_data,
        ) {
            Ok(name) => name,
            Err(NameUnresolved {
                group_type_index,
                aux_data_id,
            }) => {
                debug!(group_type_index, aux_data_id, "no name for event");
                sink.report(Condition::NameUnresolved {
                    group_type_index,
                    aux_data_id,
                });
                String::new()
            }
        };
        let mut event: GenericEvent = GenericEvent::new(name, time, record.time_span);
        event.add_channel(channel);
        events.push(event);
    }
    debug!(count = events.len(), "reconstructed events");
    Ok(events)
}
