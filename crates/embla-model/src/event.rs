//! Format-agnostic timed events.
//!
//! A [`GenericEvent`] is identified by its start time, name and duration.
//! Channels are attached to an event but take no part in equality or
//! ordering. Events are parametrized by an [`EventKind`] marker so that
//! events of different kinds cannot be compared by accident; [`AnyEvent`]
//! covers mixed collections and reports cross-kind comparisons as
//! [`ModelError::TypeMismatch`].

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use chrono::NaiveDateTime;
use indexmap::IndexSet;

use crate::error::{ModelError, Result};

/// Marker for the source family of an event.
pub trait EventKind: fmt::Debug + Clone + Copy + Default + 'static {
    /// Label used in diagnostics.
    const NAME: &'static str;
}

/// Events with no format-specific meaning attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Generic;

impl EventKind for Generic {
    const NAME: &'static str = "generic";
}

/// Events tied to an Embla recording.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Embla;

impl EventKind for Embla {
    const NAME: &'static str = "embla";
}

/// A timed event with an insertion-ordered set of channel identifiers.
#[derive(Debug, Clone)]
pub struct GenericEvent<K: EventKind = Generic> {
    name: String,
    time: NaiveDateTime,
    duration: f64,
    channels: IndexSet<String>,
    kind: PhantomData<K>,
}

impl<K: EventKind> Default for GenericEvent<K> {
    fn default() -> Self {
        Self::new("", NaiveDateTime::MIN, 0.0)
    }
}

impl<K: EventKind> GenericEvent<K> {
    /// Creates an event without channels. `duration` is in seconds.
    pub fn new(name: impl Into<String>, time: NaiveDateTime, duration: f64) -> Self {
        Self {
            name: name.into(),
            time,
            duration,
            channels: IndexSet::new(),
            kind: PhantomData,
        }
    }

    /// Re-labels the event as another kind, keeping every field.
    pub fn with_kind<T: EventKind>(self) -> GenericEvent<T> {
        GenericEvent {
            name: self.name,
            time: self.time,
            duration: self.duration,
            channels: self.channels,
            kind: PhantomData,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        K::NAME
    }

    /// Stored name, possibly empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name prepared for display.
    ///
    /// An empty name yields `void`. Otherwise every occurrence of
    /// `replace.0` is substituted by `replace.1` when a replacement is given.
    pub fn display_name<'a>(
        &'a self,
        void: &'a str,
        replace: Option<(&str, &str)>,
    ) -> Cow<'a, str> {
        if self.name.is_empty() {
            return Cow::Borrowed(void);
        }
        match replace {
            Some((from, to)) if !from.is_empty() && self.name.contains(from) => {
                Cow::Owned(self.name.replace(from, to))
            }
            _ => Cow::Borrowed(&self.name),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    pub fn set_time(&mut self, time: NaiveDateTime) {
        self.time = time;
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration;
    }

    /// Seconds from `reference` to the event start; negative when the event
    /// starts earlier.
    pub fn offset_from(&self, reference: NaiveDateTime) -> f64 {
        let delta = self.time - reference;
        delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) * 1e-9
    }

    /// Attaches a channel. Returns `false` when it was already attached.
    pub fn add_channel(&mut self, id: impl Into<String>) -> bool {
        self.channels.insert(id.into())
    }

    pub fn add_channels<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            self.add_channel(id);
        }
    }

    /// Detaches a channel, keeping the order of the others. Returns `false`
    /// when it was not attached.
    pub fn remove_channel(&mut self, id: &str) -> bool {
        self.channels.shift_remove(id)
    }

    pub fn clear_channels(&mut self) {
        self.channels.clear();
    }

    pub fn has_channel(&self, id: &str) -> bool {
        self.channels.contains(id)
    }

    /// Channels in insertion order.
    pub fn channels(&self) -> impl ExactSizeIterator<Item = &str> {
        self.channels.iter().map(String::as_str)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

impl<K: EventKind> PartialEq for GenericEvent<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: EventKind> Eq for GenericEvent<K> {}

impl<K: EventKind> PartialOrd for GenericEvent<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Durations use IEEE total ordering so that NaN cannot break the order.
impl<K: EventKind> Ord for GenericEvent<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.duration.total_cmp(&other.duration))
    }
}

/// An event of any known kind.
#[derive(Debug, Clone)]
pub enum AnyEvent {
    Generic(GenericEvent<Generic>),
    Embla(GenericEvent<Embla>),
}

impl From<GenericEvent<Generic>> for AnyEvent {
    fn from(event: GenericEvent<Generic>) -> Self {
        Self::Generic(event)
    }
}

impl From<GenericEvent<Embla>> for AnyEvent {
    fn from(event: GenericEvent<Embla>) -> Self {
        Self::Embla(event)
    }
}

impl AnyEvent {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Generic(event) => event.kind_name(),
            Self::Embla(event) => event.kind_name(),
        }
    }

    /// Orders two events of the same kind.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::TypeMismatch`] when the kinds differ.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering> {
        match (self, other) {
            (Self::Generic(a), Self::Generic(b)) => Ok(a.cmp(b)),
            (Self::Embla(a), Self::Embla(b)) => Ok(a.cmp(b)),
            _ => Err(ModelError::TypeMismatch {
                left: self.kind_name(),
                right: other.kind_name(),
            }),
        }
    }

    /// Equality between two events of the same kind.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::TypeMismatch`] when the kinds differ.
    pub fn try_eq(&self, other: &Self) -> Result<bool> {
        self.try_cmp(other).map(|ordering| ordering == Ordering::Equal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 5, 2)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn equality_ignores_channels() {
        let mut a: GenericEvent = GenericEvent::new("Arousal", at(1, 0, 0), 3.0);
        let b: GenericEvent = GenericEvent::new("Arousal", at(1, 0, 0), 3.0);
        a.add_channel("EEG_C3");
        assert_eq!(a, b);
    }

    #[test]
    fn ordering_is_time_then_name_then_duration() {
        let early: GenericEvent = GenericEvent::new("Z", at(0, 0, 1), 9.0);
        let late_a: GenericEvent = GenericEvent::new("A", at(0, 0, 2), 9.0);
        let late_b_short: GenericEvent = GenericEvent::new("B", at(0, 0, 2), 1.0);
        let late_b_long: GenericEvent = GenericEvent::new("B", at(0, 0, 2), 2.0);

        let mut events = vec![
            late_b_long.clone(),
            late_a.clone(),
            early.clone(),
            late_b_short.clone(),
        ];
        events.sort();
        assert_eq!(events, vec![early, late_a, late_b_short, late_b_long]);
    }

    #[test]
    fn add_channel_is_idempotent_and_ordered() {
        let mut event: GenericEvent = GenericEvent::default();
        assert!(event.add_channel("EEG_C3"));
        assert!(event.add_channel("EOG_E1"));
        assert!(!event.add_channel("EEG_C3"));
        event.add_channels(["EMG_Chin", "EOG_E1"]);
        assert_eq!(
            event.channels().collect::<Vec<_>>(),
            vec!["EEG_C3", "EOG_E1", "EMG_Chin"]
        );
    }

    #[test]
    fn remove_channel_keeps_remaining_order() {
        let mut event: GenericEvent = GenericEvent::default();
        event.add_channels(["a", "b", "c"]);
        assert!(event.remove_channel("b"));
        assert!(!event.remove_channel("missing"));
        assert_eq!(event.channels().collect::<Vec<_>>(), vec!["a", "c"]);
        event.clear_channels();
        assert_eq!(event.channel_count(), 0);
    }

    #[test]
    fn display_name_substitutes_void_and_replacement() {
        let unnamed: GenericEvent = GenericEvent::default();
        assert_eq!(unnamed.display_name("n/a", Some((" ", "_"))), "n/a");

        let named: GenericEvent = GenericEvent::new("Leg movement left", at(2, 0, 0), 0.5);
        assert_eq!(named.display_name("n/a", None), "Leg movement left");
        assert_eq!(
            named.display_name("n/a", Some((" ", "_"))),
            "Leg_movement_left"
        );
        assert_eq!(named.name(), "Leg movement left");
    }

    #[test]
    fn offset_from_reference_in_seconds() {
        let mut event: GenericEvent = GenericEvent::new("Apnea", at(1, 0, 30), 12.0);
        assert_eq!(event.offset_from(at(1, 0, 0)), 30.0);
        assert_eq!(event.offset_from(at(1, 1, 0)), -30.0);
        event.set_time(at(1, 0, 0) + chrono::TimeDelta::milliseconds(1500));
        assert!((event.offset_from(at(1, 0, 0)) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn any_event_rejects_cross_kind_comparison() {
        let generic = AnyEvent::from(GenericEvent::<Generic>::new("A", at(0, 0, 0), 1.0));
        let embla = AnyEvent::from(GenericEvent::<Embla>::new("A", at(0, 0, 0), 1.0));

        let err = generic.try_cmp(&embla).unwrap_err();
        assert!(matches!(
            err,
            ModelError::TypeMismatch {
                left: "generic",
                right: "embla"
            }
        ));
        assert!(generic.try_eq(&generic.clone()).unwrap());
    }

    #[test]
    fn with_kind_keeps_fields() {
        let mut event: GenericEvent = GenericEvent::new("Desat", at(3, 0, 0), 8.0);
        event.add_channel("SpO2_SpO2");
        let embla: GenericEvent<Embla> = event.with_kind();
        assert_eq!(embla.name(), "Desat");
        assert_eq!(embla.kind_name(), "embla");
        assert!(embla.has_channel("SpO2_SpO2"));
    }
}
