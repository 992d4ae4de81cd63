//! Ordering laws for generic events.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use embla_model::GenericEvent;
use proptest::prelude::*;

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .and_hms_opt(22, 0, 0)
        .unwrap()
}

fn arb_event() -> impl Strategy<Value = GenericEvent> {
    (
        0i64..20,
        prop::sample::select(vec!["", "Arousal", "Apnea", "Spindle"]),
        prop::sample::select(vec![0.0f64, 0.5, 1.5, 30.0]),
        prop::collection::vec("[A-Z]{3}_[A-Z0-9]{2}", 0..3),
    )
        .prop_map(|(seconds, name, duration, channels)| {
            let time = base() + TimeDelta::seconds(seconds);
            let mut event: GenericEvent = GenericEvent::new(name, time, duration);
            event.add_channels(channels);
            event
        })
}

proptest! {
    #[test]
    fn ordering_is_transitive(a in arb_event(), b in arb_event(), c in arb_event()) {
        if a < b && b < c {
            prop_assert!(a < c);
        }
        if a <= b && b <= c {
            prop_assert!(a <= c);
        }
    }

    #[test]
    fn ordering_is_antisymmetric(a in arb_event(), b in arb_event()) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
    }

    #[test]
    fn equality_is_reflexive(a in arb_event()) {
        prop_assert!(a == a.clone());
        prop_assert_eq!(a.cmp(&a), Ordering::Equal);
    }

    #[test]
    fn equality_matches_ordering(a in arb_event(), b in arb_event()) {
        prop_assert_eq!(a == b, a.cmp(&b) == Ordering::Equal);
    }
}

#[test]
fn channels_do_not_affect_equality() {
    let mut a: GenericEvent = GenericEvent::new("Spindle", base(), 1.5);
    let mut b: GenericEvent = GenericEvent::new("Spindle", base(), 1.5);
    a.add_channel("EEG_C3");
    b.add_channel("EEG_C4");
    assert_eq!(a, b);
    assert_eq!(a.cmp(&b), Ordering::Equal);
}
