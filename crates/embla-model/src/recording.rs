//! Recording-level metadata: who was recorded, with what, and when.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::value::TypedValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectInfo {
    pub id: String,
    pub birth: Option<NaiveDateTime>,
    pub gender: Option<TypedValue>,
    pub notes: Option<TypedValue>,
    pub height: Option<TypedValue>,
    pub weight: Option<TypedValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub type_id: TypedValue,
    pub id: TypedValue,
    pub name: TypedValue,
    pub manufacturer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub start: NaiveDateTime,
    pub stop: NaiveDateTime,
}

impl SessionInfo {
    /// Recording length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        let delta = self.stop - self.start;
        delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) * 1e-9
    }
}

/// Subject, device and session fields extracted from the recording document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingInfo {
    pub subject: SubjectInfo,
    pub device: DeviceInfo,
    pub session: SessionInfo,
}
