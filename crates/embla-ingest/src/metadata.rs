//! Subject, device and session fields of a decoded recording document.

use chrono::NaiveDateTime;
use embla_model::{DeviceInfo, MetadataNode, RecordingInfo, SessionInfo, SubjectInfo, TypedValue};

use crate::error::{IngestError, Result};

const PATIENT_INFO: &str = "PatientInfo";
const DEVICE: &str = "Device";
const RECORDING_INFO: &str = "RecordingInfo";

/// Extracts recording fields from a decoded document.
///
/// # Errors
///
/// Returns [`IngestError::MissingField`] when a required field is absent and
/// [`IngestError::FieldType`] when it holds the wrong kind of value.
pub fn extract_recording_info(
    document: &MetadataNode,
    manufacturer: &str,
) -> Result<RecordingInfo> {
    Ok(RecordingInfo {
        subject: extract_subject(document)?,
        device: extract_device(document, manufacturer)?,
        session: extract_session(document)?,
    })
}

fn extract_subject(document: &MetadataNode) -> Result<SubjectInfo> {
    let id = match required(document, &[PATIENT_INFO, "ID"])? {
        TypedValue::Text(id) => id.clone(),
        TypedValue::Integer(id) => id.to_string(),
        other => return Err(field_type(&[PATIENT_INFO, "ID"], "text", other)),
    };
    let birth = match optional(document, &[PATIENT_INFO, "DateOfBirth"])? {
        None | Some(TypedValue::Absent) => None,
        Some(TypedValue::Timestamp(birth)) => Some(*birth),
        Some(other) => {
            return Err(field_type(
                &[PATIENT_INFO, "DateOfBirth"],
                "timestamp",
                other,
            ));
        }
    };
    Ok(SubjectInfo {
        id,
        birth,
        gender: optional(document, &[PATIENT_INFO, "Gender"])?.cloned(),
        notes: optional(document, &[PATIENT_INFO, "Notes"])?.cloned(),
        height: optional(document, &[PATIENT_INFO, "Height"])?.cloned(),
        weight: optional(document, &[PATIENT_INFO, "Weight"])?.cloned(),
    })
}

fn extract_device(document: &MetadataNode, manufacturer: &str) -> Result<DeviceInfo> {
    Ok(DeviceInfo {
        type_id: required(document, &[DEVICE, "DeviceTypeID"])?.clone(),
        id: required(document, &[DEVICE, "DeviceID"])?.clone(),
        name: required(document, &[DEVICE, "DeviceName"])?.clone(),
        manufacturer: manufacturer.to_string(),
    })
}

fn extract_session(document: &MetadataNode) -> Result<SessionInfo> {
    Ok(SessionInfo {
        start: required_timestamp(document, &[RECORDING_INFO, "StartTime"])?,
        stop: required_timestamp(document, &[RECORDING_INFO, "StopTime"])?,
    })
}

fn required<'a>(document: &'a MetadataNode, path: &[&str]) -> Result<&'a TypedValue> {
    optional(document, path)?.ok_or_else(|| IngestError::MissingField {
        path: path.join("/"),
    })
}

/// A leaf at `path`, `None` when nothing is there. A group at `path` is an
/// error.
fn optional<'a>(document: &'a MetadataNode, path: &[&str]) -> Result<Option<&'a TypedValue>> {
    match document.lookup(path) {
        None => Ok(None),
        Some(MetadataNode::Leaf(value)) => Ok(Some(value)),
        Some(MetadataNode::Group(_)) => Err(IngestError::FieldType {
            path: path.join("/"),
            expected: "value",
            found: "group",
        }),
    }
}

fn required_timestamp(document: &MetadataNode, path: &[&str]) -> Result<NaiveDateTime> {
    let value = required(document, path)?;
    value
        .as_timestamp()
        .ok_or_else(|| field_type(path, "timestamp", value))
}

fn field_type(path: &[&str], expected: &'static str, found: &TypedValue) -> IngestError {
    IngestError::FieldType {
        path: path.join("/"),
        expected,
        found: found.kind(),
    }
}
