//! Decoding of single typed leaves.

use chrono::NaiveDateTime;
use embla_model::{TypedValue, ValueType};

use crate::error::ValueError;

/// Parse pattern for `datetime` leaves; the fraction is validated separately.
const DATETIME_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Decodes the text of a leaf tagged with `tag`.
///
/// Leaves without text decode to [`TypedValue::Absent`] whatever the tag.
///
/// # Errors
///
/// [`ValueError::UnknownType`] for an unrecognized tag and
/// [`ValueError::Malformed`] for text that does not parse as the tagged
/// type. Callers are expected to keep the raw text in both cases.
pub fn decode_value(tag: &str, raw: Option<&str>) -> Result<TypedValue, ValueError> {
    let Some(raw) = raw else {
        return Ok(TypedValue::Absent);
    };
    let value_type: ValueType = tag.parse().map_err(|tag| ValueError::UnknownType { tag })?;
    match value_type {
        ValueType::String => Ok(TypedValue::text(raw)),
        ValueType::DateTime => parse_timestamp(raw)
            .map(TypedValue::Timestamp)
            .map_err(|reason| malformed(tag, raw, reason)),
        ValueType::R8 => raw
            .trim()
            .parse::<f64>()
            .map(TypedValue::Float)
            .map_err(|e| malformed(tag, raw, e.to_string())),
        ValueType::I2 | ValueType::I4 => raw
            .trim()
            .parse::<i64>()
            .map(TypedValue::Integer)
            .map_err(|e| malformed(tag, raw, e.to_string())),
    }
}

/// Parses `YYYY-MM-DDTHH:MM:SS.ffffff`, with one to six fraction digits.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    let fraction = raw
        .rsplit_once('.')
        .map(|(_, fraction)| fraction)
        .ok_or_else(|| "missing fractional seconds".to_string())?;
    if fraction.is_empty() || fraction.len() > 6 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("fractional seconds '{fraction}' must be 1 to 6 digits"));
    }
    NaiveDateTime::parse_from_str(raw, DATETIME_PARSE_FORMAT).map_err(|e| e.to_string())
}

fn malformed(tag: &str, raw: &str, reason: String) -> ValueError {
    ValueError::Malformed {
        tag: tag.to_string(),
        raw: raw.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn decodes_each_known_tag() {
        assert_eq!(
            decode_value("string", Some("Jane")),
            Ok(TypedValue::text("Jane"))
        );
        assert_eq!(decode_value("r8", Some("72.5")), Ok(TypedValue::Float(72.5)));
        assert_eq!(decode_value("i2", Some("-3")), Ok(TypedValue::Integer(-3)));
        assert_eq!(decode_value("i4", Some(" 120 ")), Ok(TypedValue::Integer(120)));

        let expected = NaiveDate::from_ymd_opt(2018, 11, 23)
            .unwrap()
            .and_hms_micro_opt(21, 47, 3, 500_000)
            .unwrap();
        assert_eq!(
            decode_value("datetime", Some("2018-11-23T21:47:03.500000")),
            Ok(TypedValue::Timestamp(expected))
        );
    }

    #[test]
    fn absent_text_wins_over_tag() {
        assert_eq!(decode_value("r8", None), Ok(TypedValue::Absent));
        assert_eq!(decode_value("bin.hex", None), Ok(TypedValue::Absent));
    }

    #[test]
    fn empty_string_is_text_not_absent() {
        assert_eq!(decode_value("string", Some("")), Ok(TypedValue::text("")));
    }

    #[test]
    fn unknown_tag_is_reported() {
        assert_eq!(
            decode_value("unknown", Some("x")),
            Err(ValueError::UnknownType {
                tag: "unknown".to_string()
            })
        );
    }

    #[test]
    fn datetime_requires_fraction() {
        assert!(matches!(
            decode_value("datetime", Some("2018-11-23T21:47:03")),
            Err(ValueError::Malformed { .. })
        ));
        assert!(matches!(
            decode_value("datetime", Some("2018-11-23T21:47:03.1234567")),
            Err(ValueError::Malformed { .. })
        ));
        assert!(parse_timestamp("2018-11-23T21:47:03.1").is_ok());
        assert!(parse_timestamp("23/11/2018 21:47:03.000000").is_err());
    }

    #[test]
    fn malformed_numbers_are_reported() {
        let err = decode_value("i4", Some("12.5")).unwrap_err();
        assert!(matches!(
            err,
            ValueError::Malformed { ref tag, ref raw, .. } if tag == "i4" && raw == "12.5"
        ));
        assert!(decode_value("r8", Some("tall")).is_err());
    }
}
