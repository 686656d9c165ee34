//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{CalendarDay, Error, Mood};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidDate,
    InvalidMood,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::InvalidMood => "invalid_mood",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<serde_json::Value>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

/// Collapse several absent fields into one `Missing fields` rejection.
pub(crate) fn missing_fields_error(fields: &[FieldName]) -> Error {
    let names: Vec<&str> = fields.iter().map(FieldName::as_str).collect();
    Error::invalid_request("Missing fields").with_details(json!({
        "fields": names,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    let name = field.as_str();
    Uuid::parse_str(value).map_err(|_| {
        ValidationError::new(name, format!("{name} must be a valid UUID"))
            .with_value(ErrorCode::InvalidUuid, value)
    })
}

pub(crate) fn parse_day(value: &str, field: FieldName) -> Result<CalendarDay, Error> {
    let name = field.as_str();
    CalendarDay::parse(value).map_err(|err| {
        ValidationError::new(name, err.to_string()).with_value(ErrorCode::InvalidDate, value)
    })
}

pub(crate) fn parse_optional_day(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<CalendarDay>, Error> {
    value.map(|raw| parse_day(raw, field)).transpose()
}

pub(crate) fn parse_mood(value: i64, field: FieldName) -> Result<Mood, Error> {
    let name = field.as_str();
    Mood::new(value).map_err(|err| {
        ValidationError::new(name, err.to_string()).with_value(ErrorCode::InvalidMood, value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;

    const DATE: FieldName = FieldName::new("date");

    #[rstest]
    fn missing_field_names_the_field() {
        let err = missing_field_error(FieldName::new("mood"));

        assert_eq!(err.code(), DomainCode::InvalidRequest);
        let details = err.details().expect("details");
        assert_eq!(details["field"], "mood");
        assert_eq!(details["code"], "missing_field");
    }

    #[rstest]
    fn missing_fields_lists_every_name() {
        let err = missing_fields_error(&[FieldName::new("date"), FieldName::new("taskText")]);

        assert_eq!(err.message(), "Missing fields");
        assert_eq!(
            err.details().expect("details")["fields"],
            json!(["date", "taskText"])
        );
    }

    #[rstest]
    #[case("2026-02-30")]
    #[case("02/03/2026")]
    #[case("")]
    fn malformed_days_are_rejected(#[case] raw: &str) {
        let err = parse_day(raw, DATE).expect_err("invalid date");

        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(err.details().expect("details")["code"], "invalid_date");
    }

    #[rstest]
    fn absent_day_stays_absent() {
        assert_eq!(parse_optional_day(None, DATE).expect("no value"), None);
    }

    #[rstest]
    #[case(0)]
    #[case(11)]
    fn out_of_range_mood_is_rejected_with_value(#[case] value: i64) {
        let err = parse_mood(value, FieldName::new("mood")).expect_err("out of range");

        assert_eq!(err.details().expect("details")["value"], value);
    }

    #[rstest]
    fn non_uuid_path_segment_is_rejected() {
        let err = parse_uuid("abc", FieldName::new("id")).expect_err("not a UUID");

        assert_eq!(err.details().expect("details")["code"], "invalid_uuid");
    }
}
