//! Field-level validation of inbound payloads.
//!
//! Each payload shape has one `validate_*` function built from the small
//! predicates below. A predicate returns the parsed value or the violation
//! message for its field. Rules for a single field stop at the first failure,
//! but every field is checked so the caller gets the full list at once.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;
use crate::booking::{BookingStatus, NewBooking};

pub const PASSENGER_NAME: &str = "passengerName";
pub const FLIGHT_NUMBER: &str = "flightNumber";
pub const DEPARTURE_DATE: &str = "departureDate";
pub const RETURN_DATE: &str = "returnDate";
pub const STATUS: &str = "status";
pub const BOOKING_ID: &str = "id";

const PASSENGER_NAME_MIN: usize = 3;
const PASSENGER_NAME_MAX: usize = 100;

lazy_static! {
    static ref FLIGHT_NUMBER_REGEX: Regex = Regex::new(
        r"^[A-Z]{2}[0-9]{3}(-[A-Z0-9]+)?$"
    ).unwrap();

    static ref ISO_DATE_REGEX: Regex = Regex::new(
        r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$"
    ).unwrap();

    static ref UUID_REGEX: Regex = Regex::new(
        r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$"
    ).unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation failed: {}", summary(.0))]
pub struct ValidationErrors(pub Vec<FieldViolation>);

impl ValidationErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        Self(vec![FieldViolation {
            field: field.to_string(),
            message: message.into(),
        }])
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }
}

fn summary(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Default)]
struct Violations(Vec<FieldViolation>);

impl Violations {
    fn check<T>(&mut self, field: &str, rule: impl FnOnce(&str) -> Result<T, String>) -> Option<T> {
        match rule(field) {
            Ok(value) => Some(value),
            Err(message) => {
                self.push(field, message);
                None
            }
        }
    }

    fn push(&mut self, field: &str, message: String) {
        self.0.push(FieldViolation {
            field: field.to_string(),
            message,
        });
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_errors(self) -> ValidationErrors {
        ValidationErrors(self.0)
    }
}

// ============================================================================
// Predicates
// ============================================================================

pub fn require_string<'a>(field: &str, value: Option<&'a Value>) -> Result<&'a str, String> {
    match value {
        None | Some(Value::Null) => Err(format!("{field} should not be empty")),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(format!("{field} must be a string")),
    }
}

pub fn not_blank(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} should not be empty"));
    }
    Ok(())
}

pub fn length_between(field: &str, value: &str, min: usize, max: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len < min {
        return Err(format!("{field} must be longer than or equal to {min} characters"));
    }
    if len > max {
        return Err(format!("{field} must be shorter than or equal to {max} characters"));
    }
    Ok(())
}

pub fn letters_and_spaces(field: &str, value: &str) -> Result<(), String> {
    if value.chars().any(|c| c.is_numeric()) {
        return Err(format!("{field} cannot contain numbers"));
    }
    if !value.chars().all(|c| c.is_alphabetic() || c == ' ') {
        return Err(format!("{field} must contain only letters and spaces"));
    }
    Ok(())
}

pub fn flight_number_format(field: &str, value: &str) -> Result<(), String> {
    if !FLIGHT_NUMBER_REGEX.is_match(value) {
        return Err(format!("{field} must be in format AA123 or AA123-1"));
    }
    Ok(())
}

/// Strict `YYYY-MM-DD` that names a real calendar day.
pub fn iso_date(field: &str, value: &str) -> Result<NaiveDate, String> {
    let invalid = || format!("{field} must be a valid date in YYYY-MM-DD format");
    if !ISO_DATE_REGEX.is_match(value) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())
}

pub fn not_before(field: &str, date: NaiveDate, today: NaiveDate) -> Result<(), String> {
    if date < today {
        return Err(format!("{field} must be a future date"));
    }
    Ok(())
}

pub fn strictly_after(field: &str, date: NaiveDate, other_field: &str, other: NaiveDate) -> Result<(), String> {
    if date <= other {
        return Err(format!("{field} must be after {other_field}"));
    }
    Ok(())
}

pub fn known_status(field: &str, value: &str) -> Result<BookingStatus, String> {
    value.parse().map_err(|_| {
        let tokens = BookingStatus::ALL
            .iter()
            .map(BookingStatus::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{field} must be one of the following values: {tokens}")
    })
}

// ============================================================================
// Payload shapes
// ============================================================================

fn as_object(payload: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    payload
        .as_object()
        .ok_or_else(|| ValidationErrors::single("body", "request body must be a JSON object"))
}

/// Validates a create request body against `today` (the current calendar date).
pub fn validate_create_booking(payload: &Value, today: NaiveDate) -> Result<NewBooking, ValidationErrors> {
    let body = as_object(payload)?;
    let mut violations = Violations::default();

    let passenger_name = violations.check(PASSENGER_NAME, |field| {
        let name = require_string(field, body.get(field))?;
        not_blank(field, name)?;
        length_between(field, name, PASSENGER_NAME_MIN, PASSENGER_NAME_MAX)?;
        letters_and_spaces(field, name)?;
        Ok(name.to_string())
    });

    let flight_number = violations.check(FLIGHT_NUMBER, |field| {
        let number = require_string(field, body.get(field))?;
        not_blank(field, number)?;
        flight_number_format(field, number)?;
        Ok(number.to_string())
    });

    let departure_date = violations.check(DEPARTURE_DATE, |field| {
        iso_date(field, require_string(field, body.get(field))?)
    });
    if let Some(date) = departure_date {
        if let Err(message) = not_before(DEPARTURE_DATE, date, today) {
            violations.push(DEPARTURE_DATE, message);
        }
    }

    let return_date = violations.check(RETURN_DATE, |field| match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        value => {
            let date = iso_date(field, require_string(field, value)?)?;
            match departure_date {
                Some(departure) => strictly_after(field, date, DEPARTURE_DATE, departure)?,
                None => return Err(format!("{field} must be after {DEPARTURE_DATE}")),
            }
            Ok(Some(date))
        }
    });

    match (passenger_name, flight_number, departure_date, return_date) {
        (Some(passenger_name), Some(flight_number), Some(departure_date), Some(return_date))
            if violations.is_empty() =>
        {
            Ok(NewBooking {
                passenger_name,
                flight_number,
                departure_date,
                return_date,
            })
        }
        _ => Err(violations.into_errors()),
    }
}

pub fn validate_status_update(payload: &Value) -> Result<BookingStatus, ValidationErrors> {
    let body = as_object(payload)?;
    let mut violations = Violations::default();

    let status = violations.check(STATUS, |field| {
        let token = require_string(field, body.get(field))?;
        not_blank(field, token)?;
        known_status(field, token)
    });

    status.ok_or_else(|| violations.into_errors())
}

/// Parses the `:id` path segment. Only the hyphenated UUID form is accepted.
pub fn parse_booking_id(raw: &str) -> Result<Uuid, ValidationErrors> {
    let invalid = || ValidationErrors::single(BOOKING_ID, format!("{BOOKING_ID} must be a valid UUID"));
    if !UUID_REGEX.is_match(raw) {
        return Err(invalid());
    }
    Uuid::parse_str(raw).map_err(|_| invalid())
}
