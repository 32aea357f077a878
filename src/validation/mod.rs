//! Book payload validation.
//!
//! Payloads are untrusted JSON objects. Validation is all-or-nothing per
//! record: every field of the candidate is checked, every failure is reported
//! (in schema order), and a [`Book`] is only produced when nothing failed.

pub mod schema;

use std::fmt;

use serde_json::{Map, Value};

use crate::models::Book;
use schema::BOOK_SCHEMA;

/// A single field-level failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Ordered list of violations, one per failing field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Violations(pub Vec<Violation>);

impl Violations {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|v| v.field).collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|v| v.message.clone()).collect()
    }
}

impl From<Violations> for crate::error::AppError {
    fn from(violations: Violations) -> Self {
        crate::error::AppError::Validation(violations.messages())
    }
}

/// Validate a full payload for creation.
pub fn validate_for_create(payload: &Map<String, Value>) -> Result<Book, Violations> {
    let mut violations = Violations::default();
    let mut candidate = Map::new();

    for field in BOOK_SCHEMA {
        match payload.get(field.name) {
            None => violations.0.push(field.missing()),
            Some(value) => match field.check(value) {
                Ok(()) => {
                    candidate.insert(field.name.to_string(), value.clone());
                }
                Err(violation) => violations.0.push(violation),
            },
        }
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    into_book(candidate)
}

/// Validate a partial payload against the stored record.
///
/// The candidate is `current` overlaid with the mutable schema keys present
/// in `payload`; unknown keys and `isbn` are dropped. The whole candidate is
/// then validated, so an update can never leave an invalid record behind.
pub fn validate_for_update(payload: &Map<String, Value>, current: &Book) -> Result<Book, Violations> {
    let overlay: Vec<(&str, &Value)> = BOOK_SCHEMA
        .iter()
        .filter(|f| f.mutable)
        .filter_map(|f| payload.get(f.name).map(|v| (f.name, v)))
        .collect();

    if overlay.is_empty() {
        return Ok(current.clone());
    }

    let mut candidate = match serde_json::to_value(current) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    for (name, value) in overlay {
        candidate.insert(name.to_string(), value.clone());
    }

    validate_for_create(&candidate)
}

fn into_book(candidate: Map<String, Value>) -> Result<Book, Violations> {
    // Types were checked field by field; this only fails on a schema/model mismatch.
    serde_json::from_value(Value::Object(candidate)).map_err(|e| {
        Violations(vec![Violation {
            field: "instance",
            message: format!("instance could not be read as a book: {}", e),
        }])
    })
}
