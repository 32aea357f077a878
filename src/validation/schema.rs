//! Book field schema.
//!
//! Each field is described by a [`FieldKind`], which pairs a JSON type with a
//! domain predicate. Values are never coerced: `"264"` is a string, `264.0`
//! is not an integer.

use serde_json::Value;
use validator::{ValidateRange, ValidateUrl};

use super::Violation;

/// Largest value accepted for integer fields (stored as `INTEGER`).
pub const MAX_COUNT: i64 = i32::MAX as i64;

/// Type and predicate of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-empty string
    Text,
    /// Non-empty string holding an absolute URL with a host
    Url,
    /// Integer in `1..=MAX_COUNT`
    Count,
}

/// A named field of the book schema
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Whether an update payload may overwrite the field
    pub mutable: bool,
}

/// The book schema, in the order violations are reported.
pub const BOOK_SCHEMA: &[FieldSpec] = &[
    FieldSpec { name: "isbn", kind: FieldKind::Text, mutable: false },
    FieldSpec { name: "amazon_url", kind: FieldKind::Url, mutable: true },
    FieldSpec { name: "author", kind: FieldKind::Text, mutable: true },
    FieldSpec { name: "language", kind: FieldKind::Text, mutable: true },
    FieldSpec { name: "pages", kind: FieldKind::Count, mutable: true },
    FieldSpec { name: "publisher", kind: FieldKind::Text, mutable: true },
    FieldSpec { name: "title", kind: FieldKind::Text, mutable: true },
    FieldSpec { name: "year", kind: FieldKind::Count, mutable: true },
];

impl FieldKind {
    fn type_name(self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Url => "string",
            FieldKind::Count => "integer",
        }
    }
}

impl FieldSpec {
    /// Check a present value against this field's type and predicate.
    /// Only the first failing rule is reported.
    pub fn check(&self, value: &Value) -> Result<(), Violation> {
        match self.kind {
            FieldKind::Text => {
                self.text(value)?;
            }
            FieldKind::Url => {
                let s = self.text(value)?;
                if !s.validate_url() || !is_absolute_url(s) {
                    return Err(self.violation(format!(
                        "instance.{} does not conform to the \"uri\" format",
                        self.name
                    )));
                }
            }
            FieldKind::Count => {
                // as_i64 is None for floats and strings
                let n = match value.as_i64() {
                    Some(n) => n,
                    None if value.is_u64() => i64::MAX,
                    None => return Err(self.wrong_type()),
                };
                if !n.validate_range(Some(1), None, None, None) {
                    return Err(self.violation(format!(
                        "instance.{} must be greater than or equal to 1",
                        self.name
                    )));
                }
                if !n.validate_range(None, Some(MAX_COUNT), None, None) {
                    return Err(self.violation(format!(
                        "instance.{} must be less than or equal to {}",
                        self.name, MAX_COUNT
                    )));
                }
            }
        }
        Ok(())
    }

    /// Violation for an absent required field
    pub fn missing(&self) -> Violation {
        self.violation(format!("instance requires property \"{}\"", self.name))
    }

    fn text<'v>(&self, value: &'v Value) -> Result<&'v str, Violation> {
        let s = value.as_str().ok_or_else(|| self.wrong_type())?;
        if s.is_empty() {
            return Err(self.violation(format!(
                "instance.{} does not meet minimum length of 1",
                self.name
            )));
        }
        Ok(s)
    }

    fn wrong_type(&self) -> Violation {
        self.violation(format!(
            "instance.{} is not of a type(s) {}",
            self.name,
            self.kind.type_name()
        ))
    }

    fn violation(&self, message: String) -> Violation {
        Violation {
            field: self.name,
            message,
        }
    }
}

/// `Url::parse` trims whitespace, repairs `http:host` and accepts `mailto:`;
/// a stored link must already be in `scheme://host` form.
fn is_absolute_url(s: &str) -> bool {
    if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    let Ok(url) = url::Url::parse(s) else {
        return false;
    };
    let authority = format!("{}://", url.scheme());
    url.has_host()
        && s.get(..authority.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(&authority))
}
