//! Shared validation machinery for entity payloads.
//!
//! Validators run ordered passes (shape, domain-set, coercion, cross-field)
//! and collect one error per offending field: the first violated rule for a
//! field wins, but independent fields are all evaluated so a single call
//! surfaces every invalid field at once.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::Error;

/// Validation error attached to a single field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// Wire name of the offending field (camelCase, as the client sends it).
    #[schema(example = "participationRegion")]
    pub field: String,
    /// Stable machine-readable rule identifier.
    #[schema(example = "amount_exceeds_total")]
    pub code: String,
    /// Fixed-locale human-readable message.
    pub message: String,
}

/// Ordered set of field errors produced by one validation call.
///
/// ## Invariants
/// - At most one error per field path (per-field short-circuit).
/// - Errors keep the order in which fields were examined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Empty error set.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Record an error for `field` unless an earlier rule already claimed it.
    pub fn push(
        &mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        let field = field.into();
        if self.0.iter().any(|err| err.field == field) {
            return;
        }
        self.0.push(FieldError {
            field,
            code: code.into(),
            message: message.into(),
        });
    }

    /// Whether any field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of offending fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate the collected errors in field-examination order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Return `value` when no field failed, otherwise the collected errors.
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let summary = self
            .0
            .iter()
            .map(|err| format!("{}: {}", err.field, err.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{summary}")
    }
}

impl std::error::Error for FieldErrors {}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        Self::invalid_request("Données invalides")
            .with_details(json!({ "errors": errors.0 }))
    }
}

/// Whether a validation call creates a record or patches an existing one.
///
/// Update mode carries the stored record so merged (existing ∪ patch) values
/// feed the domain-set and cross-field passes; fields absent from the patch
/// are left untouched and never reported as missing.
#[derive(Debug, Clone, Copy)]
pub enum ValidationMode<'a, T> {
    /// Validate a full insert payload; required fields must be present.
    Create,
    /// Validate a partial payload merged over the stored record.
    Update(&'a T),
}

impl<'a, T> ValidationMode<'a, T> {
    /// The stored record when patching, `None` on create.
    pub const fn existing(&self) -> Option<&'a T> {
        match self {
            Self::Create => None,
            Self::Update(existing) => Some(existing),
        }
    }
}

/// Date value accepted from untrusted payloads: an ISO-8601 string or an
/// already-typed timestamp. Both normalize to a canonical UTC instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    /// Already-typed timestamp (RFC 3339 on the wire).
    Typed(DateTime<Utc>),
    /// Raw string, parsed as RFC 3339 or a bare `YYYY-MM-DD` date.
    Texte(String),
}

impl DateInput {
    /// Normalize to the canonical in-memory representation.
    ///
    /// Bare dates map to midnight UTC, mirroring how the original store
    /// widened `date_debut` strings into timestamps.
    pub fn coerce(&self) -> Result<DateTime<Utc>, DateCoercionError> {
        match self {
            Self::Typed(instant) => Ok(*instant),
            Self::Texte(raw) => {
                let trimmed = raw.trim();
                if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
                    return Ok(instant.with_timezone(&Utc));
                }
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
                    .map(|naive| naive.and_utc())
                    .ok_or_else(|| DateCoercionError {
                        input: raw.clone(),
                    })
            }
        }
    }
}

/// Error raised when a date-like field cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCoercionError {
    /// Rejected input value.
    pub input: String,
}

impl std::fmt::Display for DateCoercionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid date: {}", self.input)
    }
}

impl std::error::Error for DateCoercionError {}

/// True when `value` still holds visible characters once trimmed.
pub fn has_content(value: &str) -> bool {
    !value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use chrono::TimeZone;
    use rstest::rstest;

    #[test]
    fn first_rule_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.push("nom", "required", "Le nom est requis");
        errors.push("nom", "invalid_value", "second rule must be ignored");
        errors.push("secteur", "invalid_value", "Secteur invalide");

        assert_eq!(errors.len(), 2);
        let collected: Vec<_> = errors.iter().map(|err| err.code.as_str()).collect();
        assert_eq!(collected, vec!["required", "invalid_value"]);
    }

    #[test]
    fn finish_returns_the_value_only_when_clean() {
        let clean = FieldErrors::new();
        assert_eq!(clean.finish(42), Ok(42));

        let mut dirty = FieldErrors::new();
        dirty.push("nom", "required", "Le nom est requis");
        assert!(dirty.finish(42).is_err());
    }

    #[test]
    fn converts_into_an_invalid_request_error_with_details() {
        let mut errors = FieldErrors::new();
        errors.push("provinces", "invalid_value", "Province invalide");
        let error = Error::from(errors);
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("details present");
        let listed = details
            .get("errors")
            .and_then(|v| v.as_array())
            .expect("errors array");
        assert_eq!(listed.len(), 1);
        assert_eq!(
            listed[0].get("field").and_then(|v| v.as_str()),
            Some("provinces")
        );
    }

    #[rstest]
    #[case("2024-03-01T10:30:00Z")]
    #[case("2024-03-01T10:30:00+00:00")]
    fn coerces_rfc3339_strings(#[case] raw: &str) {
        let input = DateInput::Texte(raw.to_owned());
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).single().expect("timestamp");
        assert_eq!(input.coerce(), Ok(expected));
    }

    #[test]
    fn coerces_bare_dates_to_midnight_utc() {
        let input = DateInput::Texte("2024-03-01".to_owned());
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).single().expect("timestamp");
        assert_eq!(input.coerce(), Ok(expected));
    }

    #[test]
    fn typed_dates_pass_through_unchanged() {
        let instant = Utc.with_ymd_and_hms(2023, 11, 20, 8, 0, 0).single().expect("timestamp");
        assert_eq!(DateInput::Typed(instant).coerce(), Ok(instant));
    }

    #[rstest]
    #[case("not-a-date")]
    #[case("03/01/2024")]
    #[case("")]
    fn rejects_unparseable_dates(#[case] raw: &str) {
        let input = DateInput::Texte(raw.to_owned());
        assert_eq!(
            input.coerce(),
            Err(DateCoercionError {
                input: raw.to_owned()
            })
        );
    }

    #[test]
    fn untagged_deserialisation_accepts_both_shapes() {
        let typed: DateInput =
            serde_json::from_str("\"2024-03-01T10:30:00Z\"").expect("typed date");
        assert!(matches!(typed, DateInput::Typed(_)));

        let texte: DateInput = serde_json::from_str("\"2024-03-01\"").expect("bare date");
        assert!(matches!(texte, DateInput::Texte(_)));
    }
}
