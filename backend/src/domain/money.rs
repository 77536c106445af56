//! Decimal-precise monetary amounts.
//!
//! Montants travel as decimal strings on the wire and are stored with
//! `precision 12, scale 2` in the relational schema. They are parsed into
//! [`rust_decimal::Decimal`] and never pass through floating point, so
//! financial totals compare and round-trip exactly.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Monetary amount with exact decimal semantics.
///
/// # Examples
/// ```
/// use backend::domain::Montant;
///
/// let total: Montant = "1000.00".parse().expect("decimal string");
/// let contribution: Montant = "1000.01".parse().expect("decimal string");
/// assert!(contribution > total);
/// assert_eq!(total.to_string(), "1000.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "1000.00")]
pub struct Montant(Decimal);

impl Montant {
    /// Underlying decimal value.
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Montant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Parse error for [`Montant`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMontantError {
    /// Rejected input value.
    pub input: String,
}

impl fmt::Display for ParseMontantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid montant: {}", self.input)
    }
}

impl std::error::Error for ParseMontantError {}

impl FromStr for Montant {
    type Err = ParseMontantError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(value.trim())
            .map(Montant)
            .map_err(|_| ParseMontantError {
                input: value.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", "0")]
    #[case("1000.00", "1000.00")]
    #[case(" 2500000.50 ", "2500000.50")]
    #[case("123456789012.99", "123456789012.99")]
    fn parses_decimal_strings_without_precision_loss(
        #[case] input: &str,
        #[case] expected: &str,
    ) {
        let montant: Montant = input.parse().expect("valid montant");
        assert_eq!(montant.to_string(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("12,5")]
    #[case("1.2.3")]
    fn rejects_non_decimal_strings(#[case] input: &str) {
        assert_eq!(
            input.parse::<Montant>(),
            Err(ParseMontantError {
                input: input.to_owned()
            })
        );
    }

    #[test]
    fn one_centime_over_compares_greater() {
        let total: Montant = "1000.00".parse().expect("total");
        let contribution: Montant = "1000.01".parse().expect("contribution");
        assert!(contribution > total);
        assert!(total <= total);
    }

    #[test]
    fn serialises_as_a_plain_string() {
        let montant: Montant = "750000.25".parse().expect("montant");
        let json = serde_json::to_string(&montant).expect("serialise");
        assert_eq!(json, "\"750000.25\"");
        let back: Montant = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, montant);
    }
}
