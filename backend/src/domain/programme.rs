//! Programme entity, payload, and validation.
//!
//! A programme groups the projets of one economic sector. Payloads arrive
//! untrusted from the client; [`ProgrammeDraft::validate`] runs the ordered
//! passes and either yields a normalized draft ready for persistence or the
//! full set of field errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::enums::Secteur;
use crate::domain::money::Montant;
use crate::domain::validation::{DateInput, FieldErrors, ValidationMode, has_content};

/// Fixed message for the montant cross-field rule, attached to
/// `participationRegion` only (the reverse direction is deliberately not
/// flagged).
pub const MSG_PARTICIPATION_DEPASSE: &str =
    "La contribution de la région ne peut pas dépasser le montant total";

/// Persisted programme record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Programme {
    /// Server-assigned identifier.
    pub id: i32,
    /// Programme name.
    pub nom: String,
    /// Economic sector (closed set).
    pub secteur: Secteur,
    /// Narrative objective.
    pub objectif_global: Option<String>,
    /// Partner institutions.
    pub partenaires: Option<String>,
    /// Total budget.
    pub montant_global: Option<Montant>,
    /// Regional contribution; never exceeds `montant_global` when both are
    /// present.
    pub participation_region: Option<Montant>,
    /// Start date.
    pub date_debut: Option<DateTime<Utc>>,
    /// Duration label (free text, e.g. "3 ans").
    pub duree: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Untrusted programme payload as sent by the client.
///
/// All fields are optional so the same shape serves create and update;
/// create mode enforces the required ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgrammePayload {
    /// Programme name.
    pub nom: Option<String>,
    /// Sector label, validated against the closed set.
    pub secteur: Option<String>,
    /// Narrative objective.
    pub objectif_global: Option<String>,
    /// Partner institutions.
    pub partenaires: Option<String>,
    /// Total budget as a decimal string.
    pub montant_global: Option<String>,
    /// Regional contribution as a decimal string.
    pub participation_region: Option<String>,
    /// Start date, ISO-8601 string or typed timestamp.
    #[schema(value_type = Option<String>)]
    pub date_debut: Option<DateInput>,
    /// Duration label.
    pub duree: Option<String>,
}

/// Normalized programme record, validated and ready for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgrammeDraft {
    /// Programme name (non-blank).
    pub nom: String,
    /// Economic sector.
    pub secteur: Secteur,
    /// Narrative objective.
    pub objectif_global: Option<String>,
    /// Partner institutions.
    pub partenaires: Option<String>,
    /// Total budget.
    pub montant_global: Option<Montant>,
    /// Regional contribution.
    pub participation_region: Option<Montant>,
    /// Start date.
    pub date_debut: Option<DateTime<Utc>>,
    /// Duration label.
    pub duree: Option<String>,
}

impl ProgrammeDraft {
    /// Validate an untrusted payload into a normalized draft.
    ///
    /// In update mode fields absent from the payload keep their stored
    /// values; fields that are present must still satisfy every rule. The
    /// montant cross-field invariant runs against the merged record.
    pub fn validate(
        payload: &ProgrammePayload,
        mode: ValidationMode<'_, Programme>,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let existing = mode.existing();

        let nom = validate_nom(payload.nom.as_deref(), existing.map(|p| p.nom.as_str()), &mut errors);
        let secteur = validate_secteur(
            payload.secteur.as_deref(),
            existing.map(|p| p.secteur),
            &mut errors,
        );

        let objectif_global = merge_text(
            payload.objectif_global.as_deref(),
            existing.and_then(|p| p.objectif_global.as_deref()),
        );
        let partenaires = merge_text(
            payload.partenaires.as_deref(),
            existing.and_then(|p| p.partenaires.as_deref()),
        );
        let duree = merge_text(
            payload.duree.as_deref(),
            existing.and_then(|p| p.duree.as_deref()),
        );

        let montant_global = validate_montant(
            payload.montant_global.as_deref(),
            existing.and_then(|p| p.montant_global),
            "montantGlobal",
            &mut errors,
        );
        let participation_region = validate_montant(
            payload.participation_region.as_deref(),
            existing.and_then(|p| p.participation_region),
            "participationRegion",
            &mut errors,
        );
        let date_debut = validate_date(
            payload.date_debut.as_ref(),
            existing.and_then(|p| p.date_debut),
            &mut errors,
        );

        check_participation(montant_global, participation_region, &mut errors);

        let draft = Self {
            nom: nom.unwrap_or_default(),
            secteur: secteur.unwrap_or(Secteur::Agriculture),
            objectif_global,
            partenaires,
            montant_global,
            participation_region,
            date_debut,
            duree,
        };
        errors.finish(draft)
    }
}

impl Programme {
    /// Payload equivalent of the stored record, used to re-validate a
    /// round-trip without mutation.
    pub fn to_payload(&self) -> ProgrammePayload {
        ProgrammePayload {
            nom: Some(self.nom.clone()),
            secteur: Some(self.secteur.as_str().to_owned()),
            objectif_global: self.objectif_global.clone(),
            partenaires: self.partenaires.clone(),
            montant_global: self.montant_global.map(|m| m.to_string()),
            participation_region: self.participation_region.map(|m| m.to_string()),
            date_debut: self.date_debut.map(DateInput::Typed),
            duree: self.duree.clone(),
        }
    }
}

pub(crate) fn validate_nom(
    raw: Option<&str>,
    stored: Option<&str>,
    errors: &mut FieldErrors,
) -> Option<String> {
    match (raw, stored) {
        (Some(value), _) => {
            if has_content(value) {
                Some(value.trim().to_owned())
            } else {
                errors.push("nom", "required", "Le nom est requis");
                None
            }
        }
        (None, Some(kept)) => Some(kept.to_owned()),
        (None, None) => {
            errors.push("nom", "required", "Le nom est requis");
            None
        }
    }
}

fn validate_secteur(
    raw: Option<&str>,
    stored: Option<Secteur>,
    errors: &mut FieldErrors,
) -> Option<Secteur> {
    match (raw, stored) {
        (Some(value), _) => match value.parse::<Secteur>() {
            Ok(secteur) => Some(secteur),
            Err(_) => {
                errors.push(
                    "secteur",
                    "invalid_value",
                    format!(
                        "Secteur invalide. Valeurs acceptées: {}",
                        Secteur::accepted_labels()
                    ),
                );
                None
            }
        },
        (None, Some(kept)) => Some(kept),
        (None, None) => {
            errors.push("secteur", "required", "Le secteur est requis");
            None
        }
    }
}

pub(crate) fn merge_text(raw: Option<&str>, stored: Option<&str>) -> Option<String> {
    raw.map(str::to_owned).or_else(|| stored.map(str::to_owned))
}

pub(crate) fn validate_montant(
    raw: Option<&str>,
    stored: Option<Montant>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<Montant> {
    match raw {
        Some(value) => match value.parse::<Montant>() {
            Ok(montant) => Some(montant),
            Err(_) => {
                errors.push(field, "invalid_amount", "Montant invalide");
                None
            }
        },
        None => stored,
    }
}

pub(crate) fn validate_date(
    raw: Option<&DateInput>,
    stored: Option<DateTime<Utc>>,
    errors: &mut FieldErrors,
) -> Option<DateTime<Utc>> {
    match raw {
        Some(input) => match input.coerce() {
            Ok(instant) => Some(instant),
            Err(_) => {
                errors.push(
                    "dateDebut",
                    "invalid_date",
                    "Date invalide (format ISO-8601 attendu)",
                );
                None
            }
        },
        None => stored,
    }
}

/// Cross-field pass: when both montants are present after merge, the
/// regional contribution must not exceed the total. The violation attaches
/// to `participationRegion` only, and only when no earlier rule already
/// claimed that field.
pub(crate) fn check_participation(
    montant_global: Option<Montant>,
    participation_region: Option<Montant>,
    errors: &mut FieldErrors,
) {
    if let (Some(total), Some(contribution)) = (montant_global, participation_region) {
        if contribution > total {
            errors.push(
                "participationRegion",
                "amount_exceeds_total",
                MSG_PARTICIPATION_DEPASSE,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn payload_minimal() -> ProgrammePayload {
        ProgrammePayload {
            nom: Some("Développement oasien".to_owned()),
            secteur: Some("Agriculture".to_owned()),
            ..ProgrammePayload::default()
        }
    }

    fn stored_programme() -> Programme {
        let created = Utc
            .with_ymd_and_hms(2024, 1, 10, 9, 0, 0)
            .single()
            .expect("timestamp");
        Programme {
            id: 3,
            nom: "Plan halieutique".to_owned(),
            secteur: Secteur::PecheMaritime,
            objectif_global: Some("Moderniser la flotte côtière".to_owned()),
            partenaires: None,
            montant_global: Some("500000.00".parse().expect("montant")),
            participation_region: Some("150000.00".parse().expect("montant")),
            date_debut: None,
            duree: Some("4 ans".to_owned()),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn create_accepts_a_minimal_payload() {
        let draft = ProgrammeDraft::validate(&payload_minimal(), ValidationMode::Create)
            .expect("valid payload");
        assert_eq!(draft.nom, "Développement oasien");
        assert_eq!(draft.secteur, Secteur::Agriculture);
        assert_eq!(draft.montant_global, None);
    }

    #[test]
    fn create_reports_every_invalid_field_at_once() {
        let payload = ProgrammePayload {
            nom: Some("   ".to_owned()),
            secteur: Some("Alchimie".to_owned()),
            montant_global: Some("beaucoup".to_owned()),
            ..ProgrammePayload::default()
        };
        let errors =
            ProgrammeDraft::validate(&payload, ValidationMode::Create).expect_err("invalid");
        let fields: Vec<_> = errors.iter().map(|err| err.field.as_str()).collect();
        assert_eq!(fields, vec!["nom", "secteur", "montantGlobal"]);
    }

    #[test]
    fn missing_required_fields_fail_on_create() {
        let errors = ProgrammeDraft::validate(&ProgrammePayload::default(), ValidationMode::Create)
            .expect_err("missing fields");
        let fields: Vec<_> = errors.iter().map(|err| err.field.as_str()).collect();
        assert_eq!(fields, vec!["nom", "secteur"]);
    }

    #[test]
    fn unknown_sector_lists_the_accepted_set() {
        let payload = ProgrammePayload {
            secteur: Some("Alchimie".to_owned()),
            ..payload_minimal()
        };
        let errors =
            ProgrammeDraft::validate(&payload, ValidationMode::Create).expect_err("invalid");
        let error = errors.iter().next().expect("one error");
        assert_eq!(error.field, "secteur");
        assert!(error.message.contains("Pêche maritime"));
        assert!(error.message.contains("Formation"));
    }

    #[rstest]
    #[case("1000.00", "1000.00", true)]
    #[case("1000.00", "999.99", true)]
    #[case("1000.00", "1000.01", false)]
    fn participation_must_not_exceed_total(
        #[case] total: &str,
        #[case] contribution: &str,
        #[case] valid: bool,
    ) {
        let payload = ProgrammePayload {
            montant_global: Some(total.to_owned()),
            participation_region: Some(contribution.to_owned()),
            ..payload_minimal()
        };
        let result = ProgrammeDraft::validate(&payload, ValidationMode::Create);
        if valid {
            let draft = result.expect("valid payload");
            // Monetary fields round-trip exactly, no precision loss.
            assert_eq!(
                draft.montant_global.expect("total").to_string(),
                total
            );
            assert_eq!(
                draft.participation_region.expect("contribution").to_string(),
                contribution
            );
        } else {
            let errors = result.expect_err("cross-field violation");
            assert_eq!(errors.len(), 1);
            let error = errors.iter().next().expect("one error");
            assert_eq!(error.field, "participationRegion");
            assert_eq!(error.message, MSG_PARTICIPATION_DEPASSE);
        }
    }

    #[test]
    fn contribution_without_total_is_accepted() {
        // Asymmetric policy: only the both-present comparison is enforced.
        let payload = ProgrammePayload {
            participation_region: Some("250000.00".to_owned()),
            ..payload_minimal()
        };
        let draft = ProgrammeDraft::validate(&payload, ValidationMode::Create)
            .expect("asymmetric rule accepts this");
        assert_eq!(draft.montant_global, None);
        assert!(draft.participation_region.is_some());
    }

    #[test]
    fn update_keeps_omitted_fields_untouched() {
        let stored = stored_programme();
        let patch = ProgrammePayload {
            duree: Some("5 ans".to_owned()),
            ..ProgrammePayload::default()
        };
        let draft = ProgrammeDraft::validate(&patch, ValidationMode::Update(&stored))
            .expect("patch is valid");
        assert_eq!(draft.nom, stored.nom);
        assert_eq!(draft.secteur, stored.secteur);
        assert_eq!(draft.montant_global, stored.montant_global);
        assert_eq!(draft.duree.as_deref(), Some("5 ans"));
    }

    #[test]
    fn update_checks_cross_field_against_the_merged_record() {
        // Stored total is 500000.00; the patch only raises the contribution.
        let stored = stored_programme();
        let patch = ProgrammePayload {
            participation_region: Some("500000.01".to_owned()),
            ..ProgrammePayload::default()
        };
        let errors = ProgrammeDraft::validate(&patch, ValidationMode::Update(&stored))
            .expect_err("merged record violates the rule");
        assert_eq!(errors.len(), 1);
        let error = errors.iter().next().expect("one error");
        assert_eq!(error.field, "participationRegion");
    }

    #[test]
    fn update_lowering_the_total_attaches_the_error_to_the_contribution() {
        let stored = stored_programme();
        let patch = ProgrammePayload {
            montant_global: Some("100000.00".to_owned()),
            ..ProgrammePayload::default()
        };
        let errors = ProgrammeDraft::validate(&patch, ValidationMode::Update(&stored))
            .expect_err("stored contribution now exceeds the new total");
        let error = errors.iter().next().expect("one error");
        assert_eq!(error.field, "participationRegion");
    }

    #[test]
    fn invalid_contribution_shape_short_circuits_the_cross_field_rule() {
        let payload = ProgrammePayload {
            montant_global: Some("1000.00".to_owned()),
            participation_region: Some("n/a".to_owned()),
            ..payload_minimal()
        };
        let errors =
            ProgrammeDraft::validate(&payload, ValidationMode::Create).expect_err("invalid");
        assert_eq!(errors.len(), 1);
        let error = errors.iter().next().expect("one error");
        assert_eq!(error.field, "participationRegion");
        assert_eq!(error.code, "invalid_amount");
    }

    #[test]
    fn validating_a_normalized_record_again_is_idempotent() {
        let stored = stored_programme();
        let draft = ProgrammeDraft::validate(&stored.to_payload(), ValidationMode::Create)
            .expect("already-normalized record re-validates");
        assert_eq!(draft.nom, stored.nom);
        assert_eq!(draft.secteur, stored.secteur);
        assert_eq!(draft.objectif_global, stored.objectif_global);
        assert_eq!(draft.montant_global, stored.montant_global);
        assert_eq!(draft.participation_region, stored.participation_region);
        assert_eq!(draft.date_debut, stored.date_debut);
        assert_eq!(draft.duree, stored.duree);
    }

    #[test]
    fn date_strings_normalize_to_utc() {
        let payload = ProgrammePayload {
            date_debut: Some(DateInput::Texte("2024-06-01".to_owned())),
            ..payload_minimal()
        };
        let draft = ProgrammeDraft::validate(&payload, ValidationMode::Create)
            .expect("valid payload");
        let expected = Utc
            .with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
            .single()
            .expect("timestamp");
        assert_eq!(draft.date_debut, Some(expected));
    }
}
