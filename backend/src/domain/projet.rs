//! Projet entity, payload, and validation.
//!
//! A projet always belongs to a programme. Validation checks the reference
//! syntactically (a plausible serial identifier); whether the programme
//! actually exists is the persistence port's concern and surfaces as a
//! referential conflict.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::enums::{EtatAvancement, Province};
use crate::domain::money::Montant;
use crate::domain::programme::{
    check_participation, merge_text, validate_date, validate_montant, validate_nom,
};
use crate::domain::validation::{DateInput, FieldErrors, ValidationMode};

/// Persisted projet record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Projet {
    /// Server-assigned identifier.
    pub id: i32,
    /// Projet name.
    pub nom: String,
    /// Stated objectives.
    pub objectifs: Option<String>,
    /// Partner organisations, free text.
    pub partenaires: Option<String>,
    /// Owning programme.
    pub programme_id: i32,
    /// Commissioning authority.
    pub maitre_ouvrage: Option<String>,
    /// Provinces the projet operates in.
    pub provinces: Vec<Province>,
    /// Communes concerned, free text.
    pub communes: Option<String>,
    /// Qualitative indicators, free text.
    pub indicateurs_qualitatifs: Option<String>,
    /// Quantitative indicators, free text.
    pub indicateurs_quantitatifs: Option<String>,
    /// Progress state.
    pub etat_avancement: EtatAvancement,
    /// Free-form remarks.
    pub remarques: Option<String>,
    /// Total budget.
    pub montant_global: Option<Montant>,
    /// Regional contribution; never exceeds `montant_global` when both are
    /// present.
    pub participation_region: Option<Montant>,
    /// Start date.
    pub date_debut: Option<DateTime<Utc>>,
    /// Duration label.
    pub duree: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Untrusted projet payload as sent by the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjetPayload {
    /// Projet name.
    pub nom: Option<String>,
    /// Stated objectives.
    pub objectifs: Option<String>,
    /// Partner organisations.
    pub partenaires: Option<String>,
    /// Owning programme identifier.
    pub programme_id: Option<i64>,
    /// Commissioning authority.
    pub maitre_ouvrage: Option<String>,
    /// Province labels, each validated against the closed set.
    pub provinces: Option<Vec<String>>,
    /// Communes concerned.
    pub communes: Option<String>,
    /// Qualitative indicators.
    pub indicateurs_qualitatifs: Option<String>,
    /// Quantitative indicators.
    pub indicateurs_quantitatifs: Option<String>,
    /// Progress-state label, validated against the closed set.
    pub etat_avancement: Option<String>,
    /// Free-form remarks.
    pub remarques: Option<String>,
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

/// Normalized projet record, validated and ready for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjetDraft {
    /// Projet name (non-blank).
    pub nom: String,
    /// Stated objectives.
    pub objectifs: Option<String>,
    /// Partner organisations.
    pub partenaires: Option<String>,
    /// Owning programme; existence is checked at the persistence boundary.
    pub programme_id: i32,
    /// Commissioning authority.
    pub maitre_ouvrage: Option<String>,
    /// Provinces the projet operates in.
    pub provinces: Vec<Province>,
    /// Communes concerned.
    pub communes: Option<String>,
    /// Qualitative indicators.
    pub indicateurs_qualitatifs: Option<String>,
    /// Quantitative indicators.
    pub indicateurs_quantitatifs: Option<String>,
    /// Progress state.
    pub etat_avancement: EtatAvancement,
    /// Free-form remarks.
    pub remarques: Option<String>,
    /// Total budget.
    pub montant_global: Option<Montant>,
    /// Regional contribution.
    pub participation_region: Option<Montant>,
    /// Start date.
    pub date_debut: Option<DateTime<Utc>>,
    /// Duration label.
    pub duree: Option<String>,
}

impl ProjetDraft {
    /// Validate an untrusted payload into a normalized draft.
    pub fn validate(
        payload: &ProjetPayload,
        mode: ValidationMode<'_, Projet>,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let existing = mode.existing();

        let nom = validate_nom(payload.nom.as_deref(), existing.map(|p| p.nom.as_str()), &mut errors);
        let objectifs = merge_text(
            payload.objectifs.as_deref(),
            existing.and_then(|p| p.objectifs.as_deref()),
        );
        let partenaires = merge_text(
            payload.partenaires.as_deref(),
            existing.and_then(|p| p.partenaires.as_deref()),
        );
        let maitre_ouvrage = merge_text(
            payload.maitre_ouvrage.as_deref(),
            existing.and_then(|p| p.maitre_ouvrage.as_deref()),
        );
        let communes = merge_text(
            payload.communes.as_deref(),
            existing.and_then(|p| p.communes.as_deref()),
        );
        let indicateurs_qualitatifs = merge_text(
            payload.indicateurs_qualitatifs.as_deref(),
            existing.and_then(|p| p.indicateurs_qualitatifs.as_deref()),
        );
        let indicateurs_quantitatifs = merge_text(
            payload.indicateurs_quantitatifs.as_deref(),
            existing.and_then(|p| p.indicateurs_quantitatifs.as_deref()),
        );
        let remarques = merge_text(
            payload.remarques.as_deref(),
            existing.and_then(|p| p.remarques.as_deref()),
        );
        let duree = merge_text(
            payload.duree.as_deref(),
            existing.and_then(|p| p.duree.as_deref()),
        );

        let programme_id = validate_programme_id(
            payload.programme_id,
            existing.map(|p| p.programme_id),
            &mut errors,
        );
        let provinces = validate_provinces(
            payload.provinces.as_deref(),
            existing.map(|p| p.provinces.as_slice()),
            &mut errors,
        );
        let etat_avancement = validate_etat(
            payload.etat_avancement.as_deref(),
            existing.map(|p| p.etat_avancement),
            &mut errors,
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
            objectifs,
            partenaires,
            programme_id: programme_id.unwrap_or_default(),
            maitre_ouvrage,
            provinces,
            communes,
            indicateurs_qualitatifs,
            indicateurs_quantitatifs,
            etat_avancement: etat_avancement.unwrap_or(EtatAvancement::Planifie),
            remarques,
            montant_global,
            participation_region,
            date_debut,
            duree,
        };
        errors.finish(draft)
    }
}

impl Projet {
    /// Payload equivalent of the stored record, used to re-validate a
    /// round-trip without mutation.
    pub fn to_payload(&self) -> ProjetPayload {
        ProjetPayload {
            nom: Some(self.nom.clone()),
            objectifs: self.objectifs.clone(),
            partenaires: self.partenaires.clone(),
            programme_id: Some(i64::from(self.programme_id)),
            maitre_ouvrage: self.maitre_ouvrage.clone(),
            provinces: Some(
                self.provinces
                    .iter()
                    .map(|p| p.as_str().to_owned())
                    .collect(),
            ),
            communes: self.communes.clone(),
            indicateurs_qualitatifs: self.indicateurs_qualitatifs.clone(),
            indicateurs_quantitatifs: self.indicateurs_quantitatifs.clone(),
            etat_avancement: Some(self.etat_avancement.as_str().to_owned()),
            remarques: self.remarques.clone(),
            montant_global: self.montant_global.map(|m| m.to_string()),
            participation_region: self.participation_region.map(|m| m.to_string()),
            date_debut: self.date_debut.map(DateInput::Typed),
            duree: self.duree.clone(),
        }
    }
}

/// Syntactic check of the programme reference: present on create and within
/// the serial-identifier range. Existence is not checked here.
fn validate_programme_id(
    raw: Option<i64>,
    stored: Option<i32>,
    errors: &mut FieldErrors,
) -> Option<i32> {
    match (raw, stored) {
        (Some(value), _) => match i32::try_from(value) {
            Ok(id) if id >= 1 => Some(id),
            _ => {
                errors.push(
                    "programmeId",
                    "invalid_reference",
                    "Référence de programme invalide",
                );
                None
            }
        },
        (None, Some(kept)) => Some(kept),
        (None, None) => {
            errors.push("programmeId", "required", "Le programme est requis");
            None
        }
    }
}

/// Parse every province label; the first unknown one wins for the field.
fn validate_provinces(
    raw: Option<&[String]>,
    stored: Option<&[Province]>,
    errors: &mut FieldErrors,
) -> Vec<Province> {
    match raw {
        Some(labels) => {
            let mut parsed = Vec::with_capacity(labels.len());
            for label in labels {
                match label.parse::<Province>() {
                    Ok(province) => parsed.push(province),
                    Err(_) => {
                        errors.push(
                            "provinces",
                            "invalid_value",
                            format!(
                                "Province invalide. Valeurs acceptées: {}",
                                Province::accepted_labels()
                            ),
                        );
                        return Vec::new();
                    }
                }
            }
            parsed
        }
        None => stored.map(<[Province]>::to_vec).unwrap_or_default(),
    }
}

fn validate_etat(
    raw: Option<&str>,
    stored: Option<EtatAvancement>,
    errors: &mut FieldErrors,
) -> Option<EtatAvancement> {
    match (raw, stored) {
        (Some(value), _) => match value.parse::<EtatAvancement>() {
            Ok(etat) => Some(etat),
            Err(_) => {
                errors.push(
                    "etatAvancement",
                    "invalid_value",
                    format!(
                        "État d'avancement invalide. Valeurs acceptées: {}",
                        EtatAvancement::accepted_labels()
                    ),
                );
                None
            }
        },
        (None, Some(kept)) => Some(kept),
        (None, None) => {
            errors.push(
                "etatAvancement",
                "required",
                "L'état d'avancement est requis",
            );
            None
        }
    }
}
