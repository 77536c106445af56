//! Closed sets shared between client- and server-side validation.
//!
//! The sector, province, and progress-state labels are fixed enumerations;
//! unknown values are rejected with the accepted set spelled out so both
//! validation layers stay in lockstep.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Economic sector a programme belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Secteur {
    /// Agriculture.
    #[serde(rename = "Agriculture")]
    Agriculture,
    /// Aquaculture.
    #[serde(rename = "Aquaculture")]
    Aquaculture,
    /// Tourisme.
    #[serde(rename = "Tourisme")]
    Tourisme,
    /// Industrie.
    #[serde(rename = "Industrie")]
    Industrie,
    /// Logistique.
    #[serde(rename = "Logistique")]
    Logistique,
    /// Pêche maritime.
    #[serde(rename = "Pêche maritime")]
    PecheMaritime,
    /// Artisanat.
    #[serde(rename = "Artisanat")]
    Artisanat,
    /// Emploi.
    #[serde(rename = "Emploi")]
    Emploi,
    /// Infrastructure.
    #[serde(rename = "Infrastructure")]
    Infrastructure,
    /// Formation.
    #[serde(rename = "Formation")]
    Formation,
}

impl Secteur {
    /// Every sector label, in the order the client presents them.
    pub const ALL: [Self; 10] = [
        Self::Agriculture,
        Self::Aquaculture,
        Self::Tourisme,
        Self::Industrie,
        Self::Logistique,
        Self::PecheMaritime,
        Self::Artisanat,
        Self::Emploi,
        Self::Infrastructure,
        Self::Formation,
    ];

    /// Wire label for this sector.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agriculture => "Agriculture",
            Self::Aquaculture => "Aquaculture",
            Self::Tourisme => "Tourisme",
            Self::Industrie => "Industrie",
            Self::Logistique => "Logistique",
            Self::PecheMaritime => "Pêche maritime",
            Self::Artisanat => "Artisanat",
            Self::Emploi => "Emploi",
            Self::Infrastructure => "Infrastructure",
            Self::Formation => "Formation",
        }
    }

    /// Comma-separated accepted labels, used by validation messages.
    pub fn accepted_labels() -> String {
        join_labels(Self::ALL.iter().map(Self::as_str))
    }
}

impl fmt::Display for Secteur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Secteur {
    type Err = UnknownLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == value)
            .ok_or_else(|| UnknownLabelError {
                input: value.to_owned(),
            })
    }
}

/// Province of the Souss-Massa region a projet operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Province {
    /// Agadir-Ida-Ou-Tanane.
    #[serde(rename = "Agadir-Ida-Ou-Tanane")]
    AgadirIdaOuTanane,
    /// Chtouka-Aït Baha.
    #[serde(rename = "Chtouka-Aït Baha")]
    ChtoukaAitBaha,
    /// Inezgane-Aït Melloul.
    #[serde(rename = "Inezgane-Aït Melloul")]
    InezganeAitMelloul,
    /// Taroudant.
    #[serde(rename = "Taroudant")]
    Taroudant,
    /// Tiznit.
    #[serde(rename = "Tiznit")]
    Tiznit,
    /// Tata.
    #[serde(rename = "Tata")]
    Tata,
}

impl Province {
    /// Every province label.
    pub const ALL: [Self; 6] = [
        Self::AgadirIdaOuTanane,
        Self::ChtoukaAitBaha,
        Self::InezganeAitMelloul,
        Self::Taroudant,
        Self::Tiznit,
        Self::Tata,
    ];

    /// Wire label for this province.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AgadirIdaOuTanane => "Agadir-Ida-Ou-Tanane",
            Self::ChtoukaAitBaha => "Chtouka-Aït Baha",
            Self::InezganeAitMelloul => "Inezgane-Aït Melloul",
            Self::Taroudant => "Taroudant",
            Self::Tiznit => "Tiznit",
            Self::Tata => "Tata",
        }
    }

    /// Comma-separated accepted labels, used by validation messages.
    pub fn accepted_labels() -> String {
        join_labels(Self::ALL.iter().map(Self::as_str))
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Province {
    type Err = UnknownLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == value)
            .ok_or_else(|| UnknownLabelError {
                input: value.to_owned(),
            })
    }
}

/// Progress state of a projet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum EtatAvancement {
    /// Planifié.
    #[serde(rename = "Planifié")]
    Planifie,
    /// En cours.
    #[serde(rename = "En cours")]
    EnCours,
    /// Terminé.
    #[serde(rename = "Terminé")]
    Termine,
    /// Suspendu.
    #[serde(rename = "Suspendu")]
    Suspendu,
}

impl EtatAvancement {
    /// Every progress-state label.
    pub const ALL: [Self; 4] = [Self::Planifie, Self::EnCours, Self::Termine, Self::Suspendu];

    /// Wire label for this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planifie => "Planifié",
            Self::EnCours => "En cours",
            Self::Termine => "Terminé",
            Self::Suspendu => "Suspendu",
        }
    }

    /// Comma-separated accepted labels, used by validation messages.
    pub fn accepted_labels() -> String {
        join_labels(Self::ALL.iter().map(Self::as_str))
    }
}

impl fmt::Display for EtatAvancement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EtatAvancement {
    type Err = UnknownLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == value)
            .ok_or_else(|| UnknownLabelError {
                input: value.to_owned(),
            })
    }
}

/// Parse error shared by the closed-set enums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabelError {
    /// Rejected input value.
    pub input: String,
}

impl fmt::Display for UnknownLabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown label: {}", self.input)
    }
}

impl std::error::Error for UnknownLabelError {}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[test]
    fn sector_labels_round_trip() {
        for secteur in Secteur::ALL {
            let parsed: Secteur = secteur.as_str().parse().expect("own label parses");
            assert_eq!(parsed, secteur);
        }
    }

    #[test]
    fn province_labels_round_trip() {
        for province in Province::ALL {
            let parsed: Province = province.as_str().parse().expect("own label parses");
            assert_eq!(parsed, province);
        }
    }

    #[test]
    fn etat_labels_round_trip() {
        for etat in EtatAvancement::ALL {
            let parsed: EtatAvancement = etat.as_str().parse().expect("own label parses");
            assert_eq!(parsed, etat);
        }
    }

    #[rstest]
    #[case("Atlantis")]
    #[case("agadir-ida-ou-tanane")]
    #[case("")]
    fn unknown_provinces_are_rejected(#[case] input: &str) {
        assert_eq!(
            input.parse::<Province>(),
            Err(UnknownLabelError {
                input: input.to_owned()
            })
        );
    }

    #[test]
    fn accepted_labels_list_the_full_closed_sets() {
        assert_eq!(
            Province::accepted_labels(),
            "Agadir-Ida-Ou-Tanane, Chtouka-Aït Baha, Inezgane-Aït Melloul, Taroudant, Tiznit, Tata"
        );
        assert_eq!(
            EtatAvancement::accepted_labels(),
            "Planifié, En cours, Terminé, Suspendu"
        );
        assert!(Secteur::accepted_labels().contains("Pêche maritime"));
    }

    #[test]
    fn serde_uses_the_accented_wire_labels() {
        let json = serde_json::to_string(&EtatAvancement::EnCours).expect("serialise");
        assert_eq!(json, "\"En cours\"");
        let parsed: Secteur = serde_json::from_str("\"Pêche maritime\"").expect("deserialise");
        assert_eq!(parsed, Secteur::PecheMaritime);
    }
}
