//! # Pension record model
//!
//! [`PensionRecord`] mirrors one row of the backend's pension table, with
//! the backend's wire field names mapped to Rust names. Records are created
//! and owned entirely by the backend; the client holds read-only copies for
//! one fetch-render cycle and never mutates them.
//!
//! ## Wire tolerance
//!
//! The backend is inconsistent about numeric columns that carry letter
//! codes: `avt` and `niveau_risque_predit` arrive as either JSON numbers
//! or JSON strings depending on the row. Both fields deserialize through
//! tolerant wrappers so the derivation pipeline always sees normalized
//! values. An unrecognized `sexe_tp` value degrades to absent rather than
//! failing the whole page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::benefit::BenefitCode;

/// Sex of the beneficiary, as recorded on the case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// "M" on the wire.
    #[serde(rename = "M")]
    Male,
    /// "F" on the wire.
    #[serde(rename = "F")]
    Female,
}

/// Predicted risk level of a case, produced upstream by the backend model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Level code 0.
    #[serde(rename = "Bas risque")]
    Bas,
    /// Level code 1.
    #[serde(rename = "Moyen risque")]
    Moyen,
    /// Level code 2.
    #[serde(rename = "Haut risque")]
    Haut,
    /// Any unrecognized level code.
    Inconnu,
}

impl RiskLevel {
    /// The three defined levels, in ascending-severity display order.
    pub const DEFINED: [RiskLevel; 3] = [RiskLevel::Bas, RiskLevel::Moyen, RiskLevel::Haut];

    /// Normalize a raw level code ("0"/"1"/"2", or an already-labeled
    /// string form) into a level. Unrecognized codes map to `Inconnu`.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "0" | "Bas risque" => Self::Bas,
            "1" | "Moyen risque" => Self::Moyen,
            "2" | "Haut risque" => Self::Haut,
            _ => Self::Inconnu,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bas => write!(f, "Bas risque"),
            Self::Moyen => write!(f, "Moyen risque"),
            Self::Haut => write!(f, "Haut risque"),
            Self::Inconnu => write!(f, "Inconnu"),
        }
    }
}

/// A raw predicted-risk code as received from the backend.
///
/// Kept verbatim for display; [`RiskCode::level`] normalizes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RiskCode(String);

impl RiskCode {
    /// Wrap a raw code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The raw code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The normalized risk level for this code.
    pub fn level(&self) -> RiskLevel {
        RiskLevel::from_code(&self.0)
    }
}

impl From<i64> for RiskCode {
    fn from(code: i64) -> Self {
        Self(code.to_string())
    }
}

impl std::fmt::Display for RiskCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for RiskCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(i64),
            Text(String),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Num(n) => Self(n.to_string()),
            Raw::Text(s) => Self(s),
        })
    }
}

fn deserialize_sex<'de, D>(deserializer: D) -> Result<Option<Sex>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    // Unknown markers ("", "X", null) degrade to absent.
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(match raw.as_deref() {
        Some("M") => Some(Sex::Male),
        Some("F") => Some(Sex::Female),
        _ => None,
    })
}

/// One administered pension case, as fetched from the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PensionRecord {
    /// Unique, immutable case identifier.
    pub id: u64,
    /// Pension number.
    #[serde(rename = "npens")]
    pub numero: String,
    /// Raw status label ("décès", "fin droit", "révision", ...). Display
    /// only — the canonical category comes from the age-bucket classifier.
    #[serde(rename = "etatpens", default)]
    pub etat: String,
    /// Wilaya (region) code, 1..=58.
    #[serde(rename = "ag")]
    pub wilaya_code: u8,
    /// Benefit-type (AVT) code.
    #[serde(rename = "avt")]
    pub avantage: BenefitCode,
    /// Birth date of the beneficiary.
    #[serde(rename = "datenais", default)]
    pub date_naissance: Option<DateTime<Utc>>,
    /// Pension start date.
    #[serde(rename = "datjouis", default)]
    pub date_jouissance: Option<DateTime<Utc>>,
    /// Applicant age at the TP event.
    #[serde(rename = "age_app_tp", default)]
    pub age_app_tp: Option<i16>,
    /// Average-age bucket code for the case's category.
    #[serde(rename = "age_moyen_cat")]
    pub age_moyen_cat: i16,
    /// Pension duration in years.
    #[serde(rename = "duree_pension", default)]
    pub duree_pension: f64,
    /// Predicted risk level code.
    #[serde(rename = "niveau_risque_predit")]
    pub niveau_risque: RiskCode,
    /// Age-related risk indicator.
    #[serde(rename = "risque_age", default)]
    pub risque_age: Option<i16>,
    /// Sex of the beneficiary, absent when unrecorded.
    #[serde(rename = "sexe_tp", default, deserialize_with = "deserialize_sex")]
    pub sexe: Option<Sex>,
    /// Direct rate (percentage).
    #[serde(rename = "taux_d", default)]
    pub taux_d: f64,
    /// Global rate (percentage).
    #[serde(rename = "taux_glb", default)]
    pub taux_glb: f64,
    /// Reversion rate (percentage).
    #[serde(rename = "taux_rv", default)]
    pub taux_rv: f64,
    /// Net monthly amount, DZD, non-negative.
    #[serde(rename = "net_mens", default)]
    pub net_mens: f64,
    /// Wilaya name as echoed by the backend. Display only; filtering uses
    /// `wilaya_code`.
    #[serde(default)]
    pub wilaya: Option<String>,
}
