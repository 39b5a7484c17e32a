//! # Benefit-type (AVT) classification
//!
//! An AVT code identifies the legal basis of a pension benefit. The backend
//! stores it as a small integer for numeric codes but letter codes also
//! occur, so the wire value may arrive as a JSON number or a JSON string.
//! [`BenefitCode`] normalizes both to a string, and [`classify_benefit`]
//! maps codes to one of the four display labels through fixed lookup
//! tables. Codes in no table classify to `None` and render as an empty
//! label.

use serde::{Deserialize, Serialize};

/// AVT codes that classify as a direct beneficiary.
const DIRECT_CODES: [&str; 8] = ["1", "7", "W", "Z", "4", "9", "G", "5"];

/// AVT codes that classify as a widow's pension.
const VEUVES_CODES: [&str; 6] = ["3", "2", "F", "E", "8", "J"];

/// AVT codes that classify as an adult-daughter pension.
const FILLE_MAJEUR_CODES: [&str; 3] = ["H", "D", "Y"];

/// A raw benefit-type code as received from the backend.
///
/// Always held as a string; a numeric wire value is converted to its
/// decimal form at deserialization time so `7` and `"7"` classify
/// identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BenefitCode(String);

impl BenefitCode {
    /// Wrap a raw code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The raw code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classify this code into a display label, if it is a known code.
    pub fn label(&self) -> Option<BenefitLabel> {
        classify_benefit(&self.0)
    }
}

impl From<&str> for BenefitCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl std::fmt::Display for BenefitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for BenefitCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // The backend emits `avt` either as an integer column value or as
        // a string; accept both.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(i64),
            Text(String),
        }
        let raw = Raw::deserialize(deserializer)?;
        Ok(match raw {
            Raw::Num(n) => Self(n.to_string()),
            Raw::Text(s) => Self(s),
        })
    }
}

/// The four benefit-category labels an AVT code can classify to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BenefitLabel {
    /// Direct beneficiary.
    Direct,
    /// Widow's pension.
    Veuves,
    /// Adult-daughter pension.
    FilleMajeur,
    /// The literal code "0": present but unclassified.
    Vide,
}

impl BenefitLabel {
    /// All labels, in display order.
    pub const ALL: [BenefitLabel; 4] = [
        BenefitLabel::Direct,
        BenefitLabel::Veuves,
        BenefitLabel::FilleMajeur,
        BenefitLabel::Vide,
    ];

    /// Parse a display label back into the enum.
    pub fn from_display(label: &str) -> Option<Self> {
        match label {
            "direct" => Some(Self::Direct),
            "Veuves" => Some(Self::Veuves),
            "fille majeur" => Some(Self::FilleMajeur),
            "(Vide)" => Some(Self::Vide),
            _ => None,
        }
    }
}

impl std::fmt::Display for BenefitLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Veuves => write!(f, "Veuves"),
            Self::FilleMajeur => write!(f, "fille majeur"),
            Self::Vide => write!(f, "(Vide)"),
        }
    }
}

/// Classify an AVT code string into a benefit label.
///
/// Pure fixed-table lookup; unknown codes yield `None` (rendered as an
/// empty label downstream). The single literal code `"0"` classifies as
/// [`BenefitLabel::Vide`].
pub fn classify_benefit(code: &str) -> Option<BenefitLabel> {
    if DIRECT_CODES.contains(&code) {
        Some(BenefitLabel::Direct)
    } else if VEUVES_CODES.contains(&code) {
        Some(BenefitLabel::Veuves)
    } else if FILLE_MAJEUR_CODES.contains(&code) {
        Some(BenefitLabel::FilleMajeur)
    } else if code == "0" {
        Some(BenefitLabel::Vide)
    } else {
        None
    }
}
