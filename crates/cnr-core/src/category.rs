//! # TP-category classification by age bucket
//!
//! A TP event is the termination/change event that reclassifies a pension
//! case. The backend's own status field (`etatpens`) has proven unreliable,
//! so the canonical category of a case is inferred from its average-age
//! bucket code (`age_moyen_cat`) through a fixed mapping. The raw status
//! label stays on the record for display only.

use serde::{Deserialize, Serialize};

/// The three TP event categories a case can classify into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TpCategory {
    /// Death of the beneficiary.
    Deces,
    /// Rights expiry.
    FinDroit,
    /// Administrative review.
    Revision,
}

impl TpCategory {
    /// All categories, in display order.
    pub const ALL: [TpCategory; 3] = [TpCategory::Deces, TpCategory::FinDroit, TpCategory::Revision];

    /// Parse a display label back into the enum.
    pub fn from_display(label: &str) -> Option<Self> {
        match label {
            "décès" => Some(Self::Deces),
            "fin droit" => Some(Self::FinDroit),
            "révision" => Some(Self::Revision),
            _ => None,
        }
    }
}

impl std::fmt::Display for TpCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deces => write!(f, "décès"),
            Self::FinDroit => write!(f, "fin droit"),
            Self::Revision => write!(f, "révision"),
        }
    }
}

/// Classify an average-age bucket code into a TP category.
///
/// Fixed mapping: {79, 77} are death buckets, {33, 48} rights-expiry
/// buckets, {64, 68, 72, 74, 75} review buckets. Any other code yields
/// `None` (rendered as an empty label).
pub fn classify_age_bucket(bucket: i16) -> Option<TpCategory> {
    match bucket {
        79 | 77 => Some(TpCategory::Deces),
        33 | 48 => Some(TpCategory::FinDroit),
        64 | 68 | 72 | 74 | 75 => Some(TpCategory::Revision),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn death_buckets() {
        assert_eq!(classify_age_bucket(79), Some(TpCategory::Deces));
        assert_eq!(classify_age_bucket(77), Some(TpCategory::Deces));
    }

    #[test]
    fn rights_expiry_buckets() {
        assert_eq!(classify_age_bucket(33), Some(TpCategory::FinDroit));
        assert_eq!(classify_age_bucket(48), Some(TpCategory::FinDroit));
    }

    #[test]
    fn review_buckets() {
        for bucket in [64, 68, 72, 74, 75] {
            assert_eq!(
                classify_age_bucket(bucket),
                Some(TpCategory::Revision),
                "{bucket}"
            );
        }
    }

    #[test]
    fn all_other_buckets_classify_none() {
        for bucket in [0, 1, 32, 34, 47, 49, 63, 65, 76, 78, 80, 100, -1] {
            assert_eq!(classify_age_bucket(bucket), None, "{bucket}");
        }
    }

    #[test]
    fn display_labels_round_trip() {
        for cat in TpCategory::ALL {
            assert_eq!(TpCategory::from_display(&cat.to_string()), Some(cat));
        }
        assert_eq!(TpCategory::from_display("deces"), None);
    }
}
