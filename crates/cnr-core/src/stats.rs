//! # Aggregate statistics
//!
//! Derivations over a record collection: the gender split, the risk-cluster
//! distribution, and per-dimension summary counts. All aggregates are
//! recomputed in full from their input on every call; nothing is patched
//! incrementally.
//!
//! Percentages are defined as `100 · count / total`, with an empty input
//! yielding 0 rather than NaN so rendered values are always well-formed.

use serde::{Deserialize, Serialize};

use crate::filter::FilterState;
use crate::record::{PensionRecord, RiskLevel, Sex};

/// Counts of male and female beneficiaries in a collection.
///
/// Records without a recorded sex are ignored, so the two counts need not
/// sum to the collection size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderDistribution {
    /// Count labeled "Homme".
    pub hommes: u64,
    /// Count labeled "Femme".
    pub femmes: u64,
}

impl GenderDistribution {
    /// The distribution as (label, count) pairs in display order.
    pub fn labeled(&self) -> [(&'static str, u64); 2] {
        [("Homme", self.hommes), ("Femme", self.femmes)]
    }
}

/// One risk-cluster row: level, count, share of the filtered total.
///
/// Also the wire shape of the backend's `risk-stats` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskLevelStat {
    /// The normalized risk level.
    #[serde(rename = "riskLevel")]
    pub level: RiskLevel,
    /// Records in this cluster.
    pub count: u64,
    /// `100 · count / total`, 0 when the input was empty.
    pub percentage: f64,
}

/// Count and share of one summary dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionCount {
    /// Records matching this dimension's selection.
    pub count: u64,
    /// Share of the unfiltered total, in percent.
    pub percentage: f64,
}

impl DimensionCount {
    fn of(count: u64, total: u64) -> Self {
        let percentage = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        };
        Self { count, percentage }
    }

    /// One-decimal rendering of the percentage, e.g. `"52.0"`.
    pub fn percentage_label(&self) -> String {
        format!("{:.1}", self.percentage)
    }
}

/// Scalar summary counts per filter dimension, each measured independently
/// against the unfiltered working set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Unfiltered record count.
    pub total: u64,
    /// Records matching the region selection alone.
    pub wilaya: DimensionCount,
    /// Records matching the benefit selection alone.
    pub avantage: DimensionCount,
    /// Records matching the category selection alone.
    pub categorie: DimensionCount,
}

/// Compute the gender split of a collection, ignoring records without a
/// recorded sex.
pub fn gender_distribution<'a, I>(records: I) -> GenderDistribution
where
    I: IntoIterator<Item = &'a PensionRecord>,
{
    let mut dist = GenderDistribution::default();
    for record in records {
        match record.sexe {
            Some(Sex::Male) => dist.hommes += 1,
            Some(Sex::Female) => dist.femmes += 1,
            None => {}
        }
    }
    dist
}

/// Group a collection by normalized risk level.
///
/// Clusters appear in Bas → Moyen → Haut → Inconnu order, and only levels
/// actually present are emitted, so percentages across the result sum to
/// 100 (within rounding) whenever the input is non-empty.
pub fn risk_clusters<'a, I>(records: I) -> Vec<RiskLevelStat>
where
    I: IntoIterator<Item = &'a PensionRecord>,
{
    let mut counts = [0u64; 4];
    let mut total = 0u64;
    for record in records {
        let idx = match record.niveau_risque.level() {
            RiskLevel::Bas => 0,
            RiskLevel::Moyen => 1,
            RiskLevel::Haut => 2,
            RiskLevel::Inconnu => 3,
        };
        counts[idx] += 1;
        total += 1;
    }

    let levels = [
        RiskLevel::Bas,
        RiskLevel::Moyen,
        RiskLevel::Haut,
        RiskLevel::Inconnu,
    ];
    levels
        .into_iter()
        .zip(counts)
        .filter(|&(_, count)| count > 0)
        .map(|(level, count)| RiskLevelStat {
            level,
            count,
            percentage: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            },
        })
        .collect()
}

/// Compute the per-dimension summary counts for a working set under the
/// current filter. Each dimension is measured on its own against the full
/// set, matching the dashboard's summary cards.
pub fn summary_counts(records: &[PensionRecord], filter: &FilterState) -> Summary {
    let total = records.len() as u64;

    let wilaya = records.iter().filter(|r| filter.matches_wilaya(r)).count() as u64;
    let avantage = records.iter().filter(|r| filter.matches_avantage(r)).count() as u64;
    let categorie = records.iter().filter(|r| filter.matches_category(r)).count() as u64;

    Summary {
        total,
        wilaya: DimensionCount::of(wilaya, total),
        avantage: DimensionCount::of(avantage, total),
        categorie: DimensionCount::of(categorie, total),
    }
}
