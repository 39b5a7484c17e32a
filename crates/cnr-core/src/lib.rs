//! # cnr-core — Pension dashboard domain model
//!
//! Pure domain library for the CNR pension-risk monitoring client. Holds
//! the record model, the fixed classification tables, the filter-application
//! pipeline, aggregate statistics, and the pagination cursor.
//!
//! ## Design
//!
//! Everything here is synchronous and side-effect free. Records are
//! read-only snapshots fetched by `cnr-gateway`; this crate only filters
//! and derives. Aggregates are always recomputed in full from the current
//! working set — the collections involved are pagination-sized, so
//! correctness wins over incremental updates.

pub mod benefit;
pub mod category;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod record;
pub mod stats;
pub mod wilaya;

pub use benefit::{classify_benefit, BenefitCode, BenefitLabel};
pub use category::{classify_age_bucket, TpCategory};
pub use error::DomainError;
pub use filter::{BenefitFilter, FilterState};
pub use pagination::{PageSize, Pagination};
pub use record::{PensionRecord, RiskCode, RiskLevel, Sex};
pub use stats::{
    gender_distribution, risk_clusters, summary_counts, GenderDistribution, RiskLevelStat, Summary,
};
pub use wilaya::Wilaya;
