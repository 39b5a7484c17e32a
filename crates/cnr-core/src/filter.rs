//! # Filter-application pipeline
//!
//! [`FilterState`] is the analyst's active query: an optional region, a set
//! of TP categories, and a benefit-label selection. [`FilterState::apply`]
//! produces the filtered subset of a working set by AND-composing one
//! independent row predicate per dimension, so application order never
//! affects the result and an empty selection on any dimension is a no-op.
//!
//! Region filtering compares wilaya codes, never names. Category membership
//! uses the canonical age-bucket classifier, not the raw status label.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::benefit::BenefitLabel;
use crate::category::{classify_age_bucket, TpCategory};
use crate::pagination::Pagination;
use crate::record::PensionRecord;
use crate::wilaya::Wilaya;

/// Benefit-label selection, including the "select all" sentinel.
///
/// The sentinel lives here as a flag rather than as a member of the label
/// set, so the pipeline never compares against a magic string. With
/// `select_all` set, any record with a recognized label passes; otherwise
/// membership in `labels` decides, and an explicit [`BenefitLabel::Vide`]
/// selection additionally admits records whose code classifies to nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitFilter {
    /// "Sélectionner tout": keep every record with a recognized label.
    pub select_all: bool,
    /// Explicitly selected labels.
    pub labels: BTreeSet<BenefitLabel>,
}

impl BenefitFilter {
    /// True when this dimension filters nothing.
    pub fn is_empty(&self) -> bool {
        !self.select_all && self.labels.is_empty()
    }

    /// Toggle a single label in or out of the selection.
    pub fn toggle(&mut self, label: BenefitLabel) {
        if !self.labels.remove(&label) {
            self.labels.insert(label);
        }
    }

    /// Toggle the select-all sentinel. Selecting all replaces any explicit
    /// label selection; deselecting clears the dimension entirely.
    pub fn toggle_select_all(&mut self) {
        self.select_all = !self.select_all;
        self.labels.clear();
    }

    fn matches(&self, label: Option<BenefitLabel>) -> bool {
        if self.select_all {
            return label.is_some();
        }
        match label {
            Some(l) => self.labels.contains(&l),
            // Unclassified codes only pass when "(Vide)" is explicitly
            // selected.
            None => self.labels.contains(&BenefitLabel::Vide),
        }
    }
}

/// The analyst's active query over the working set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterState {
    /// Selected region, if any.
    pub wilaya: Option<Wilaya>,
    /// Selected TP categories; empty keeps all.
    pub categories: BTreeSet<TpCategory>,
    /// Benefit-label selection; empty keeps all.
    pub avantages: BenefitFilter,
    /// Pagination cursor for the server-side fetch.
    pub page: Pagination,
}

impl FilterState {
    /// A default filter: no selections, page 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every selection and the cursor, as on logout.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Toggle a TP category in or out of the selection.
    pub fn toggle_category(&mut self, category: TpCategory) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    /// True when no dimension filters anything.
    pub fn is_neutral(&self) -> bool {
        self.wilaya.is_none() && self.categories.is_empty() && self.avantages.is_empty()
    }

    /// Row predicate for the region dimension.
    pub fn matches_wilaya(&self, record: &PensionRecord) -> bool {
        match self.wilaya {
            Some(w) => record.wilaya_code == w.code(),
            None => true,
        }
    }

    /// Row predicate for the category dimension.
    pub fn matches_category(&self, record: &PensionRecord) -> bool {
        if self.categories.is_empty() {
            return true;
        }
        match classify_age_bucket(record.age_moyen_cat) {
            Some(cat) => self.categories.contains(&cat),
            None => false,
        }
    }

    /// Row predicate for the benefit dimension.
    pub fn matches_avantage(&self, record: &PensionRecord) -> bool {
        if self.avantages.is_empty() {
            return true;
        }
        self.avantages.matches(record.avantage.label())
    }

    /// Apply all three dimensions to a working set, preserving input order.
    pub fn apply<'a>(&self, records: &'a [PensionRecord]) -> Vec<&'a PensionRecord> {
        records
            .iter()
            .filter(|r| {
                self.matches_wilaya(r) && self.matches_category(r) && self.matches_avantage(r)
            })
            .collect()
    }
}
