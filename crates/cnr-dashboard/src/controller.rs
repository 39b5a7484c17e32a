//! # Dashboard controller
//!
//! Owns the session, the working set, and the filter state, and mediates
//! every fetch. Two rules hold throughout:
//!
//! 1. **Stale responses never win.** Every fetch is numbered; a response
//!    is applied only if no newer fetch for the same resource has been
//!    issued since. A fast double-refresh therefore cannot overwrite new
//!    data with old.
//! 2. **Errors never clear data.** A failed fetch records the error and
//!    leaves the last-good working set and statistics in place. Only an
//!    auth failure (forced logout) or an explicit logout resets state.

use cnr_core::{
    gender_distribution, risk_clusters, summary_counts, BenefitLabel, FilterState,
    GenderDistribution, PageSize, PensionRecord, RiskLevelStat, Summary, TpCategory, Wilaya,
};
use cnr_gateway::{
    CnrClient, GatewayError, PensionPage, Session, SessionError, SessionStore,
};

/// Controller-level errors.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// No session; the caller must log in first.
    #[error("not authenticated")]
    NotAuthenticated,

    /// A backend call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The persisted session could not be read or written.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Monotonic fetch numbering for one resource.
///
/// `begin` is called when a fetch is issued; `is_current` answers whether
/// a completing fetch is still the latest one for the resource.
#[derive(Debug, Default)]
struct FetchSequence {
    latest: u64,
}

impl FetchSequence {
    fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

/// Everything the presentation layer renders for one frame, derived in
/// full from the current working set and filter.
#[derive(Debug)]
pub struct DerivedView<'a> {
    /// The filtered subset, in fetch order.
    pub filtered: Vec<&'a PensionRecord>,
    /// Gender split of the filtered subset.
    pub gender: GenderDistribution,
    /// Risk-cluster distribution of the filtered subset.
    pub clusters: Vec<RiskLevelStat>,
    /// Per-dimension summary counts against the unfiltered working set.
    pub summary: Summary,
}

/// The view-state controller: single owner of session, working set,
/// filters, and cursor.
pub struct DashboardController {
    client: CnrClient,
    store: SessionStore,
    session: Option<Session>,
    filter: FilterState,
    records: Vec<PensionRecord>,
    server_stats: Vec<RiskLevelStat>,
    last_error: Option<String>,
    list_seq: FetchSequence,
    stats_seq: FetchSequence,
}

impl DashboardController {
    /// Build a controller, restoring any persisted session.
    pub fn new(client: CnrClient, store: SessionStore) -> Result<Self, DashboardError> {
        let session = store.load()?;
        Ok(Self {
            client,
            store,
            session,
            filter: FilterState::new(),
            records: Vec::new(),
            server_stats: Vec::new(),
            last_error: None,
            list_seq: FetchSequence::default(),
            stats_seq: FetchSequence::default(),
        })
    }

    /// Whether a session is active.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The current working set, as last fetched.
    pub fn records(&self) -> &[PensionRecord] {
        &self.records
    }

    /// The server-computed risk-level distribution, as last fetched.
    pub fn server_stats(&self) -> &[RiskLevelStat] {
        &self.server_stats
    }

    /// The active filter selections and cursor.
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The most recent fetch error, if the last operation failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Derive the renderable view from the current working set. Always
    /// recomputed in full; never cached or patched.
    pub fn derived(&self) -> DerivedView<'_> {
        let filtered = self.filter.apply(&self.records);
        DerivedView {
            gender: gender_distribution(filtered.iter().copied()),
            clusters: risk_clusters(filtered.iter().copied()),
            summary: summary_counts(&self.records, &self.filter),
            filtered,
        }
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Log in and persist the session.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), DashboardError> {
        let session = self.client.login(email, password).await?;
        self.store.save(&session)?;
        self.session = Some(session);
        self.last_error = None;
        Ok(())
    }

    /// Register a new account. Does not log in.
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), DashboardError> {
        self.client.register(name, email, password).await?;
        Ok(())
    }

    /// Log out: clear the persisted session and reset all view state.
    pub fn logout(&mut self) -> Result<(), DashboardError> {
        self.store.clear()?;
        self.session = None;
        self.filter.reset();
        self.records.clear();
        self.server_stats.clear();
        self.last_error = None;
        Ok(())
    }

    // ── Fetching ─────────────────────────────────────────────────────

    /// Fetch the current page of the working set and the server-side risk
    /// distribution for the active filter.
    pub async fn refresh(&mut self) -> Result<(), DashboardError> {
        self.refresh_records().await?;
        self.refresh_server_stats().await
    }

    /// Fetch the current page of the working set.
    pub async fn refresh_records(&mut self) -> Result<(), DashboardError> {
        let session = self.session.as_ref().ok_or(DashboardError::NotAuthenticated)?;
        let seq = self.list_seq.begin();
        let result = self
            .client
            .list_pensions(
                session,
                self.filter.page.page(),
                self.filter.page.limit(),
                self.filter.wilaya,
            )
            .await;
        match result {
            Ok(page) => {
                self.apply_page(seq, page);
                Ok(())
            }
            Err(e) => Err(self.record_failure(e)),
        }
    }

    /// Fetch the server-side risk-level distribution for the active
    /// filter selections.
    pub async fn refresh_server_stats(&mut self) -> Result<(), DashboardError> {
        let session = self.session.as_ref().ok_or(DashboardError::NotAuthenticated)?;
        let seq = self.stats_seq.begin();
        let categories: Vec<TpCategory> = self.filter.categories.iter().copied().collect();
        let avantages: Vec<BenefitLabel> = if self.filter.avantages.select_all {
            BenefitLabel::ALL.to_vec()
        } else {
            self.filter.avantages.labels.iter().copied().collect()
        };
        let result = self
            .client
            .risk_stats(session, self.filter.wilaya, &categories, &avantages)
            .await;
        match result {
            Ok(stats) => {
                self.apply_server_stats(seq, stats);
                Ok(())
            }
            Err(e) => Err(self.record_failure(e)),
        }
    }

    /// Fetch one pension case by identifier. Does not touch the working
    /// set; a failure still records the error and an auth failure still
    /// forces logout.
    pub async fn pension(&mut self, id: u64) -> Result<PensionRecord, DashboardError> {
        let session = self.session.as_ref().ok_or(DashboardError::NotAuthenticated)?;
        match self.client.pension_by_id(session, id).await {
            Ok(record) => Ok(record),
            Err(e) => Err(self.record_failure(e)),
        }
    }

    /// Apply a completed page fetch unless a newer one has been issued.
    fn apply_page(&mut self, seq: u64, page: PensionPage) -> bool {
        if !self.list_seq.is_current(seq) {
            tracing::debug!(seq, latest = self.list_seq.latest, "discarding stale page fetch");
            return false;
        }
        self.filter.page.set_total(page.total());
        self.records = page.data;
        self.last_error = None;
        true
    }

    /// Apply a completed stats fetch unless a newer one has been issued.
    fn apply_server_stats(&mut self, seq: u64, stats: Vec<RiskLevelStat>) -> bool {
        if !self.stats_seq.is_current(seq) {
            tracing::debug!(seq, latest = self.stats_seq.latest, "discarding stale stats fetch");
            return false;
        }
        self.server_stats = stats;
        self.last_error = None;
        true
    }

    /// Record a fetch failure. The working set is retained; an auth
    /// failure additionally forces a logout.
    fn record_failure(&mut self, error: GatewayError) -> DashboardError {
        self.last_error = Some(error.to_string());
        if error.is_auth() {
            tracing::warn!("auth failure, forcing logout");
            if let Err(e) = self.store.clear() {
                tracing::warn!("failed to clear persisted session: {e}");
            }
            self.session = None;
            self.filter.reset();
            self.records.clear();
            self.server_stats.clear();
        }
        DashboardError::Gateway(error)
    }

    // ── Filter actions ───────────────────────────────────────────────

    /// Replace the whole filter in one step and re-fetch. One-shot
    /// consumers build their selections up front instead of toggling
    /// dimension by dimension.
    pub async fn set_filter(&mut self, filter: FilterState) -> Result<(), DashboardError> {
        self.filter = filter;
        self.refresh().await
    }

    /// Select or clear the region filter. Resets the cursor to page 1 and
    /// re-fetches, since region filtering is applied server-side too.
    pub async fn set_wilaya(&mut self, wilaya: Option<Wilaya>) -> Result<(), DashboardError> {
        self.filter.wilaya = wilaya;
        self.filter.page.jump(1);
        self.refresh().await
    }

    /// Toggle a TP category and re-fetch the server distribution. The
    /// local pipeline re-derives on the next [`Self::derived`] call.
    pub async fn toggle_category(&mut self, category: TpCategory) -> Result<(), DashboardError> {
        self.filter.toggle_category(category);
        self.refresh_server_stats().await
    }

    /// Toggle a benefit label and re-fetch the server distribution.
    pub async fn toggle_avantage(&mut self, label: BenefitLabel) -> Result<(), DashboardError> {
        self.filter.avantages.toggle(label);
        self.refresh_server_stats().await
    }

    /// Toggle the "select all" benefit sentinel.
    pub async fn toggle_select_all_avantages(&mut self) -> Result<(), DashboardError> {
        self.filter.avantages.toggle_select_all();
        self.refresh_server_stats().await
    }

    /// Jump to a page (clamped) and re-fetch.
    pub async fn set_page(&mut self, page: u32) -> Result<(), DashboardError> {
        self.filter.page.jump(page);
        self.refresh_records().await
    }

    /// Change the page size (always lands on page 1) and re-fetch.
    pub async fn set_page_size(&mut self, size: PageSize) -> Result<(), DashboardError> {
        self.filter.page.set_size(size);
        self.refresh_records().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cnr_core::{BenefitCode, RiskCode};
    use cnr_gateway::{GatewayConfig, PageMeta, Role, UserProfile};

    fn record(id: u64, wilaya_code: u8, risk: &str) -> PensionRecord {
        PensionRecord {
            id,
            numero: format!("P-{id}"),
            etat: String::new(),
            wilaya_code,
            avantage: BenefitCode::new("1"),
            date_naissance: None,
            date_jouissance: None,
            age_app_tp: None,
            age_moyen_cat: 79,
            duree_pension: 0.0,
            niveau_risque: RiskCode::new(risk),
            risque_age: None,
            sexe: None,
            taux_d: 0.0,
            taux_glb: 0.0,
            taux_rv: 0.0,
            net_mens: 0.0,
            wilaya: None,
        }
    }

    fn page(ids: &[u64], total: u64) -> PensionPage {
        PensionPage {
            data: ids.iter().map(|&id| record(id, 16, "0")).collect(),
            meta: Some(PageMeta {
                page: 1,
                limit: 10,
                total,
                offset: 0,
            }),
        }
    }

    fn controller() -> DashboardController {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        let client =
            CnrClient::new(GatewayConfig::new("http://127.0.0.1:1").unwrap()).unwrap();
        let mut c = DashboardController::new(client, store).unwrap();
        c.session = Some(Session::new(
            "tok",
            UserProfile {
                id: 1,
                name: "t".to_string(),
                email: "t@t".to_string(),
                role: Role::User,
            },
        ));
        c
    }

    #[test]
    fn fetch_sequence_marks_older_fetches_stale() {
        let mut seq = FetchSequence::default();
        let first = seq.begin();
        let second = seq.begin();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn stale_page_response_is_discarded() {
        let mut c = controller();
        let first = c.list_seq.begin();
        let second = c.list_seq.begin();

        // The newer fetch completes first.
        assert!(c.apply_page(second, page(&[10, 11], 2)));
        // The older fetch completes late and must not overwrite.
        assert!(!c.apply_page(first, page(&[1], 1)));

        let ids: Vec<u64> = c.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![10, 11]);
        assert_eq!(c.filter().page.total(), 2);
    }

    #[test]
    fn stale_stats_response_is_discarded() {
        let mut c = controller();
        let first = c.stats_seq.begin();
        let second = c.stats_seq.begin();

        let newer = vec![RiskLevelStat {
            level: cnr_core::RiskLevel::Bas,
            count: 5,
            percentage: 100.0,
        }];
        assert!(c.apply_server_stats(second, newer));
        assert!(!c.apply_server_stats(first, Vec::new()));
        assert_eq!(c.server_stats().len(), 1);
    }

    #[test]
    fn applied_page_updates_cursor_total() {
        let mut c = controller();
        let seq = c.list_seq.begin();
        c.apply_page(seq, page(&[1, 2, 3], 95));
        assert_eq!(c.filter().page.total(), 95);
        assert_eq!(c.filter().page.total_pages(), 10);
    }

    #[test]
    fn non_auth_failure_retains_working_set() {
        let mut c = controller();
        let seq = c.list_seq.begin();
        c.apply_page(seq, page(&[1, 2], 2));

        let err = GatewayError::Data {
            endpoint: "x".to_string(),
            reason: "bad shape".to_string(),
        };
        let returned = c.record_failure(err);
        assert!(matches!(returned, DashboardError::Gateway(_)));

        // Last-good data survives; the error is recorded beside it.
        assert_eq!(c.records().len(), 2);
        assert!(c.last_error().unwrap().contains("bad shape"));
        assert!(c.is_authenticated());
    }

    #[test]
    fn auth_failure_forces_logout_and_reset() {
        let mut c = controller();
        let seq = c.list_seq.begin();
        c.apply_page(seq, page(&[1, 2], 2));
        c.filter.toggle_category(TpCategory::Deces);

        let err = GatewayError::Auth {
            message: "Invalid or expired token".to_string(),
        };
        c.record_failure(err);

        assert!(!c.is_authenticated());
        assert!(c.records().is_empty());
        assert!(c.filter().is_neutral());
    }

    #[test]
    fn derived_view_recomputes_from_working_set() {
        let mut c = controller();
        c.records = vec![record(1, 16, "0"), record(2, 16, "2"), record(3, 31, "2")];
        c.filter.wilaya = Some(Wilaya::from_code(16).unwrap());

        let view = c.derived();
        assert_eq!(view.filtered.len(), 2);
        assert_eq!(view.summary.total, 3);
        assert_eq!(view.summary.wilaya.count, 2);
        assert_eq!(view.clusters.len(), 2); // Bas + Haut present
    }

    #[test]
    fn logout_resets_everything() {
        let mut c = controller();
        c.records = vec![record(1, 16, "0")];
        c.filter.toggle_category(TpCategory::Revision);
        c.logout().unwrap();
        assert!(!c.is_authenticated());
        assert!(c.records().is_empty());
        assert!(c.filter().is_neutral());
        assert!(c.last_error().is_none());
    }
}
