//! # Pension endpoints — listing, single record, risk stats
//!
//! All three calls are bearer-authorized and role-routed: admins hit
//! `/admin/pensions…`, regular users `/pensions…`. Response shapes are
//! validated here so everything downstream sees typed records.
//!
//! | Method | Path | Returns |
//! |--------|------|---------|
//! | GET | `{prefix}?page=&limit=[&wilaya=]` | [`PensionPage`] |
//! | GET | `{prefix}/{id}` | [`cnr_core::PensionRecord`] |
//! | GET | `{prefix}/risk-stats[?wilaya=&category=&avantage=]` | `Vec<RiskLevelStat>` |

use serde::{Deserialize, Serialize};

use cnr_core::{BenefitLabel, PensionRecord, RiskLevelStat, TpCategory, Wilaya};

use crate::client::CnrClient;
use crate::error::GatewayError;
use crate::session::Session;

/// Server-side pagination metadata. `total` is authoritative and drives
/// cursor clamping in the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(default)]
    pub offset: u64,
}

/// One page of pension records plus optional pagination metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct PensionPage {
    pub data: Vec<PensionRecord>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

impl PensionPage {
    /// The authoritative total when the backend sent one, else the page
    /// length.
    pub fn total(&self) -> u64 {
        self.meta
            .map(|m| m.total)
            .unwrap_or(self.data.len() as u64)
    }
}

impl CnrClient {
    /// Fetch one page of pension records, optionally filtered server-side
    /// by wilaya code.
    ///
    /// # Errors
    ///
    /// [`GatewayError::Auth`] on 401, [`GatewayError::Data`] when the body
    /// has no `data` array, [`GatewayError::Network`] on transport failure.
    pub async fn list_pensions(
        &self,
        session: &Session,
        page: u32,
        limit: u32,
        wilaya: Option<Wilaya>,
    ) -> Result<PensionPage, GatewayError> {
        let endpoint = self.config.endpoint(session.role().pensions_prefix());
        let mut query: Vec<(&str, String)> =
            vec![("page", page.to_string()), ("limit", limit.to_string())];
        if let Some(w) = wilaya {
            query.push(("wilaya", w.code().to_string()));
        }

        let resp = self
            .send_authorized(
                self.http.get(&endpoint).query(&query),
                session.token(),
                &endpoint,
            )
            .await?;

        if !resp.status().is_success() {
            let message = Self::server_message(resp, "Failed to fetch pension data").await;
            return Err(GatewayError::data(&endpoint, message));
        }

        let value = Self::json_body(resp, &endpoint).await?;
        if !value.get("data").is_some_and(|d| d.is_array()) {
            return Err(GatewayError::data(
                &endpoint,
                "expected a data array in the response",
            ));
        }
        let page: PensionPage = serde_json::from_value(value)
            .map_err(|e| GatewayError::data(&endpoint, format!("malformed pension record: {e}")))?;

        tracing::debug!(
            records = page.data.len(),
            total = page.total(),
            "fetched pension page"
        );
        Ok(page)
    }

    /// Fetch a single pension record by identifier.
    pub async fn pension_by_id(
        &self,
        session: &Session,
        id: u64,
    ) -> Result<PensionRecord, GatewayError> {
        let endpoint = self
            .config
            .endpoint(&format!("{}/{id}", session.role().pensions_prefix()));

        let resp = self
            .send_authorized(self.http.get(&endpoint), session.token(), &endpoint)
            .await?;

        if !resp.status().is_success() {
            let message = Self::server_message(resp, "Failed to fetch pension data").await;
            return Err(GatewayError::data(&endpoint, message));
        }

        let value = Self::json_body(resp, &endpoint).await?;
        serde_json::from_value(value)
            .map_err(|e| GatewayError::data(&endpoint, format!("malformed pension record: {e}")))
    }

    /// Fetch the server-side risk-level distribution, optionally filtered
    /// by wilaya, TP categories, and benefit labels.
    ///
    /// # Errors
    ///
    /// [`GatewayError::Data`] when the body is not an array of stats.
    pub async fn risk_stats(
        &self,
        session: &Session,
        wilaya: Option<Wilaya>,
        categories: &[TpCategory],
        avantages: &[BenefitLabel],
    ) -> Result<Vec<RiskLevelStat>, GatewayError> {
        let endpoint = self
            .config
            .endpoint(&format!("{}/risk-stats", session.role().pensions_prefix()));

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(w) = wilaya {
            query.push(("wilaya", w.code().to_string()));
        }
        for cat in categories {
            query.push(("category", cat.to_string()));
        }
        for label in avantages {
            query.push(("avantage", label.to_string()));
        }

        let resp = self
            .send_authorized(
                self.http.get(&endpoint).query(&query),
                session.token(),
                &endpoint,
            )
            .await?;

        if !resp.status().is_success() {
            let message = Self::server_message(resp, "Failed to fetch risk level stats").await;
            return Err(GatewayError::data(&endpoint, message));
        }

        let value = Self::json_body(resp, &endpoint).await?;
        if !value.is_array() {
            return Err(GatewayError::data(
                &endpoint,
                "expected an array of risk stats",
            ));
        }
        serde_json::from_value(value)
            .map_err(|e| GatewayError::data(&endpoint, format!("malformed risk stats: {e}")))
    }
}
