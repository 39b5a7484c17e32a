//! # cnr-cli — Command-line client for the CNR pension dashboard
//!
//! Provides the `cnr` binary: an analyst-facing front end over the
//! dashboard controller.
//!
//! ## Subcommands
//!
//! - `cnr login` / `cnr register` / `cnr logout` — session lifecycle.
//! - `cnr pensions` — paginated pension listing with region, category,
//!   and benefit filters, plus the per-dimension summary counts.
//! - `cnr show <id>` — one pension case in full.
//! - `cnr stats` — risk-level clusters and the gender split.
//!
//! The backend base URL comes from `CNR_API_URL`; the session file lives
//! under the user state directory unless `CNR_SESSION_FILE` overrides it.

pub mod auth;
pub mod pensions;
pub mod stats;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use cnr_core::{BenefitLabel, TpCategory, Wilaya};
use cnr_dashboard::DashboardController;
use cnr_gateway::{CnrClient, GatewayConfig, SessionStore};

/// Resolve the session file path.
///
/// `CNR_SESSION_FILE` wins when set; otherwise the file lives at
/// `$XDG_STATE_HOME/cnr/session.json`, falling back to
/// `~/.local/state/cnr/session.json`.
pub fn session_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os("CNR_SESSION_FILE") {
        return PathBuf::from(path);
    }
    let state_dir = std::env::var_os("XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
        })
        .unwrap_or_else(|| PathBuf::from("."));
    state_dir.join("cnr").join("session.json")
}

/// Build a controller from the environment: backend settings from
/// `CNR_API_URL`/`CNR_TIMEOUT_SECS`, persisted session from the session
/// file.
pub fn build_controller() -> Result<DashboardController> {
    let config = GatewayConfig::from_env().context("invalid gateway configuration")?;
    let client = CnrClient::new(config).context("failed to build HTTP client")?;
    let store = SessionStore::new(session_file_path());
    DashboardController::new(client, store).context("failed to restore session")
}

/// Parse a wilaya argument: an official code (1..=58) or an exact French
/// name.
pub fn parse_wilaya(raw: &str) -> Result<Wilaya> {
    if let Ok(code) = raw.parse::<u8>() {
        return Ok(Wilaya::from_code(code)?);
    }
    Ok(Wilaya::by_name(raw)?)
}

/// Parse a TP category argument. Accepts the display label ("décès") and
/// an ASCII alias ("deces") for shells where typing diacritics is a chore.
pub fn parse_category(raw: &str) -> Result<TpCategory> {
    TpCategory::from_display(raw)
        .or_else(|| match raw {
            "deces" => Some(TpCategory::Deces),
            "fin-droit" | "findroit" => Some(TpCategory::FinDroit),
            "revision" => Some(TpCategory::Revision),
            _ => None,
        })
        .ok_or_else(|| {
            anyhow!("unknown category {raw:?}: expected \"décès\", \"fin droit\", or \"révision\"")
        })
}

/// Parse a benefit-label argument. Accepts the display label and an ASCII
/// alias.
pub fn parse_avantage(raw: &str) -> Result<BenefitLabel> {
    BenefitLabel::from_display(raw)
        .or_else(|| match raw {
            "veuves" => Some(BenefitLabel::Veuves),
            "fille-majeur" | "fillemajeur" => Some(BenefitLabel::FilleMajeur),
            "vide" => Some(BenefitLabel::Vide),
            _ => None,
        })
        .ok_or_else(|| {
            anyhow!(
                "unknown benefit label {raw:?}: expected \"direct\", \"Veuves\", \
                 \"fille majeur\", or \"(Vide)\""
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_wilaya_by_code_and_name() {
        assert_eq!(parse_wilaya("16").unwrap().name(), "Alger");
        assert_eq!(parse_wilaya("Oran").unwrap().code(), 31);
    }

    #[test]
    fn parse_wilaya_rejects_unknown() {
        assert!(parse_wilaya("0").is_err());
        assert!(parse_wilaya("59").is_err());
        assert!(parse_wilaya("Atlantis").is_err());
    }

    #[test]
    fn parse_category_accepts_label_and_alias() {
        assert_eq!(parse_category("décès").unwrap(), TpCategory::Deces);
        assert_eq!(parse_category("deces").unwrap(), TpCategory::Deces);
        assert_eq!(parse_category("fin droit").unwrap(), TpCategory::FinDroit);
        assert_eq!(parse_category("fin-droit").unwrap(), TpCategory::FinDroit);
        assert_eq!(parse_category("revision").unwrap(), TpCategory::Revision);
        assert!(parse_category("retraite").is_err());
    }

    #[test]
    fn parse_avantage_accepts_label_and_alias() {
        assert_eq!(parse_avantage("direct").unwrap(), BenefitLabel::Direct);
        assert_eq!(parse_avantage("Veuves").unwrap(), BenefitLabel::Veuves);
        assert_eq!(parse_avantage("veuves").unwrap(), BenefitLabel::Veuves);
        assert_eq!(
            parse_avantage("fille majeur").unwrap(),
            BenefitLabel::FilleMajeur
        );
        assert_eq!(parse_avantage("(Vide)").unwrap(), BenefitLabel::Vide);
        assert_eq!(parse_avantage("vide").unwrap(), BenefitLabel::Vide);
        assert!(parse_avantage("indirect").is_err());
    }

    #[test]
    fn session_file_honors_env_override() {
        // Touches process-global env; keep it inside one test.
        std::env::set_var("CNR_SESSION_FILE", "/tmp/cnr-test/session.json");
        assert_eq!(
            session_file_path(),
            PathBuf::from("/tmp/cnr-test/session.json")
        );
        std::env::remove_var("CNR_SESSION_FILE");
        assert!(session_file_path().ends_with("cnr/session.json"));
    }
}
