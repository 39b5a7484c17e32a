//! # cnr-gateway — Typed HTTP client for the CNR pension backend
//!
//! All backend calls go through [`CnrClient`]: login and registration,
//! paginated pension listing, single-record fetch, and server-side
//! risk-level statistics. Every endpoint has a strict response schema
//! validated once at this boundary, so the derivation pipeline in
//! `cnr-core` can assume well-typed input.
//!
//! ## Error Handling
//!
//! Failures map onto the four-way [`GatewayError`] taxonomy: `Auth`
//! (401 or malformed auth responses, forces logout), `Validation`
//! (server-side registration rejection), `Data` (unexpected response
//! shape), and `Network` (transport failure or timeout). There are no
//! automatic retries — every failure is terminal for its operation and
//! recovery is an explicit user-triggered re-fetch.
//!
//! ## Session
//!
//! The bearer token and user profile live in a [`session::Session`],
//! persisted to client-local storage by [`session::SessionStore`] and
//! cleared on logout or when either half is absent.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod pensions;
pub mod session;

pub use client::CnrClient;
pub use config::{ConfigError, GatewayConfig};
pub use error::GatewayError;
pub use pensions::{PageMeta, PensionPage};
pub use session::{Role, Session, SessionError, SessionStore, UserProfile};
