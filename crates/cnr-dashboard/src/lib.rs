//! # cnr-dashboard — View-state controller
//!
//! [`DashboardController`] is the single owner of everything the
//! presentation layer renders: the session, the fetched working set, the
//! active [`cnr_core::FilterState`], and the pagination cursor. Filter
//! changes flow in from the presentation layer; data flows one direction
//! back out through [`controller::DerivedView`].
//!
//! State is an explicit owned struct with its lifecycle tied to the
//! application scope — there are no ambient globals. All mutation happens
//! in response to completed user actions or completed fetches, never from
//! two places at once.

pub mod controller;

pub use controller::{DashboardController, DashboardError, DerivedView};
