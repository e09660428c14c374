//! Satellite visibility windows for a ground observer.
//!
//! The core turns a propagated inertial trajectory into topocentric samples
//! ([`visibility::sample_span`]) and segments them into passes above a minimum
//! elevation ([`visibility::find_windows`]). The [`harness`] module wraps that
//! core with JSON test cases and result documents.

pub mod config;
pub mod geometry;
pub mod harness;
pub mod propagate;
pub mod timescale;
pub mod units;
pub mod visibility;
