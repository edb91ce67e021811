//! `cicu-calc` library crate.
//!
//! Bedside calculators for the cardiac intensive care unit: GRACE, SOFA, pericarditis
//! risk, Clinical Frailty Scale, pulmonary-artery-catheter hemodynamics, and infusion
//! dose/rate conversion. The binary (`cicu`) is a thin wrapper around this library so that:
//!
//! - calculators are testable without spawning processes
//! - other front-ends can call [`calc::derive`] directly
//! - persistence stays behind the [`store::SnapshotStore`] trait

pub mod app;
pub mod calc;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod hemo;
pub mod infusion;
pub mod math;
pub mod report;
pub mod scores;
pub mod store;
