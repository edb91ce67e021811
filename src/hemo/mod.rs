//! Pulmonary artery catheter (Swan-Ganz) hemodynamics.
//!
//! - derived parameters from raw vitals and pressures (`params`)
//! - display-only reference ranges (`reference`)

pub mod params;
pub mod reference;

pub use params::derive;
