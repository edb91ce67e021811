//! Domain types used by every calculator.
//!
//! This module defines:
//!
//! - selector enums (`LabUnit`, `KillipClass`, `Pressor`, `AmountUnit`, `DoseUnit`, `Drug`)
//! - per-calculator input records (`GraceInput`, `SofaInput`, `HemoInput`, `InfusionInput`)
//! - result records and the closed `ScoreResult` union

pub mod types;

pub use types::*;
