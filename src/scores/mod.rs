//! Bedside risk and severity scores.
//!
//! Scores are small pure functions over an input record so they can be recomputed on
//! every form change and tested band by band.

pub mod frailty;
pub mod grace;
pub mod pericarditis;
pub mod sofa;
