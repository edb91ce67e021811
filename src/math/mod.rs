//! Mathematical utilities: lab unit conversion and nomogram interpolation.

pub mod interp;
pub mod units;

pub use interp::*;
pub use units::*;
