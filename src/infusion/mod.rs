//! Continuous infusions: drug catalog and dose/rate conversion.

pub mod dose;
pub mod presets;

pub use dose::convert;
pub use presets::{catalog, preset_for};
