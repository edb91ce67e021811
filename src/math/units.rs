//! Laboratory unit conversion.
//!
//! - creatinine: 1 mg/dL = 88.4 µmol/L
//! - bilirubin:  1 mg/dL = 17.1 µmol/L
//!
//! Conversions are total: no range checks, negative values pass through.

use crate::domain::LabUnit;

/// µmol/L per mg/dL of creatinine.
pub const CREATININE_UMOL_PER_MGDL: f64 = 88.4;

/// µmol/L per mg/dL of bilirubin.
pub const BILIRUBIN_UMOL_PER_MGDL: f64 = 17.1;

pub fn mgdl_from_umol_creatinine(v: f64) -> f64 {
    v / CREATININE_UMOL_PER_MGDL
}

pub fn mgdl_from_umol_bilirubin(v: f64) -> f64 {
    v / BILIRUBIN_UMOL_PER_MGDL
}

/// Creatinine in mg/dL, whatever unit it was entered in.
pub fn creatinine_mgdl(value: f64, unit: LabUnit) -> f64 {
    match unit {
        LabUnit::MgDl => value,
        LabUnit::UmolL => mgdl_from_umol_creatinine(value),
    }
}

/// Bilirubin in mg/dL, whatever unit it was entered in.
pub fn bilirubin_mgdl(value: f64, unit: LabUnit) -> f64 {
    match unit {
        LabUnit::MgDl => value,
        LabUnit::UmolL => mgdl_from_umol_bilirubin(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creatinine_conversion() {
        assert!((mgdl_from_umol_creatinine(88.4) - 1.0).abs() < 1e-12);
        assert!((creatinine_mgdl(176.8, LabUnit::UmolL) - 2.0).abs() < 1e-12);
        assert_eq!(creatinine_mgdl(1.3, LabUnit::MgDl), 1.3);
    }

    #[test]
    fn bilirubin_conversion() {
        assert!((mgdl_from_umol_bilirubin(34.2) - 2.0).abs() < 1e-12);
        assert_eq!(bilirubin_mgdl(0.8, LabUnit::MgDl), 0.8);
    }

    #[test]
    fn negative_values_pass_through() {
        assert!(mgdl_from_umol_creatinine(-88.4) < 0.0);
        assert!(mgdl_from_umol_bilirubin(-17.1) < 0.0);
    }
}
