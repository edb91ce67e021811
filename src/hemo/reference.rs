//! Reference ranges for hemodynamic display.
//!
//! Ranges never feed back into computation; they only classify a value that is
//! already present so front-ends can highlight it.

use serde::Serialize;

use crate::domain::{HemoInput, HemoResult};

/// Metrics that carry a reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Metric {
    Papi,
    Rap,
    Mpap,
    Pcwp,
    Tpg,
    Svo2,
    Ci,
    Cpo,
    Pvr,
    PvrWu,
    Svr,
    SvrWu,
    RapPcwp,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceRange {
    pub metric: Metric,
    pub label: &'static str,
    pub unit: &'static str,
    pub low: Option<f64>,
    /// Inclusive for closed ranges, exclusive for `<` limits (`RAP/PCWP < 0.6`).
    pub high: Option<f64>,
    pub high_exclusive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RangeStatus {
    Low,
    Normal,
    High,
}

const fn closed(metric: Metric, label: &'static str, unit: &'static str, low: f64, high: f64) -> ReferenceRange {
    ReferenceRange {
        metric,
        label,
        unit,
        low: Some(low),
        high: Some(high),
        high_exclusive: false,
    }
}

pub const RANGES: [ReferenceRange; 13] = [
    closed(Metric::Papi, "PAPi", "", 1.3, 1.8),
    closed(Metric::Rap, "RAP", "mmHg", 2.0, 8.0),
    closed(Metric::Mpap, "mPAP", "mmHg", 10.0, 20.0),
    closed(Metric::Pcwp, "PCWP", "mmHg", 6.0, 12.0),
    closed(Metric::Tpg, "TPG", "mmHg", 5.0, 8.0),
    closed(Metric::Svo2, "SvO2", "%", 60.0, 80.0),
    closed(Metric::Ci, "CI", "L/min/m²", 2.5, 4.0),
    closed(Metric::Cpo, "CPO", "W", 0.5, 1.0),
    closed(Metric::Pvr, "PVR", "dyn·s·cm⁻⁵", 20.0, 130.0),
    closed(Metric::PvrWu, "PVR", "WU", 0.25, 1.63),
    closed(Metric::Svr, "SVR", "dyn·s·cm⁻⁵", 800.0, 1400.0),
    closed(Metric::SvrWu, "SVR", "WU", 10.0, 17.5),
    ReferenceRange {
        metric: Metric::RapPcwp,
        label: "RAP/PCWP",
        unit: "",
        low: None,
        high: Some(0.6),
        high_exclusive: true,
    },
];

impl Metric {
    pub fn range(self) -> &'static ReferenceRange {
        // RANGES holds exactly one entry per metric, in declaration order.
        &RANGES[self as usize]
    }
}

impl ReferenceRange {
    pub fn classify(&self, value: f64) -> RangeStatus {
        if self.low.is_some_and(|low| value < low) {
            return RangeStatus::Low;
        }
        let above = match self.high {
            Some(high) if self.high_exclusive => value >= high,
            Some(high) => value > high,
            None => false,
        };
        if above { RangeStatus::High } else { RangeStatus::Normal }
    }

    /// Human-readable range, e.g. `2.5–4` or `<0.6`.
    pub fn describe(&self) -> String {
        match (self.low, self.high) {
            (Some(low), Some(high)) => format!("{low}–{high}"),
            (None, Some(high)) => format!("<{high}"),
            (Some(low), None) => format!(">{low}"),
            (None, None) => String::new(),
        }
    }
}

/// A present value together with its reference classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Flagged {
    pub metric: Metric,
    pub value: f64,
    pub status: RangeStatus,
}

/// Classify every present measured or derived value that has a reference range.
pub fn classify(input: &HemoInput, result: &HemoResult) -> Vec<Flagged> {
    let values = [
        (Metric::Papi, result.papi),
        (Metric::Rap, input.rap),
        (Metric::Mpap, input.mpap),
        (Metric::Pcwp, input.pcwp),
        (Metric::Tpg, result.tpg),
        (Metric::Svo2, input.svo2),
        (Metric::Ci, result.ci),
        (Metric::Cpo, result.cpo),
        (Metric::Pvr, result.pvr),
        (Metric::PvrWu, result.pvr_wu),
        (Metric::Svr, result.svr),
        (Metric::SvrWu, result.svr_wu),
        (Metric::RapPcwp, result.rap_pcwp),
    ];

    values
        .into_iter()
        .filter_map(|(metric, value)| {
            let value = value.filter(|v| v.is_finite())?;
            Some(Flagged {
                metric,
                value,
                status: metric.range().classify(value),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_are_indexed_by_metric() {
        for (i, r) in RANGES.iter().enumerate() {
            assert_eq!(r.metric as usize, i);
        }
    }

    #[test]
    fn closed_ranges_are_inclusive() {
        let ci = Metric::Ci.range();
        assert_eq!(ci.classify(2.4), RangeStatus::Low);
        assert_eq!(ci.classify(2.5), RangeStatus::Normal);
        assert_eq!(ci.classify(4.0), RangeStatus::Normal);
        assert_eq!(ci.classify(4.1), RangeStatus::High);
    }

    #[test]
    fn rap_pcwp_has_only_an_upper_limit() {
        let r = Metric::RapPcwp.range();
        assert_eq!(r.classify(0.0), RangeStatus::Normal);
        assert_eq!(r.classify(0.6), RangeStatus::High);
        assert_eq!(r.describe(), "<0.6");
    }

    #[test]
    fn classify_skips_absent_values() {
        let input = HemoInput {
            rap: Some(12.0),
            ..HemoInput::default()
        };
        let flagged = classify(&input, &HemoResult::default());
        assert_eq!(
            flagged,
            vec![Flagged {
                metric: Metric::Rap,
                value: 12.0,
                status: RangeStatus::High,
            }]
        );
    }
}
