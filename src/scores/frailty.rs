//! Clinical Frailty Scale (CFS, levels 1–9).

use serde::Serialize;

/// One level of the scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrailtyLevel {
    pub value: u8,
    pub title: &'static str,
    pub description: &'static str,
}

/// Care-planning band derived from the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FrailtyBand {
    NotFrail,
    Mild,
    Moderate,
    Severe,
    TerminallyIll,
}

impl FrailtyBand {
    pub fn display_name(self) -> &'static str {
        match self {
            FrailtyBand::NotFrail => "Not frail",
            FrailtyBand::Mild => "Mild frailty",
            FrailtyBand::Moderate => "Moderate frailty",
            FrailtyBand::Severe => "Severe frailty",
            FrailtyBand::TerminallyIll => "Terminally ill",
        }
    }

    pub fn note(self) -> &'static str {
        match self {
            FrailtyBand::NotFrail => "Candidate for aggressive interventions when indicated.",
            FrailtyBand::Mild => "Weigh risks and benefits; selective escalation.",
            FrailtyBand::Moderate => "Prioritize support, goals of care, shared decisions.",
            FrailtyBand::Severe => "Conservative approach, limit invasiveness; palliative plan.",
            FrailtyBand::TerminallyIll => "Palliative focus; adjust therapeutic effort.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrailtyResult {
    pub level: FrailtyLevel,
    pub band: FrailtyBand,
}

pub const LEVELS: [FrailtyLevel; 9] = [
    FrailtyLevel { value: 1, title: "Very fit", description: "Robust, active, energetic; among the fittest for their age." },
    FrailtyLevel { value: 2, title: "Fit", description: "No active disease symptoms; exercises regularly." },
    FrailtyLevel { value: 3, title: "Managing well", description: "Medical problems well controlled; not regularly active beyond walking." },
    FrailtyLevel { value: 4, title: "Living with very mild frailty", description: "Not dependent, but symptoms limit activities." },
    FrailtyLevel { value: 5, title: "Living with mild frailty", description: "Needs help with complex tasks (finances, shopping, medications)." },
    FrailtyLevel { value: 6, title: "Living with moderate frailty", description: "Needs help with housework and bathing; trouble with stairs." },
    FrailtyLevel { value: 7, title: "Living with severe frailty", description: "Dependent for personal care; stable, not at high risk of dying." },
    FrailtyLevel { value: 8, title: "Living with very severe frailty", description: "Completely dependent; approaching end of life." },
    FrailtyLevel { value: 9, title: "Terminally ill", description: "Life expectancy under 6 months, otherwise not evidently frail." },
];

pub fn band(level: u8) -> FrailtyBand {
    match level {
        0..=3 => FrailtyBand::NotFrail,
        4..=5 => FrailtyBand::Mild,
        6 => FrailtyBand::Moderate,
        7..=8 => FrailtyBand::Severe,
        _ => FrailtyBand::TerminallyIll,
    }
}

/// Look up a CFS level; values outside 1–9 yield no result.
pub fn assess(level: u8) -> Option<FrailtyResult> {
    let entry = LEVELS.iter().find(|l| l.value == level)?;
    Some(FrailtyResult {
        level: *entry,
        band: band(level),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_follow_levels() {
        assert_eq!(assess(3).unwrap().band, FrailtyBand::NotFrail);
        assert_eq!(assess(4).unwrap().band, FrailtyBand::Mild);
        assert_eq!(assess(5).unwrap().band, FrailtyBand::Mild);
        assert_eq!(assess(6).unwrap().band, FrailtyBand::Moderate);
        assert_eq!(assess(8).unwrap().band, FrailtyBand::Severe);
        assert_eq!(assess(9).unwrap().band, FrailtyBand::TerminallyIll);
    }

    #[test]
    fn out_of_scale_values_have_no_result() {
        assert!(assess(0).is_none());
        assert!(assess(10).is_none());
    }
}
