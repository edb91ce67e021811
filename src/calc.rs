//! Single entry point over every calculator.
//!
//! Front-ends call [`derive`] whenever the form changes and replace whatever they
//! displayed before with the new result. There is no state between calls.

use serde::{Deserialize, Serialize};

use crate::domain::{GraceInput, HemoInput, InfusionInput, ScoreResult, SofaInput};
use crate::error::CalcIssue;

/// Input for one of the calculators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "lowercase")]
pub enum CalculatorInput {
    Grace(GraceInput),
    Sofa(SofaInput),
    Hemo(HemoInput),
    Infusion(InfusionInput),
}

/// Run the calculator matching `input`.
///
/// Only GRACE can fail as a whole; the other calculators report missing pieces as
/// absent fields inside their result.
pub fn derive(input: &CalculatorInput) -> Result<ScoreResult, CalcIssue> {
    match input {
        CalculatorInput::Grace(i) => crate::scores::grace::score(i).map(ScoreResult::Grace),
        CalculatorInput::Sofa(i) => Ok(ScoreResult::Sofa(crate::scores::sofa::score(i))),
        CalculatorInput::Hemo(i) => Ok(ScoreResult::Hemo(crate::hemo::derive(i))),
        CalculatorInput::Infusion(i) => Ok(ScoreResult::Dose(crate::infusion::convert(i))),
    }
}
