//! Combined estimate request, as sent by a front end in one document

use crate::forecast::{next_years, predict, HistoryPoint, Prediction, DEFAULT_HORIZON};
use crate::household::{aggregate, EstimateReport, HouseholdParams};
use crate::member::Member;
use crate::rules::ScoringRules;
use serde::{Deserialize, Serialize};

/// Everything needed for one household estimate plus an optional forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdRequest {
    #[serde(default)]
    pub params: HouseholdParams,

    pub members: Vec<Member>,

    /// Historical minimum qualifying scores, oldest first
    #[serde(default)]
    pub history: Vec<HistoryPoint>,

    #[serde(default)]
    pub rules: ScoringRules,

    /// Number of years to project past the latest history year, at most `DEFAULT_HORIZON`
    #[serde(default = "default_horizon")]
    pub forecast_years: usize,
}

fn default_horizon() -> usize { DEFAULT_HORIZON }

/// Estimate report with the score forecast alongside
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdResponse {
    #[serde(flatten)]
    pub estimate: EstimateReport,
    pub forecast: Vec<Prediction>,
}

impl HouseholdRequest {
    pub fn evaluate(&self) -> HouseholdResponse {
        let estimate = EstimateReport::from(aggregate(&self.members, &self.params, &self.rules));
        let years = next_years(&self.history, self.forecast_years);
        let forecast = predict(&self.history, &years);
        HouseholdResponse { estimate, forecast }
    }
}
