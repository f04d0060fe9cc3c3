//! Tagged estimate record handed back to the surrounding application

use super::{AggregateError, HouseholdEstimate};
use crate::member::MemberScore;
use serde::{Deserialize, Serialize};

/// `ok = false` carries only a message; total and detail stay empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateReport {
    pub ok: bool,
    pub message: String,
    pub total: u32,
    pub formula_text: String,
    pub detail: Vec<MemberScore>,
}

impl EstimateReport {
    pub fn failure(err: AggregateError) -> Self {
        Self {
            ok: false,
            message: err.to_string(),
            total: 0,
            formula_text: String::new(),
            detail: Vec::new(),
        }
    }

    pub fn success(estimate: HouseholdEstimate) -> Self {
        Self {
            ok: true,
            message: String::new(),
            total: estimate.total,
            formula_text: estimate.formula_text,
            detail: estimate.detail,
        }
    }
}

impl From<Result<HouseholdEstimate, AggregateError>> for EstimateReport {
    fn from(result: Result<HouseholdEstimate, AggregateError>) -> Self {
        match result {
            Ok(estimate) => Self::success(estimate),
            Err(err) => Self::failure(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::{aggregate, HouseholdParams};
    use crate::member::{Member, Role};
    use crate::rules::ScoringRules;

    #[test]
    fn test_failure_report_is_empty() {
        let params = HouseholdParams::new(2024, 2, true);
        let members = vec![Member::new(1, "Main", Role::Main)];

        let report = EstimateReport::from(aggregate(&members, &params, &ScoringRules::default()));

        assert!(!report.ok);
        assert_eq!(report.message, "spouse flag set but no spouse member");
        assert_eq!(report.total, 0);
        assert!(report.formula_text.is_empty());
        assert!(report.detail.is_empty());
    }

    #[test]
    fn test_success_report_json_shape() {
        let params = HouseholdParams::new(2024, 1, false);
        let members = vec![Member::new(7, "Main", Role::Main)];

        let report = EstimateReport::from(aggregate(&members, &params, &ScoringRules::default()));
        let json = serde_json::to_value(&report).expect("serializes");

        assert_eq!(json["ok"], true);
        assert_eq!(json["total"], 2);
        assert_eq!(json["formulaText"], "total = (2 + 0) × 1");
        assert_eq!(json["detail"][0]["memberId"], 7);
        assert_eq!(json["detail"][0]["role"], "main");
        assert_eq!(json["detail"][0]["relation"], "self");
        assert_eq!(json["detail"][0]["ordinaryStep"]["rule"], "round-based");
    }
}
