//! Household aggregation
//!
//! Combines member points into the family total. Two formulas, selected by
//! whether the spouse is among the applicants:
//! - With spouse:    `[(main + spouse) × 2 + others] × generations`
//! - Without spouse: `(main + others) × generations`

use super::HouseholdParams;
use crate::member::{score_member, Member, MemberScore, Role};
use crate::rules::ScoringRules;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures that block aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("at least one main applicant required")]
    MissingMainApplicant,

    #[error("spouse flag set but no spouse member")]
    MissingSpouse,
}

/// Successful household aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdEstimate {
    pub total: u32,
    pub main_point: u32,
    pub spouse_point: u32,
    pub others_point: u32,
    pub family_years: u32,
    pub generations: u8,
    pub include_spouse: bool,
    pub formula_text: String,
    /// Breakdown for every member taking part, in input order
    pub detail: Vec<MemberScore>,
}

/// Members taking part in the application; the spouse drops out when excluded
pub fn visible_members(members: &[Member], include_spouse: bool) -> impl Iterator<Item = &Member> {
    members
        .iter()
        .filter(move |member| include_spouse || member.role != Role::Spouse)
}

/// Family-level tenure, computed once and added to every member
pub fn family_tenure_years(params: &HouseholdParams, rules: &ScoringRules) -> u32 {
    rules
        .year_counting
        .elapsed(params.family_apply_start_year, params.stat_year)
}

/// Render the formula with the literal values used
pub fn format_formula(
    main_point: u32,
    spouse_point: u32,
    others_point: u32,
    generations: u8,
    include_spouse: bool,
) -> String {
    if include_spouse {
        format!(
            "total = [({} + {}) × 2 + {}] × {}",
            main_point, spouse_point, others_point, generations
        )
    } else {
        format!("total = ({} + {}) × {}", main_point, others_point, generations)
    }
}

/// Aggregate member points into the household total.
///
/// Checks run in order: a main applicant must exist, then a spouse must exist
/// when the spouse is included. Only the first main applicant and the first
/// spouse are scored; later duplicates are left out of the total and detail.
pub fn aggregate(
    members: &[Member],
    params: &HouseholdParams,
    rules: &ScoringRules,
) -> Result<HouseholdEstimate, AggregateError> {
    let include_spouse = params.include_spouse;

    if !members.iter().any(|m| m.role == Role::Main) {
        return Err(AggregateError::MissingMainApplicant);
    }
    if include_spouse && !members.iter().any(|m| m.role == Role::Spouse) {
        return Err(AggregateError::MissingSpouse);
    }

    let family_years = family_tenure_years(params, rules);
    let mut main_point = None;
    let mut spouse_point = None;
    let mut others_point: u32 = 0;
    let mut detail: Vec<MemberScore> = Vec::with_capacity(members.len());

    for member in visible_members(members, include_spouse) {
        let slot = match member.role {
            Role::Main => Some(&mut main_point),
            Role::Spouse => Some(&mut spouse_point),
            Role::Other => None,
        };
        if let Some(Some(_)) = slot.as_deref() {
            log::warn!("duplicate {:?} member {} ignored", member.role, member.id);
            continue;
        }

        let score = score_member(member, params.stat_year, family_years, rules);
        match slot {
            Some(slot) => *slot = Some(score.point),
            None => others_point = others_point.saturating_add(score.point),
        }
        detail.push(score);
    }

    let main_point = main_point.unwrap_or(0);
    let spouse_point = spouse_point.unwrap_or(0);

    let generations = params.generations.get();
    let applicants = if include_spouse {
        main_point
            .saturating_add(spouse_point)
            .saturating_mul(2)
            .saturating_add(others_point)
    } else {
        main_point.saturating_add(others_point)
    };
    let total = applicants.saturating_mul(u32::from(generations));

    let formula_text = format_formula(
        main_point,
        spouse_point,
        others_point,
        generations,
        include_spouse,
    );
    log::debug!("household total {} ({})", total, formula_text);

    Ok(HouseholdEstimate {
        total,
        main_point,
        spouse_point,
        others_point,
        family_years,
        generations,
        include_spouse,
        formula_text,
        detail,
    })
}
