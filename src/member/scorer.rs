//! Per-member point scoring
//!
//! A member's point is `base + ordinary step + queue years + family years`.
//! Every component is clamped at zero; nothing here can fail.

use super::rounds::{count_rounds, legacy_step, modern_step};
use super::{Member, Relation, Role};
use crate::rules::{OrdinaryRule, ScoringRules};
use serde::{Deserialize, Serialize};

/// Ordinary-lottery step with its sub-components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdinaryBreakdown {
    pub rule: OrdinaryRule,
    /// Counted participation years (simple rule only)
    pub years: u32,
    pub legacy_rounds: u32,
    pub legacy_step: u32,
    pub modern_rounds: u32,
    pub modern_step: u32,
    pub c5_bonus: u32,
    /// Total ordinary step, bonus included
    pub step: u32,
}

impl OrdinaryBreakdown {
    fn simple(member: &Member, stat_year: i32, rules: &ScoringRules) -> Self {
        let years = rules
            .year_counting
            .elapsed(member.ordinary_start_year, stat_year);
        let c5_bonus = c5_bonus(member, years > 0);
        Self {
            rule: OrdinaryRule::Simple,
            years,
            legacy_rounds: 0,
            legacy_step: 0,
            modern_rounds: 0,
            modern_step: 0,
            c5_bonus,
            step: years.saturating_add(c5_bonus),
        }
    }

    fn round_based(member: &Member, stat_year: i32, rules: &ScoringRules) -> Self {
        let tally = count_rounds(
            member.ordinary_start_year,
            member.ordinary_start_half,
            stat_year,
            rules,
        );
        let legacy = legacy_step(tally.legacy, rules);
        let modern = modern_step(tally.modern, rules);
        let c5_bonus = c5_bonus(member, tally.total() > 0);
        Self {
            rule: OrdinaryRule::RoundBased,
            years: 0,
            legacy_rounds: tally.legacy,
            legacy_step: legacy,
            modern_rounds: tally.modern,
            modern_step: modern,
            c5_bonus,
            step: legacy.saturating_add(modern).saturating_add(c5_bonus),
        }
    }
}

/// One extra step for a main applicant holding C5 who has actually participated
fn c5_bonus(member: &Member, participated: bool) -> u32 {
    if member.role == Role::Main && member.has_c5 && participated {
        1
    } else {
        0
    }
}

/// Full point breakdown for one member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberScore {
    pub member_id: u32,
    pub name: String,
    pub role: Role,
    pub relation: Relation,
    pub base: u32,
    #[serde(rename = "ordinaryStep")]
    pub ordinary: OrdinaryBreakdown,
    pub queue_years: u32,
    pub family_years: u32,
    pub point: u32,
}

impl MemberScore {
    /// One-line breakdown for display
    pub fn summary_line(&self) -> String {
        format!(
            "base {} + ordinary step {} + queue {} + family {} = {}",
            self.base, self.ordinary.step, self.queue_years, self.family_years, self.point
        )
    }
}

/// Score one member as of `stat_year`.
///
/// `family_years` is the household-level tenure, computed once per household
/// and added unchanged to every member.
pub fn score_member(
    member: &Member,
    stat_year: i32,
    family_years: u32,
    rules: &ScoringRules,
) -> MemberScore {
    let base = member.role.base_point();

    let ordinary = match rules.ordinary_rule {
        OrdinaryRule::Simple => OrdinaryBreakdown::simple(member, stat_year, rules),
        OrdinaryRule::RoundBased => OrdinaryBreakdown::round_based(member, stat_year, rules),
    };

    let queue_years = rules
        .year_counting
        .elapsed(member.new_energy_start_year, stat_year);

    let point = base
        .saturating_add(ordinary.step)
        .saturating_add(queue_years)
        .saturating_add(family_years);

    log::debug!(
        "member {} ({:?}): base={} ordinary={} queue={} family={} point={}",
        member.id,
        member.role,
        base,
        ordinary.step,
        queue_years,
        family_years,
        point
    );

    MemberScore {
        member_id: member.id,
        name: member.name.clone(),
        role: member.role,
        relation: member.relation,
        base,
        ordinary,
        queue_years,
        family_years,
        point,
    }
}
