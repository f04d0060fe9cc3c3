//! Ordinary-lottery round estimation and round-to-step conversion
//!
//! Participation is converted into an estimated count of lottery rounds,
//! split at the legacy regime boundary:
//! - Start year: full year of rounds, or the second-half count for H2 starts
//! - Each later year through the stat year: a full year of rounds
//! - Years before the start year or after the stat year: nothing

use super::StartHalf;
use crate::rules::{LegacyRegime, ScoringRules};
use serde::{Deserialize, Serialize};

/// Estimated rounds on either side of the regime boundary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTally {
    /// Rounds in years up to and including the legacy last year
    pub legacy: u32,
    /// Rounds in later years
    pub modern: u32,
}

impl RoundTally {
    pub fn total(&self) -> u32 {
        self.legacy.saturating_add(self.modern)
    }
}

/// Rounds over `years` consecutive years. The first year is short when it
/// is the start year and participation began in the second half.
fn rounds_over(years: i64, opens_with_start: bool, half: StartHalf, rules: &ScoringRules) -> u32 {
    if years <= 0 {
        return 0;
    }
    let first = if opens_with_start && half == StartHalf::H2 {
        rules.second_half_rounds
    } else {
        rules.rounds_per_year
    };
    let rest = (years - 1).saturating_mul(i64::from(rules.rounds_per_year));
    u32::try_from(rest.saturating_add(i64::from(first))).unwrap_or(u32::MAX)
}

/// Estimate rounds from the start year through `stat_year`
pub fn count_rounds(
    start_year: Option<i32>,
    start_half: StartHalf,
    stat_year: i32,
    rules: &ScoringRules,
) -> RoundTally {
    let Some(requested) = start_year else {
        return RoundTally::default();
    };

    // Participation predating the lottery counts from its first full year
    let (start, half) = if requested < rules.program_start_year {
        log::warn!(
            "ordinary start year {} precedes program start {}, normalizing",
            requested,
            rules.program_start_year
        );
        (rules.program_start_year, StartHalf::H1)
    } else {
        (requested, start_half)
    };

    let start = i64::from(start);
    let stat = i64::from(stat_year);
    let legacy_last = i64::from(rules.legacy_last_year);
    if start > stat {
        return RoundTally::default();
    }

    let legacy_years = stat.min(legacy_last) - start + 1;
    let modern_start = start.max(legacy_last + 1);
    let modern_years = stat - modern_start + 1;

    RoundTally {
        legacy: rounds_over(legacy_years, true, half, rules),
        modern: rounds_over(modern_years, modern_start == start, half, rules),
    }
}

/// Step points for rounds accrued under the legacy regime
pub fn legacy_step(rounds: u32, rules: &ScoringRules) -> u32 {
    match rules.legacy_regime {
        LegacyRegime::HalfRoundsCapped => rounds
            .div_ceil(rules.legacy_capped_rounds_per_step.max(1))
            .min(rules.legacy_step_cap),
        LegacyRegime::PerTwentyFourRounds => {
            rounds.div_ceil(rules.legacy_uncapped_rounds_per_step.max(1))
        }
    }
}

/// Step points for rounds accrued after the legacy regime, uncapped
pub fn modern_step(rounds: u32, rules: &ScoringRules) -> u32 {
    rounds.div_ceil(rules.modern_rounds_per_step.max(1))
}
