//! Scoring rule configuration
//!
//! Several published interpretations of the points policy disagree on how
//! years are counted and how lottery rounds convert into step points. Each
//! interpretation is a named variant here so callers pick one explicitly:
//! - Year counting for queue and family tenure (inclusive vs. full years)
//! - Ordinary-lottery step rule (simple per-year vs. round-based)
//! - Pre-2021 round-to-step regime (halved and capped vs. per 24 rounds)

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// First year of the ordinary lottery; earlier start years are normalized to it
pub const PROGRAM_START_YEAR: i32 = 2011;

/// Last year in which rounds are converted under the legacy regime
pub const LEGACY_LAST_YEAR: i32 = 2020;

/// How elapsed participation years are counted between a start year and the stat year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum YearCounting {
    /// Every started year counts, the first included: `stat - start + 1`
    Inclusive,
    /// Only completed years count: `stat - start`
    FullYears,
}

impl YearCounting {
    /// Years elapsed from `start` to `stat_year`, floored at zero.
    /// An unset start year contributes nothing.
    pub fn elapsed(&self, start: Option<i32>, stat_year: i32) -> u32 {
        let Some(start) = start else {
            return 0;
        };
        let span = i64::from(stat_year) - i64::from(start);
        let span = match self {
            YearCounting::Inclusive => span + 1,
            YearCounting::FullYears => span,
        };
        u32::try_from(span.max(0)).unwrap_or(u32::MAX)
    }
}

/// Strategy for the ordinary-lottery step component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OrdinaryRule {
    /// One point per counted year of participation
    Simple,
    /// Participation converted to lottery rounds, then to steps per regime
    RoundBased,
}

/// Conversion applied to rounds accrued up to and including the legacy last year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LegacyRegime {
    /// `ceil(rounds / legacy_capped_rounds_per_step)`, capped at `legacy_step_cap`
    #[value(name = "half-capped")]
    #[serde(alias = "half-capped")]
    HalfRoundsCapped,
    /// `ceil(rounds / legacy_uncapped_rounds_per_step)`, uncapped
    #[value(name = "per-24")]
    #[serde(alias = "per-24")]
    PerTwentyFourRounds,
}

/// Full rule set used by the member scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRules {
    /// Year counting for the queue and family-tenure components
    #[serde(default = "default_year_counting")]
    pub year_counting: YearCounting,

    /// Ordinary-lottery step strategy
    #[serde(default = "default_ordinary_rule")]
    pub ordinary_rule: OrdinaryRule,

    /// Round-to-step conversion for the legacy regime
    #[serde(default = "default_legacy_regime")]
    pub legacy_regime: LegacyRegime,

    /// Ordinary-lottery start years before this are treated as this year
    #[serde(default = "default_program_start_year")]
    pub program_start_year: i32,

    /// Last calendar year counted under the legacy regime
    #[serde(default = "default_legacy_last_year")]
    pub legacy_last_year: i32,

    /// Rounds per step under `HalfRoundsCapped`
    #[serde(default = "default_legacy_capped_rounds_per_step")]
    pub legacy_capped_rounds_per_step: u32,

    /// Cap on legacy steps under `HalfRoundsCapped`
    #[serde(default = "default_legacy_step_cap")]
    pub legacy_step_cap: u32,

    /// Rounds per step under `PerTwentyFourRounds`
    #[serde(default = "default_legacy_uncapped_rounds_per_step")]
    pub legacy_uncapped_rounds_per_step: u32,

    /// Rounds drawn in a full calendar year
    #[serde(default = "default_rounds_per_year")]
    pub rounds_per_year: u32,

    /// Rounds credited in the start year when participation began in the second half
    #[serde(default = "default_second_half_rounds")]
    pub second_half_rounds: u32,

    /// Rounds per step after the legacy regime
    #[serde(default = "default_modern_rounds_per_step")]
    pub modern_rounds_per_step: u32,
}

fn default_year_counting() -> YearCounting { YearCounting::Inclusive }
fn default_ordinary_rule() -> OrdinaryRule { OrdinaryRule::RoundBased }
fn default_legacy_regime() -> LegacyRegime { LegacyRegime::HalfRoundsCapped }
fn default_program_start_year() -> i32 { PROGRAM_START_YEAR }
fn default_legacy_last_year() -> i32 { LEGACY_LAST_YEAR }
fn default_legacy_capped_rounds_per_step() -> u32 { 2 }
fn default_legacy_step_cap() -> u32 { 13 }
fn default_legacy_uncapped_rounds_per_step() -> u32 { 24 }
fn default_rounds_per_year() -> u32 { 6 }
fn default_second_half_rounds() -> u32 { 3 }
fn default_modern_rounds_per_step() -> u32 { 6 }

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            year_counting: YearCounting::Inclusive,
            ordinary_rule: OrdinaryRule::RoundBased,
            legacy_regime: LegacyRegime::HalfRoundsCapped,
            program_start_year: PROGRAM_START_YEAR,
            legacy_last_year: LEGACY_LAST_YEAR,
            legacy_capped_rounds_per_step: 2,
            legacy_step_cap: 13,
            legacy_uncapped_rounds_per_step: 24,
            rounds_per_year: 6,
            second_half_rounds: 3,
            modern_rounds_per_step: 6,
        }
    }
}

impl ScoringRules {
    /// Load a rule set from JSON; absent fields fall back to defaults
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    /// Same rules with a different year-counting convention
    pub fn with_year_counting(mut self, year_counting: YearCounting) -> Self {
        self.year_counting = year_counting;
        self
    }

    /// Same rules with a different ordinary-lottery strategy
    pub fn with_ordinary_rule(mut self, ordinary_rule: OrdinaryRule) -> Self {
        self.ordinary_rule = ordinary_rule;
        self
    }

    /// Same rules with a different legacy regime
    pub fn with_legacy_regime(mut self, legacy_regime: LegacyRegime) -> Self {
        self.legacy_regime = legacy_regime;
        self
    }
}
