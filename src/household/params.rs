//! Household-level parameters

use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Calendar year used when no stat year is supplied
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Number of family generations among the applicants, always within 1..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Generations(u8);

impl Generations {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 3;

    /// Out-of-range counts are clamped rather than rejected
    pub fn new(count: u8) -> Self {
        Self(count.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for Generations {
    fn default() -> Self {
        Self(2)
    }
}

impl From<u8> for Generations {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Generations> for u8 {
    fn from(value: Generations) -> Self {
        value.0
    }
}

/// Parameters shared by the whole household
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdParams {
    /// Year of reckoning (default: current calendar year)
    #[serde(default = "current_year")]
    pub stat_year: i32,

    /// First year of the family-level application (None = new application)
    #[serde(default)]
    pub family_apply_start_year: Option<i32>,

    #[serde(default)]
    pub generations: Generations,

    /// Whether the main applicant's spouse is among the applicants
    #[serde(default = "default_true")]
    pub include_spouse: bool,
}

fn default_true() -> bool { true }

impl Default for HouseholdParams {
    fn default() -> Self {
        Self {
            stat_year: current_year(),
            family_apply_start_year: None,
            generations: Generations::default(),
            include_spouse: true,
        }
    }
}

impl HouseholdParams {
    pub fn new(stat_year: i32, generations: u8, include_spouse: bool) -> Self {
        Self {
            stat_year,
            family_apply_start_year: None,
            generations: Generations::new(generations),
            include_spouse,
        }
    }

    pub fn with_family_start(mut self, year: i32) -> Self {
        self.family_apply_start_year = Some(year);
        self
    }
}
