//! Household priority-score estimator for the vehicle-license lottery and
//! new-energy queue.
//!
//! Scores each member's participation history, combines members into a
//! household total, and projects minimum qualifying scores from history.
//! All results are estimates; the allocation authority's own figures govern.

pub mod forecast;
pub mod household;
pub mod loader;
pub mod member;
pub mod request;
pub mod rules;

pub use forecast::{fit_trend, predict, HistoryPoint, Prediction, TrendLine};
pub use household::{
    aggregate, AggregateError, EstimateReport, Generations, HouseholdEstimate, HouseholdParams,
    Roster, RosterError,
};
pub use loader::LoadError;
pub use member::{score_member, Member, MemberScore, Relation, Role, StartHalf};
pub use request::{HouseholdRequest, HouseholdResponse};
pub use rules::{LegacyRegime, OrdinaryRule, ScoringRules, YearCounting};
