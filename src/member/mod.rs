//! Household members and the per-member point scorer

mod data;
pub mod rounds;
mod scorer;

pub use data::{Member, Relation, Role, StartHalf};
pub use rounds::{count_rounds, legacy_step, modern_step, RoundTally};
pub use scorer::{score_member, MemberScore, OrdinaryBreakdown};
