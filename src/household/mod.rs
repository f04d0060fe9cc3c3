//! Household parameters, membership editing, and point aggregation

mod aggregator;
mod params;
mod report;
pub mod roster;

pub use aggregator::{
    aggregate, family_tenure_years, format_formula, visible_members, AggregateError,
    HouseholdEstimate,
};
pub use params::{current_year, Generations, HouseholdParams};
pub use report::EstimateReport;
pub use roster::{Roster, RosterError};
