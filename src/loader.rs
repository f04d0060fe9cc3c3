//! Load members, score history, and requests from CSV/JSON files
//!
//! Member CSV columns (header row required, extra columns ignored):
//! `household,id,name,role,relation,ordinary_start_year,ordinary_start_half,new_energy_start_year,has_c5`
//! Only `id`, `name`, and `role` are mandatory; empty cells mean unset.
//!
//! History CSV columns: `year,score` with an empty score for unknown years.

use crate::forecast::HistoryPoint;
use crate::member::{Member, Relation, Role, StartHalf};
use crate::request::HouseholdRequest;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Household key used when the member CSV has no `household` column
pub const DEFAULT_HOUSEHOLD: &str = "household";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("row {row}: {message}")]
    InvalidField { row: usize, message: String },
}

#[derive(Debug, Deserialize)]
struct MemberRecord {
    #[serde(default)]
    household: Option<String>,
    id: u32,
    name: String,
    role: String,
    #[serde(default)]
    relation: Option<String>,
    #[serde(default)]
    ordinary_start_year: Option<i32>,
    #[serde(default)]
    ordinary_start_half: Option<String>,
    #[serde(default)]
    new_energy_start_year: Option<i32>,
    #[serde(default)]
    has_c5: Option<String>,
}

fn parse_flag(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "n" => Ok(false),
        "1" | "true" | "yes" | "y" => Ok(true),
        other => Err(format!("invalid has_c5 value '{other}'")),
    }
}

impl MemberRecord {
    fn into_member(self, row: usize) -> Result<(String, Member), LoadError> {
        let invalid = move |message: String| LoadError::InvalidField { row, message };

        let role: Role = self.role.parse().map_err(invalid)?;
        let relation = match self.relation.as_deref().map(str::trim) {
            None | Some("") => role.default_relation(),
            Some(value) => value.parse::<Relation>().map_err(invalid)?,
        };
        let half = match self.ordinary_start_half.as_deref() {
            None => StartHalf::H1,
            Some(value) => value.parse::<StartHalf>().map_err(invalid)?,
        };
        let has_c5 = match self.has_c5.as_deref() {
            None => false,
            Some(value) => parse_flag(value).map_err(invalid)?,
        };

        let household = self
            .household
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOUSEHOLD.to_string());

        let member = Member {
            id: self.id,
            role,
            relation,
            name: self.name,
            ordinary_start_year: self.ordinary_start_year,
            ordinary_start_half: half,
            new_energy_start_year: self.new_energy_start_year,
            has_c5,
        };
        Ok((household, member))
    }
}

/// Load members grouped by household, households in first-seen order
pub fn load_households_from_reader<R: Read>(
    reader: R,
) -> Result<Vec<(String, Vec<Member>)>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut households: Vec<(String, Vec<Member>)> = Vec::new();
    for (index, result) in rdr.deserialize::<MemberRecord>().enumerate() {
        // Header is row 1
        let (household, member) = result?.into_member(index + 2)?;
        match households.iter_mut().find(|(key, _)| *key == household) {
            Some((_, members)) => members.push(member),
            None => households.push((household, vec![member])),
        }
    }

    log::info!("loaded {} household(s) from member CSV", households.len());
    Ok(households)
}

/// Load one household's members, ignoring any `household` column
pub fn load_members_from_reader<R: Read>(reader: R) -> Result<Vec<Member>, LoadError> {
    Ok(load_households_from_reader(reader)?
        .into_iter()
        .flat_map(|(_, members)| members)
        .collect())
}

pub fn load_members<P: AsRef<Path>>(path: P) -> Result<Vec<Member>, LoadError> {
    load_members_from_reader(File::open(path)?)
}

pub fn load_households<P: AsRef<Path>>(path: P) -> Result<Vec<(String, Vec<Member>)>, LoadError> {
    load_households_from_reader(File::open(path)?)
}

#[derive(Debug, Deserialize)]
struct HistoryRecord {
    year: i32,
    #[serde(default)]
    score: Option<f64>,
}

/// Load score history, sorted by year ascending
pub fn load_history_from_reader<R: Read>(reader: R) -> Result<Vec<HistoryPoint>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut history = Vec::new();
    for result in rdr.deserialize::<HistoryRecord>() {
        let record = result?;
        history.push(HistoryPoint {
            year: record.year,
            score: record.score,
        });
    }
    history.sort_by_key(|p| p.year);
    Ok(history)
}

pub fn load_history<P: AsRef<Path>>(path: P) -> Result<Vec<HistoryPoint>, LoadError> {
    load_history_from_reader(File::open(path)?)
}

pub fn load_household_request_from_reader<R: Read>(reader: R) -> Result<HouseholdRequest, LoadError> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_household_request<P: AsRef<Path>>(path: P) -> Result<HouseholdRequest, LoadError> {
    load_household_request_from_reader(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMBERS_CSV: &str = "\
household,id,name,role,relation,ordinary_start_year,ordinary_start_half,new_energy_start_year,has_c5
A,1,Wang,main,self,2014,H2,2021,yes
A,2,Li,spouse,,2016,,,
A,3,Grandma,other,parent,,,2022,
B,1,Zhao,main,,,,,0
";

    #[test]
    fn test_load_households() {
        let households = load_households_from_reader(MEMBERS_CSV.as_bytes()).expect("loads");

        assert_eq!(households.len(), 2);
        let (key, members) = &households[0];
        assert_eq!(key, "A");
        assert_eq!(members.len(), 3);

        let main = &members[0];
        assert_eq!(main.role, Role::Main);
        assert_eq!(main.ordinary_start_year, Some(2014));
        assert_eq!(main.ordinary_start_half, StartHalf::H2);
        assert_eq!(main.new_energy_start_year, Some(2021));
        assert!(main.has_c5);

        let spouse = &members[1];
        assert_eq!(spouse.relation, Relation::Spouse);
        assert_eq!(spouse.ordinary_start_half, StartHalf::H1);
        assert_eq!(spouse.new_energy_start_year, None);

        assert_eq!(members[2].relation, Relation::Parent);
        assert_eq!(households[1].1[0].ordinary_start_year, None);
    }

    #[test]
    fn test_minimal_columns() {
        let csv = "id,name,role\n1,Main,main\n2,Kid,other\n";
        let members = load_members_from_reader(csv.as_bytes()).expect("loads");

        assert_eq!(members.len(), 2);
        assert_eq!(members[1].relation, Relation::Other);
        assert!(!members[0].has_c5);
    }

    #[test]
    fn test_invalid_role_reports_row() {
        let csv = "id,name,role\n1,Main,main\n2,Cousin,cousin\n";
        let err = load_members_from_reader(csv.as_bytes()).unwrap_err();

        match err {
            LoadError::InvalidField { row, message } => {
                assert_eq!(row, 3);
                assert!(message.contains("cousin"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_history_sorted_with_gaps() {
        let csv = "year,score\n2024,41.5\n2022,\n2023,40\n";
        let history = load_history_from_reader(csv.as_bytes()).expect("loads");

        assert_eq!(
            history,
            vec![
                HistoryPoint::unknown(2022),
                HistoryPoint::known(2023, 40.0),
                HistoryPoint::known(2024, 41.5),
            ]
        );
    }
}
