//! Member records as supplied by the surrounding application

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a member within the household application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Main,
    Spouse,
    Other,
}

impl Role {
    /// Base point: the main applicant carries 2, everyone else 1
    pub fn base_point(&self) -> u32 {
        match self {
            Role::Main => 2,
            Role::Spouse | Role::Other => 1,
        }
    }

    /// Display label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Role::Main => "Main applicant",
            Role::Spouse => "Spouse",
            Role::Other => "Other member",
        }
    }

    /// Relation implied by the role when none is given
    pub fn default_relation(&self) -> Relation {
        match self {
            Role::Main => Relation::SelfApplicant,
            Role::Spouse => Relation::Spouse,
            Role::Other => Relation::Other,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" => Ok(Role::Main),
            "spouse" => Ok(Role::Spouse),
            "other" => Ok(Role::Other),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Family relation to the main applicant. Descriptive only, never scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    #[serde(rename = "self")]
    SelfApplicant,
    Spouse,
    Parent,
    Child,
    Other,
}

impl FromStr for Relation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "self" => Ok(Relation::SelfApplicant),
            "spouse" => Ok(Relation::Spouse),
            "parent" => Ok(Relation::Parent),
            "child" => Ok(Relation::Child),
            "other" => Ok(Relation::Other),
            other => Err(format!("unknown relation '{other}'")),
        }
    }
}

/// Half of the start year in which ordinary-lottery participation began
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StartHalf {
    #[default]
    H1,
    H2,
}

impl FromStr for StartHalf {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "H1" | "1" => Ok(StartHalf::H1),
            "H2" | "2" => Ok(StartHalf::H2),
            other => Err(format!("unknown start half '{other}'")),
        }
    }
}

/// One household member and their participation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "MemberFields")]
pub struct Member {
    pub id: u32,

    pub role: Role,

    pub relation: Relation,

    pub name: String,

    /// First year in the ordinary lottery (None = not participating)
    #[serde(default)]
    pub ordinary_start_year: Option<i32>,

    #[serde(default)]
    pub ordinary_start_half: StartHalf,

    /// First year in the new-energy queue (None = not queueing)
    #[serde(default)]
    pub new_energy_start_year: Option<i32>,

    /// Special qualification flag, only scored for the main applicant
    #[serde(default)]
    pub has_c5: bool,
}

/// Wire shape of `Member`; a missing relation follows from the role
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemberFields {
    id: u32,
    role: Role,
    #[serde(default)]
    relation: Option<Relation>,
    name: String,
    #[serde(default)]
    ordinary_start_year: Option<i32>,
    #[serde(default)]
    ordinary_start_half: StartHalf,
    #[serde(default)]
    new_energy_start_year: Option<i32>,
    #[serde(default)]
    has_c5: bool,
}

impl From<MemberFields> for Member {
    fn from(fields: MemberFields) -> Self {
        Self {
            id: fields.id,
            role: fields.role,
            relation: fields
                .relation
                .unwrap_or_else(|| fields.role.default_relation()),
            name: fields.name,
            ordinary_start_year: fields.ordinary_start_year,
            ordinary_start_half: fields.ordinary_start_half,
            new_energy_start_year: fields.new_energy_start_year,
            has_c5: fields.has_c5,
        }
    }
}

impl Member {
    /// Create a member with no participation history
    pub fn new(id: u32, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            role,
            relation: role.default_relation(),
            name: name.into(),
            ordinary_start_year: None,
            ordinary_start_half: StartHalf::H1,
            new_energy_start_year: None,
            has_c5: false,
        }
    }

    pub fn with_relation(mut self, relation: Relation) -> Self {
        self.relation = relation;
        self
    }

    pub fn with_ordinary_start(mut self, year: i32, half: StartHalf) -> Self {
        self.ordinary_start_year = Some(year);
        self.ordinary_start_half = half;
        self
    }

    pub fn with_new_energy_start(mut self, year: i32) -> Self {
        self.new_energy_start_year = Some(year);
        self
    }

    pub fn with_c5(mut self, has_c5: bool) -> Self {
        self.has_c5 = has_c5;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_points() {
        assert_eq!(Role::Main.base_point(), 2);
        assert_eq!(Role::Spouse.base_point(), 1);
        assert_eq!(Role::Other.base_point(), 1);
    }

    #[test]
    fn test_member_json_field_names() {
        let json = r#"{
            "id": 3,
            "role": "other",
            "relation": "parent",
            "name": "Grandma",
            "ordinaryStartYear": 2015,
            "ordinaryStartHalf": "H2"
        }"#;
        let member: Member = serde_json::from_str(json).expect("member parses");

        assert_eq!(member.role, Role::Other);
        assert_eq!(member.relation, Relation::Parent);
        assert_eq!(member.ordinary_start_year, Some(2015));
        assert_eq!(member.ordinary_start_half, StartHalf::H2);
        assert_eq!(member.new_energy_start_year, None);
        assert!(!member.has_c5);
    }

    #[test]
    fn test_member_json_relation_from_role() {
        let json = r#"[
            { "id": 1, "role": "main", "name": "Main" },
            { "id": 2, "role": "spouse", "name": "Spouse" },
            { "id": 3, "role": "other", "name": "Kid" }
        ]"#;
        let members: Vec<Member> = serde_json::from_str(json).expect("members parse");

        let relations: Vec<Relation> = members.iter().map(|m| m.relation).collect();
        assert_eq!(
            relations,
            vec![Relation::SelfApplicant, Relation::Spouse, Relation::Other]
        );
        assert_eq!(members[0], Member::new(1, "Main", Role::Main));
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("Main".parse::<Role>(), Ok(Role::Main));
        assert_eq!("self".parse::<Relation>(), Ok(Relation::SelfApplicant));
        assert_eq!("".parse::<StartHalf>(), Ok(StartHalf::H1));
        assert_eq!("h2".parse::<StartHalf>(), Ok(StartHalf::H2));
        assert!("cousin".parse::<Role>().is_err());
    }
}
