//! Membership editing
//!
//! The roster owns the member list between scoring calls and keeps the role
//! invariants: one main applicant that cannot be removed, at most one spouse.

use super::{aggregate, AggregateError, HouseholdEstimate, HouseholdParams};
use crate::member::{Member, Role};
use crate::rules::ScoringRules;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("member {0} not found")]
    NotFound(u32),

    #[error("the main applicant cannot be removed")]
    MainNotRemovable,

    #[error("household already has a {}", .0.label().to_lowercase())]
    RoleTaken(Role),

    #[error("duplicate member id {0}")]
    DuplicateId(u32),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    members: Vec<Member>,
}

impl Roster {
    /// Starting household: main applicant, spouse, and one other member
    pub fn default_household() -> Self {
        Self {
            members: vec![
                Member::new(1, "Main applicant", Role::Main),
                Member::new(2, "Spouse", Role::Spouse),
                Member::new(3, "Member 1", Role::Other),
            ],
        }
    }

    /// Build from an existing list, rejecting duplicate ids or a second main/spouse
    pub fn from_members(members: Vec<Member>) -> Result<Self, RosterError> {
        let mut roster = Self::default();
        for member in members {
            if roster.get(member.id).is_some() {
                return Err(RosterError::DuplicateId(member.id));
            }
            roster.check_role_free(member.role, None)?;
            roster.members.push(member);
        }
        Ok(roster)
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn get(&self, id: u32) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn next_id(&self) -> u32 {
        self.members.iter().map(|m| m.id).max().map_or(1, |id| id + 1)
    }

    /// Main and spouse are unique; `ignore` skips the member being edited
    fn check_role_free(&self, role: Role, ignore: Option<u32>) -> Result<(), RosterError> {
        if role == Role::Other {
            return Ok(());
        }
        let taken = self
            .members
            .iter()
            .any(|m| m.role == role && Some(m.id) != ignore);
        if taken {
            Err(RosterError::RoleTaken(role))
        } else {
            Ok(())
        }
    }

    /// Append an other-role member named after its id; returns the new id
    pub fn add_other_member(&mut self) -> u32 {
        let id = self.next_id();
        self.members
            .push(Member::new(id, format!("Member {id}"), Role::Other));
        id
    }

    /// Add a member with the given role; returns the new id
    pub fn add_member(&mut self, name: impl Into<String>, role: Role) -> Result<u32, RosterError> {
        self.check_role_free(role, None)?;
        let id = self.next_id();
        self.members.push(Member::new(id, name, role));
        Ok(id)
    }

    pub fn add_spouse(&mut self, name: impl Into<String>) -> Result<u32, RosterError> {
        self.add_member(name, Role::Spouse)
    }

    /// Remove a member by id; the main applicant stays
    pub fn remove_member(&mut self, id: u32) -> Result<Member, RosterError> {
        let index = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or(RosterError::NotFound(id))?;
        if self.members[index].role == Role::Main {
            return Err(RosterError::MainNotRemovable);
        }
        Ok(self.members.remove(index))
    }

    /// Apply an edit to one member. The edit is discarded if it would
    /// change the id or break the role invariants.
    pub fn update_member<F>(&mut self, id: u32, edit: F) -> Result<(), RosterError>
    where
        F: FnOnce(&mut Member),
    {
        let index = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or(RosterError::NotFound(id))?;

        let mut edited = self.members[index].clone();
        edit(&mut edited);
        edited.id = id;

        let current = &self.members[index];
        if current.role == Role::Main && edited.role != Role::Main {
            return Err(RosterError::MainNotRemovable);
        }
        if edited.role != current.role {
            self.check_role_free(edited.role, Some(id))?;
        }

        self.members[index] = edited;
        Ok(())
    }

    /// Score the current roster
    pub fn estimate(
        &self,
        params: &HouseholdParams,
        rules: &ScoringRules,
    ) -> Result<HouseholdEstimate, AggregateError> {
        aggregate(&self.members, params, rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::{Relation, StartHalf};

    #[test]
    fn test_default_household() {
        let roster = Roster::default_household();
        let roles: Vec<Role> = roster.members().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Main, Role::Spouse, Role::Other]);
    }

    #[test]
    fn test_add_other_uses_next_id() {
        let mut roster = Roster::default_household();
        roster.remove_member(2).expect("spouse removable");

        let id = roster.add_other_member();
        assert_eq!(id, 4);
        assert_eq!(roster.get(4).map(|m| m.name.as_str()), Some("Member 4"));
    }

    #[test]
    fn test_second_spouse_rejected() {
        let mut roster = Roster::default_household();
        let err = roster.add_spouse("Another").unwrap_err();
        assert_eq!(err, RosterError::RoleTaken(Role::Spouse));
        assert_eq!(err.to_string(), "household already has a spouse");
    }

    #[test]
    fn test_main_not_removable() {
        let mut roster = Roster::default_household();
        assert_eq!(roster.remove_member(1), Err(RosterError::MainNotRemovable));
        assert_eq!(roster.remove_member(99), Err(RosterError::NotFound(99)));
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn test_update_member_fields() {
        let mut roster = Roster::default_household();
        roster
            .update_member(3, |m| {
                m.name = "Grandpa".to_string();
                m.relation = Relation::Parent;
                m.ordinary_start_year = Some(2016);
                m.ordinary_start_half = StartHalf::H2;
            })
            .expect("edit applies");

        let member = roster.get(3).expect("member exists");
        assert_eq!(member.name, "Grandpa");
        assert_eq!(member.relation, Relation::Parent);
        assert_eq!(member.ordinary_start_year, Some(2016));
    }

    #[test]
    fn test_update_rejects_role_conflict() {
        let mut roster = Roster::default_household();

        let err = roster.update_member(3, |m| m.role = Role::Spouse).unwrap_err();
        assert_eq!(err, RosterError::RoleTaken(Role::Spouse));
        assert_eq!(roster.get(3).map(|m| m.role), Some(Role::Other));

        let err = roster.update_member(1, |m| m.role = Role::Other).unwrap_err();
        assert_eq!(err, RosterError::MainNotRemovable);
    }

    #[test]
    fn test_update_cannot_change_id() {
        let mut roster = Roster::default_household();
        roster.update_member(3, |m| m.id = 1).expect("edit applies");
        assert!(roster.get(3).is_some());
    }

    #[test]
    fn test_from_members_rejects_duplicates() {
        let members = vec![
            Member::new(1, "A", Role::Main),
            Member::new(2, "B", Role::Main),
        ];
        assert_eq!(
            Roster::from_members(members),
            Err(RosterError::RoleTaken(Role::Main))
        );

        let members = vec![
            Member::new(1, "A", Role::Main),
            Member::new(1, "B", Role::Other),
        ];
        assert_eq!(Roster::from_members(members), Err(RosterError::DuplicateId(1)));
    }

    #[test]
    fn test_estimate_default_household() {
        let roster = Roster::default_household();
        let params = HouseholdParams::new(2024, 2, true);

        let estimate = roster
            .estimate(&params, &ScoringRules::default())
            .expect("estimates");
        // [(2 + 1) × 2 + 1] × 2
        assert_eq!(estimate.total, 14);
    }
}
