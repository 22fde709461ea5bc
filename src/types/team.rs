use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::composition::EligibilityDetails;

#[derive(Serialize, Deserialize, Debug)]
pub struct RTeamCreate {
    pub name: String,
    pub description: Option<String>,
    /// Proposed members, leader excluded (it is implied by the caller).
    pub members: Vec<Uuid>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RTeamAddMember {
    pub member_id: Uuid,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MemberSummary {
    pub id: Uuid,
    pub name: String,
    pub department: String,
    pub designation: String,
    pub gender: Option<String>,
}

impl From<entity::user::Model> for MemberSummary {
    fn from(u: entity::user::Model) -> Self {
        Self {
            id: u.id,
            name: u.name,
            department: u.department,
            designation: u.designation,
            gender: u.gender,
        }
    }
}

/// Read-side projection of a team with its roster denormalized for
/// display. Built explicitly by the caller after loading members; nothing
/// in the storage layer derives this behind the scenes.
#[derive(Serialize, Deserialize, Debug)]
pub struct TeamView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub leader: MemberSummary,
    pub members: Vec<MemberSummary>,
    pub max_members: i32,
    pub is_eligible: bool,
    pub eligibility_details: Option<EligibilityDetails>,
}

impl TeamView {
    pub fn project(
        team: entity::team::Model,
        leader: entity::user::Model,
        members: Vec<entity::user::Model>,
    ) -> Self {
        let details = team
            .eligibility_details
            .and_then(|v| serde_json::from_value(v).ok());
        // The leader is a member too, but is shown in their own slot
        let members = members
            .into_iter()
            .filter(|m| m.id != team.leader)
            .map(MemberSummary::from)
            .collect();
        Self {
            id: team.id,
            name: team.name,
            description: team.description,
            leader: leader.into(),
            members,
            max_members: team.max_members,
            is_eligible: team.is_eligible,
            eligibility_details: details,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct EligibilityRes {
    pub team_id: Uuid,
    pub is_eligible: bool,
    pub eligibility_details: EligibilityDetails,
}
