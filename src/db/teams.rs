use crate::composition::{EligibilityDetails, MemberProfile, ValidationMode};
use crate::db::postgres_service::PostgresService;
use crate::db::profile_of;
use crate::types::error::AppError;
use chrono::Utc;
use entity::team::{ActiveModel as TeamActive, Entity as Team, Model as TeamModel};
use entity::user::{Entity as User, Model as UserModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

impl PostgresService {
    pub async fn get_team(&self, id: Uuid) -> Result<TeamModel, AppError> {
        Ok(Team::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or(DbErr::RecordNotFound("Team not found".to_string()))?)
    }

    pub async fn get_team_for_user(&self, user: &UserModel) -> Result<TeamModel, AppError> {
        let team_id = user.team_id.ok_or(AppError::NotFound)?;
        self.get_team(team_id).await
    }

    pub async fn list_teams(&self) -> Result<Vec<TeamModel>, AppError> {
        Ok(Team::find()
            .order_by_desc(entity::team::Column::CreatedAt)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn list_users_in_team(&self, team_id: Uuid) -> Result<Vec<UserModel>, AppError> {
        self.list_users_in_team_on(&self.database_connection, team_id)
            .await
    }

    pub(crate) async fn list_users_in_team_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        team_id: Uuid,
    ) -> Result<Vec<UserModel>, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::TeamId.eq(team_id))
            .all(conn)
            .await?)
    }

    /// Reloads the team row with an exclusive lock. Every membership
    /// mutation goes through this so two concurrent changes to the same
    /// team serialize instead of validating against stale snapshots.
    pub(crate) async fn get_team_locked<C: ConnectionTrait>(
        &self,
        conn: &C,
        team_id: Uuid,
    ) -> Result<TeamModel, AppError> {
        Ok(Team::find_by_id(team_id)
            .lock_exclusive()
            .one(conn)
            .await?
            .ok_or(DbErr::RecordNotFound("Team not found".to_string()))?)
    }

    /// Atomic team creation: the full proposed roster is validated before
    /// anything is written, then team + membership + eligibility land in
    /// one transaction.
    pub async fn create_team(
        &self,
        leader_id: Uuid,
        name: String,
        description: String,
        members: Vec<Uuid>,
    ) -> Result<TeamModel, AppError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("Team name is required".to_string()));
        }

        // Duplicates and a self-listed leader are silently stripped
        let mut member_ids: Vec<Uuid> = Vec::new();
        for id in members {
            if id != leader_id && !member_ids.contains(&id) {
                member_ids.push(id);
            }
        }
        let wanted = self.rules.capacity - 1;
        if member_ids.len() != wanted {
            return Err(AppError::BadRequest(format!(
                "Exactly {} team members are required (excluding leader)",
                wanted
            )));
        }

        let txn = self.database_connection.begin().await?;

        if Team::find()
            .filter(entity::team::Column::Name.eq(&name))
            .count(&txn)
            .await?
            > 0
        {
            return Err(AppError::Conflict("Team name already exists".to_string()));
        }

        let leader = User::find_by_id(leader_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?;
        if leader.gender.is_none() {
            return Err(AppError::BadRequest(
                "Please update your profile to include gender information before creating a team."
                    .to_string(),
            ));
        }

        let member_rows = User::find()
            .filter(entity::user::Column::Id.is_in(member_ids.iter().copied()))
            .all(&txn)
            .await?;
        if member_rows.len() != member_ids.len() {
            return Err(AppError::BadRequest(
                "Some selected members were not found".to_string(),
            ));
        }

        // Nobody on the roster may already belong to a team
        let mut conflicts = Vec::new();
        for user in std::iter::once(&leader).chain(member_rows.iter()) {
            if user.team_id.is_some() {
                conflicts.push(format!("{} is already a member of a team", user.name));
            }
        }
        if !conflicts.is_empty() {
            return Err(AppError::rejected(
                "Team membership conflicts found",
                conflicts,
            ));
        }

        let profiles: Vec<MemberProfile> = std::iter::once(&leader)
            .chain(member_rows.iter())
            .map(profile_of)
            .collect();
        let verdict = self.rules.validate(&profiles, ValidationMode::FullRoster);
        if !verdict.is_valid {
            return Err(AppError::rejected(
                "Invalid team composition",
                verdict.violations,
            ));
        }

        let tid = Uuid::new_v4();
        let now = Utc::now();
        Team::insert(TeamActive {
            id: Set(tid),
            name: Set(name),
            description: Set(description),
            leader: Set(leader_id),
            max_members: Set(self.rules.capacity as i32),
            is_eligible: Set(false),
            eligibility_details: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec(&txn)
        .await?;

        self.set_user_team_on(&txn, leader_id, Some(tid)).await?;
        for id in &member_ids {
            self.set_user_team_on(&txn, *id, Some(tid)).await?;
        }
        self.recompute_eligibility_on(&txn, tid).await?;

        txn.commit().await?;
        self.get_team(tid).await
    }

    /// Leader adds a member directly. Validated in `Forming` mode against
    /// the authoritative member list read under the team lock.
    pub async fn add_member(&self, team_id: Uuid, member_id: Uuid) -> Result<(), AppError> {
        let txn = self.database_connection.begin().await?;
        let team = self.get_team_locked(&txn, team_id).await?;

        let current = self.list_users_in_team_on(&txn, team_id).await?;
        if current.len() >= team.max_members as usize {
            return Err(AppError::Conflict("Team is full".to_string()));
        }

        let member = User::find_by_id(member_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?;
        if member.team_id.is_some() {
            return Err(AppError::Conflict(
                "User is already part of another team".to_string(),
            ));
        }
        if member.gender.is_none() {
            return Err(AppError::BadRequest(
                "Selected user must have gender information in their profile to join a team"
                    .to_string(),
            ));
        }

        let mut profiles: Vec<MemberProfile> = current.iter().map(profile_of).collect();
        profiles.push(profile_of(&member));
        let verdict = self.rules.validate(&profiles, ValidationMode::Forming);
        if !verdict.is_valid {
            return Err(AppError::rejected(
                "Adding this member would violate team composition rules",
                verdict.violations,
            ));
        }

        self.set_user_team_on(&txn, member_id, Some(team_id)).await?;
        self.recompute_eligibility_on(&txn, team_id).await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn remove_member(&self, team_id: Uuid, member_id: Uuid) -> Result<(), AppError> {
        let txn = self.database_connection.begin().await?;
        let team = self.get_team_locked(&txn, team_id).await?;

        if member_id == team.leader {
            return Err(AppError::BadRequest(
                "Team leader cannot be removed. Delete the team instead.".to_string(),
            ));
        }
        let member = User::find_by_id(member_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?;
        if member.team_id != Some(team_id) {
            return Err(AppError::BadRequest(
                "User is not a member of this team".to_string(),
            ));
        }

        self.set_user_team_on(&txn, member_id, None).await?;
        self.recompute_eligibility_on(&txn, team_id).await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn leave_team(&self, team_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let txn = self.database_connection.begin().await?;
        let team = self.get_team_locked(&txn, team_id).await?;

        if user_id == team.leader {
            return Err(AppError::BadRequest(
                "Team leader cannot leave the team. Please delete the team instead.".to_string(),
            ));
        }
        let user = User::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?;
        if user.team_id != Some(team_id) {
            return Err(AppError::BadRequest(
                "You are not a member of this team".to_string(),
            ));
        }

        self.set_user_team_on(&txn, user_id, None).await?;
        self.recompute_eligibility_on(&txn, team_id).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Leader tears the team down; every member reference is released
    /// before the row goes away. Invitation rows survive as an audit
    /// trail, with anything still pending cancelled.
    pub async fn delete_team(&self, team_id: Uuid) -> Result<(), AppError> {
        use entity::invitation::{Entity as Invitation, InvitationStatus};

        let txn = self.database_connection.begin().await?;
        let team = self.get_team_locked(&txn, team_id).await?;

        let members = self.list_users_in_team_on(&txn, team_id).await?;
        for member in &members {
            self.set_user_team_on(&txn, member.id, None).await?;
        }

        Invitation::update_many()
            .col_expr(
                entity::invitation::Column::Status,
                sea_orm::sea_query::Expr::value(InvitationStatus::Cancelled),
            )
            .col_expr(
                entity::invitation::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(entity::invitation::Column::TeamId.eq(team_id))
            .filter(entity::invitation::Column::Status.eq(InvitationStatus::Pending))
            .exec(&txn)
            .await?;

        let am: TeamActive = team.into();
        am.delete(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Post-hoc health check persisted onto the team row. Pure function of
    /// the member list, so running it twice with no membership change
    /// stores the same bytes twice.
    pub async fn recompute_eligibility(
        &self,
        team_id: Uuid,
    ) -> Result<(bool, EligibilityDetails), AppError> {
        let txn = self.database_connection.begin().await?;
        let result = self.recompute_eligibility_on(&txn, team_id).await?;
        txn.commit().await?;
        Ok(result)
    }

    pub(crate) async fn recompute_eligibility_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        team_id: Uuid,
    ) -> Result<(bool, EligibilityDetails), AppError> {
        let team = Team::find_by_id(team_id)
            .one(conn)
            .await?
            .ok_or(DbErr::RecordNotFound("Team not found".to_string()))?;
        let members = self.list_users_in_team_on(conn, team_id).await?;

        let (is_eligible, details) = self
            .eligibility
            .evaluate(members.iter().map(|m| m.department.as_str()));

        let mut am: TeamActive = team.into();
        am.is_eligible = Set(is_eligible);
        am.eligibility_details = Set(Some(
            serde_json::to_value(&details)
                .map_err(|e| AppError::Internal(format!("serialize eligibility: {e}")))?,
        ));
        am.updated_at = Set(Utc::now());
        am.update(conn).await?;

        Ok((is_eligible, details))
    }
}
