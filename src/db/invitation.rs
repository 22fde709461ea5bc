use crate::composition::{MemberProfile, ValidationMode};
use crate::db::postgres_service::PostgresService;
use crate::db::profile_of;
use crate::types::error::AppError;
use crate::utils::token::new_invitation_id;
use chrono::Utc;
use entity::invitation::{
    ActiveModel as InviteActive, Entity as Invitation, InvitationStatus, Model as InviteModel,
};
use entity::user::Entity as User;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

impl PostgresService {
    /// A user already shows up in a pending offer for this team, in either
    /// direction: invited (to_user) or petitioning (from_user).
    pub async fn has_pending_for_subject(
        &self,
        team_id: Uuid,
        subject: Uuid,
    ) -> Result<bool, AppError> {
        Ok(Invitation::find()
            .filter(entity::invitation::Column::TeamId.eq(team_id))
            .filter(entity::invitation::Column::Status.eq(InvitationStatus::Pending))
            .filter(
                Condition::any()
                    .add(entity::invitation::Column::ToUser.eq(subject))
                    .add(entity::invitation::Column::FromUser.eq(subject)),
            )
            .count(&self.database_connection)
            .await?
            > 0)
    }

    /// One pending offer per (team, prospective member). `subject` is the
    /// user who would join: the recipient for a leader invite, the sender
    /// for a join request.
    pub async fn create_invitation(
        &self,
        team_id: Uuid,
        from_user: Uuid,
        to_user: Uuid,
        subject: Uuid,
        message: String,
    ) -> Result<InviteModel, AppError> {
        if self.has_pending_for_subject(team_id, subject).await? {
            return Err(AppError::Conflict(
                "A pending invitation for this team already exists".to_string(),
            ));
        }
        let id = new_invitation_id();
        let now = Utc::now();
        Invitation::insert(InviteActive {
            id: Set(id.clone()),
            team_id: Set(team_id),
            from_user: Set(from_user),
            to_user: Set(to_user),
            message: Set(message),
            status: Set(InvitationStatus::Pending),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec(&self.database_connection)
        .await?;
        self.get_invitation(&id).await
    }

    pub async fn get_invitation(&self, id: &str) -> Result<InviteModel, AppError> {
        Ok(Invitation::find_by_id(id.to_string())
            .one(&self.database_connection)
            .await?
            .ok_or(DbErr::RecordNotFound("Invitation not found".into()))?)
    }

    pub async fn list_invitations_for_user(
        &self,
        to_user: Uuid,
        page: u64,
        limit: u64,
        unread_only: bool,
    ) -> Result<(Vec<InviteModel>, u64), AppError> {
        let mut finder = Invitation::find()
            .filter(entity::invitation::Column::ToUser.eq(to_user));
        if unread_only {
            finder = finder.filter(entity::invitation::Column::Status.eq(InvitationStatus::Pending));
        }
        let finder = finder.order_by_desc(entity::invitation::Column::CreatedAt);
        let total = finder.clone().count(&self.database_connection).await?;
        let items = finder
            .paginate(&self.database_connection, limit)
            .fetch_page(page.saturating_sub(1))
            .await?;
        Ok((items, total))
    }

    pub async fn count_pending_for_user(&self, to_user: Uuid) -> Result<u64, AppError> {
        Ok(Invitation::find()
            .filter(entity::invitation::Column::ToUser.eq(to_user))
            .filter(entity::invitation::Column::Status.eq(InvitationStatus::Pending))
            .count(&self.database_connection)
            .await?)
    }

    /// The pending -> accepted transition, with every gate in front of it.
    /// Runs under the team's exclusive lock so the member list it
    /// validates is the member list it commits against.
    ///
    /// The member who joins is the invitation's *subject*: the recipient
    /// for a leader-sent invite, the sender for a join request (whose
    /// recipient is the leader approving it).
    ///
    /// On success the subject joins the team and every *other* pending
    /// invitation addressed to them is cancelled: one accepted seat
    /// forecloses the rest of their offers.
    pub async fn accept_invitation(&self, invitation_id: &str) -> Result<InviteModel, AppError> {
        let txn = self.database_connection.begin().await?;

        let invite = Invitation::find_by_id(invitation_id.to_string())
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(DbErr::RecordNotFound("Invitation not found".into()))?;
        if invite.status != InvitationStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Cannot update an invitation with status \"{}\"",
                invite.status
            )));
        }

        let team = self.get_team_locked(&txn, invite.team_id).await?;
        let subject_id = if invite.to_user == team.leader {
            invite.from_user
        } else {
            invite.to_user
        };
        let subject = User::find_by_id(subject_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?;
        if subject.team_id.is_some() {
            return Err(AppError::Conflict(
                "User is already in a team".to_string(),
            ));
        }

        let current = self.list_users_in_team_on(&txn, team.id).await?;
        if current.len() >= team.max_members as usize {
            return Err(AppError::Conflict("Team is full".to_string()));
        }

        let mut profiles: Vec<MemberProfile> = current.iter().map(profile_of).collect();
        profiles.push(profile_of(&subject));
        let verdict = self.rules.validate(&profiles, ValidationMode::Forming);
        if !verdict.is_valid {
            return Err(AppError::rejected(
                "Cannot accept invitation due to team composition rules",
                verdict.violations,
            ));
        }

        let mut am: InviteActive = invite.into();
        am.status = Set(InvitationStatus::Accepted);
        am.updated_at = Set(Utc::now());
        am.update(&txn).await?;

        self.set_user_team_on(&txn, subject.id, Some(team.id)).await?;

        // The subject is off the market: every other pending offer they
        // appear in, sent or received, is cancelled
        Invitation::update_many()
            .col_expr(
                entity::invitation::Column::Status,
                sea_orm::sea_query::Expr::value(InvitationStatus::Cancelled),
            )
            .col_expr(
                entity::invitation::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(
                Condition::any()
                    .add(entity::invitation::Column::ToUser.eq(subject.id))
                    .add(entity::invitation::Column::FromUser.eq(subject.id)),
            )
            .filter(entity::invitation::Column::Status.eq(InvitationStatus::Pending))
            .filter(entity::invitation::Column::Id.ne(invitation_id))
            .exec(&txn)
            .await?;

        self.recompute_eligibility_on(&txn, team.id).await?;
        txn.commit().await?;
        self.get_invitation(invitation_id).await
    }

    /// pending -> declined. No side effects beyond the status flip.
    pub async fn decline_invitation(&self, invitation_id: &str) -> Result<InviteModel, AppError> {
        let txn = self.database_connection.begin().await?;
        let invite = Invitation::find_by_id(invitation_id.to_string())
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(DbErr::RecordNotFound("Invitation not found".into()))?;
        if invite.status != InvitationStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Cannot update an invitation with status \"{}\"",
                invite.status
            )));
        }

        let mut am: InviteActive = invite.into();
        am.status = Set(InvitationStatus::Declined);
        am.updated_at = Set(Utc::now());
        am.update(&txn).await?;
        txn.commit().await?;
        self.get_invitation(invitation_id).await
    }

    /// Declines everything still pending for the user, returning how many
    /// rows changed.
    pub async fn decline_all_for_user(&self, to_user: Uuid) -> Result<u64, AppError> {
        let res = Invitation::update_many()
            .col_expr(
                entity::invitation::Column::Status,
                sea_orm::sea_query::Expr::value(InvitationStatus::Declined),
            )
            .col_expr(
                entity::invitation::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(entity::invitation::Column::ToUser.eq(to_user))
            .filter(entity::invitation::Column::Status.eq(InvitationStatus::Pending))
            .exec(&self.database_connection)
            .await?;
        Ok(res.rows_affected)
    }
}
