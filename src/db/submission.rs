use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::submission::Track;
use chrono::Utc;
use entity::submission::{ActiveModel as SubmissionActive, Entity as Submission, Model as SubmissionModel};
use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

impl PostgresService {
    /// One submission per (team, track); the unique index backs this up,
    /// but the explicit check gives callers a domain error.
    pub async fn create_submission(
        &self,
        team_id: Uuid,
        track: Track,
        description: String,
        submitted_by: Uuid,
    ) -> Result<SubmissionModel, AppError> {
        let existing = Submission::find()
            .filter(entity::submission::Column::TeamId.eq(team_id))
            .filter(entity::submission::Column::Track.eq(track.as_str()))
            .count(&self.database_connection)
            .await?;
        if existing > 0 {
            return Err(AppError::Conflict(
                "Your team has already submitted for this track".to_string(),
            ));
        }

        let id = Uuid::new_v4();
        let now = Utc::now();
        Submission::insert(SubmissionActive {
            id: Set(id),
            team_id: Set(team_id),
            track: Set(track.as_str().to_string()),
            track_name: Set(track.display_name().to_string()),
            description: Set(description),
            submitted_by: Set(submitted_by),
            status: Set("submitted".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec(&self.database_connection)
        .await?;

        self.get_submission(&id).await
    }

    pub async fn get_submission(&self, id: &Uuid) -> Result<SubmissionModel, AppError> {
        Ok(Submission::find_by_id(*id)
            .one(&self.database_connection)
            .await?
            .ok_or(DbErr::RecordNotFound("Submission not found".into()))?)
    }

    pub async fn list_submissions_for_team(
        &self,
        team_id: Uuid,
    ) -> Result<Vec<SubmissionModel>, AppError> {
        Ok(Submission::find()
            .filter(entity::submission::Column::TeamId.eq(team_id))
            .order_by_desc(entity::submission::Column::CreatedAt)
            .all(&self.database_connection)
            .await?)
    }
}
