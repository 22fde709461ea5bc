use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::submission::{RSubmissionCreate, SubmissionView};

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub message: String,
    pub submission: SubmissionView,
}

#[post("")]
async fn create_submission(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    data: web::Json<RSubmissionCreate>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let actor = db.authenticate_token(auth.token()).await?;
    let team = match db.get_team_for_user(&actor).await {
        Ok(team) => team,
        Err(_) => {
            return Err(AppError::BadRequest(
                "You are not part of any team".to_string(),
            ))
        }
    };

    let submission = db
        .create_submission(
            team.id,
            data.track,
            data.description.clone().unwrap_or_default().trim().to_string(),
            actor.id,
        )
        .await?;
    info!("submission {} created for team {}", submission.id, team.id);

    Ok(ApiResponse::Created(Response {
        message: "Submission created successfully".to_string(),
        submission: submission.into(),
    }))
}
