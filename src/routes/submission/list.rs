use actix_web::{get, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::submission::SubmissionView;

#[derive(Serialize, Deserialize)]
pub struct TeamInfo {
    pub id: Uuid,
    pub name: String,
}

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub team: TeamInfo,
    pub submissions: Vec<SubmissionView>,
}

#[get("/team")]
async fn team_submissions(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
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

    let submissions = db.list_submissions_for_team(team.id).await?;

    Ok(ApiResponse::Ok(Response {
        team: TeamInfo {
            id: team.id,
            name: team.name,
        },
        submissions: submissions.into_iter().map(SubmissionView::from).collect(),
    }))
}
