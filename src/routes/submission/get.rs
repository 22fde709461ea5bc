use actix_web::{get, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::submission::SubmissionView;

#[get("/{id}")]
async fn get_submission(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<Uuid>,
    auth: BearerAuth,
) -> ApiResult<SubmissionView> {
    let actor = db.authenticate_token(auth.token()).await?;
    let submission = db.get_submission(&path.into_inner()).await?;

    // Team members only
    if actor.team_id != Some(submission.team_id) {
        return Err(AppError::Forbidden);
    }

    Ok(ApiResponse::Ok(submission.into()))
}
