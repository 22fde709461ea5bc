use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::postgres_service::PostgresService;
use crate::types::response::{ApiResponse, ApiResult};

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub message: String,
    pub team_id: Uuid,
}

#[post("/{id}/leave")]
async fn leave_team(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<Uuid>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let actor = db.authenticate_token(auth.token()).await?;
    let team_id = path.into_inner();

    db.leave_team(team_id, actor.id).await?;

    Ok(ApiResponse::Ok(Response {
        message: "Successfully left the team".to_string(),
        team_id,
    }))
}
