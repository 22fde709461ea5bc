use actix_web::{delete, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub message: String,
}

#[delete("/{id}")]
async fn delete_team(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<Uuid>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let actor = db.authenticate_token(auth.token()).await?;
    let team_id = path.into_inner();

    let team = db.get_team(team_id).await?;
    if team.leader != actor.id {
        return Err(AppError::Forbidden);
    }

    db.delete_team(team_id).await?;
    info!("team {} deleted by leader {}", team_id, actor.id);

    Ok(ApiResponse::Ok(Response {
        message: "Team deleted successfully".to_string(),
    }))
}
