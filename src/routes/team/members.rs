use actix_web::{delete, post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::{RTeamAddMember, TeamView};

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub message: String,
    pub team: TeamView,
}

async fn reload_view(
    db: &PostgresService,
    team_id: Uuid,
) -> Result<TeamView, AppError> {
    let team = db.get_team(team_id).await?;
    let members = db.list_users_in_team(team.id).await?;
    let leader = db.get_user_by_id(&team.leader).await?;
    Ok(TeamView::project(team, leader, members))
}

#[post("/{id}/members")]
async fn add_member(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<Uuid>,
    data: web::Json<RTeamAddMember>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let actor = db.authenticate_token(auth.token()).await?;
    let team_id = path.into_inner();

    let team = db.get_team(team_id).await?;
    if team.leader != actor.id {
        return Err(AppError::Forbidden);
    }
    if data.member_id == actor.id {
        return Err(AppError::BadRequest(
            "Cannot add yourself as a member".to_string(),
        ));
    }

    db.add_member(team_id, data.member_id).await?;

    Ok(ApiResponse::Ok(Response {
        message: "Member added successfully".to_string(),
        team: reload_view(&db, team_id).await?,
    }))
}

#[delete("/{id}/members/{member_id}")]
async fn remove_member(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<(Uuid, Uuid)>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let actor = db.authenticate_token(auth.token()).await?;
    let (team_id, member_id) = path.into_inner();

    let team = db.get_team(team_id).await?;
    if team.leader != actor.id {
        return Err(AppError::Forbidden);
    }

    db.remove_member(team_id, member_id).await?;

    Ok(ApiResponse::Ok(Response {
        message: "Member removed successfully".to_string(),
        team: reload_view(&db, team_id).await?,
    }))
}
