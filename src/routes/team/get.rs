use actix_web::{get, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::TeamView;

async fn project_team(
    db: &PostgresService,
    team: entity::team::Model,
) -> Result<TeamView, AppError> {
    let members = db.list_users_in_team(team.id).await?;
    let leader = db.get_user_by_id(&team.leader).await?;
    Ok(TeamView::project(team, leader, members))
}

#[get("/me")]
async fn my_team(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
) -> ApiResult<TeamView> {
    let user = db.authenticate_token(auth.token()).await?;
    let team = match db.get_team_for_user(&user).await {
        Ok(team) => team,
        Err(_) => {
            return Err(AppError::BadRequest(
                "You are not part of any team".to_string(),
            ))
        }
    };
    Ok(ApiResponse::Ok(project_team(&db, team).await?))
}

#[get("")]
async fn list_teams(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
) -> ApiResult<Vec<TeamView>> {
    let _user = db.authenticate_token(auth.token()).await?;
    let mut views = Vec::new();
    for team in db.list_teams().await? {
        views.push(project_team(&db, team).await?);
    }
    Ok(ApiResponse::Ok(views))
}

#[get("/{id}")]
async fn get_team(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<Uuid>,
    auth: BearerAuth,
) -> ApiResult<TeamView> {
    let _user = db.authenticate_token(auth.token()).await?;
    let team = db.get_team(path.into_inner()).await?;
    Ok(ApiResponse::Ok(project_team(&db, team).await?))
}
