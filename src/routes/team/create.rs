use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::db::postgres_service::PostgresService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::{RTeamCreate, TeamView};
use crate::utils::mail::mail_team_created;

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub message: String,
    pub team: TeamView,
}

#[post("")]
async fn create_team(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    data: web::Json<RTeamCreate>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let leader = db.authenticate_token(auth.token()).await?;
    let data = data.into_inner();

    let team = db
        .create_team(
            leader.id,
            data.name,
            data.description.unwrap_or_default().trim().to_string(),
            data.members,
        )
        .await?;
    info!("team {} created by {}", team.id, leader.id);

    let members = db.list_users_in_team(team.id).await?;
    let leader_row = db.get_user_by_id(&team.leader).await?;

    // Fire-and-forget: a failed email never unwinds a created team
    let recipients: Vec<String> = members.iter().map(|m| m.email.clone()).collect();
    let team_name = team.name.clone();
    actix_web::rt::spawn(async move {
        if let Err(e) = mail_team_created(recipients, &team_name).await {
            error!("team creation email failed: {e}");
        }
    });

    let view = TeamView::project(team, leader_row, members);
    Ok(ApiResponse::Created(Response {
        message: "Team created successfully".to_string(),
        team: view,
    }))
}
