use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::composition::ValidationMode;
use crate::db::postgres_service::PostgresService;
use crate::db::profile_of;
use crate::types::error::AppError;
use crate::types::invitation::{RInviteUser, RJoinTeam};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::mail::mail_team_invite;

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub message: String,
    pub invitation_id: String,
}

/// Cheap pre-check shared by both solicitations: capacity plus a
/// `Forming`-mode dry run with the candidate included. The authoritative
/// check runs again under the team lock at accept time; failing early
/// here just spares everyone a doomed invitation.
async fn check_addition(
    db: &PostgresService,
    team: &entity::team::Model,
    candidate: &entity::user::Model,
) -> Result<(), AppError> {
    let current = db.list_users_in_team(team.id).await?;
    if current.len() >= team.max_members as usize {
        return Err(AppError::Conflict("Team is full".to_string()));
    }
    let mut profiles: Vec<_> = current.iter().map(profile_of).collect();
    profiles.push(profile_of(candidate));
    let verdict = db.rules().validate(&profiles, ValidationMode::Forming);
    if !verdict.is_valid {
        return Err(AppError::rejected(
            "Cannot extend this offer due to team composition rules",
            verdict.violations,
        ));
    }
    Ok(())
}

/// Leader invites a user onto the team.
#[post("/{id}/invite")]
async fn invite_user(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<Uuid>,
    data: web::Json<RInviteUser>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let actor = db.authenticate_token(auth.token()).await?;
    let team = db.get_team(path.into_inner()).await?;

    if team.leader != actor.id {
        return Err(AppError::Forbidden);
    }

    let invited = db.get_user_by_id(&data.user_id).await?;
    if invited.team_id.is_some() {
        return Err(AppError::Conflict("User is already in a team".to_string()));
    }
    check_addition(&db, &team, &invited).await?;

    let message = data
        .message
        .clone()
        .unwrap_or_else(|| format!("You are invited to join {}", team.name));
    let invitation = db
        .create_invitation(team.id, actor.id, invited.id, invited.id, message.clone())
        .await?;
    info!("invitation {} created for {}", invitation.id, invited.id);

    mail_team_invite(&invited.email, &team.name, &message).await.ok();

    Ok(ApiResponse::Created(Response {
        message: "Invitation sent successfully".to_string(),
        invitation_id: invitation.id,
    }))
}

/// A teamless user petitions the leader; the invitation flows the other
/// way (recipient = leader).
#[post("/{id}/join")]
async fn join_team(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<Uuid>,
    data: web::Json<RJoinTeam>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let actor = db.authenticate_token(auth.token()).await?;
    if actor.team_id.is_some() {
        return Err(AppError::Conflict("You are already in a team".to_string()));
    }

    let team = db.get_team(path.into_inner()).await?;
    check_addition(&db, &team, &actor).await?;

    let message = data
        .message
        .clone()
        .unwrap_or_else(|| format!("{} wants to join your team", actor.name));
    let invitation = db
        .create_invitation(team.id, actor.id, team.leader, actor.id, message)
        .await?;

    Ok(ApiResponse::Created(Response {
        message: "Join request sent successfully".to_string(),
        invitation_id: invitation.id,
    }))
}
