use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::config::config;
use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::mail::mail_invitation_declined;

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct DeclineAllRes {
    pub message: String,
    pub declined: u64,
}

#[post("/{id}/accept")]
async fn accept_invitation(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<String>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let actor = db.authenticate_token(auth.token()).await?;
    let invitation = db.get_invitation(&path.into_inner()).await?;

    // Only the designated recipient may act on it
    if invitation.to_user != actor.id {
        return Err(AppError::Forbidden);
    }

    let accepted = db.accept_invitation(&invitation.id).await?;
    info!("invitation {} accepted", accepted.id);

    Ok(ApiResponse::Ok(Response {
        message: "Invitation accepted".to_string(),
    }))
}

#[post("/{id}/decline")]
async fn decline_invitation(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<String>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let actor = db.authenticate_token(auth.token()).await?;
    let invitation = db.get_invitation(&path.into_inner()).await?;

    if invitation.to_user != actor.id {
        return Err(AppError::Forbidden);
    }

    let declined = db.decline_invitation(&invitation.id).await?;

    if config().notify_on_decline {
        if let (Ok(sender), Ok(team)) = (
            db.get_user_by_id(&declined.from_user).await,
            db.get_team(declined.team_id).await,
        ) {
            mail_invitation_declined(&sender.email, &team.name).await.ok();
        }
    }

    Ok(ApiResponse::Ok(Response {
        message: "Invitation declined".to_string(),
    }))
}

#[post("/decline-all")]
async fn decline_all(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
) -> ApiResult<DeclineAllRes> {
    let actor = db.authenticate_token(auth.token()).await?;
    let declined = db.decline_all_for_user(actor.id).await?;

    Ok(ApiResponse::Ok(DeclineAllRes {
        message: format!("Marked {} invitations as declined", declined),
        declined,
    }))
}
