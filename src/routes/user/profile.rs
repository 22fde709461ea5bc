use actix_web::{get, patch, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{RUpdateProfile, UserView};

#[get("/profile")]
async fn get_profile(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
) -> ApiResult<UserView> {
    let user = db.authenticate_token(auth.token()).await?;
    Ok(ApiResponse::Ok(UserView::from(user)))
}

#[patch("/profile")]
async fn update_profile(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    data: web::Json<RUpdateProfile>,
    auth: BearerAuth,
) -> ApiResult<UserView> {
    let user = db.authenticate_token(auth.token()).await?;
    let updated = db.update_profile(&user.id, data.into_inner()).await?;
    Ok(ApiResponse::Ok(UserView::from(updated)))
}
