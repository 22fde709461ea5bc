use actix_web::{post, web};
use std::sync::Arc;
use tracing::info;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{LoginRes, RLogin, UserView};

#[post("/login")]
async fn login(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    data: web::Json<RLogin>,
) -> ApiResult<LoginRes> {
    // Same error for unknown username and wrong password
    let user = match db.get_user_by_username(data.username.trim()).await {
        Ok(user) => user,
        Err(_) => return Err(AppError::BadRequest("Invalid credentials".to_string())),
    };
    if !db.check_password(&user, &data.password) {
        return Err(AppError::BadRequest("Invalid credentials".to_string()));
    }

    let token = db.issue_token(&user.id).await?;
    info!("user {} logged in", user.id);

    Ok(ApiResponse::Ok(LoginRes {
        message: "Login successful".to_string(),
        token,
        user: UserView::from(user),
    }))
}
