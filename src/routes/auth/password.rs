use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use crate::db::postgres_service::PostgresService;
use crate::otp::AuthStores;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{RForgotPassword, RResetPassword};
use crate::utils::mail::mail_password_reset;
use crate::utils::token::encrypt;

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub message: String,
}

#[post("/password/forgot")]
async fn forgot_password(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    stores: web::Data<Arc<AuthStores>>,
    data: web::Json<RForgotPassword>,
) -> ApiResult<Response> {
    let email = data.email.trim().to_ascii_lowercase();

    // Whether or not the account exists, the answer is the same; only an
    // existing account actually gets a token
    if db.user_exists_by_email(&email).await? {
        let (token, _expires) = stores.reset.issue(&email);
        if let Err(e) = mail_password_reset(&email, &token).await {
            error!("failed to deliver reset email: {e}");
        }
    }

    Ok(ApiResponse::Ok(Response {
        message: "If the address is registered, a reset link has been sent.".to_string(),
    }))
}

#[post("/password/reset")]
async fn reset_password(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    stores: web::Data<Arc<AuthStores>>,
    data: web::Json<RResetPassword>,
) -> ApiResult<Response> {
    let email = data.email.trim().to_ascii_lowercase();

    if data.new_password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    if !stores.reset.redeem(&email, &data.token) {
        return Err(AppError::BadRequest(
            "Reset token is invalid or expired".to_string(),
        ));
    }

    let user = db.get_user_by_email(&email).await?;
    let hash = encrypt(&data.new_password)
        .map_err(|e| AppError::Internal(format!("password hash failed: {e}")))?;
    db.set_password(&user.id, hash).await?;

    Ok(ApiResponse::Ok(Response {
        message: "Password has been reset. You can now login.".to_string(),
    }))
}
