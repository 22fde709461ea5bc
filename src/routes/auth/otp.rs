use actix_web::{post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use crate::db::postgres_service::PostgresService;
use crate::otp::AuthStores;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{RSendOtp, RVerifyOtp};
use crate::utils::mail::mail_otp_code;
use crate::utils::webutils::is_valid_email;

#[derive(Serialize, Deserialize)]
pub struct SendRes {
    pub message: String,
    pub expires: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
pub struct VerifyRes {
    pub message: String,
}

#[post("/otp/send")]
async fn send_otp(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    stores: web::Data<Arc<AuthStores>>,
    data: web::Json<RSendOtp>,
) -> ApiResult<SendRes> {
    let email = data.email.trim().to_ascii_lowercase();
    if !is_valid_email(&email) {
        return Err(AppError::BadRequest(
            "Please enter a valid email address".to_string(),
        ));
    }
    if db.user_exists_by_email(&email).await? {
        return Err(AppError::Conflict("Email is already registered".to_string()));
    }

    let (code, expires) = stores.otp.issue(&email);

    if let Err(e) = mail_otp_code(&email, data.name.as_deref(), &code).await {
        error!("failed to deliver OTP email: {e}");
        // The code is useless if it never arrived
        stores.otp.consume(&email);
        return Err(AppError::Internal(
            "Failed to send OTP. Please try again.".to_string(),
        ));
    }

    Ok(ApiResponse::Ok(SendRes {
        message: "OTP sent successfully to your email".to_string(),
        expires,
    }))
}

#[post("/otp/verify")]
async fn verify_otp(
    _req: actix_web::HttpRequest,
    stores: web::Data<Arc<AuthStores>>,
    data: web::Json<RVerifyOtp>,
) -> ApiResult<VerifyRes> {
    let email = data.email.trim().to_ascii_lowercase();
    stores.otp.verify(&email, &data.otp)?;
    Ok(ApiResponse::Ok(VerifyRes {
        message: "Email verified successfully!".to_string(),
    }))
}

#[post("/otp/resend")]
async fn resend_otp(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    stores: web::Data<Arc<AuthStores>>,
    data: web::Json<RSendOtp>,
) -> ApiResult<SendRes> {
    let email = data.email.trim().to_ascii_lowercase();
    if !is_valid_email(&email) {
        return Err(AppError::BadRequest(
            "Please enter a valid email address".to_string(),
        ));
    }
    if db.user_exists_by_email(&email).await? {
        return Err(AppError::Conflict("Email is already registered".to_string()));
    }

    let (code, expires) = stores.otp.reissue(&email)?;

    if let Err(e) = mail_otp_code(&email, data.name.as_deref(), &code).await {
        error!("failed to deliver OTP email: {e}");
        stores.otp.consume(&email);
        return Err(AppError::Internal(
            "Failed to resend OTP. Please try again.".to_string(),
        ));
    }

    Ok(ApiResponse::Ok(SendRes {
        message: "New OTP sent successfully".to_string(),
        expires,
    }))
}
