use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::otp::AuthStores;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{DBUserCreate, RRegister};
use crate::utils::token::encrypt;
use crate::utils::webutils::is_valid_email;

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub message: String,
}

fn validate_registration(data: &RRegister) -> Vec<String> {
    let mut errors = Vec::new();
    if data.username.trim().len() < 3 {
        errors.push("Username must be at least 3 characters".to_string());
    }
    if data.password.len() < 8 {
        errors.push("Password must be at least 8 characters".to_string());
    }
    if data.name.trim().is_empty() {
        errors.push("Name is required".to_string());
    }
    if data.designation.trim().is_empty() {
        errors.push("Designation is required".to_string());
    }
    if data.department.trim().is_empty() {
        errors.push("Department is required".to_string());
    }
    if !is_valid_email(data.email.trim()) {
        errors.push("Please enter a valid email address".to_string());
    }
    if data.experience < 0 {
        errors.push("Invalid value for experience".to_string());
    }
    errors
}

#[post("/register")]
async fn register(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    stores: web::Data<Arc<AuthStores>>,
    data: web::Json<RRegister>,
) -> ApiResult<Response> {
    let errors = validate_registration(&data);
    if !errors.is_empty() {
        return Err(AppError::rejected("Invalid registration data", errors));
    }

    let email = data.email.trim().to_ascii_lowercase();
    stores.otp.require_verified(&email)?;

    let password_hash = encrypt(&data.password)
        .map_err(|e| AppError::Internal(format!("password hash failed: {e}")))?;

    db.create_user(DBUserCreate {
        username: data.username.trim().to_string(),
        password_hash,
        name: data.name.trim().to_string(),
        designation: data.designation.trim().to_string(),
        department: data.department.trim().to_string(),
        email: email.clone(),
        skills: data.skills.clone(),
        experience: data.experience,
    })
    .await?;

    // Single use: a second registration needs a fresh OTP
    stores.otp.consume(&email);

    Ok(ApiResponse::Created(Response {
        message: "Registration successful! You can now login.".to_string(),
    }))
}
