use actix_web::{get, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::UserView;

#[get("/faculty")]
async fn list_faculty(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
) -> ApiResult<Vec<UserView>> {
    let user = db.authenticate_token(auth.token()).await?;
    let faculty = db.list_faculty(&user.id).await?;
    Ok(ApiResponse::Ok(
        faculty.into_iter().map(UserView::from).collect(),
    ))
}

/// Faculty who can still be recruited: teamless, gender on file.
#[get("/faculty/available")]
async fn list_available_faculty(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
) -> ApiResult<Vec<UserView>> {
    let user = db.authenticate_token(auth.token()).await?;
    let faculty = db.list_available_faculty(&user.id).await?;
    Ok(ApiResponse::Ok(
        faculty.into_iter().map(UserView::from).collect(),
    ))
}
