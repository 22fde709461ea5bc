use actix_web::{get, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::postgres_service::PostgresService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::EligibilityRes;

/// Recomputes and returns the display-side health check. Idempotent: with
/// no membership change the stored verdict does not move.
#[get("/{id}/eligibility")]
async fn team_eligibility(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<Uuid>,
    auth: BearerAuth,
) -> ApiResult<EligibilityRes> {
    let _user = db.authenticate_token(auth.token()).await?;
    let team_id = path.into_inner();
    let (is_eligible, eligibility_details) = db.recompute_eligibility(team_id).await?;
    Ok(ApiResponse::Ok(EligibilityRes {
        team_id,
        is_eligible,
        eligibility_details,
    }))
}
