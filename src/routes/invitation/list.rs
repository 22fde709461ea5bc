use actix_web::{get, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::invitation::{ListQuery, NotificationListRes, NotificationView, Pagination};
use crate::types::response::{ApiResponse, ApiResult};

#[get("")]
async fn list_notifications(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    query: web::Query<ListQuery>,
    auth: BearerAuth,
) -> ApiResult<NotificationListRes> {
    let actor = db.authenticate_token(auth.token()).await?;

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let unread_only = query.unread_only.unwrap_or(false);

    let (invitations, total) = db
        .list_invitations_for_user(actor.id, page, limit, unread_only)
        .await?;
    let unread_count = db.count_pending_for_user(actor.id).await?;

    let mut notifications = Vec::with_capacity(invitations.len());
    for inv in invitations {
        let team_name = db
            .get_team(inv.team_id)
            .await
            .map(|t| t.name)
            .unwrap_or_else(|_| "Unknown".to_string());
        notifications.push(NotificationView::from_invitation(inv, &team_name));
    }

    Ok(ApiResponse::Ok(NotificationListRes {
        notifications,
        pagination: Pagination {
            page,
            limit,
            total,
            pages: total.div_ceil(limit),
        },
        unread_count,
    }))
}
