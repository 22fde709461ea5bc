use chrono::{DateTime, Utc};
use entity::invitation::InvitationStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct RInviteUser {
    pub user_id: Uuid,
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RJoinTeam {
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub unread_only: Option<bool>,
}

/// An invitation rendered as a notification row.
#[derive(Serialize, Deserialize, Debug)]
pub struct NotificationView {
    pub id: String,
    pub team_id: Uuid,
    pub from_user: Uuid,
    pub title: String,
    pub message: String,
    pub status: InvitationStatus,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl NotificationView {
    pub fn from_invitation(inv: entity::invitation::Model, team_name: &str) -> Self {
        Self {
            id: inv.id,
            team_id: inv.team_id,
            from_user: inv.from_user,
            title: format!("Invitation to join \"{}\"", team_name),
            message: inv.message,
            is_read: inv.status != InvitationStatus::Pending,
            status: inv.status,
            created_at: inv.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct NotificationListRes {
    pub notifications: Vec<NotificationView>,
    pub pagination: Pagination,
    pub unread_count: u64,
}
