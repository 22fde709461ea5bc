use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub designation: String,
    pub department: String,
    pub email: String,
    pub gender: Option<String>, // normalized "M"/"F", unset until profile update
    pub skills: String,
    pub experience: i32,
    #[serde(skip_serializing)]
    pub auth_hash: Option<String>, // argon2 of the current bearer secret
    pub team_id: Option<Uuid>, // FK -> team.id (nullable)
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to   = "super::team::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Team,
}

impl ActiveModelBehavior for ActiveModel {}
