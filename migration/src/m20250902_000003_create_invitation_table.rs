use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Invitation {
    Table,
    Id,
    TeamId,
    FromUser,
    ToUser,
    Message,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Invitation::Table)
                .col(ColumnDef::new(Invitation::Id).string().not_null().primary_key())
                .col(ColumnDef::new(Invitation::TeamId).uuid().not_null())
                .col(ColumnDef::new(Invitation::FromUser).uuid().not_null())
                .col(ColumnDef::new(Invitation::ToUser).uuid().not_null())
                .col(ColumnDef::new(Invitation::Message).string().not_null())
                .col(ColumnDef::new(Invitation::Status).string().not_null())
                .col(ColumnDef::new(Invitation::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Invitation::UpdatedAt).timestamp_with_time_zone().not_null())
                .to_owned(),
        ).await?;

        // No FK to team: invitations are an audit trail and outlive the
        // team they reference
        m.alter_table(
            Table::alter()
                .table(Invitation::Table)
                .add_foreign_key(
                    TableForeignKey::new()
                        .name("fk_invitation_from_user")
                        .from_tbl(Invitation::Table)
                        .from_col(Invitation::FromUser)
                        .to_tbl(User::Table)
                        .to_col(User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .add_foreign_key(
                    TableForeignKey::new()
                        .name("fk_invitation_to_user")
                        .from_tbl(Invitation::Table)
                        .from_col(Invitation::ToUser)
                        .to_tbl(User::Table)
                        .to_col(User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_invitation_to_user")
                .table(Invitation::Table)
                .col(Invitation::ToUser)
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_invitation_team")
                .table(Invitation::Table)
                .col(Invitation::TeamId)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Invitation::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
