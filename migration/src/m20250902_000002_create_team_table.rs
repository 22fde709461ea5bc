use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Team {
    Table,
    Id,
    Name,
    Description,
    Leader,
    MaxMembers,
    IsEligible,
    EligibilityDetails,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    TeamId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Team::Table)
                .col(ColumnDef::new(Team::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Team::Name).string().not_null().unique_key())
                .col(ColumnDef::new(Team::Description).string().not_null())
                .col(ColumnDef::new(Team::Leader).uuid().not_null())
                .col(ColumnDef::new(Team::MaxMembers).integer().not_null())
                .col(ColumnDef::new(Team::IsEligible).boolean().not_null().default(false))
                .col(ColumnDef::new(Team::EligibilityDetails).json_binary().null())
                .col(ColumnDef::new(Team::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Team::UpdatedAt).timestamp_with_time_zone().not_null())
                .to_owned(),
        ).await?;

        // Membership column on user, filled once teams exist
        m.alter_table(
            Table::alter()
                .table(User::Table)
                .add_column(ColumnDef::new(User::TeamId).uuid().null())
                .to_owned(),
        ).await?;

        m.alter_table(
            Table::alter()
                .table(User::Table)
                .add_foreign_key(
                    TableForeignKey::new()
                        .name("fk_user_team")
                        .from_tbl(User::Table)
                        .from_col(User::TeamId)
                        .to_tbl(Team::Table)
                        .to_col(Team::Id)
                        .on_delete(ForeignKeyAction::SetNull)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_user_team")
                .table(User::Table)
                .col(User::TeamId)
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_team_leader")
                .table(Team::Table)
                .col(Team::Leader)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.alter_table(
            Table::alter()
                .table(User::Table)
                .drop_foreign_key(Alias::new("fk_user_team"))
                .to_owned(),
        ).await?;
        m.alter_table(
            Table::alter()
                .table(User::Table)
                .drop_column(User::TeamId)
                .to_owned(),
        ).await?;
        m.drop_table(Table::drop().table(Team::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
