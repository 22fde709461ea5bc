use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Submission {
    Table,
    Id,
    TeamId,
    Track,
    TrackName,
    Description,
    SubmittedBy,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Team {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Submission::Table)
                .col(ColumnDef::new(Submission::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Submission::TeamId).uuid().not_null())
                .col(ColumnDef::new(Submission::Track).string().not_null())
                .col(ColumnDef::new(Submission::TrackName).string().not_null())
                .col(ColumnDef::new(Submission::Description).string().not_null())
                .col(ColumnDef::new(Submission::SubmittedBy).uuid().not_null())
                .col(ColumnDef::new(Submission::Status).string().not_null())
                .col(ColumnDef::new(Submission::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Submission::UpdatedAt).timestamp_with_time_zone().not_null())
                .to_owned(),
        ).await?;

        m.alter_table(
            Table::alter()
                .table(Submission::Table)
                .add_foreign_key(
                    TableForeignKey::new()
                        .name("fk_submission_team")
                        .from_tbl(Submission::Table)
                        .from_col(Submission::TeamId)
                        .to_tbl(Team::Table)
                        .to_col(Team::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_submission_team_track")
                .table(Submission::Table)
                .col(Submission::TeamId)
                .col(Submission::Track)
                .unique()
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Submission::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
