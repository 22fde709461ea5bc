pub use sea_orm_migration::prelude::*;

mod m20250902_000001_create_user_table;
mod m20250902_000002_create_team_table;
mod m20250902_000003_create_invitation_table;
mod m20250902_000004_create_submission_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250902_000001_create_user_table::Migration),
            Box::new(m20250902_000002_create_team_table::Migration),
            Box::new(m20250902_000003_create_invitation_table::Migration),
            Box::new(m20250902_000004_create_submission_table::Migration),
        ]
    }
}
