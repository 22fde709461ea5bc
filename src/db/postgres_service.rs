use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::composition::{CompositionRules, EligibilityRules};

/// Database handle plus the one rule table every membership mutation
/// validates against. Domain methods live in `impl` blocks split per
/// aggregate (user, teams, invitation, submission).
#[derive(Clone)]
pub struct PostgresService {
    pub(crate) database_connection: DatabaseConnection,
    pub(crate) rules: CompositionRules,
    pub(crate) eligibility: EligibilityRules,
}

impl PostgresService {
    pub async fn new(uri: &str) -> Result<Self, DbErr> {
        info!("Connecting to PostgreSQL...");
        let database_connection = Database::connect(uri).await?;
        info!("Running migrations...");
        Migrator::up(&database_connection, None).await?;
        info!("Connected to PostgreSQL.");
        Ok(Self {
            database_connection,
            rules: CompositionRules::default(),
            eligibility: EligibilityRules::default(),
        })
    }

    pub fn rules(&self) -> &CompositionRules {
        &self.rules
    }
}
