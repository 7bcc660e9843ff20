pub mod entities;
pub mod migrator;
pub mod repositories;

pub use repositories::SeaOrmCarrierRepository;

use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use migrator::Migrator;

/// Initialize database connection
pub async fn init_database(url: &str) -> Result<DatabaseConnection, DbErr> {
    info!("Connecting to database: {}", url);
    let db = Database::connect(url).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Apply pending schema migrations
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(db, None).await?;
    info!("Database migrations applied");
    Ok(())
}
