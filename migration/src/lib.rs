pub use sea_orm_migration::prelude::*;

use sea_orm_migration::sea_orm::SqlxSqliteConnector;
use sqlx::SqlitePool;

mod m20240101_000001_create_catalog_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_catalog_tables::Migration)]
    }
}

/// Brings the store behind `pool` up to the current schema.
///
/// Safe to call on every startup: applied migrations are recorded and skipped,
/// and tables are only created when missing.
pub async fn apply(pool: &SqlitePool) -> Result<(), DbErr> {
    let connection = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool.clone());
    Migrator::up(&connection, None).await
}
