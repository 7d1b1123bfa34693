//! Test utilities for the database crate.

use super::Database;
use scroll_migration::{Migrator, MigratorTrait};
use sea_orm::ConnectOptions;

/// Instantiates a new in-memory database and runs the migrations
/// to set up the schema.
pub async fn setup_test_db() -> Database {
    // every connection to an in-memory sqlite opens a distinct database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);
    let connection = sea_orm::Database::connect(options).await.unwrap();
    Migrator::up(&connection, None).await.unwrap();

    connection.into()
}
