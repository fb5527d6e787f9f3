//! Test utilities for database operations.
//!
//! Each [`TestDatabase`] is a private in-memory SQLite database with every
//! migration applied, so tests can observe real transactional behavior.
//! Requires the `sqlx-sqlite` feature of sea-orm (enabled by `test-utils`).

use std::sync::Arc;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::{migrations::Migrator, session::SessionFactory};

/// URL of a fresh in-memory SQLite database.
pub const MEMORY_URL: &str = "sqlite::memory:";

/// A migrated, throwaway database.
pub struct TestDatabase {
    conn: Arc<DatabaseConnection>,
}

impl TestDatabase {
    /// Create a new in-memory database and run all migrations.
    pub async fn new() -> Result<Self, DbErr> {
        let mut opt = ConnectOptions::new(MEMORY_URL);
        // Every pooled connection to `:memory:` is a separate database.
        opt.max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;
        Migrator::up(&conn, None).await?;

        info!("Created in-memory test database");

        Ok(Self {
            conn: Arc::new(conn),
        })
    }

    /// Get the database connection.
    #[must_use]
    pub fn connection(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.conn)
    }

    /// A session factory over this database.
    #[must_use]
    pub fn session_factory(&self) -> SessionFactory {
        SessionFactory::new(self.connection())
    }
}
