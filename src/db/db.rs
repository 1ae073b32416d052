//! Connection pool bootstrap.
//!
//! [`Db`] turns a [`Config`] into an `r2d2` pool of SQLite connections and
//! brings the schema up to date. A [`PragmaCustomizer`] runs on every new
//! connection so WAL mode, foreign keys and the busy timeout are always set.

use crate::db::migrations::init_with_migrations;
use crate::db::tasks::TaskRepository;
use crate::libs::clock::Clock;
use crate::libs::config::{Config, StoreLocation};
use crate::libs::error::{Result, TaskError};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::sync::Arc;
use std::time::Duration;

/// Alias for the connection pool type.
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Alias for a pooled connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

#[derive(Debug)]
struct PragmaCustomizer {
    busy_timeout_ms: u32,
}

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for PragmaCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
        conn.execute_batch(&format!(
            "PRAGMA busy_timeout = {};\
             PRAGMA journal_mode = WAL;\
             PRAGMA foreign_keys = ON;\
             PRAGMA synchronous = NORMAL;",
            self.busy_timeout_ms
        ))?;
        Ok(())
    }
}

/// A migrated store, ready to hand out repositories.
#[derive(Clone)]
pub struct Db {
    pool: ConnectionPool,
}

impl Db {
    /// Opens the store described by `config` and applies pending
    /// migrations.
    pub fn new(config: &Config) -> Result<Db> {
        let db = Self::new_without_migrations(config)?;
        let mut conn = db.conn()?;
        init_with_migrations(&mut conn)?;
        drop(conn);
        Ok(db)
    }

    /// Opens the store without touching the schema.
    pub fn new_without_migrations(config: &Config) -> Result<Db> {
        // r2d2 panics on a zero checkout timeout.
        if config.connection_timeout_ms == 0 {
            return Err(TaskError::invalid("connection_timeout_ms must be greater than zero"));
        }
        let location = config.location().map_err(|e| TaskError::StorageUnavailable(e.to_string()))?;

        let customizer = Box::new(PragmaCustomizer {
            busy_timeout_ms: config.busy_timeout_ms,
        });
        let builder = Pool::builder()
            .connection_timeout(Duration::from_millis(config.connection_timeout_ms))
            .connection_customizer(customizer);

        let pool = match location {
            // Each in-memory connection is its own database, so the pool must
            // hold exactly one connection and never recycle it.
            StoreLocation::Memory => builder
                .max_size(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .build(SqliteConnectionManager::memory())?,
            StoreLocation::File(path) => builder.max_size(config.pool_size.max(1)).build(SqliteConnectionManager::file(path))?,
        };

        Ok(Db { pool })
    }

    /// Checks a connection out of the pool.
    pub fn conn(&self) -> Result<PooledConnection> {
        Ok(self.pool.get()?)
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// A repository over this store using wall-clock time.
    pub fn tasks(&self) -> TaskRepository {
        TaskRepository::with_system_clock(self.pool.clone())
    }

    pub fn tasks_with_clock(&self, clock: Arc<dyn Clock>) -> TaskRepository {
        TaskRepository::new(self.pool.clone(), clock)
    }
}
