//! The SQLite database holding the directory.
use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::error::Error;

pub mod cipher_suites;
pub mod rfcs;
pub mod schemas;
pub mod search;
pub mod technologies;
pub mod vulnerabilities;

/// A `SQLite` connection shared by every request.
///
/// Queries run on the calling thread, tokio workers included. The lock is
/// only taken in synchronous sections and never held across an `.await`;
/// services that fetch first (see `RfcService::create`) lock afterwards.
#[derive(Debug, Clone)]
pub struct Database {
    // `None` for an in-memory directory
    database_path: Option<PathBuf>,
    connection: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens the directory stored at `database_path`, or an in-memory one,
    /// and migrates it to the latest schema.
    pub fn new(database_path: Option<PathBuf>) -> Result<Self, Error> {
        let mut conn = Self::open_connection(database_path.as_ref())?;

        Database::upgrade_database_version(&mut conn)?;

        tracing::info!(
            "Opened database {}",
            database_path
                .as_ref()
                .map_or_else(|| "in memory".to_string(), |path| path.display().to_string())
        );

        Ok(Self {
            database_path,
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// An empty directory that lives as long as the process.
    pub fn in_memory() -> Result<Self, Error> {
        Self::new(None)
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.database_path.as_ref()
    }

    /// Locks the connection. Drop the guard before awaiting anything.
    pub fn get_connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        // Writes are transactional, a poisoned connection is still consistent
        self.connection.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn open_connection(database_path: Option<&PathBuf>) -> Result<Connection, Error> {
        let conn = if let Some(path) = database_path {
            Connection::open(path)?
        } else {
            Connection::open_in_memory()?
        };

        // Link tables rely on cascading deletes
        conn.pragma_update(None, "foreign_keys", "ON")?;

        Ok(conn)
    }
}
