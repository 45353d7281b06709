//! Lazily opened, process-lifetime database handle.
//!
//! # Invariants
//! - The underlying connection is opened at most once per handle.
//! - A failed open leaves the handle unopened; the next access retries.

use super::{open_db, open_db_in_memory, DbResult};
use crate::config::StorageLocation;
use once_cell::unsync::OnceCell;
use rusqlite::Connection;

/// Owns the shelter database connection.
///
/// Nothing touches the disk until the first `readable()`/`writable()` call.
pub struct ShelterDb {
    location: StorageLocation,
    conn: OnceCell<Connection>,
}

impl ShelterDb {
    pub fn new(location: StorageLocation) -> Self {
        Self {
            location,
            conn: OnceCell::new(),
        }
    }

    /// Wraps an already bootstrapped connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            location: StorageLocation::InMemory,
            conn: OnceCell::from(conn),
        }
    }

    pub fn location(&self) -> &StorageLocation {
        &self.location
    }

    pub fn is_open(&self) -> bool {
        self.conn.get().is_some()
    }

    /// Connection for queries.
    pub fn readable(&self) -> DbResult<&Connection> {
        self.connection()
    }

    /// Connection for mutations. SQLite serializes concurrent writers itself.
    pub fn writable(&self) -> DbResult<&Connection> {
        self.connection()
    }

    fn connection(&self) -> DbResult<&Connection> {
        self.conn.get_or_try_init(|| match &self.location {
            StorageLocation::InMemory => open_db_in_memory(),
            StorageLocation::File(path) => open_db(path),
        })
    }
}
