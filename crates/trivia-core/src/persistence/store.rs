//! Store handle owning the SQLite connection

use std::path::Path;

use rusqlite::functions::FunctionFlags;

use super::categories::CategoryRepository;
use super::questions::QuestionRepository;
use super::schema::{Schema, SCHEMA_VERSION};
use crate::error::{PersistenceError, Result};

/// SQL function lowercasing text with Unicode case rules
pub(crate) const LOWER_FN: &str = "unicode_lower";

/// Handle to the relational store.
///
/// Repositories borrow the handle; nothing holds a connection globally.
pub struct Store {
    conn: rusqlite::Connection,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl Store {
    /// Open (or create) a store at the given database path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(PersistenceError::from)?;
        }

        let conn = rusqlite::Connection::open(path)?;
        let store = Self { conn };
        store.register_functions()?;
        store.initialize()?;
        tracing::info!("Opened trivia store at {:?}", path);
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = rusqlite::Connection::open_in_memory()?;
        let store = Self { conn };
        store.register_functions()?;
        store.initialize()?;
        Ok(store)
    }

    /// Question queries and mutations
    pub fn questions(&self) -> QuestionRepository<'_> {
        QuestionRepository::new(self)
    }

    /// Category queries
    pub fn categories(&self) -> CategoryRepository<'_> {
        CategoryRepository::new(self)
    }

    pub(crate) fn conn(&self) -> &rusqlite::Connection {
        &self.conn
    }

    /// SQLite's own `lower()` only folds ASCII
    fn register_functions(&self) -> Result<()> {
        self.conn.create_scalar_function(
            LOWER_FN,
            1,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| {
                let text: Option<String> = ctx.get(0)?;
                Ok(text.map(|t| t.to_lowercase()))
            },
        )?;
        Ok(())
    }

    /// Initialize the database schema
    fn initialize(&self) -> Result<()> {
        let current_version = self.get_schema_version().unwrap_or(0);

        if current_version == 0 {
            // Fresh database, create all tables
            self.conn.execute_batch(Schema::create_tables())?;
            self.conn.execute_batch(Schema::seed_categories())?;
            self.set_schema_version(SCHEMA_VERSION)?;
            tracing::debug!("Created trivia schema v{}", SCHEMA_VERSION);
        } else if current_version < SCHEMA_VERSION {
            for version in current_version..SCHEMA_VERSION {
                if let Some(migration) = Schema::migration(version, version + 1) {
                    self.conn.execute_batch(migration).map_err(|e| {
                        PersistenceError::Migration(format!("v{} -> v{}: {}", version, version + 1, e))
                    })?;
                }
            }
            self.set_schema_version(SCHEMA_VERSION)?;
            tracing::info!("Migrated trivia schema v{} -> v{}", current_version, SCHEMA_VERSION);
        } else if current_version > SCHEMA_VERSION {
            return Err(PersistenceError::Migration(format!(
                "database schema v{} is newer than supported v{}",
                current_version, SCHEMA_VERSION
            ))
            .into());
        }

        Ok(())
    }

    fn get_schema_version(&self) -> Option<u32> {
        self.conn
            .query_row(
                "SELECT version FROM schema_version ORDER BY rowid DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .ok()
    }

    fn set_schema_version(&self, version: u32) -> Result<()> {
        self.conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [version],
        )?;
        Ok(())
    }
}
