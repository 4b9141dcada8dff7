//! Opening connections to the application's SQLite database and creating its schema.

use std::{path::PathBuf, time::Duration};

use rusqlite::{Connection, TransactionBehavior};

use crate::{Error, transaction::create_transaction_table};

/// How long a connection waits on a locked database before giving up.
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for connecting to the application database.
///
/// These are passed in by the caller (e.g., from command line arguments),
/// nothing about the connection is hard-coded.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// File path to the SQLite database. The file is created if it does not exist.
    pub path: PathBuf,
    /// How long to wait for another connection to release a lock.
    pub busy_timeout: Duration,
}

impl DatabaseConfig {
    /// Create a config for the database at `path` with the default busy timeout.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

/// A handle to the application database.
///
/// No connection is held open. Each call to [Database::connect] opens a new
/// connection which is closed when it is dropped, so a connection never
/// outlives the operation that needed it.
#[derive(Debug, Clone)]
pub struct Database {
    config: DatabaseConfig,
}

impl Database {
    /// Open the database described by `config` and make sure the schema exists.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the database cannot be opened or the
    /// tables cannot be created.
    pub fn open(config: DatabaseConfig) -> Result<Self, Error> {
        let database = Self { config };
        let connection = database.connect()?;
        initialize(&connection)?;

        tracing::info!("Using database at {}", database.config.path.display());

        Ok(database)
    }

    /// Open a new connection to the database.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the database file cannot be opened.
    pub fn connect(&self) -> Result<Connection, Error> {
        let connection = Connection::open(&self.config.path)
            .inspect_err(|error| {
                tracing::error!(
                    "could not open database at {}: {error}",
                    self.config.path.display()
                )
            })?;
        connection.busy_timeout(self.config.busy_timeout)?;

        Ok(connection)
    }

    /// The settings this database was opened with.
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }
}

/// Create the tables for the application in `connection` if they do not
/// already exist.
///
/// # Errors
/// Returns an error if the tables cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = rusqlite::Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use tempfile::TempDir;

    use super::{Database, DatabaseConfig, initialize};

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("first initialize failed");
        initialize(&connection).expect("second initialize failed");
    }

    #[test]
    fn open_creates_database_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.db");

        let database = Database::open(DatabaseConfig::new(&path)).expect("could not open database");

        assert!(path.is_file(), "want database file at {path:?}");
        let count: i64 = database
            .connect()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM expense", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn open_fails_for_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("does-not-exist").join("expenses.db");

        let result = Database::open(DatabaseConfig::new(path));

        assert!(result.is_err(), "want error opening database in missing directory");
    }
}
