//! Implements a struct that holds the state of the REST server.

use axum::extract::FromRef;

use crate::{
    Error,
    db::{Database, DatabaseConfig},
    transaction::TransactionStore,
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The accessor for the transactions table.
    pub store: TransactionStore,
}

impl AppState {
    /// Create a new [AppState] for the SQLite database described by `db_config`.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new(db_config: DatabaseConfig, local_timezone: &str) -> Result<Self, Error> {
        let database = Database::open(db_config)?;

        Ok(Self {
            store: TransactionStore::new(database, local_timezone),
        })
    }
}

impl FromRef<AppState> for TransactionStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}
