#![allow(missing_docs)]

pub(crate) mod html;
pub(crate) mod http;

use tempfile::TempDir;

use crate::{
    AppState,
    db::{Database, DatabaseConfig},
    transaction::TransactionStore,
};

pub(crate) use html::{assert_valid_html, must_get_form, parse_html_document, parse_html_fragment};
pub(crate) use http::{
    assert_content_type, assert_hx_redirect, assert_status_ok, get_header, read_body_text,
};

/// A store backed by a database file in a temporary directory.
///
/// Every store call opens a new connection, so an in-memory database would be
/// empty on each call. The directory is deleted when this is dropped.
pub(crate) struct TestStore {
    pub store: TransactionStore,
    _dir: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("could not create temporary directory");
        let database = Database::open(DatabaseConfig::new(dir.path().join("test.db")))
            .expect("could not open test database");

        Self {
            store: TransactionStore::new(database, "Etc/UTC"),
            _dir: dir,
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            store: self.store.clone(),
        }
    }
}
