//! Bilancio is a web app for tracking personal expenses and income.
//!
//! This library provides a JSON API over a single table of transactions and a
//! set of HTML pages for entering, searching, charting and exporting them.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod api;
mod app_state;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use database_id::TransactionId;
pub use db::{Database, DatabaseConfig, initialize as initialize_db};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{
    CATEGORIES, Transaction, TransactionBuilder, TransactionStore, TransactionType, TypeFilter,
    YearlyTotal,
};

use crate::{
    alert::Alert, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// The storage layer reports a missing row as `None` or as zero rows
    /// affected. Route handlers turn those outcomes into this error when the
    /// client should see a 404.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error, including failing to open the
    /// database file.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// A transaction amount of zero or less was submitted from a form.
    #[error("{0} is not a valid amount, the amount must be greater than zero")]
    InvalidAmount(f64),

    /// A transaction was submitted without a category.
    #[error("a category must be selected")]
    MissingCategory,

    /// A transaction was submitted without a transaction type.
    #[error("a transaction type must be selected")]
    MissingTransactionType,

    /// A search was requested without the value to search for, e.g. a
    /// sub-category search with an empty search box.
    #[error("missing search term: {0}")]
    MissingSearchTerm(String),

    /// The start of a date range came after its end.
    #[error("the start date must not be after the end date")]
    InvalidDateRange,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The transactions could not be written as CSV.
    #[error("could not export transactions as CSV: {0}")]
    CsvError(String),

    /// The transactions could not be rendered as a PDF report.
    #[error("could not render the PDF report: {0}")]
    PdfError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as an alert for HTMX requests.
    ///
    /// Validation errors use 400 Bad Request so the user can correct the form
    /// and try again.
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidAmount(amount) => Alert::error(
                "Invalid amount",
                &format!("{amount} is not a valid amount. Amount must be greater than 0."),
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::MissingCategory => {
                Alert::error("Missing category", "Please select a category.")
                    .into_response_with_status(StatusCode::BAD_REQUEST)
            }
            Error::MissingTransactionType => {
                Alert::error("Missing transaction type", "Please select a type.")
                    .into_response_with_status(StatusCode::BAD_REQUEST)
            }
            Error::MissingSearchTerm(term) => {
                Alert::error("Missing search term", &format!("Please enter a {term}."))
                    .into_response_with_status(StatusCode::BAD_REQUEST)
            }
            Error::InvalidDateRange => Alert::error(
                "Invalid date range",
                "The start date must be on or before the end date.",
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::NotFound => Alert::error(
                "Transaction not found",
                "The transaction could not be found. \
                Try refreshing the page to see if it has already been deleted.",
            )
            .into_response_with_status(StatusCode::NOT_FOUND),
            Error::InvalidTimezoneError(timezone) => Alert::error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            )
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
                .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
