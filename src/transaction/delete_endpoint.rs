use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{
    alert::Alert,
    database_id::TransactionId,
    transaction::TransactionStore,
};

/// A route handler for deleting a transaction.
///
/// On success the response is empty so that htmx replaces the table row with nothing.
pub async fn delete_transaction_endpoint(
    State(store): State<TransactionStore>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match store.delete(transaction_id) {
        Ok(0) => {
            tracing::warn!("Tried to delete transaction {transaction_id} which does not exist");
            Alert::error(
                "Could not delete transaction",
                "The transaction could not be found. \
                Try refreshing the page to see if the transaction has already been deleted.",
            )
            .into_response_with_status(StatusCode::NOT_FOUND)
        }
        // The status code has to be 200 OK or HTMX will not delete the table row.
        Ok(_) => Html("").into_response(),
        Err(_) => Alert::error(
            "Could not delete transaction",
            "An unexpected error occurred. Try again later or check the logs on the server.",
        )
        .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
    }
}
