//! The JSON API for expenses and spending summaries.
//!
//! Failures are reported as `{"detail": "..."}` with a 404 or 500 status.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

mod expenses;
mod summary;

pub use expenses::{
    create_expense, delete_expense, filter_expenses_by_amount,
    filter_expenses_by_date, get_expense_by_id, get_expenses_by_category,
    get_expenses_by_subcategory, get_expenses_by_type, list_expenses, update_expense,
};
pub use summary::{get_total_this_month, get_total_today, get_totals_by_year};

/// The message sent when an expense ID does not exist.
const EXPENSE_NOT_FOUND: &str = "Expense not found";

/// A failed API request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    detail: &'static str,
}

impl ApiError {
    /// The requested expense does not exist.
    fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: EXPENSE_NOT_FOUND,
        }
    }

    /// The request could not be completed, e.g. the database was unavailable.
    fn internal(detail: &'static str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}

/// A confirmation that a write succeeded.
#[derive(Debug, Serialize)]
struct MessageBody {
    message: &'static str,
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::test_utils::read_body_text;

    use super::ApiError;

    #[tokio::test]
    async fn not_found_has_detail() {
        let response = ApiError::not_found().into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            read_body_text(response).await,
            r#"{"detail":"Expense not found"}"#
        );
    }

    #[tokio::test]
    async fn internal_error_has_detail() {
        let response = ApiError::internal("Update failed").into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            read_body_text(response).await,
            r#"{"detail":"Update failed"}"#
        );
    }
}
