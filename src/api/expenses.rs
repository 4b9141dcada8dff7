//! Handlers for creating, reading, updating and deleting expenses.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    api::{ApiError, MessageBody},
    database_id::TransactionId,
    transaction::{Transaction, TransactionBuilder, TransactionStore},
};

/// The query string for [filter_expenses_by_date], both dates inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRangeQuery {
    /// The earliest date to include.
    pub start_date: Date,
    /// The latest date to include.
    pub end_date: Date,
}

/// The query string for [filter_expenses_by_amount], both bounds inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountRangeQuery {
    /// The smallest amount to include.
    pub min_amount: f64,
    /// The largest amount to include.
    pub max_amount: f64,
}

#[derive(Debug, Serialize)]
struct CreatedBody {
    message: &'static str,
    id: TransactionId,
}

type ExpenseList = Result<Json<Vec<Transaction>>, ApiError>;

fn list_or_500(
    result: Result<Vec<Transaction>, crate::Error>,
    description: &str,
) -> ExpenseList {
    result
        .map(|transactions| {
            tracing::info!("Returning {} expenses for {description}", transactions.len());
            Json(transactions)
        })
        .map_err(|error| {
            tracing::error!("Could not get expenses for {description}: {error}");
            ApiError::internal("Failed to fetch expenses")
        })
}

/// A route handler for adding an expense, responds with 201 and the new ID.
pub async fn create_expense(
    State(store): State<TransactionStore>,
    Json(expense): Json<TransactionBuilder>,
) -> Response {
    tracing::info!("Adding expense {expense:?}");

    match store.create(expense) {
        Ok(transaction) => {
            tracing::info!("Expense {} added successfully", transaction.id);
            (
                StatusCode::CREATED,
                Json(CreatedBody {
                    message: "Expense added successfully",
                    id: transaction.id,
                }),
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("Error adding expense: {error}");
            ApiError::internal("Failed to add expense").into_response()
        }
    }
}

/// A route handler for listing every expense, newest first.
pub async fn list_expenses(State(store): State<TransactionStore>) -> ExpenseList {
    list_or_500(store.list_all(), "all expenses")
}

/// A route handler for getting a single expense, responds with 404 if it does not exist.
pub async fn get_expense_by_id(
    State(store): State<TransactionStore>,
    Path(expense_id): Path<TransactionId>,
) -> Result<Json<Transaction>, ApiError> {
    match store.get_by_id(expense_id) {
        Ok(Some(transaction)) => Ok(Json(transaction)),
        Ok(None) => {
            tracing::warn!("Expense ID {expense_id} not found");
            Err(ApiError::not_found())
        }
        Err(error) => {
            tracing::error!("Could not get expense {expense_id}: {error}");
            Err(ApiError::internal("Failed to fetch expenses"))
        }
    }
}

/// A route handler for the expenses with exactly `category`.
pub async fn get_expenses_by_category(
    State(store): State<TransactionStore>,
    Path(category): Path<String>,
) -> ExpenseList {
    list_or_500(
        store.find_by_category(&category),
        &format!("category {category:?}"),
    )
}

/// A route handler for the expenses whose sub-category contains `sub_category`.
pub async fn get_expenses_by_subcategory(
    State(store): State<TransactionStore>,
    Path(sub_category): Path<String>,
) -> ExpenseList {
    list_or_500(
        store.find_by_subcategory(&sub_category),
        &format!("sub-category {sub_category:?}"),
    )
}

/// A route handler for the expenses of one transaction type, ignoring case.
pub async fn get_expenses_by_type(
    State(store): State<TransactionStore>,
    Path(transaction_type): Path<String>,
) -> ExpenseList {
    list_or_500(
        store.find_by_type(&transaction_type),
        &format!("type {transaction_type:?}"),
    )
}

/// A route handler for the expenses dated within a range.
///
/// A range with the start after the end matches nothing.
pub async fn filter_expenses_by_date(
    State(store): State<TransactionStore>,
    Query(range): Query<DateRangeQuery>,
) -> ExpenseList {
    list_or_500(
        store.filter_by_date_range(range.start_date, range.end_date),
        &format!("dates {} to {}", range.start_date, range.end_date),
    )
}

/// A route handler for the expenses with an amount within a range, largest first.
pub async fn filter_expenses_by_amount(
    State(store): State<TransactionStore>,
    Query(range): Query<AmountRangeQuery>,
) -> ExpenseList {
    list_or_500(
        store.filter_by_amount_range(range.min_amount, range.max_amount),
        &format!("amounts {} to {}", range.min_amount, range.max_amount),
    )
}

/// A route handler for replacing an expense, responds with 404 if it does not exist.
pub async fn update_expense(
    State(store): State<TransactionStore>,
    Path(expense_id): Path<TransactionId>,
    Json(expense): Json<TransactionBuilder>,
) -> Result<Json<impl Serialize>, ApiError> {
    tracing::info!("Updating expense {expense_id} with {expense:?}");

    match store.update(expense_id, &expense) {
        Ok(0) => {
            tracing::warn!("Expense ID {expense_id} not found for update");
            Err(ApiError::not_found())
        }
        Ok(_) => {
            tracing::info!("Expense ID {expense_id} updated successfully");
            Ok(Json(MessageBody {
                message: "Expense updated successfully",
            }))
        }
        Err(error) => {
            tracing::error!("Error updating expense {expense_id}: {error}");
            Err(ApiError::internal("Update failed"))
        }
    }
}

/// A route handler for deleting an expense, responds with 404 if it does not exist.
pub async fn delete_expense(
    State(store): State<TransactionStore>,
    Path(expense_id): Path<TransactionId>,
) -> Result<Json<impl Serialize>, ApiError> {
    tracing::info!("Deleting expense {expense_id}");

    match store.delete(expense_id) {
        Ok(0) => {
            tracing::warn!("Expense ID {expense_id} not found for deletion");
            Err(ApiError::not_found())
        }
        Ok(_) => {
            tracing::info!("Expense ID {expense_id} deleted successfully");
            Ok(Json(MessageBody {
                message: "Expense deleted successfully",
            }))
        }
        Err(error) => {
            tracing::error!("Error deleting expense {expense_id}: {error}");
            Err(ApiError::internal("Delete failed"))
        }
    }
}
