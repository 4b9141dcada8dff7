//! Handlers for the spending totals.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::{
    api::ApiError,
    transaction::{TransactionStore, YearlyTotal},
};

const SUMMARY_FAILED: &str = "Failed to calculate total";

#[derive(Debug, Serialize)]
pub struct TodayTotal {
    total_expense_today: f64,
}

#[derive(Debug, Serialize)]
pub struct MonthTotal {
    total_expense_this_month: f64,
}

/// A route handler for the total spent today, zero if nothing was spent.
pub async fn get_total_today(
    State(store): State<TransactionStore>,
) -> Result<Json<TodayTotal>, ApiError> {
    store
        .total_today()
        .map(|total_expense_today| Json(TodayTotal { total_expense_today }))
        .map_err(|error| {
            tracing::error!("Could not get today's total: {error}");
            ApiError::internal(SUMMARY_FAILED)
        })
}

/// A route handler for the total spent so far this month, zero if nothing was spent.
pub async fn get_total_this_month(
    State(store): State<TransactionStore>,
) -> Result<Json<MonthTotal>, ApiError> {
    store
        .total_this_month()
        .map(|total_expense_this_month| {
            Json(MonthTotal {
                total_expense_this_month,
            })
        })
        .map_err(|error| {
            tracing::error!("Could not get this month's total: {error}");
            ApiError::internal(SUMMARY_FAILED)
        })
}

/// A route handler for the total spent in each year, most recent year first.
pub async fn get_totals_by_year(
    State(store): State<TransactionStore>,
) -> Result<Json<Vec<YearlyTotal>>, ApiError> {
    store.total_by_year().map(Json).map_err(|error| {
        tracing::error!("Could not get yearly totals: {error}");
        ApiError::internal(SUMMARY_FAILED)
    })
}
