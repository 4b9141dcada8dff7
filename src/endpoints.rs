//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/transactions/{transaction_id}', use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The page with summary cards and charts.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for listing and searching transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page for editing an existing transaction.
pub const EDIT_TRANSACTION_VIEW: &str = "/transactions/{transaction_id}/edit";
/// The route to update or delete a transaction from the HTML pages.
pub const TRANSACTION: &str = "/transactions/{transaction_id}";
/// The route to download the current search results as CSV.
pub const TRANSACTIONS_CSV: &str = "/transactions/export.csv";
/// The route to download the current search results as a PDF report.
pub const TRANSACTIONS_REPORT: &str = "/transactions/report.pdf";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The JSON API route to create and list expenses.
pub const EXPENSES_API: &str = "/api/expenses";
/// The JSON API route to update or delete an expense.
pub const EXPENSE_API: &str = "/api/expenses/{expense_id}";
/// The JSON API route to get an expense by its ID.
pub const EXPENSE_BY_ID_API: &str = "/api/expenses/id/{expense_id}";
/// The JSON API route to search expenses by category.
pub const EXPENSES_BY_CATEGORY_API: &str = "/api/expenses/category/{category}";
/// The JSON API route to search expenses by sub-category.
pub const EXPENSES_BY_SUBCATEGORY_API: &str = "/api/expenses/subcategory/{sub_category}";
/// The JSON API route to search expenses by transaction type.
pub const EXPENSES_BY_TYPE_API: &str = "/api/expenses/type/{transaction_type}";
/// The JSON API route to filter expenses by a date range.
pub const EXPENSES_DATE_RANGE_API: &str = "/api/expenses/filter/date_range";
/// The JSON API route to filter expenses by an amount range.
pub const EXPENSES_AMOUNT_RANGE_API: &str = "/api/expenses/filter/amount_range";
/// The JSON API route for the total spent today.
pub const SUMMARY_TODAY_API: &str = "/api/summary/today";
/// The JSON API route for the total spent this month.
pub const SUMMARY_MONTH_API: &str = "/api/summary/month";
/// The JSON API route for the total spent per year.
pub const SUMMARY_YEAR_API: &str = "/api/summary/year-wise";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/transactions/{transaction_id}', '{transaction_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
