//! Downloads of search results: a CSV file and a PDF report.

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;

use crate::{
    Error,
    transaction::{
        Transaction, TransactionStore, query::TransactionsQuery, report::transactions_to_pdf,
    },
};

/// The column names of the CSV export.
const COLUMNS: [&str; 6] = [
    "id",
    "expense_date",
    "category",
    "sub_category",
    "transaction_type",
    "amount",
];

/// Write `transactions` as CSV with a header row.
///
/// # Errors
/// Returns [Error::CsvError] if a record cannot be written.
pub fn transactions_to_csv(transactions: &[Transaction]) -> Result<String, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(COLUMNS)
        .map_err(|error| Error::CsvError(error.to_string()))?;

    for transaction in transactions {
        writer
            .write_record([
                transaction.id.to_string(),
                transaction.expense_date.to_string(),
                transaction.category.clone(),
                transaction.sub_category.clone(),
                transaction.transaction_type.clone(),
                format!("{:.2}", transaction.amount),
            ])
            .map_err(|error| Error::CsvError(error.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::CsvError(error.to_string()))
}

/// A route handler that downloads the results of a transaction search as CSV.
///
/// The file is named after the kind of search, e.g. `Bilancio_Data_all.csv`.
pub async fn get_transactions_csv(
    State(store): State<TransactionStore>,
    Query(query): Query<TransactionsQuery>,
) -> Response {
    let transactions = match query.run(&store) {
        Ok(transactions) => transactions,
        Err(error) => return error.into_alert_response(),
    };

    let csv = match transactions_to_csv(&transactions) {
        Ok(csv) => csv,
        Err(error) => {
            tracing::error!("Could not export {} transactions: {error}", transactions.len());
            return error.into_alert_response();
        }
    };

    let file_name = format!("Bilancio_Data_{}.csv", query.search.export_key());

    attachment("text/csv; charset=utf-8", &file_name, csv)
}

fn attachment(content_type: &'static str, file_name: &str, body: impl IntoResponse) -> Response {
    let content_disposition = HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(content_type)),
            (header::CONTENT_DISPOSITION, content_disposition),
        ],
        body,
    )
        .into_response()
}

/// A route handler that downloads the results of a transaction search as a PDF report.
///
/// The file is named after the kind of search, e.g. `Bilancio_Report_all.pdf`.
pub async fn get_transactions_report(
    State(store): State<TransactionStore>,
    Query(query): Query<TransactionsQuery>,
) -> Response {
    let transactions = match query.run(&store) {
        Ok(transactions) => transactions,
        Err(error) => return error.into_alert_response(),
    };

    let generated_on = match store.today() {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let pdf = match transactions_to_pdf(&transactions, generated_on) {
        Ok(pdf) => pdf,
        Err(error) => {
            tracing::error!(
                "Could not render a report of {} transactions: {error}",
                transactions.len()
            );
            return error.into_alert_response();
        }
    };

    let file_name = format!("Bilancio_Report_{}.pdf", query.search.export_key());

    attachment("application/pdf", &file_name, pdf)
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, extract::State, http::StatusCode};
    use axum_extra::extract::Query;
    use time::macros::date;

    use crate::{
        test_utils::{
            TestStore, assert_content_type, assert_status_ok, get_header, read_body_text,
        },
        transaction::{
            Transaction, TransactionType,
            query::{SearchKind, TransactionsQuery},
        },
    };

    use super::{get_transactions_csv, get_transactions_report, transactions_to_csv};

    #[test]
    fn csv_has_header_and_one_line_per_transaction() {
        let transactions = vec![
            Transaction::build(date!(2024 - 01 - 01), "Food", TransactionType::Expense, 500.0)
                .sub_category("Pizza, large")
                .finalise(1),
            Transaction::build(date!(2024 - 01 - 02), "Salary", TransactionType::Income, 3000.5)
                .finalise(2),
        ];

        let csv = transactions_to_csv(&transactions).unwrap();

        assert_eq!(
            csv,
            "id,expense_date,category,sub_category,transaction_type,amount\n\
            1,2024-01-01,Food,\"Pizza, large\",Expense,500.00\n\
            2,2024-01-02,Salary,,Income,3000.50\n"
        );
    }

    #[test]
    fn csv_of_nothing_is_just_the_header() {
        let csv = transactions_to_csv(&[]).unwrap();

        assert_eq!(
            csv,
            "id,expense_date,category,sub_category,transaction_type,amount\n"
        );
    }

    #[tokio::test]
    async fn csv_download_is_an_attachment() {
        let test = TestStore::new();
        test.store
            .create(Transaction::build(
                date!(2024 - 01 - 01),
                "Food",
                TransactionType::Expense,
                12.5,
            ))
            .unwrap();
        let query = TransactionsQuery {
            search: SearchKind::Category,
            category: Some("Food".to_owned()),
            ..Default::default()
        };

        let response = get_transactions_csv(State(test.store.clone()), Query(query)).await;

        assert_status_ok(&response);
        assert_content_type(&response, "text/csv; charset=utf-8");
        assert_eq!(
            get_header(&response, "content-disposition"),
            "attachment; filename=\"Bilancio_Data_cat.csv\""
        );
        let body = read_body_text(response).await;
        assert_eq!(body.lines().count(), 2);
    }

    #[tokio::test]
    async fn csv_download_rejects_incomplete_search() {
        let test = TestStore::new();
        let query = TransactionsQuery {
            search: SearchKind::Id,
            ..Default::default()
        };

        let response = get_transactions_csv(State(test.store.clone()), Query(query)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn report_download_is_a_pdf_attachment() {
        let test = TestStore::new();
        test.store
            .create(Transaction::build(
                date!(2024 - 01 - 01),
                "Food",
                TransactionType::Expense,
                12.5,
            ))
            .unwrap();
        let query = TransactionsQuery {
            search: SearchKind::Category,
            category: Some("Food".to_owned()),
            ..Default::default()
        };

        let response = get_transactions_report(State(test.store.clone()), Query(query)).await;

        assert_status_ok(&response);
        assert_content_type(&response, "application/pdf");
        assert_eq!(
            get_header(&response, "content-disposition"),
            "attachment; filename=\"Bilancio_Report_cat.pdf\""
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn report_download_rejects_reversed_date_range() {
        let test = TestStore::new();
        let query = TransactionsQuery {
            search: SearchKind::DateRange,
            start_date: Some(date!(2024 - 02 - 01)),
            end_date: Some(date!(2024 - 01 - 01)),
            ..Default::default()
        };

        let response = get_transactions_report(State(test.store.clone()), Query(query)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
