use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    Error,
    database_id::TransactionId,
    endpoints,
    transaction::{TransactionStore, form::TransactionForm},
};

/// A route handler for replacing a transaction, redirects to the transactions view on success.
pub async fn edit_transaction_endpoint(
    State(store): State<TransactionStore>,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let transaction = match form.validate() {
        Ok(transaction) => transaction,
        Err(error) => {
            tracing::warn!("Rejected update for transaction {transaction_id}: {error}");
            return error.into_alert_response();
        }
    };

    match store.update(transaction_id, &transaction) {
        Ok(0) => {
            tracing::warn!(
                "Could not update transaction {transaction_id}: update returned zero rows affected"
            );
            Error::NotFound.into_alert_response()
        }
        Ok(_) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => error.into_alert_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use axum_extra::extract::Form;
    use time::macros::date;

    use crate::{
        endpoints,
        test_utils::{TestStore, assert_hx_redirect},
        transaction::{Transaction, TransactionType, form::TransactionForm},
    };

    use super::edit_transaction_endpoint;

    fn form(amount: f64) -> TransactionForm {
        TransactionForm {
            expense_date: date!(2024 - 01 - 01),
            category: Some("Food".to_owned()),
            sub_category: Some("Pizza".to_owned()),
            transaction_type: Some("Expense".to_owned()),
            amount: Some(amount),
        }
    }

    #[tokio::test]
    async fn updates_transaction() {
        let test = TestStore::new();
        let created = test
            .store
            .create(
                Transaction::build(date!(2024 - 01 - 01), "Food", TransactionType::Expense, 500.0)
                    .sub_category("Pizza"),
            )
            .unwrap();

        let response = edit_transaction_endpoint(
            State(test.store.clone()),
            Path(created.id),
            Form(form(750.0)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::TRANSACTIONS_VIEW);
        let got = test.store.get_by_id(created.id).unwrap().unwrap();
        assert_eq!(got.amount, 750.0);
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let test = TestStore::new();

        let response =
            edit_transaction_endpoint(State(test.store.clone()), Path(42), Form(form(1.0))).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_amount_is_bad_request() {
        let test = TestStore::new();
        let created = test
            .store
            .create(Transaction::build(
                date!(2024 - 01 - 01),
                "Food",
                TransactionType::Expense,
                500.0,
            ))
            .unwrap();

        let response = edit_transaction_endpoint(
            State(test.store.clone()),
            Path(created.id),
            Form(form(-3.0)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(test.store.get_by_id(created.id).unwrap(), Some(created));
    }
}
