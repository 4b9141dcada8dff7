//! Application router configuration for the HTML pages and the JSON API.

use axum::{
    Router,
    response::Redirect,
    routing::{get, put},
};

use crate::{
    AppState,
    api::{
        create_expense, delete_expense, filter_expenses_by_amount, filter_expenses_by_date,
        get_expense_by_id, get_expenses_by_category, get_expenses_by_subcategory,
        get_expenses_by_type, get_total_this_month, get_total_today, get_totals_by_year,
        list_expenses, update_expense,
    },
    dashboard::get_dashboard_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_create_transaction_page, get_edit_transaction_page, get_transactions_csv,
        get_transactions_page, get_transactions_report,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let view_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(
            endpoints::TRANSACTIONS_VIEW,
            get(get_transactions_page).post(create_transaction_endpoint),
        )
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_create_transaction_page),
        )
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .route(
            endpoints::TRANSACTION,
            put(edit_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(endpoints::TRANSACTIONS_CSV, get(get_transactions_csv))
        .route(endpoints::TRANSACTIONS_REPORT, get(get_transactions_report))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(
            endpoints::EXPENSES_API,
            get(list_expenses).post(create_expense),
        )
        .route(
            endpoints::EXPENSE_API,
            put(update_expense).delete(delete_expense),
        )
        .route(endpoints::EXPENSE_BY_ID_API, get(get_expense_by_id))
        .route(
            endpoints::EXPENSES_BY_CATEGORY_API,
            get(get_expenses_by_category),
        )
        .route(
            endpoints::EXPENSES_BY_SUBCATEGORY_API,
            get(get_expenses_by_subcategory),
        )
        .route(endpoints::EXPENSES_BY_TYPE_API, get(get_expenses_by_type))
        .route(
            endpoints::EXPENSES_DATE_RANGE_API,
            get(filter_expenses_by_date),
        )
        .route(
            endpoints::EXPENSES_AMOUNT_RANGE_API,
            get(filter_expenses_by_amount),
        )
        .route(endpoints::SUMMARY_TODAY_API, get(get_total_today))
        .route(endpoints::SUMMARY_MONTH_API, get(get_total_this_month))
        .route(endpoints::SUMMARY_YEAR_API, get(get_totals_by_year));

    view_routes
        .merge(api_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::DASHBOARD_VIEW);
    }
}

#[cfg(test)]
mod router_tests {
    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::{
        endpoints::{self, format_endpoint},
        test_utils::{TestStore, read_body_text},
    };

    use super::build_router;

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, String) {
        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();

        (status, read_body_text(response).await)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn pizza() -> Value {
        json!({
            "expense_date": "2024-01-01",
            "category": "Food",
            "sub_category": "Pizza",
            "transaction_type": "Expense",
            "amount": 500.0
        })
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let test = TestStore::new();
        let router = build_router(test.app_state());

        let (status, _) = send(&router, get("/does/not/exist")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn pages_render() {
        let test = TestStore::new();
        let router = build_router(test.app_state());

        for uri in [
            endpoints::DASHBOARD_VIEW,
            endpoints::TRANSACTIONS_VIEW,
            endpoints::NEW_TRANSACTION_VIEW,
            endpoints::TRANSACTIONS_CSV,
            endpoints::TRANSACTIONS_REPORT,
        ] {
            let (status, _) = send(&router, get(uri)).await;
            assert_eq!(status, StatusCode::OK, "GET {uri}");
        }
    }

    #[tokio::test]
    async fn expense_lifecycle_through_api() {
        let test = TestStore::new();
        let router = build_router(test.app_state());

        let (status, body) = send(
            &router,
            json_request(Method::POST, endpoints::EXPENSES_API, pizza()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = serde_json::from_str::<Value>(&body).unwrap()["id"]
            .as_i64()
            .unwrap();

        let (status, body) = send(
            &router,
            get("/api/expenses/filter/amount_range?min_amount=400&max_amount=600"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap()[0]["id"], id);

        let mut updated = pizza();
        updated["amount"] = json!(750.0);
        let (status, _) = send(
            &router,
            json_request(
                Method::PUT,
                &format_endpoint(endpoints::EXPENSE_API, id),
                updated,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&router, get(&format_endpoint(endpoints::EXPENSE_BY_ID_API, id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap()["amount"], 750.0);

        let delete = Request::builder()
            .method(Method::DELETE)
            .uri(format_endpoint(endpoints::EXPENSE_API, id))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&router, delete).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&router, get(&format_endpoint(endpoints::EXPENSE_BY_ID_API, id))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            serde_json::from_str::<Value>(&body).unwrap(),
            json!({"detail": "Expense not found"})
        );
    }

    #[tokio::test]
    async fn date_range_requires_both_dates() {
        let test = TestStore::new();
        let router = build_router(test.app_state());

        let (status, _) = send(
            &router,
            get("/api/expenses/filter/date_range?start_date=2024-01-01"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn summary_routes_respond() {
        let test = TestStore::new();
        let router = build_router(test.app_state());

        let (status, body) = send(&router, get(endpoints::SUMMARY_TODAY_API)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_str::<Value>(&body).unwrap(),
            json!({"total_expense_today": 0.0})
        );

        let (status, body) = send(&router, get(endpoints::SUMMARY_YEAR_API)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!([]));
    }
}
