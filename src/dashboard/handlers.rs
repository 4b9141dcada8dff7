//! HTTP handlers and view rendering for the dashboard page.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    alert::Alert,
    dashboard::{
        aggregation::totals_by_type,
        cards::{SummaryFigures, summary_cards_view},
        charts::{DashboardChart, build_dashboard_charts, charts_script, charts_view},
        tables::yearly_expense_table,
    },
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, base, link,
    },
    navigation::NavBar,
    transaction::{TransactionFilter, TransactionStore, TypeFilter, YearlyTotal, type_filter_radios},
};

const DEFAULT_MIN_AMOUNT: f64 = 0.0;
const DEFAULT_MAX_AMOUNT: f64 = 100_000.0;
const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The dashboard filter as submitted in the query string.
///
/// Any field left out falls back to a default, see [DashboardQuery::resolve].
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardQuery {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub show: TypeFilter,
}

/// A dashboard filter with every default filled in.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DashboardFilter {
    start_date: Date,
    end_date: Date,
    min_amount: f64,
    max_amount: f64,
    show: TypeFilter,
}

impl DashboardQuery {
    /// Fill in the defaults: the first day of the current year up to `today`,
    /// amounts from 0 to 100,000, and every transaction type.
    fn resolve(&self, today: Date) -> DashboardFilter {
        let start_of_year = today.replace_ordinal(1).unwrap_or(today);

        DashboardFilter {
            start_date: self.start_date.unwrap_or(start_of_year),
            end_date: self.end_date.unwrap_or(today),
            min_amount: self.min_amount.unwrap_or(DEFAULT_MIN_AMOUNT),
            max_amount: self.max_amount.unwrap_or(DEFAULT_MAX_AMOUNT),
            show: self.show,
        }
    }
}

impl DashboardFilter {
    fn to_transaction_filter(self) -> Result<TransactionFilter, Error> {
        if self.start_date > self.end_date {
            return Err(Error::InvalidDateRange);
        }

        Ok(TransactionFilter {
            start_date: Some(self.start_date),
            end_date: Some(self.end_date),
            min_amount: Some(self.min_amount),
            max_amount: Some(self.max_amount),
            type_filter: self.show,
        })
    }
}

/// Everything the dashboard shows below the filter form.
struct DashboardData {
    figures: SummaryFigures,
    yearly_totals: Vec<YearlyTotal>,
    /// `None` when no transactions match the filter.
    charts: Option<[DashboardChart; 2]>,
}

/// Display a page with an overview of the user's data.
///
/// A filter with the start date after the end date shows an alert in place of
/// the summary.
pub async fn get_dashboard_page(
    State(store): State<TransactionStore>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let today = store.today()?;
    let filter = query.resolve(today);

    let data = match filter.to_transaction_filter() {
        Ok(transaction_filter) => Ok(build_dashboard_data(&store, &transaction_filter)?),
        Err(error) => {
            tracing::warn!("Invalid dashboard filter {query:?}: {error}");
            Err(Alert::error(
                "Invalid date range",
                "The start date must be on or before the end date.",
            ))
        }
    };

    Ok(dashboard_view(&filter, data).into_response())
}

fn build_dashboard_data(
    store: &TransactionStore,
    filter: &TransactionFilter,
) -> Result<DashboardData, Error> {
    let transactions = store
        .search(filter)
        .inspect_err(|error| tracing::error!("Could not get dashboard transactions: {error}"))?;

    let figures = SummaryFigures {
        spent_today: store.total_today()?,
        spent_this_month: store.total_this_month()?,
        filtered: totals_by_type(&transactions),
    };

    let yearly_totals = store
        .total_by_year()
        .inspect_err(|error| tracing::error!("Could not get yearly totals: {error}"))?;

    let charts = (!transactions.is_empty()).then(|| build_dashboard_charts(&transactions));

    Ok(DashboardData {
        figures,
        yearly_totals,
        charts,
    })
}

fn filter_form(filter: &DashboardFilter) -> Markup {
    html! {
        form
            method="get"
            action=(endpoints::DASHBOARD_VIEW)
            class="w-full p-4 mb-6 space-y-4 bg-white rounded-lg shadow dark:bg-gray-800"
        {
            div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4"
            {
                div
                {
                    label for="start_date" class=(FORM_LABEL_STYLE) { "From" }
                    input
                        type="date"
                        name="start_date"
                        id="start_date"
                        value=(filter.start_date)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="end_date" class=(FORM_LABEL_STYLE) { "To" }
                    input
                        type="date"
                        name="end_date"
                        id="end_date"
                        value=(filter.end_date)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="min_amount" class=(FORM_LABEL_STYLE) { "Minimum amount" }
                    input
                        type="number"
                        name="min_amount"
                        id="min_amount"
                        step="0.01"
                        min="0"
                        value=(filter.min_amount)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="max_amount" class=(FORM_LABEL_STYLE) { "Maximum amount" }
                    input
                        type="number"
                        name="max_amount"
                        id="max_amount"
                        step="0.01"
                        min="0"
                        value=(filter.max_amount)
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            (type_filter_radios(filter.show))

            div class="max-w-xs"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply Filter" }
            }
        }
    }
}

fn no_chart_data_view() -> Markup {
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "add a transaction");

    html!(
        div
            id="no-chart-data"
            class="flex flex-col items-center w-full p-6 mb-6 bg-white rounded-lg shadow dark:bg-gray-800"
        {
            h2 class="text-xl font-bold" { "Nothing here yet..." }

            p
            {
                "Charts will show up here once some transactions match the filter.
                Try widening the filter or " (new_transaction_link) "."
            }
        }
    )
}

fn dashboard_view(filter: &DashboardFilter, data: Result<DashboardData, Alert>) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let mut scripts = Vec::new();

    let summary = match data {
        Err(alert) => alert.into_html(),
        Ok(data) => {
            if let Some(charts) = &data.charts {
                scripts.push(HeadElement::ScriptLink(ECHARTS_URL.to_owned()));
                scripts.push(charts_script(charts));
            }

            html! {
                (summary_cards_view(&data.figures))

                @match &data.charts {
                    Some(charts) => (charts_view(charts)),
                    None => (no_chart_data_view()),
                }

                (yearly_expense_table(&data.yearly_totals))
            }
        }
    };

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            h1 class="w-full text-xl font-bold mb-4" { "Dashboard" }

            (filter_form(filter))

            (summary)
        }
    );

    base("Dashboard", &scripts, &content)
}

#[cfg(test)]
mod tests {
    use axum::extract::State;
    use axum_extra::extract::Query;
    use scraper::Selector;
    use time::{Duration, macros::date};

    use crate::{
        test_utils::{TestStore, assert_status_ok, assert_valid_html, parse_html_document},
        transaction::{Transaction, TransactionType, TypeFilter},
    };

    use super::{DashboardFilter, DashboardQuery, get_dashboard_page};

    #[test]
    fn query_defaults_to_year_to_date() {
        let filter = DashboardQuery::default().resolve(date!(2025 - 06 - 15));

        assert_eq!(
            filter,
            DashboardFilter {
                start_date: date!(2025 - 01 - 01),
                end_date: date!(2025 - 06 - 15),
                min_amount: 0.0,
                max_amount: 100_000.0,
                show: TypeFilter::All,
            }
        );
    }

    #[test]
    fn query_keeps_given_values() {
        let query = DashboardQuery {
            start_date: Some(date!(2024 - 03 - 01)),
            end_date: Some(date!(2024 - 03 - 31)),
            min_amount: Some(10.0),
            max_amount: Some(20.0),
            show: TypeFilter::Income,
        };

        let filter = query.resolve(date!(2025 - 06 - 15));

        assert_eq!(filter.start_date, date!(2024 - 03 - 01));
        assert_eq!(filter.end_date, date!(2024 - 03 - 31));
        assert_eq!(filter.min_amount, 10.0);
        assert_eq!(filter.max_amount, 20.0);
        assert_eq!(filter.show, TypeFilter::Income);
    }

    #[test]
    fn query_parses_from_query_string() {
        let query: DashboardQuery =
            serde_urlencoded::from_str("start_date=2024-01-01&max_amount=50&show=expense").unwrap();

        assert_eq!(query.start_date, Some(date!(2024 - 01 - 01)));
        assert_eq!(query.end_date, None);
        assert_eq!(query.max_amount, Some(50.0));
        assert_eq!(query.show, TypeFilter::Expense);
    }

    #[tokio::test]
    async fn empty_dashboard_has_no_charts() {
        let test = TestStore::new();

        let response = get_dashboard_page(State(test.store.clone()), Query(Default::default()))
            .await
            .unwrap();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        assert!(
            document
                .select(&Selector::parse("#no-chart-data").unwrap())
                .next()
                .is_some()
        );
        assert!(
            document
                .select(&Selector::parse("#charts").unwrap())
                .next()
                .is_none()
        );
    }

    #[tokio::test]
    async fn dashboard_shows_cards_and_charts() {
        let test = TestStore::new();
        let today = test.store.today().unwrap();
        test.store
            .create(Transaction::build(today, "Food", TransactionType::Expense, 12.5))
            .unwrap();
        test.store
            .create(Transaction::build(today, "Salary", TransactionType::Income, 100.0))
            .unwrap();

        let response = get_dashboard_page(State(test.store.clone()), Query(Default::default()))
            .await
            .unwrap();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        for selector in [
            "#summary-cards",
            "#category-share-chart",
            "#daily-trend-chart",
            "#yearly-expenses",
        ] {
            assert!(
                document
                    .select(&Selector::parse(selector).unwrap())
                    .next()
                    .is_some(),
                "missing {selector}"
            );
        }
        let cards = document
            .select(&Selector::parse("#summary-cards").unwrap())
            .next()
            .unwrap()
            .text()
            .collect::<String>();
        assert!(cards.contains("$12.50"), "got {cards}");
        assert!(cards.contains("$100.00"), "got {cards}");
    }

    #[tokio::test]
    async fn filter_excludes_other_types() {
        let test = TestStore::new();
        let today = test.store.today().unwrap();
        test.store
            .create(Transaction::build(today, "Salary", TransactionType::Income, 100.0))
            .unwrap();
        let query = DashboardQuery {
            show: TypeFilter::Expense,
            ..Default::default()
        };

        let response = get_dashboard_page(State(test.store.clone()), Query(query))
            .await
            .unwrap();

        let document = parse_html_document(response).await;
        assert!(
            document
                .select(&Selector::parse("#no-chart-data").unwrap())
                .next()
                .is_some()
        );
    }

    #[tokio::test]
    async fn reversed_date_range_shows_alert() {
        let test = TestStore::new();
        let today = test.store.today().unwrap();
        let query = DashboardQuery {
            start_date: Some(today),
            end_date: Some(today - Duration::days(1)),
            ..Default::default()
        };

        let response = get_dashboard_page(State(test.store.clone()), Query(query))
            .await
            .unwrap();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        let alert = document
            .select(&Selector::parse("#dashboard-content [role=alert]").unwrap())
            .next()
            .expect("alert not found")
            .text()
            .collect::<String>();
        assert!(alert.contains("Invalid date range"), "got {alert}");
    }
}
