//! The page for listing, searching and exporting transactions.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    Error,
    alert::Alert,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
    transaction::{
        CATEGORIES, Transaction, TransactionStore, TransactionType, TypeFilter,
        query::{SearchKind, TransactionsQuery},
    },
};

const MAX_SUB_CATEGORY_GRAPHEMES: usize = 32;

/// Renders the transactions page for the search described by the query string.
///
/// Searches with missing or invalid input show an alert above the search panel
/// instead of results.
pub async fn get_transactions_page(
    State(store): State<TransactionStore>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let results = match query.run(&store) {
        Ok(transactions) => Ok(transactions),
        Err(error @ (Error::MissingSearchTerm(_) | Error::InvalidDateRange)) => {
            tracing::warn!("Invalid transaction search {query:?}: {error}");
            Err(search_error_alert(&error))
        }
        Err(error) => return Err(error),
    };

    Ok(transactions_view(&query, results).into_response())
}

fn search_error_alert(error: &Error) -> Alert {
    match error {
        Error::MissingSearchTerm(term) => {
            Alert::error("Missing search term", &format!("Please enter a {term}."))
        }
        Error::InvalidDateRange => Alert::error(
            "Invalid date range",
            "The start date must be on or before the end date.",
        ),
        error => Alert::error("Search failed", &error.to_string()),
    }
}

fn transactions_view(
    query: &TransactionsQuery,
    results: Result<Vec<Transaction>, Alert>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl space-y-6"
            {
                div class="flex justify-between items-center"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                    {
                        "New Transaction"
                    }
                }

                (search_panel(query))

                @match results {
                    Err(alert) => (alert.into_html()),
                    Ok(transactions) => (results_view(query, &transactions)),
                }
            }
        }
    };

    base("Transactions", &[], &content)
}

fn search_panel(query: &TransactionsQuery) -> Markup {
    let selected_type = query
        .transaction_type
        .as_deref()
        .and_then(TransactionType::parse_loose);

    html! {
        form
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            class="w-full p-4 space-y-4 bg-white rounded shadow dark:bg-gray-800"
        {
            div
            {
                label for="search" class=(FORM_LABEL_STYLE) { "Search" }

                select name="search" id="search" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for kind in SearchKind::ALL {
                        option value=(kind.value()) selected[kind == query.search] { (kind.label()) }
                    }
                }
            }

            div class="grid gap-4 md:grid-cols-2 lg:grid-cols-4"
            {
                div
                {
                    label for="id" class=(FORM_LABEL_STYLE) { "Transaction ID" }
                    input
                        name="id"
                        id="id"
                        type="number"
                        min="1"
                        step="1"
                        placeholder="Enter ID to search"
                        value=[query.id]
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                    select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for category in CATEGORIES {
                            option
                                value=(category)
                                selected[query.category.as_deref() == Some(category)]
                            {
                                (category)
                            }
                        }
                    }
                }

                div
                {
                    label for="sub_category" class=(FORM_LABEL_STYLE) { "Sub Category" }
                    input
                        name="sub_category"
                        id="sub_category"
                        type="text"
                        placeholder="e.g. Pizza, Uber, Rent"
                        value=[query.sub_category.as_deref()]
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="transaction_type" class=(FORM_LABEL_STYLE) { "Type" }
                    select name="transaction_type" id="transaction_type" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for transaction_type in [TransactionType::Expense, TransactionType::Income] {
                            option
                                value=(transaction_type.as_str())
                                selected[selected_type == Some(transaction_type)]
                            {
                                (transaction_type.as_str())
                            }
                        }
                    }
                }

                div
                {
                    label for="start_date" class=(FORM_LABEL_STYLE) { "Start Date" }
                    input
                        name="start_date"
                        id="start_date"
                        type="date"
                        value=[query.start_date]
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="end_date" class=(FORM_LABEL_STYLE) { "End Date" }
                    input
                        name="end_date"
                        id="end_date"
                        type="date"
                        value=[query.end_date]
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="min_amount" class=(FORM_LABEL_STYLE) { "Min Amount" }
                    input
                        name="min_amount"
                        id="min_amount"
                        type="number"
                        min="0"
                        step="0.01"
                        placeholder="0.00"
                        value=[query.min_amount]
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="max_amount" class=(FORM_LABEL_STYLE) { "Max Amount" }
                    input
                        name="max_amount"
                        id="max_amount"
                        type="number"
                        min="0"
                        step="0.01"
                        placeholder="100000.00"
                        value=[query.max_amount]
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            (type_filter_radios(query.show))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Search" }
        }
    }
}

/// The All/Expense/Income radio buttons shared by the search panel and the dashboard.
pub(crate) fn type_filter_radios(selected: TypeFilter) -> Markup {
    html! {
        fieldset class="flex flex-wrap items-center gap-4"
        {
            legend class=(FORM_LABEL_STYLE) { "Show" }

            @for filter in TypeFilter::ALL {
                @let id = format!("show-{}", filter.value());

                div class="flex items-center gap-2"
                {
                    input
                        type="radio"
                        name="show"
                        id=(id)
                        value=(filter.value())
                        checked[filter == selected];
                    label for=(id) class="text-sm" { (filter.label()) }
                }
            }
        }
    }
}

fn results_view(query: &TransactionsQuery, transactions: &[Transaction]) -> Markup {
    if transactions.is_empty() {
        return html! {
            p class="p-4 text-yellow-800 bg-yellow-50 rounded dark:bg-gray-800 dark:text-yellow-300"
            {
                "No Data Found."
            }
        };
    }

    html! {
        div class="flex flex-wrap items-center justify-between gap-4"
        {
            p class="text-sm" { "Found " (transactions.len()) " records." }

            div class="flex gap-2"
            {
                a
                    href=(query.url_for(endpoints::TRANSACTIONS_CSV))
                    class=(BUTTON_SECONDARY_STYLE)
                    download
                {
                    "Download CSV"
                }

                a
                    href=(query.url_for(endpoints::TRANSACTIONS_REPORT))
                    class=(BUTTON_SECONDARY_STYLE)
                    download
                {
                    "Download PDF"
                }
            }
        }

        div class="overflow-x-auto shadow rounded"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "ID" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Sub Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        (transaction_row_view(transaction))
                    }
                }
            }
        }
    }
}

fn transaction_row_view(transaction: &Transaction) -> Markup {
    let (sub_category, tooltip) = format_sub_category(&transaction.sub_category);
    let edit_url = format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id);
    let delete_url = format_endpoint(endpoints::TRANSACTION, transaction.id);
    let amount_class = if TypeFilter::Income.matches(&transaction.transaction_type) {
        "text-green-700 dark:text-green-400"
    } else {
        "text-gray-900 dark:text-white"
    };

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
        {
            td class=(TABLE_CELL_STYLE) { (transaction.id) }
            td class=(TABLE_CELL_STYLE) { time datetime=(transaction.expense_date) { (transaction.expense_date) } }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class=(TABLE_CELL_STYLE) title=[tooltip] { (sub_category) }
            td class=(TABLE_CELL_STYLE) { (transaction.transaction_type) }
            td class={ "px-6 py-4 text-right " (amount_class) } { (format_currency(transaction.amount)) }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                    button
                        hx-delete=(delete_url)
                        hx-confirm={
                            "Are you sure you want to delete transaction #"
                            (transaction.id) "? This cannot be undone."
                        }
                        hx-target="closest tr"
                        hx-target-error="#alert-container"
                        hx-swap="delete"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        }
    }
}

fn format_sub_category(sub_category: &str) -> (String, Option<&str>) {
    let length = sub_category.graphemes(true).count();

    if length <= MAX_SUB_CATEGORY_GRAPHEMES {
        (sub_category.to_owned(), None)
    } else {
        let truncated: String = sub_category
            .graphemes(true)
            .take(MAX_SUB_CATEGORY_GRAPHEMES - 3)
            .collect();
        (truncated + "...", Some(sub_category))
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::State;
    use axum_extra::extract::Query;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        test_utils::{TestStore, assert_status_ok, assert_valid_html, parse_html_document},
        transaction::{
            Transaction, TransactionType, TypeFilter,
            query::{SearchKind, TransactionsQuery},
        },
    };

    use super::{MAX_SUB_CATEGORY_GRAPHEMES, format_sub_category, get_transactions_page};

    fn seed(test: &TestStore) {
        test.store
            .create(
                Transaction::build(date!(2024 - 01 - 01), "Food", TransactionType::Expense, 500.0)
                    .sub_category("Pizza"),
            )
            .unwrap();
        test.store
            .create(Transaction::build(
                date!(2024 - 01 - 02),
                "Salary",
                TransactionType::Income,
                3000.0,
            ))
            .unwrap();
    }

    #[tokio::test]
    async fn lists_all_transactions() {
        let test = TestStore::new();
        seed(&test);

        let response = get_transactions_page(State(test.store.clone()), Query(Default::default()))
            .await
            .unwrap();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let rows = document
            .select(&Selector::parse("tr[data-transaction-row]").unwrap())
            .count();
        assert_eq!(rows, 2);

        let delete_urls = document
            .select(&Selector::parse("button[hx-delete]").unwrap())
            .filter_map(|button| button.value().attr("hx-delete"))
            .collect::<Vec<_>>();
        assert_eq!(delete_urls, vec!["/transactions/2", "/transactions/1"]);
    }

    #[tokio::test]
    async fn export_links_carry_query() {
        let test = TestStore::new();
        seed(&test);
        let query = TransactionsQuery {
            search: SearchKind::Category,
            category: Some("Food".to_owned()),
            ..Default::default()
        };

        let response = get_transactions_page(State(test.store.clone()), Query(query))
            .await
            .unwrap();

        let document = parse_html_document(response).await;
        let hrefs = document
            .select(&Selector::parse("a[href^='/transactions/']").unwrap())
            .filter_map(|link| link.value().attr("href"))
            .filter(|href| href.contains('?'))
            .collect::<Vec<_>>();
        assert_eq!(
            hrefs,
            vec![
                "/transactions/export.csv?search=category&category=Food&show=all",
                "/transactions/report.pdf?search=category&category=Food&show=all",
            ]
        );
    }

    #[tokio::test]
    async fn empty_results_show_no_data_message() {
        let test = TestStore::new();
        seed(&test);
        let query = TransactionsQuery {
            search: SearchKind::DateRange,
            start_date: Some(date!(2023 - 01 - 01)),
            end_date: Some(date!(2023 - 12 - 31)),
            show: TypeFilter::Income,
            ..Default::default()
        };

        let response = get_transactions_page(State(test.store.clone()), Query(query))
            .await
            .unwrap();

        let document = parse_html_document(response).await;
        let text = document.root_element().text().collect::<String>();
        assert!(text.contains("No Data Found."), "got {text:?}");
    }

    #[tokio::test]
    async fn missing_search_term_shows_alert() {
        let test = TestStore::new();
        let query = TransactionsQuery {
            search: SearchKind::SubCategory,
            ..Default::default()
        };

        let response = get_transactions_page(State(test.store.clone()), Query(query))
            .await
            .unwrap();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        let alert = document
            .select(&Selector::parse("#alert").unwrap())
            .next()
            .expect("want an alert for the missing search term");
        let text = alert.text().collect::<String>();
        assert!(text.contains("Please enter a sub-category."), "got {text:?}");
    }

    #[test]
    fn long_sub_categories_are_truncated() {
        let long = "a".repeat(MAX_SUB_CATEGORY_GRAPHEMES + 1);

        let (text, tooltip) = format_sub_category(&long);

        assert_eq!(text.len(), MAX_SUB_CATEGORY_GRAPHEMES);
        assert!(text.ends_with("..."));
        assert_eq!(tooltip, Some(long.as_str()));
        assert_eq!(format_sub_category("Pizza"), ("Pizza".to_owned(), None));
    }
}
