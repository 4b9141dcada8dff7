//! The search options for the transactions page and its exports.
//!
//! The same query string drives the results table, the CSV download and the
//! printable report, so all three always show the same rows.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{Transaction, TransactionStore, TypeFilter},
};

/// How to search for transactions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    /// Every transaction.
    #[default]
    All,
    /// A single transaction by its ID.
    Id,
    /// Transactions with exactly this category.
    Category,
    /// Transactions whose sub-category contains some text.
    SubCategory,
    /// Transactions of one type, e.g. "Income".
    Type,
    /// Transactions dated within a range.
    DateRange,
    /// Transactions with an amount within a range.
    AmountRange,
}

impl SearchKind {
    /// Every search kind, in the order they are shown in the search panel.
    pub const ALL: [SearchKind; 7] = [
        SearchKind::All,
        SearchKind::Id,
        SearchKind::Category,
        SearchKind::SubCategory,
        SearchKind::Type,
        SearchKind::DateRange,
        SearchKind::AmountRange,
    ];

    /// The value used in query strings.
    pub fn value(&self) -> &'static str {
        match self {
            SearchKind::All => "all",
            SearchKind::Id => "id",
            SearchKind::Category => "category",
            SearchKind::SubCategory => "sub_category",
            SearchKind::Type => "type",
            SearchKind::DateRange => "date_range",
            SearchKind::AmountRange => "amount_range",
        }
    }

    /// The text shown in the search panel.
    pub fn label(&self) -> &'static str {
        match self {
            SearchKind::All => "View all",
            SearchKind::Id => "By ID",
            SearchKind::Category => "By category",
            SearchKind::SubCategory => "By sub-category",
            SearchKind::Type => "By type",
            SearchKind::DateRange => "By date range",
            SearchKind::AmountRange => "By amount range",
        }
    }

    /// The suffix for export file names, e.g. "Bilancio_Data_cat.csv".
    pub fn export_key(&self) -> &'static str {
        match self {
            SearchKind::All => "all",
            SearchKind::Id => "id",
            SearchKind::Category => "cat",
            SearchKind::SubCategory => "sub_cat",
            SearchKind::Type => "type",
            SearchKind::DateRange => "date_filtered",
            SearchKind::AmountRange => "amount_filtered",
        }
    }
}

/// The query string of the transactions page.
///
/// Only the fields for the chosen [SearchKind] are used, the others are kept
/// so that switching between searches does not clear the inputs.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionsQuery {
    #[serde(default)]
    pub search: SearchKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TransactionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
    /// Which types to keep for the range searches.
    #[serde(default)]
    pub show: TypeFilter,
}

impl TransactionsQuery {
    /// Get the transactions matching the query from `store`.
    ///
    /// # Errors
    /// Returns [Error::MissingSearchTerm] if the input for the chosen search is
    /// empty, [Error::InvalidDateRange] if the start date is after the end
    /// date, or an [Error::SqlError] if there is an SQL error.
    pub fn run(&self, store: &TransactionStore) -> Result<Vec<Transaction>, Error> {
        match self.search {
            SearchKind::All => store.list_all(),
            SearchKind::Id => {
                let id = self
                    .id
                    .ok_or_else(|| Error::MissingSearchTerm("transaction ID".to_owned()))?;

                Ok(store.get_by_id(id)?.into_iter().collect())
            }
            SearchKind::Category => {
                let category = required_text(&self.category, "category")?;
                store.find_by_category(category)
            }
            SearchKind::SubCategory => {
                let sub_category = required_text(&self.sub_category, "sub-category")?;
                store.find_by_subcategory(sub_category)
            }
            SearchKind::Type => {
                let transaction_type = required_text(&self.transaction_type, "transaction type")?;
                store.find_by_type(transaction_type)
            }
            SearchKind::DateRange => {
                let (Some(start_date), Some(end_date)) = (self.start_date, self.end_date) else {
                    return Err(Error::MissingSearchTerm("start and end date".to_owned()));
                };

                if start_date > end_date {
                    return Err(Error::InvalidDateRange);
                }

                let transactions = store.filter_by_date_range(start_date, end_date)?;
                Ok(self.keep_shown_types(transactions))
            }
            SearchKind::AmountRange => {
                let (Some(min_amount), Some(max_amount)) = (self.min_amount, self.max_amount)
                else {
                    return Err(Error::MissingSearchTerm("minimum and maximum amount".to_owned()));
                };

                let transactions = store.filter_by_amount_range(min_amount, max_amount)?;
                Ok(self.keep_shown_types(transactions))
            }
        }
    }

    /// The query encoded for a URL, without the leading '?'.
    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self).unwrap_or_else(|error| {
            tracing::error!("could not encode transactions query {self:?}: {error}");
            String::new()
        })
    }

    /// Append the query to `path`, e.g. "/transactions/export.csv?search=all".
    pub fn url_for(&self, path: &str) -> String {
        let query_string = self.to_query_string();

        if query_string.is_empty() {
            path.to_owned()
        } else {
            format!("{path}?{query_string}")
        }
    }

    fn keep_shown_types(&self, transactions: Vec<Transaction>) -> Vec<Transaction> {
        transactions
            .into_iter()
            .filter(|transaction| self.show.matches(&transaction.transaction_type))
            .collect()
    }
}

fn required_text<'a>(text: &'a Option<String>, name: &str) -> Result<&'a str, Error> {
    match text.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(Error::MissingSearchTerm(name.to_owned())),
    }
}
