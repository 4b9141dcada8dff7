//! Defines the core data models and the table schema for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::database_id::TransactionId;

// ============================================================================
// MODELS
// ============================================================================

/// The categories offered by the transaction forms.
///
/// The database does not enforce these, any text is a valid category.
pub const CATEGORIES: [&str; 8] = [
    "Food",
    "Travel",
    "Bills",
    "Shopping",
    "Entertainment",
    "Salary",
    "Business",
    "Others",
];

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// When the transaction happened.
    pub expense_date: Date,
    /// The broad category, e.g. "Food" or "Salary".
    pub category: String,
    /// Free text narrowing down the category, e.g. "Pizza". May be empty.
    pub sub_category: String,
    /// Whether money was spent or earned, usually "Expense" or "Income".
    pub transaction_type: String,
    /// The amount of money spent or earned. Always stored as a positive
    /// number, the direction is given by `transaction_type`.
    pub amount: f64,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        expense_date: Date,
        category: &str,
        transaction_type: TransactionType,
        amount: f64,
    ) -> TransactionBuilder {
        TransactionBuilder {
            expense_date,
            category: category.to_owned(),
            sub_category: String::new(),
            transaction_type: transaction_type.as_str().to_owned(),
            amount,
        }
    }
}

/// The fields of a transaction that has not been stored yet.
///
/// This is also the JSON payload for creating and updating expenses through
/// the API, so the transaction type is free text here.
///
/// # Examples
///
/// ```ignore
/// use time::macros::date;
///
/// use crate::transaction::{Transaction, TransactionType};
///
/// let pizza = Transaction::build(date!(2024 - 01 - 01), "Food", TransactionType::Expense, 500.0)
///     .sub_category("Pizza");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionBuilder {
    /// The date when the transaction occurred.
    pub expense_date: Date,
    /// The broad category, e.g. "Food" or "Salary".
    pub category: String,
    /// Free text narrowing down the category.
    #[serde(default)]
    pub sub_category: String,
    /// Usually "Expense" or "Income". Stored as given.
    pub transaction_type: String,
    /// The amount of money spent or earned.
    pub amount: f64,
}

impl TransactionBuilder {
    /// Set the sub-category for the transaction.
    pub fn sub_category(mut self, sub_category: &str) -> Self {
        self.sub_category = sub_category.to_owned();
        self
    }

    /// Attach `id` to the fields to get a stored transaction.
    pub fn finalise(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            expense_date: self.expense_date,
            category: self.category,
            sub_category: self.sub_category,
            transaction_type: self.transaction_type,
            amount: self.amount,
        }
    }
}

/// The two kinds of transaction offered by the forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money was spent.
    Expense,
    /// Money was earned.
    Income,
}

impl TransactionType {
    /// The text stored in the `transaction_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "Expense",
            TransactionType::Income => "Income",
        }
    }

    /// Parse stored text, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for anything other than "expense" or "income".
    pub fn parse_loose(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "expense" => Some(TransactionType::Expense),
            "income" => Some(TransactionType::Income),
            _ => None,
        }
    }
}

/// Which transaction types a search should keep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFilter {
    /// Keep every transaction.
    #[default]
    All,
    /// Keep expenses, including rows recorded as "debit".
    Expense,
    /// Keep income, including rows recorded as "credit".
    Income,
}

impl TypeFilter {
    /// Every filter, in the order they are shown in the UI.
    pub const ALL: [TypeFilter; 3] = [TypeFilter::All, TypeFilter::Expense, TypeFilter::Income];

    /// The lowercase type names that this filter keeps, or `None` if it keeps everything.
    pub(crate) fn accepted_types(&self) -> Option<[&'static str; 2]> {
        match self {
            TypeFilter::All => None,
            TypeFilter::Expense => Some(["expense", "debit"]),
            TypeFilter::Income => Some(["income", "credit"]),
        }
    }

    /// Whether a transaction with `transaction_type` passes the filter.
    ///
    /// Matching ignores case and surrounding whitespace.
    pub fn matches(&self, transaction_type: &str) -> bool {
        match self.accepted_types() {
            None => true,
            Some(accepted) => {
                let normalised = transaction_type.trim().to_lowercase();
                accepted.contains(&normalised.as_str())
            }
        }
    }

    /// The label shown on the radio buttons.
    pub fn label(&self) -> &'static str {
        match self {
            TypeFilter::All => "All",
            TypeFilter::Expense => "Expense",
            TypeFilter::Income => "Income",
        }
    }

    /// The value used in query strings.
    pub fn value(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Expense => "expense",
            TypeFilter::Income => "income",
        }
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns of the `expense` table in the order expected by [map_transaction_row].
pub(crate) const TRANSACTION_COLUMNS: &str =
    "id, expense_date, category, sub_category, transaction_type, amount";

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                expense_date TEXT NOT NULL,
                category TEXT NOT NULL,
                sub_category TEXT NOT NULL DEFAULT '',
                transaction_type TEXT NOT NULL,
                amount REAL NOT NULL
                )",
        (),
    )?;

    // Most queries sort newest first.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_date_id ON expense(expense_date, id);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let expense_date = row.get(1)?;
    let category = row.get(2)?;
    let sub_category = row.get(3)?;
    let transaction_type = row.get(4)?;
    let amount = row.get(5)?;

    Ok(Transaction {
        id,
        expense_date,
        category,
        sub_category,
        transaction_type,
        amount,
    })
}

#[cfg(test)]
mod tests {
    use super::{TransactionType, TypeFilter};

    #[test]
    fn type_filter_matches_loosely() {
        assert!(TypeFilter::Expense.matches("Expense"));
        assert!(TypeFilter::Expense.matches("  expense "));
        assert!(TypeFilter::Expense.matches("DEBIT"));
        assert!(!TypeFilter::Expense.matches("Income"));

        assert!(TypeFilter::Income.matches("income"));
        assert!(TypeFilter::Income.matches("Credit"));
        assert!(!TypeFilter::Income.matches("expense"));

        assert!(TypeFilter::All.matches("anything at all"));
    }

    #[test]
    fn parse_transaction_type() {
        assert_eq!(
            TransactionType::parse_loose(" Expense"),
            Some(TransactionType::Expense)
        );
        assert_eq!(
            TransactionType::parse_loose("INCOME"),
            Some(TransactionType::Income)
        );
        assert_eq!(TransactionType::parse_loose("debit"), None);
    }
}
