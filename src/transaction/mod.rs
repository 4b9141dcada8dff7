//! Transaction management for the expense tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - [TransactionStore], the data access layer for the `expense` table
//! - View handlers for the transaction pages and their CSV and PDF exports

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod export;
mod form;
mod query;
mod report;
mod store;
mod transactions_page;

pub use core::{
    CATEGORIES, Transaction, TransactionBuilder, TransactionType, TypeFilter,
    create_transaction_table,
};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_create_transaction_page;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use export::{get_transactions_csv, get_transactions_report};
pub use store::{TransactionFilter, TransactionStore, YearlyTotal};
pub use transactions_page::get_transactions_page;

pub(crate) use transactions_page::type_filter_radios;
