//! Dashboard module
//!
//! Provides an overview page with spending totals and charts of the
//! transactions that match a date, amount and type filter.

mod aggregation;
mod cards;
mod charts;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
