//! The data access layer for transactions.
//!
//! [TransactionStore] turns typed calls into parameterized SQL against the
//! `expense` table. Every call opens its own connection and closes it before
//! returning, whether the call succeeds or fails. Writes run inside an SQL
//! transaction that is committed on success and rolled back when dropped on
//! error.

use rusqlite::{Connection, OptionalExtension, params, params_from_iter, types::Value};
use serde::Serialize;
use time::{Date, Duration};

use crate::{
    Error,
    database_id::TransactionId,
    db::Database,
    timezone::local_today,
    transaction::core::{
        TRANSACTION_COLUMNS, Transaction, TransactionBuilder, TypeFilter, map_transaction_row,
    },
};

/// The number of rows changed by an update or delete.
pub type RowsAffected = usize;

/// The total amount spent in one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyTotal {
    /// The calendar year, e.g. 2024.
    pub year: i32,
    /// The sum of expenses dated in `year`.
    pub total: f64,
}

/// A combination of optional filters for [TransactionStore::search].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionFilter {
    /// Keep transactions on or after this date.
    pub start_date: Option<Date>,
    /// Keep transactions on or before this date.
    pub end_date: Option<Date>,
    /// Keep transactions with an amount of at least this much.
    pub min_amount: Option<f64>,
    /// Keep transactions with an amount of at most this much.
    pub max_amount: Option<f64>,
    /// Which transaction types to keep.
    pub type_filter: TypeFilter,
}

/// Reads and writes transactions in the application database.
///
/// Sums only count rows whose type is exactly "Expense", while
/// [TransactionStore::find_by_type] ignores case and surrounding whitespace.
#[derive(Debug, Clone)]
pub struct TransactionStore {
    database: Database,
    local_timezone: String,
}

impl TransactionStore {
    /// Create a store for `database`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Pacific/Auckland". It decides which date counts as today for the
    /// daily and monthly totals.
    pub fn new(database: Database, local_timezone: &str) -> Self {
        Self {
            database,
            local_timezone: local_timezone.to_owned(),
        }
    }

    /// The current date in the store's local timezone.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if the timezone name is not valid.
    pub fn today(&self) -> Result<Date, Error> {
        local_today(&self.local_timezone).ok_or_else(|| {
            tracing::error!("Invalid timezone {}", self.local_timezone);
            Error::InvalidTimezoneError(self.local_timezone.clone())
        })
    }

    /// Insert a new transaction and return it with its assigned ID.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the database cannot be reached or the
    /// row violates a constraint.
    pub fn create(&self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        tracing::info!(
            "Adding: {}, {}, {}, {}, {}",
            builder.expense_date,
            builder.category,
            builder.sub_category,
            builder.transaction_type,
            builder.amount
        );

        let transaction = self
            .write(|connection| {
                let id = connection.query_row(
                    "INSERT INTO expense (expense_date, category, sub_category, transaction_type, amount)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     RETURNING id",
                    params![
                        builder.expense_date,
                        builder.category,
                        builder.sub_category,
                        builder.transaction_type,
                        builder.amount,
                    ],
                    |row| row.get(0),
                )?;

                Ok(builder.finalise(id))
            })
            .inspect_err(|error| tracing::error!("could not add transaction: {error}"))?;

        tracing::info!("Transaction {} added successfully", transaction.id);

        Ok(transaction)
    }

    /// Get every transaction, newest first.
    ///
    /// Transactions on the same date are ordered by ID, highest first.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn list_all(&self) -> Result<Vec<Transaction>, Error> {
        self.read(|connection| {
            query_transactions(
                connection,
                &format!(
                    "SELECT {TRANSACTION_COLUMNS} FROM expense
                     ORDER BY expense_date DESC, id DESC"
                ),
                [],
            )
        })
    }

    /// Get the transaction with `id`.
    ///
    /// A missing transaction is not an error, it is returned as `None`.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn get_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, Error> {
        self.read(|connection| {
            connection
                .prepare(&format!(
                    "SELECT {TRANSACTION_COLUMNS} FROM expense WHERE id = :id"
                ))?
                .query_row(&[(":id", &id)], map_transaction_row)
                .optional()
                .map_err(Error::from)
        })
    }

    /// Get the transactions whose category is exactly `category`, newest first.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn find_by_category(&self, category: &str) -> Result<Vec<Transaction>, Error> {
        self.read(|connection| {
            query_transactions(
                connection,
                &format!(
                    "SELECT {TRANSACTION_COLUMNS} FROM expense
                     WHERE category = ?1
                     ORDER BY expense_date DESC, id DESC"
                ),
                [category],
            )
        })
    }

    /// Get the transactions of type `transaction_type`, newest first.
    ///
    /// The match ignores case and surrounding whitespace, so " expense "
    /// finds rows stored as "Expense".
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn find_by_type(&self, transaction_type: &str) -> Result<Vec<Transaction>, Error> {
        self.read(|connection| {
            query_transactions(
                connection,
                &format!(
                    "SELECT {TRANSACTION_COLUMNS} FROM expense
                     WHERE LOWER(TRIM(transaction_type)) = LOWER(TRIM(?1))
                     ORDER BY expense_date DESC, id DESC"
                ),
                [transaction_type],
            )
        })
    }

    /// Get the transactions whose sub-category contains `substring`, newest first.
    ///
    /// The wildcard characters `%` and `_` in `substring` match literally.
    /// Like SQLite's `LIKE`, ASCII letters match regardless of case.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn find_by_subcategory(&self, substring: &str) -> Result<Vec<Transaction>, Error> {
        let pattern = contains_pattern(substring);

        self.read(|connection| {
            query_transactions(
                connection,
                &format!(
                    "SELECT {TRANSACTION_COLUMNS} FROM expense
                     WHERE sub_category LIKE ?1 ESCAPE '\\'
                     ORDER BY expense_date DESC, id DESC"
                ),
                [pattern],
            )
        })
    }

    /// Get the transactions dated between `start` and `end` inclusive, newest first.
    ///
    /// If `start` is after `end` the result is empty.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn filter_by_date_range(&self, start: Date, end: Date) -> Result<Vec<Transaction>, Error> {
        self.read(|connection| {
            query_transactions(
                connection,
                &format!(
                    "SELECT {TRANSACTION_COLUMNS} FROM expense
                     WHERE expense_date BETWEEN ?1 AND ?2
                     ORDER BY expense_date DESC, id DESC"
                ),
                [start, end],
            )
        })
    }

    /// Get the transactions with an amount between `min` and `max` inclusive,
    /// largest amount first.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn filter_by_amount_range(&self, min: f64, max: f64) -> Result<Vec<Transaction>, Error> {
        self.read(|connection| {
            query_transactions(
                connection,
                &format!(
                    "SELECT {TRANSACTION_COLUMNS} FROM expense
                     WHERE amount BETWEEN ?1 AND ?2
                     ORDER BY amount DESC, id DESC"
                ),
                [min, max],
            )
        })
    }

    /// Get the transactions that pass every filter in `filter`, newest first.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn search(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, Error> {
        let mut conditions = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        if let Some(start_date) = filter.start_date {
            params.push(Value::Text(start_date.to_string()));
            conditions.push(format!("expense_date >= ?{}", params.len()));
        }

        if let Some(end_date) = filter.end_date {
            params.push(Value::Text(end_date.to_string()));
            conditions.push(format!("expense_date <= ?{}", params.len()));
        }

        if let Some(min_amount) = filter.min_amount {
            params.push(Value::Real(min_amount));
            conditions.push(format!("amount >= ?{}", params.len()));
        }

        if let Some(max_amount) = filter.max_amount {
            params.push(Value::Real(max_amount));
            conditions.push(format!("amount <= ?{}", params.len()));
        }

        if let Some(accepted_types) = filter.type_filter.accepted_types() {
            let mut placeholders = Vec::with_capacity(accepted_types.len());
            for accepted_type in accepted_types {
                params.push(Value::Text(accepted_type.to_owned()));
                placeholders.push(format!("?{}", params.len()));
            }
            conditions.push(format!(
                "LOWER(TRIM(transaction_type)) IN ({})",
                placeholders.join(", ")
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM expense {where_clause}
             ORDER BY expense_date DESC, id DESC"
        );
        tracing::debug!("Searching transactions: {query}");

        self.read(|connection| query_transactions(connection, &query, params_from_iter(params)))
    }

    /// The total spent today in the local timezone.
    ///
    /// Returns `0.0` if nothing was spent.
    ///
    /// # Errors
    /// Returns an [Error::InvalidTimezoneError] if the local timezone is not
    /// valid, or an [Error::SqlError] if there is an SQL error.
    pub fn total_today(&self) -> Result<f64, Error> {
        self.total_for_day(self.today()?)
    }

    /// The total spent from the first of this month up to and including today.
    ///
    /// Returns `0.0` if nothing was spent.
    ///
    /// # Errors
    /// Returns an [Error::InvalidTimezoneError] if the local timezone is not
    /// valid, or an [Error::SqlError] if there is an SQL error.
    pub fn total_this_month(&self) -> Result<f64, Error> {
        self.total_for_month_to_date(self.today()?)
    }

    /// The total spent on `date`.
    ///
    /// Only rows with the type "Expense" (exact case) are counted.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn total_for_day(&self, date: Date) -> Result<f64, Error> {
        self.read(|connection| {
            connection
                .query_row(
                    "SELECT COALESCE(SUM(amount), 0.0) FROM expense
                     WHERE expense_date = ?1 AND transaction_type = 'Expense'",
                    [date],
                    |row| row.get(0),
                )
                .map_err(Error::from)
        })
    }

    /// The total spent from the first day of `date`'s month up to and including `date`.
    ///
    /// Only rows with the type "Expense" (exact case) are counted.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn total_for_month_to_date(&self, date: Date) -> Result<f64, Error> {
        let first_of_month = date - Duration::days(i64::from(date.day()) - 1);

        self.read(|connection| {
            connection
                .query_row(
                    "SELECT COALESCE(SUM(amount), 0.0) FROM expense
                     WHERE expense_date BETWEEN ?1 AND ?2
                     AND transaction_type = 'Expense'",
                    [first_of_month, date],
                    |row| row.get(0),
                )
                .map_err(Error::from)
        })
    }

    /// The total spent in each calendar year, latest year first.
    ///
    /// Years without any expenses are left out.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn total_by_year(&self) -> Result<Vec<YearlyTotal>, Error> {
        self.read(|connection| {
            connection
                .prepare(
                    "SELECT CAST(strftime('%Y', expense_date) AS INTEGER) AS year, SUM(amount)
                     FROM expense
                     WHERE transaction_type = 'Expense'
                     GROUP BY year
                     ORDER BY year DESC",
                )?
                .query_map([], |row| {
                    Ok(YearlyTotal {
                        year: row.get(0)?,
                        total: row.get(1)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()
                .map_err(Error::from)
        })
    }

    /// Replace every field of the transaction with `id`.
    ///
    /// Updating an ID that does not exist is not an error, it changes zero rows.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn update(
        &self,
        id: TransactionId,
        transaction: &TransactionBuilder,
    ) -> Result<RowsAffected, Error> {
        tracing::info!("Updating transaction {id}: {transaction:?}");

        self.write(|connection| {
            connection
                .execute(
                    "UPDATE expense
                     SET expense_date = ?1,
                         category = ?2,
                         sub_category = ?3,
                         transaction_type = ?4,
                         amount = ?5
                     WHERE id = ?6",
                    params![
                        transaction.expense_date,
                        transaction.category,
                        transaction.sub_category,
                        transaction.transaction_type,
                        transaction.amount,
                        id,
                    ],
                )
                .map_err(Error::from)
        })
        .inspect_err(|error| tracing::error!("could not update transaction {id}: {error}"))
    }

    /// Delete the transaction with `id`.
    ///
    /// Deleting an ID that does not exist is not an error, it changes zero rows.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn delete(&self, id: TransactionId) -> Result<RowsAffected, Error> {
        tracing::info!("Deleting transaction {id}");

        self.write(|connection| {
            connection
                .execute("DELETE FROM expense WHERE id = :id", &[(":id", &id)])
                .map_err(Error::from)
        })
        .inspect_err(|error| tracing::error!("could not delete transaction {id}: {error}"))
    }

    /// Run `operation` on a new connection. The connection is closed when
    /// this function returns.
    fn read<T>(
        &self,
        operation: impl FnOnce(&Connection) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let connection = self.database.connect()?;
        operation(&connection)
    }

    /// Run `operation` inside an SQL transaction on a new connection.
    ///
    /// The SQL transaction is committed if `operation` succeeds, otherwise it
    /// is rolled back when dropped.
    fn write<T>(
        &self,
        operation: impl FnOnce(&Connection) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let mut connection = self.database.connect()?;
        let sql_transaction = connection.transaction()?;
        let result = operation(&sql_transaction)?;
        sql_transaction.commit()?;

        Ok(result)
    }
}

fn query_transactions<P: rusqlite::Params>(
    connection: &Connection,
    query: &str,
    params: P,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(query)?
        .query_map(params, map_transaction_row)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// Build a `LIKE` pattern that matches any text containing `substring`.
///
/// The pattern must be used with `ESCAPE '\'`.
fn contains_pattern(substring: &str) -> String {
    let escaped = substring
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");

    format!("%{escaped}%")
}
