//! Transaction data aggregation for the dashboard cards and charts.

use std::collections::{BTreeMap, HashMap};

use time::Date;

use crate::transaction::{Transaction, TransactionType};

/// The income and expense totals of a set of transactions.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(super) struct TypeTotals {
    pub income: f64,
    pub expense: f64,
}

/// Sums the amounts of `transactions` by transaction type.
///
/// Types are compared ignoring case and surrounding whitespace. Rows with any
/// other type are left out of both totals.
pub(super) fn totals_by_type(transactions: &[Transaction]) -> TypeTotals {
    let mut totals = TypeTotals::default();

    for transaction in transactions {
        match TransactionType::parse_loose(&transaction.transaction_type) {
            Some(TransactionType::Income) => totals.income += transaction.amount,
            Some(TransactionType::Expense) => totals.expense += transaction.amount,
            None => {}
        }
    }

    totals
}

/// Sums the amounts of `transactions` per category.
///
/// # Returns
/// Pairs of category and total, largest total first. Ties are ordered by name.
pub(super) fn totals_by_category(transactions: &[Transaction]) -> Vec<(String, f64)> {
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for transaction in transactions {
        *totals.entry(transaction.category.as_str()).or_insert(0.0) += transaction.amount;
    }

    let mut totals: Vec<_> = totals
        .into_iter()
        .map(|(category, total)| (category.to_owned(), total))
        .collect();
    totals.sort_by(|(a_name, a_total), (b_name, b_total)| {
        b_total.total_cmp(a_total).then_with(|| a_name.cmp(b_name))
    });

    totals
}

/// Sums the amounts of `transactions` per day, in chronological order.
pub(super) fn totals_by_day(transactions: &[Transaction]) -> Vec<(Date, f64)> {
    let mut totals = BTreeMap::new();

    for transaction in transactions {
        *totals.entry(transaction.expense_date).or_insert(0.0) += transaction.amount;
    }

    totals.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::transaction::{Transaction, TransactionType};

    use super::{TypeTotals, totals_by_category, totals_by_day, totals_by_type};

    fn transaction(
        date: time::Date,
        category: &str,
        transaction_type: TransactionType,
        amount: f64,
    ) -> Transaction {
        Transaction::build(date, category, transaction_type, amount).finalise(1)
    }

    #[test]
    fn totals_by_type_sums_each_type() {
        let mut odd_case = transaction(date!(2024 - 01 - 03), "Food", TransactionType::Expense, 5.0);
        odd_case.transaction_type = " expense ".to_owned();
        let mut unknown = transaction(date!(2024 - 01 - 03), "Misc", TransactionType::Expense, 99.0);
        unknown.transaction_type = "Transfer".to_owned();
        let transactions = vec![
            transaction(date!(2024 - 01 - 01), "Food", TransactionType::Expense, 10.0),
            transaction(date!(2024 - 01 - 02), "Salary", TransactionType::Income, 100.0),
            odd_case,
            unknown,
        ];

        let totals = totals_by_type(&transactions);

        assert_eq!(
            totals,
            TypeTotals {
                income: 100.0,
                expense: 15.0
            }
        );
    }

    #[test]
    fn totals_by_type_of_nothing_is_zero() {
        assert_eq!(totals_by_type(&[]), TypeTotals::default());
    }

    #[test]
    fn totals_by_category_orders_largest_first() {
        let transactions = vec![
            transaction(date!(2024 - 01 - 01), "Food", TransactionType::Expense, 10.0),
            transaction(date!(2024 - 01 - 02), "Travel", TransactionType::Expense, 40.0),
            transaction(date!(2024 - 01 - 03), "Food", TransactionType::Expense, 20.0),
            transaction(date!(2024 - 01 - 04), "Bills", TransactionType::Expense, 30.0),
        ];

        let totals = totals_by_category(&transactions);

        assert_eq!(
            totals,
            vec![
                ("Travel".to_owned(), 40.0),
                ("Bills".to_owned(), 30.0),
                ("Food".to_owned(), 30.0),
            ]
        );
    }

    #[test]
    fn totals_by_day_is_chronological() {
        let transactions = vec![
            transaction(date!(2024 - 01 - 03), "Food", TransactionType::Expense, 1.0),
            transaction(date!(2024 - 01 - 01), "Food", TransactionType::Expense, 2.0),
            transaction(date!(2024 - 01 - 03), "Rent", TransactionType::Expense, 3.0),
        ];

        let totals = totals_by_day(&transactions);

        assert_eq!(
            totals,
            vec![(date!(2024 - 01 - 01), 2.0), (date!(2024 - 01 - 03), 4.0)]
        );
    }
}
