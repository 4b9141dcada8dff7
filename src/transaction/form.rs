use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
    transaction::core::{CATEGORIES, Transaction, TransactionBuilder, TransactionType},
};

/// The values the transaction form fields start with.
pub struct TransactionFormDefaults<'a> {
    pub expense_date: Date,
    pub category: Option<&'a str>,
    pub sub_category: Option<&'a str>,
    pub transaction_type: TransactionType,
    pub amount: Option<f64>,
    pub autofocus_amount: bool,
}

impl<'a> TransactionFormDefaults<'a> {
    /// Blank fields for a new transaction dated `today`.
    pub fn new_transaction(today: Date) -> Self {
        Self {
            expense_date: today,
            category: None,
            sub_category: None,
            transaction_type: TransactionType::Expense,
            amount: None,
            autofocus_amount: false,
        }
    }

    /// Fields filled in with the values of `transaction`.
    pub fn from_transaction(transaction: &'a Transaction) -> Self {
        Self {
            expense_date: transaction.expense_date,
            category: Some(&transaction.category),
            sub_category: Some(&transaction.sub_category),
            transaction_type: TransactionType::parse_loose(&transaction.transaction_type)
                .unwrap_or(TransactionType::Expense),
            amount: Some(transaction.amount),
            autofocus_amount: true,
        }
    }
}

pub fn transaction_form_fields(defaults: &TransactionFormDefaults<'_>) -> Markup {
    let is_expense = matches!(defaults.transaction_type, TransactionType::Expense);
    let amount_str = defaults.amount.map(|amount| format!("{amount:.2}"));
    // Stored categories outside the suggested set must still be selectable.
    let custom_category = defaults
        .category
        .filter(|category| !CATEGORIES.iter().any(|known| known == category));

    html! {
        div
        {
            label
                for="expense_date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="expense_date"
                id="expense_date"
                type="date"
                value=(defaults.expense_date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category"
                id="category"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" selected[defaults.category.is_none()] { "Select..." }

                @if let Some(category) = custom_category {
                    option value=(category) selected { (category) }
                }

                @for category in CATEGORIES {
                    option value=(category) selected[defaults.category == Some(category)] {
                        (category)
                    }
                }
            }
        }

        div
        {
            label
                for="sub_category"
                class=(FORM_LABEL_STYLE)
            {
                "Sub Category"
            }

            input
                name="sub_category"
                id="sub_category"
                type="text"
                placeholder="Type here..."
                value=[defaults.sub_category]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Type" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                @for (transaction_type, checked) in [
                    (TransactionType::Expense, is_expense),
                    (TransactionType::Income, !is_expense),
                ] {
                    @let id = format!("transaction-type-{}", transaction_type.as_str().to_lowercase());

                    div class="flex flex-1 items-center gap-3"
                    {
                        input
                            name="transaction_type"
                            id=(id)
                            type="radio"
                            value=(transaction_type.as_str())
                            checked[checked]
                            required
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for=(id) class=(FORM_RADIO_LABEL_STYLE)
                        {
                            (transaction_type.as_str())
                        }
                    }
                }
            }
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                min="0.01"
                placeholder="0.00"
                required
                value=[amount_str.as_deref()]
                autofocus[defaults.autofocus_amount]
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

/// The form data for creating or editing a transaction.
///
/// Empty inputs arrive as `None` and are rejected by [TransactionForm::validate].
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The date when the transaction occurred.
    pub expense_date: Date,
    /// One of the suggested categories.
    pub category: Option<String>,
    /// Free text narrowing down the category.
    #[serde(default)]
    pub sub_category: Option<String>,
    /// "Expense" or "Income".
    pub transaction_type: Option<String>,
    /// The amount of money spent or earned.
    pub amount: Option<f64>,
}

impl TransactionForm {
    /// Check the form and turn it into a transaction ready for storage.
    ///
    /// # Errors
    /// Returns [Error::MissingCategory] if no category was selected,
    /// [Error::MissingTransactionType] if the type is missing or unknown, or
    /// [Error::InvalidAmount] if the amount is missing or not greater than zero.
    pub fn validate(self) -> Result<TransactionBuilder, Error> {
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .ok_or(Error::MissingCategory)?;

        let transaction_type = self
            .transaction_type
            .as_deref()
            .and_then(TransactionType::parse_loose)
            .ok_or(Error::MissingTransactionType)?;

        let amount = self.amount.unwrap_or(0.0);
        if amount.is_nan() || amount <= 0.0 {
            return Err(Error::InvalidAmount(amount));
        }

        let sub_category = self.sub_category.as_deref().map(str::trim).unwrap_or_default();

        Ok(
            Transaction::build(self.expense_date, category, transaction_type, amount)
                .sub_category(sub_category),
        )
    }
}
