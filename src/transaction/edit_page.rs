//! Defines the route handler for the page for editing a transaction.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    database_id::TransactionId,
    endpoints::{self, format_endpoint},
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, loading_spinner},
    navigation::NavBar,
    transaction::{
        Transaction, TransactionStore,
        form::{TransactionFormDefaults, transaction_form_fields},
    },
};

fn edit_transaction_view(transaction: &Transaction) -> Markup {
    let nav_bar = NavBar::new(endpoints::EDIT_TRANSACTION_VIEW).into_html();
    let update_route = format_endpoint(endpoints::TRANSACTION, transaction.id);
    let spinner = loading_spinner();
    let fields = transaction_form_fields(&TransactionFormDefaults::from_transaction(transaction));

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-put=(update_route)
                hx-target-error="#alert-container"
                hx-indicator="#indicator"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Edit Transaction #" (transaction.id) }

                (fields)

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span id="indicator" class="inline htmx-indicator" { (spinner) }
                    " Update Transaction"
                }
            }
        }
    };

    base("Edit Transaction", &[], &content)
}

/// Renders the page for editing a transaction.
///
/// Responds with the 404 page if the transaction does not exist.
pub async fn get_edit_transaction_page(
    State(store): State<TransactionStore>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Response, Error> {
    let transaction = store.get_by_id(transaction_id)?.ok_or_else(|| {
        tracing::warn!("Tried to edit transaction {transaction_id} which does not exist");
        Error::NotFound
    })?;

    Ok(edit_transaction_view(&transaction).into_response())
}
