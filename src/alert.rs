//! Alert messages shown to the user after submitting a form.
//!
//! Forms target the `#alert-container` element (see [crate::html::base]) with
//! `hx-target-error`, so an alert returned with an error status is swapped
//! into the page without losing what the user typed.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

/// A dismissable message box.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// Something went wrong and the user may need to act.
    Error {
        /// The headline of the alert.
        message: String,
        /// What went wrong and how to fix it.
        details: String,
    },
}

impl Alert {
    /// Create an error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Alert::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    pub fn into_html(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Error { message, details } => (
                "p-4 mb-4 text-red-800 border border-red-300 rounded-lg \
                bg-red-50 dark:bg-gray-800 dark:text-red-400 dark:border-red-800",
                message,
                details,
            ),
        };

        // Template adapted from https://flowbite.com/docs/components/alerts/
        html! {
            div
                id="alert"
                role="alert"
                class=(container_style)
            {
                div class="flex items-center justify-between"
                {
                    h3 class="text-lg font-medium" { (message) }

                    button
                        type="button"
                        aria-label="Close"
                        class="ms-auto -mx-1.5 -my-1.5 rounded-lg p-1.5 inline-flex
                            items-center justify-center h-8 w-8 hover:opacity-75"
                        onclick="this.closest('#alert').remove()"
                    {
                        "✕"
                    }
                }

                @if !details.is_empty() {
                    div class="mt-2 text-sm" { (details) }
                }
            }
        }
    }

    /// Render the alert as an HTML fragment with `status`.
    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, Html(self.into_html().into_string())).into_response()
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_response_with_status(StatusCode::OK)
    }
}
