//! Alert system for displaying error messages to users.
//!
//! Alerts are swapped into the `#alert-container` element of the base page
//! and can be dismissed by the user.

use maud::{Markup, html};

/// A dismissable message shown at the bottom of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// Something went wrong.
    Error { message: String, details: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Error { message, details } => (
                "flex items-start gap-3 p-4 mb-4 text-red-800 rounded-lg \
                bg-red-50 dark:bg-gray-800 dark:text-red-400 shadow-lg",
                message,
                details,
            ),
        };

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div class=(container_style) role="alert"
                {
                    div class="flex-1 text-sm"
                    {
                        p class="font-medium" { (message) }

                        @if !details.is_empty()
                        {
                            p { (details) }
                        }
                    }

                    button
                        type="button"
                        class="ms-auto text-sm font-semibold"
                        aria-label="Close"
                        onclick="this.closest('#alert-container').classList.add('hidden')"
                    {
                        "×"
                    }
                }
            }
        }
    }
}
