//! The page with the details another person needs to send money to this account.

use std::sync::Arc;

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    BankConfig, Error, SessionHandle, endpoints,
    html::{BUTTON_PRIMARY_STYLE, CARD_STYLE, PAGE_CONTAINER_STYLE, base, page_header},
    navigation::NavBar,
};

/// Display the account holder, account number, routing number and bank name.
pub async fn get_receive_page(
    State(config): State<Arc<BankConfig>>,
    Extension(session): Extension<SessionHandle>,
) -> Result<Response, Error> {
    let account_holder = {
        let entry = session.lock()?;
        entry
            .bank
            .user()
            .map(|user| user.full_name())
            .ok_or(Error::NotAuthenticated)?
    };

    let nav_bar = NavBar::new(endpoints::RECEIVE_VIEW, &config.bank.name);
    let content = html! {
        (nav_bar.into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            (page_header("Receive Money", endpoints::DASHBOARD_VIEW))

            section class={(CARD_STYLE) " text-center"}
            {
                div class="w-48 h-48 mx-auto mb-6 bg-gray-100 dark:bg-gray-700 rounded-2xl flex items-center justify-center text-gray-400"
                {
                    "QR"
                }
                p class="text-sm text-gray-500 mb-2" { "Scan this QR code to send money to" }
                p id="account-holder" class="font-bold text-lg" { (account_holder) }
            }

            section id="account-details" class={(CARD_STYLE) " space-y-3"}
            {
                h2 class="font-semibold text-lg" { "Account Details" }

                (detail_row("Account Number", &config.bank.account_number, true))
                (detail_row("Routing Number", &config.bank.routing_number, true))
                (detail_row("Bank Name", &config.bank.name, false))
            }

            button type="button" class=(BUTTON_PRIMARY_STYLE) { "Share Account Details" }
        }
    };

    Ok(base("Receive Money", &[], &content).into_response())
}

fn detail_row(label: &str, value: &str, can_copy: bool) -> Markup {
    html! {
        div class="flex items-center justify-between p-4 bg-gray-50 dark:bg-gray-700 rounded-xl"
        {
            div
            {
                p class="text-xs text-gray-500 dark:text-gray-400" { (label) }
                p class="font-mono font-semibold" { (value) }
            }

            @if can_copy {
                button
                    type="button"
                    class="text-sm text-blue-600 hover:underline"
                    data-copy=(value)
                    onclick="navigator.clipboard.writeText(this.dataset.copy)"
                {
                    "Copy"
                }
            }
        }
    }
}
