//! This file defines the dashboard route and its views.

use std::sync::Arc;

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rust_decimal::Decimal;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    BankConfig, Error, SessionHandle,
    bank::{Transaction, User},
    endpoints,
    html::{CARD_STYLE, PAGE_CONTAINER_STYLE, base, format_currency, format_signed_currency},
    navigation::NavBar,
};

/// Shown in place of the balance when it is hidden.
const HIDDEN_BALANCE: &str = "••••••••";

const TOGGLE_BALANCE_SCRIPT: &str = "const hide = this.getAttribute('aria-pressed') !== 'true'; \
    document.getElementById('balance').classList.toggle('hidden', hide); \
    document.getElementById('balance-hidden').classList.toggle('hidden', !hide); \
    this.setAttribute('aria-pressed', hide); \
    this.setAttribute('aria-label', hide ? 'Show balance' : 'Hide balance'); \
    this.textContent = hide ? 'Show' : 'Hide';";

const SHORT_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[month repr:short] [day padding:none]");

/// Display the balance, quick actions and recent transactions of the logged in user.
pub async fn get_dashboard_page(
    State(config): State<Arc<BankConfig>>,
    Extension(session): Extension<SessionHandle>,
) -> Result<Response, Error> {
    let entry = session.lock()?;
    let bank = &entry.bank;
    let user = bank.user().ok_or(Error::NotAuthenticated)?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW, &config.bank.name);
    let content = html! {
        (nav_bar.into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            (balance_card(user, bank.balance(), &config))
            (quick_actions())
            (transaction_list(bank.transactions()))
        }
    };

    Ok(base("Dashboard", &[], &content).into_response())
}

fn balance_card(user: &User, balance: Decimal, config: &BankConfig) -> Markup {
    html! {
        section
            id="balance-card"
            class="w-full max-w-2xl rounded-2xl p-6 md:p-8 text-white
            bg-gradient-to-br from-blue-800 to-blue-600 shadow-lg"
        {
            div class="flex items-start justify-between mb-6"
            {
                div
                {
                    p class="text-white/70 text-sm font-medium mb-1" { "Welcome back," }
                    h2 class="text-xl md:text-2xl font-bold" { (user.full_name()) }
                }

                span class="bg-white/10 rounded-full px-3 py-1.5 text-sm font-medium"
                {
                    (config.bank.masked_account_number)
                }
            }

            div class="mb-6"
            {
                div class="flex items-center gap-2 mb-2"
                {
                    p class="text-white/70 text-sm" { "Available Balance" }
                    button
                        type="button"
                        id="toggle-balance"
                        aria-label="Hide balance"
                        aria-pressed="false"
                        class="text-xs text-white/70 hover:text-white underline"
                        onclick=(TOGGLE_BALANCE_SCRIPT)
                    {
                        "Hide"
                    }
                }
                p class="text-3xl md:text-4xl lg:text-5xl font-bold tracking-tight"
                {
                    span id="balance" { (format_currency(balance)) }
                    span id="balance-hidden" class="hidden" aria-hidden="true" { (HIDDEN_BALANCE) }
                }
            }

            div class="flex items-center gap-4 text-sm"
            {
                div class="flex items-center gap-2"
                {
                    div class="w-2 h-2 rounded-full bg-emerald-400 animate-pulse" {}
                    span class="text-white/80" { "Active" }
                }
                span class="text-white/50" { "|" }
                span class="text-white/70" { (config.bank.name) }
            }
        }
    }
}

fn quick_actions() -> Markup {
    const ACTION_STYLE: &str = "flex flex-col items-center gap-2 p-4 rounded-2xl \
        text-xs font-medium transition-all hover:scale-105 active:scale-95";
    const PRIMARY_STYLE: &str = "bg-blue-600 text-white shadow-md";
    const SECONDARY_STYLE: &str = "bg-white text-gray-900 shadow dark:bg-gray-800 dark:text-white";
    let actions = [
        (endpoints::TRANSFER_VIEW, "Transfer", PRIMARY_STYLE),
        (endpoints::RECEIVE_VIEW, "Receive", SECONDARY_STYLE),
        (endpoints::PAY_BILLS_VIEW, "Pay Bills", SECONDARY_STYLE),
        (endpoints::MORE_VIEW, "More", SECONDARY_STYLE),
    ];

    html! {
        nav id="quick-actions" class="w-full max-w-2xl grid grid-cols-4 gap-3" aria-label="Quick actions"
        {
            @for (url, label, colours) in actions {
                a href=(url) class={(ACTION_STYLE) " " (colours)} { (label) }
            }
        }
    }
}

fn transaction_list(transactions: &[Transaction]) -> Markup {
    html! {
        section id="transactions" class=(CARD_STYLE)
        {
            div class="flex items-center justify-between mb-6"
            {
                h3 class="text-lg font-semibold" { "Recent Transactions" }
                span class="text-sm text-gray-500 dark:text-gray-400"
                {
                    (transactions.len()) " transactions"
                }
            }

            @if transactions.is_empty() {
                p class="text-center text-gray-500 py-8" { "No transactions yet" }
            } @else {
                ul class="space-y-1"
                {
                    @for transaction in transactions {
                        (transaction_row(transaction))
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let is_credit = transaction.is_credit();
    let amount_style = if is_credit {
        "font-semibold text-emerald-600"
    } else {
        "font-semibold text-gray-900 dark:text-white"
    };

    html! {
        li class="flex items-center justify-between p-4 rounded-xl hover:bg-gray-50 dark:hover:bg-gray-700"
        {
            div
            {
                p class="font-medium" { (transaction.description) }
                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    (format_short_date(transaction.date)) " · " (transaction.category)
                }
            }

            p class=(amount_style) { (format_signed_currency(transaction.amount, is_credit)) }
        }
    }
}

/// Format a date like "Jan 13".
fn format_short_date(date: Date) -> String {
    date.format(SHORT_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}
