//! The transfer page and the endpoints that move the transfer wizard between steps.
//!
//! Every endpoint returns the wizard fragment for its new step, which htmx
//! swaps in place of `#transfer-wizard`. Actions that are not allowed on the
//! current step return an error alert instead and leave the wizard unchanged.

use std::sync::Arc;

use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rust_decimal::Decimal;

use crate::{
    BankConfig, Error, SessionEntry, SessionHandle,
    bank::{TransferFields, TransferStep, TransferWizard},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base, dollar_input_styles, format_currency,
    },
    navigation::NavBar,
};

const WIZARD_ID: &str = "transfer-wizard";

/// Display the transfer page at whichever step the wizard is on.
pub async fn get_transfer_page(
    State(config): State<Arc<BankConfig>>,
    Extension(session): Extension<SessionHandle>,
) -> Result<Response, Error> {
    let entry = session.lock()?;

    let nav_bar = NavBar::new(endpoints::TRANSFER_VIEW, &config.bank.name);
    let content = html! {
        (nav_bar.into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            (wizard_view(&entry.transfer, entry.bank.balance()))
        }
    };

    Ok(base("Send Money", &[dollar_input_styles()], &content).into_response())
}

/// Validate the transfer form and show the confirm step, or the form again with the first error.
pub async fn continue_transfer(
    Extension(session): Extension<SessionHandle>,
    Form(fields): Form<TransferFields>,
) -> Response {
    update_wizard(&session, |entry| {
        let balance = entry.bank.balance();

        match entry.transfer.submit(fields, balance) {
            Err(error @ Error::InvalidTransferStep(_)) => Err(error),
            // Validation errors are kept in the wizard and shown on the form.
            _ => Ok(()),
        }
    })
}

/// Go back from the confirm step to the form.
pub async fn back_to_transfer_form(Extension(session): Extension<SessionHandle>) -> Response {
    update_wizard(&session, |entry| entry.transfer.back())
}

/// Send the pending transfer and show the success or error step.
pub async fn confirm_transfer(Extension(session): Extension<SessionHandle>) -> Response {
    update_wizard(&session, |entry| {
        let SessionEntry { bank, transfer } = entry;

        transfer.confirm(bank).map(|_| ())
    })
}

/// Go back from the error step to the form.
pub async fn retry_transfer(Extension(session): Extension<SessionHandle>) -> Response {
    update_wizard(&session, |entry| entry.transfer.retry())
}

/// Discard the transfer and send the client to the dashboard.
pub async fn close_transfer(Extension(session): Extension<SessionHandle>) -> Response {
    match session.lock() {
        Ok(mut entry) => {
            entry.transfer.close();
            (HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()), StatusCode::OK).into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}

fn update_wizard(
    session: &SessionHandle,
    update: impl FnOnce(&mut SessionEntry) -> Result<(), Error>,
) -> Response {
    let mut entry = match session.lock() {
        Ok(entry) => entry,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = update(&mut entry) {
        tracing::debug!("rejected transfer wizard action: {error}");
        return error.into_alert_response();
    }

    wizard_view(&entry.transfer, entry.bank.balance()).into_response()
}

fn wizard_view(wizard: &TransferWizard, balance: Decimal) -> Markup {
    let step = wizard.step();
    let title = match step {
        TransferStep::Form | TransferStep::Error => "Send Money",
        TransferStep::Confirm => "Confirm Transfer",
        TransferStep::Success => "Complete",
    };

    let content = match step {
        TransferStep::Form => form_view(wizard.fields(), wizard.error(), balance),
        TransferStep::Confirm => match wizard.pending() {
            Some(transfer) => confirm_view(
                &transfer.account_number,
                &transfer.recipient_name,
                transfer.amount,
            ),
            None => form_view(wizard.fields(), wizard.error(), balance),
        },
        TransferStep::Success => match wizard.completed() {
            Some(transfer) => success_view(&transfer.recipient_name, transfer.amount),
            None => form_view(wizard.fields(), wizard.error(), balance),
        },
        TransferStep::Error => error_view(wizard.error()),
    };

    html! {
        section id=(WIZARD_ID) class=(CARD_STYLE)
        {
            div class="flex items-center justify-between mb-6"
            {
                h2 class="text-xl font-bold" { (title) }

                @if step != TransferStep::Success {
                    button
                        type="button"
                        aria-label="Close"
                        hx-post=(endpoints::TRANSFER_CLOSE)
                        hx-target-error="#alert-container"
                        class="w-10 h-10 rounded-full bg-gray-100 hover:bg-gray-200 dark:bg-gray-700"
                    {
                        "×"
                    }
                }
            }

            (content)
        }
    }
}

fn form_view(fields: &TransferFields, error: Option<&Error>, balance: Decimal) -> Markup {
    html! {
        form
            hx-post=(endpoints::TRANSFER_CONTINUE)
            hx-target={"#" (WIZARD_ID)}
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="space-y-5"
        {
            div
            {
                label for="account_number" class=(FORM_LABEL_STYLE) { "Recipient Account Number" }

                input
                    id="account_number"
                    name="account_number"
                    type="text"
                    inputmode="numeric"
                    maxlength="16"
                    placeholder="Enter account number"
                    value=(fields.account_number)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="recipient_name" class=(FORM_LABEL_STYLE) { "Recipient Name" }

                input
                    id="recipient_name"
                    name="recipient_name"
                    type="text"
                    placeholder="Enter recipient's full name"
                    value=(fields.recipient_name)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount to Transfer" }

                div class="input-wrapper"
                {
                    input
                        id="amount"
                        name="amount"
                        type="number"
                        step="0.01"
                        min="0"
                        placeholder="0.00"
                        value=(fields.amount)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                p class="mt-2 text-sm text-gray-500 dark:text-gray-400"
                {
                    "Available balance: " (format_currency(balance))
                }
            }

            @if let Some(error) = error {
                p id="transfer-error" class="text-red-600 text-sm bg-red-50 p-3 rounded-lg"
                {
                    (error)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Continue" }
        }
    }
}

fn confirm_view(account_number: &str, recipient_name: &str, amount: Decimal) -> Markup {
    html! {
        dl class="bg-gray-50 dark:bg-gray-700 rounded-xl p-5 space-y-4 mb-6"
        {
            div class="flex justify-between items-center"
            {
                dt class="text-gray-500 dark:text-gray-400" { "Account Number" }
                dd class="font-mono font-semibold" { (account_number) }
            }
            div class="flex justify-between items-center"
            {
                dt class="text-gray-500 dark:text-gray-400" { "Recipient Name" }
                dd class="font-semibold" { (recipient_name) }
            }
            div class="flex justify-between items-center pt-3 border-t border-gray-200"
            {
                dt class="text-gray-500 dark:text-gray-400" { "Amount" }
                dd id="transfer-amount" class="font-bold text-2xl text-blue-600" { (format_currency(amount)) }
            }
        }

        div class="flex gap-3"
        {
            button
                type="button"
                hx-post=(endpoints::TRANSFER_BACK)
                hx-target={"#" (WIZARD_ID)}
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                class=(BUTTON_SECONDARY_STYLE)
            {
                "Back"
            }

            button
                type="button"
                hx-post=(endpoints::TRANSFER_CONFIRM)
                hx-target={"#" (WIZARD_ID)}
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                hx-disabled-elt="this"
                class=(BUTTON_PRIMARY_STYLE)
            {
                "Confirm Transfer"
            }
        }
    }
}

fn success_view(recipient_name: &str, amount: Decimal) -> Markup {
    html! {
        div class="text-center py-8"
        {
            div class="w-24 h-24 mx-auto mb-6 rounded-full bg-emerald-500 text-white text-5xl flex items-center justify-center"
            {
                "✓"
            }
            h3 class="text-2xl font-bold mb-2" { "Transfer Successful!" }
            p class="text-gray-500 mb-2" { (format_currency(amount)) }
            p class="text-gray-500 mb-8"
            {
                "sent to " span class="font-semibold text-gray-900 dark:text-white" { (recipient_name) }
            }

            button
                type="button"
                hx-post=(endpoints::TRANSFER_CLOSE)
                hx-target-error="#alert-container"
                class=(BUTTON_PRIMARY_STYLE)
            {
                "Done"
            }
        }
    }
}

fn error_view(error: Option<&Error>) -> Markup {
    let message = error.unwrap_or(&Error::TransferFailed).to_string();

    html! {
        div class="text-center py-8"
        {
            div class="w-24 h-24 mx-auto mb-6 rounded-full bg-red-100 text-red-600 text-5xl flex items-center justify-center"
            {
                "!"
            }
            h3 class="text-2xl font-bold mb-2" { "Transfer Failed" }
            p class="text-gray-500 mb-8" { (message) }

            button
                type="button"
                hx-post=(endpoints::TRANSFER_RETRY)
                hx-target={"#" (WIZARD_ID)}
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                class=(BUTTON_PRIMARY_STYLE)
            {
                "Try Again"
            }
        }
    }
}
