//! NexusBank is a demo consumer banking dashboard.
//!
//! A single demo account can log in, check its balance, browse its recent
//! transactions and send money through a multi-step transfer flow. All data
//! comes from seed configuration and lives in memory only: every log-in
//! starts from the seed balance and transaction history.
//!
//! This library provides the bank session core and a web server that
//! directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod auth;
pub mod bank;
mod config;
mod dashboard;
mod demo_content;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod more;
mod navigation;
mod not_found;
mod notifications;
mod pay_bills;
mod receive;
mod routing;
mod session_store;
mod settings;
mod timezone;
mod transfer;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use config::{BankBranding, BankConfig, CredentialsConfig, SeedTransaction};
pub use logging::logging_middleware;
pub use routing::build_router;
pub use session_store::{SessionEntry, SessionHandle, SessionId, SessionStore};
pub use timezone::get_timezone;

use crate::{
    alert::Alert, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum Error {
    /// The email entered at log-in does not match the configured account.
    #[error("Wrong email")]
    WrongEmail,

    /// The email matched but the password did not.
    #[error("Wrong password")]
    WrongPassword,

    /// The recipient account number is missing, not numeric or too short.
    #[error("Please enter a valid account number (min 8 digits)")]
    InvalidRecipient,

    /// The recipient name is missing.
    #[error("Please enter recipient name")]
    InvalidRecipientName,

    /// The transfer amount is not a positive decimal number.
    #[error("Please enter a valid amount")]
    InvalidAmount,

    /// The transfer amount is larger than the available balance.
    #[error("Insufficient balance")]
    InsufficientBalance,

    /// A transfer that passed form validation was rejected when it was
    /// confirmed, e.g. because the balance changed in between.
    #[error("Something went wrong. Please try again.")]
    TransferFailed,

    /// A transfer was attempted on a session with no logged in user.
    #[error("the session is not authenticated")]
    NotAuthenticated,

    /// The transfer flow was asked to do something its current step does not allow,
    /// e.g. confirming a transfer that has not been reviewed yet.
    #[error("the transfer cannot be {0} from its current step")]
    InvalidTransferStep(&'static str),

    /// The session referred to by the auth cookie does not exist, e.g. because the
    /// server restarted or the session was logged out.
    #[error("the session could not be found")]
    SessionNotFound,

    /// Could not acquire a session lock.
    #[error("could not acquire the session lock")]
    SessionLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The auth cookie could not be created or read.
    #[error("could not handle the auth cookie: {0}")]
    CookieError(String),

    /// The bank configuration could not be parsed or contains invalid values.
    #[error("invalid bank configuration: {0}")]
    InvalidConfig(String),

    /// The bank configuration file could not be read.
    #[error("could not read the bank configuration: {0}")]
    ConfigIo(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::SessionLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                        ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            Error::InvalidTransferStep(action) => (
                StatusCode::CONFLICT,
                Alert::Error {
                    message: "Transfer already changed".to_owned(),
                    details: format!(
                        "The transfer cannot be {action} right now. \
                        Try refreshing the page to see the latest state of the transfer."
                    ),
                },
            ),
            Error::SessionNotFound => (
                StatusCode::UNAUTHORIZED,
                Alert::Error {
                    message: "Session expired".to_owned(),
                    details: "Your session has ended. Log in again to continue.".to_owned(),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}
