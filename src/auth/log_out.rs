//! Log-out route handler that ends the session, invalidates the auth cookie and redirects users.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::PrivateCookieJar;

use crate::{
    auth::{
        cookie::{get_token_from_cookies, invalidate_auth_cookie},
        middleware::AuthState,
    },
    endpoints,
};

/// Log out the session named by the auth cookie, invalidate the cookie and redirect the client
/// to the log-in page.
///
/// Logging out without a valid cookie still clears the cookie and redirects.
pub async fn get_log_out(State(state): State<AuthState>, jar: PrivateCookieJar) -> Response {
    if let Ok(token) = get_token_from_cookies(&jar) {
        match state.sessions.remove(token.session_id) {
            Ok(Some(session)) => match session.lock() {
                Ok(mut entry) => {
                    entry.bank.logout();
                    entry.transfer.close();
                }
                Err(error) => tracing::error!("Could not log out session: {error}"),
            },
            Ok(None) => tracing::debug!("Log out for unknown session {}", token.session_id),
            Err(error) => tracing::error!("Could not remove session: {error}"),
        }
    }

    let jar = invalidate_auth_cookie(jar);

    (jar, Redirect::to(endpoints::LOG_IN_VIEW)).into_response()
}
