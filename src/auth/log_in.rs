//! This file defines the routes for displaying the log-in page and handling log-in requests.
//! The auth module handles the lower level authentication and cookie auth logic.

use std::sync::Arc;

use axum::{
    Form,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;
use time::Duration;
use time_tz::Tz;

use crate::{
    AppState, BankConfig, Error, SessionEntry, SessionStore,
    auth::{
        cookie::{get_token_from_cookies, invalidate_auth_cookie, set_auth_cookie},
        middleware::get_authenticated_session,
        redirect::normalize_redirect_url,
    },
    bank::{BankSession, CredentialVerifier, SeedData},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, loading_spinner,
        log_in_card, password_input,
    },
};

/// Which field a log-in error belongs to.
enum FormError<'a> {
    Email(&'a str),
    Password(&'a str),
}

fn log_in_form(email: &str, error: Option<FormError>, redirect_url: Option<&str>) -> Markup {
    let (email_error, password_error) = match error {
        Some(FormError::Email(message)) => (Some(message), None),
        Some(FormError::Password(message)) => (None, Some(message)),
        None => (None, None),
    };

    html! {
        form
            hx-post=(endpoints::LOG_IN_API)
            hx-swap="outerHTML"
            hx-indicator="#indicator"
            hx-disabled-elt="#email, #password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            @if let Some(redirect_url) = redirect_url {
                input type="hidden" name="redirect_url" value=(redirect_url);
            }

            div
            {
                label for="email" class=(FORM_LABEL_STYLE) { "Email" }

                input
                    type="email"
                    name="email"
                    id="email"
                    placeholder="you@example.com"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    autofocus
                    value=(email);

                @if let Some(error_message) = email_error
                {
                    p id="email-error" class="text-red-500 text-base" { (error_message) }
                }
            }

            (password_input(password_error))

            button
                type="submit" id="submit-button" tabindex="0"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Sign In"
            }
        }
    }
}

fn parse_redirect_url(raw_url: Option<&str>, source: &str) -> Option<String> {
    match raw_url.and_then(normalize_redirect_url) {
        Some(redirect_url) => Some(redirect_url),
        None => {
            if let Some(redirect_url) = raw_url {
                tracing::warn!("Invalid redirect URL from {source}: {redirect_url}");
            }
            None
        }
    }
}

/// The state needed to perform a login.
#[derive(Clone)]
pub struct LogInState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// How long to wait before checking the credentials.
    pub log_in_delay: std::time::Duration,
    /// Used for the bank name and tagline.
    pub config: Arc<BankConfig>,
    /// Where new sessions are stored.
    pub sessions: SessionStore,
    /// The balance and transactions a new session starts from.
    pub seed: Arc<SeedData>,
    /// Checks log-in attempts.
    pub verifier: Arc<dyn CredentialVerifier>,
    /// Used to date transfers made in new sessions.
    pub local_timezone: &'static Tz,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            log_in_delay: state.log_in_delay,
            config: state.config.clone(),
            sessions: state.sessions.clone(),
            seed: state.seed.clone(),
            verifier: state.verifier.clone(),
            local_timezone: state.local_timezone,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LogInState> for Key {
    fn from_ref(state: &LogInState) -> Self {
        state.cookie_key.clone()
    }
}

impl LogInState {
    fn new_bank_session(&self) -> BankSession {
        BankSession::new(self.seed.clone(), self.verifier.clone(), self.local_timezone)
    }
}

/// Display the log-in page, or go straight to the dashboard if already logged in.
pub async fn get_log_in_page(
    State(state): State<LogInState>,
    jar: PrivateCookieJar,
    Query(query): Query<RedirectQuery>,
) -> Response {
    if get_authenticated_session(&jar, &state.sessions).is_some() {
        return Redirect::to(endpoints::DASHBOARD_VIEW).into_response();
    }

    let redirect_url = parse_redirect_url(query.redirect_url.as_deref(), "log-in query");
    let log_in_form = log_in_form("", None, redirect_url.as_deref());
    let content = log_in_card(&state.config.bank.name, &state.config.bank.tagline, &log_in_form);

    base("Log In", &[], &content).into_response()
}

/// Handler for log-in requests via the POST method.
///
/// The credentials are checked after the configured delay. On a successful
/// log-in a new session is stored, the auth cookie is set and the client is
/// redirected to the dashboard page. Otherwise, the form is returned with the
/// email kept and an error message under the field that was wrong.
pub async fn post_log_in(
    State(state): State<LogInState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<LogInData>,
) -> Response {
    let redirect_url = parse_redirect_url(user_data.redirect_url.as_deref(), "log-in form");
    let redirect_url = redirect_url.as_deref();

    tokio::time::sleep(state.log_in_delay).await;

    let mut bank = state.new_bank_session();

    if let Err(error) = bank.login(&user_data.email, &user_data.password) {
        let message = error.to_string();
        let form_error = match error {
            Error::WrongEmail => FormError::Email(&message),
            Error::WrongPassword => FormError::Password(&message),
            error => {
                tracing::error!("Unhandled error while verifying credentials: {error}");
                FormError::Password("An internal error occurred. Please try again later.")
            }
        };

        return log_in_form(&user_data.email, Some(form_error), redirect_url).into_response();
    }

    // A browser that logs in again replaces its old session.
    if let Ok(token) = get_token_from_cookies(&jar)
        && let Err(error) = state.sessions.remove(token.session_id)
    {
        tracing::error!("Could not remove previous session: {error}");
    }

    let session_id = match state.sessions.insert(SessionEntry::new(bank)) {
        Ok((session_id, _)) => session_id,
        Err(error) => {
            tracing::error!("Could not store new session: {error}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
                invalidate_auth_cookie(jar),
            )
                .into_response();
        }
    };

    let redirect_url = redirect_url.unwrap_or(endpoints::DASHBOARD_VIEW);

    set_auth_cookie(jar.clone(), session_id, state.cookie_duration)
        .map(|updated_jar| {
            (
                StatusCode::SEE_OTHER,
                HxRedirect(redirect_url.to_owned()),
                updated_jar,
            )
        })
        .map_err(|err| {
            tracing::error!("Error setting auth cookie: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
                invalidate_auth_cookie(jar),
            )
        })
        .into_response()
}

#[derive(Deserialize)]
pub struct RedirectQuery {
    pub redirect_url: Option<String>,
}

/// The raw data entered by the user in the log-in form.
#[derive(Clone, Deserialize)]
pub struct LogInData {
    /// Email entered during log-in.
    pub email: String,

    /// Password entered during log-in.
    pub password: String,

    /// Optional URL to redirect to after logging in.
    /// Only accepted from the log-in form submission.
    pub redirect_url: Option<String>,
}


#[cfg(test)]
mod log_in_tests {
    use std::{collections::HashSet, time::Duration};

    use axum::{
        Form, Router,
        body::Body,
        extract::State,
        http::{Response, StatusCode, header::SET_COOKIE},
        routing::post,
    };
    use axum_extra::extract::{PrivateCookieJar, cookie::Cookie};
    use axum_htmx::HX_REDIRECT;
    use axum_test::TestServer;
    use time::OffsetDateTime;

    use crate::{
        AppState, BankConfig,
        auth::{COOKIE_TOKEN, log_in::LogInState},
        endpoints,
        test_utils::{assert_form_input_with_value, must_get_form, parse_html_fragment},
    };

    use super::{LogInData, post_log_in};

    fn get_state() -> LogInState {
        let state = AppState::new(BankConfig::demo(), "foobar", "Etc/UTC", Duration::ZERO)
            .expect("Could not create app state");

        axum::extract::FromRef::from_ref(&state)
    }

    fn log_in_data(email: &str, password: &str) -> LogInData {
        LogInData {
            email: email.to_owned(),
            password: password.to_owned(),
            redirect_url: None,
        }
    }

    #[tokio::test]
    async fn log_in_succeeds_with_valid_credentials() {
        let state = get_state();
        let sessions = state.sessions.clone();

        let response =
            new_log_in_request(state, log_in_data("demo@mybank.com", "Demo123!")).await;

        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
        assert_set_cookie(&response);
        assert_eq!(sessions.len(), Ok(1));
    }

    #[tokio::test]
    async fn log_in_redirects_to_requested_url() {
        let redirect_url = "/pay_bills?category=Water";

        let response = new_log_in_request(
            get_state(),
            LogInData {
                redirect_url: Some(redirect_url.to_string()),
                ..log_in_data("demo@mybank.com", "Demo123!")
            },
        )
        .await;

        assert_hx_redirect(&response, redirect_url);
    }

    #[tokio::test]
    async fn log_in_falls_back_on_invalid_redirect_url() {
        let response = new_log_in_request(
            get_state(),
            LogInData {
                redirect_url: Some("https://example.com".to_string()),
                ..log_in_data("demo@mybank.com", "Demo123!")
            },
        )
        .await;

        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
    }

    #[tokio::test]
    async fn log_in_fails_with_wrong_email() {
        let state = get_state();
        let sessions = state.sessions.clone();

        let response =
            new_log_in_request(state, log_in_data("someone@else.com", "Demo123!")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let fragment = parse_html_fragment(response).await;
        let form = must_get_form(&fragment);
        assert_error_under(&fragment, "email", "Wrong email");
        assert_form_input_with_value(&form, "email", "email", "someone@else.com");
        assert_eq!(sessions.len(), Ok(0));
    }

    #[tokio::test]
    async fn log_in_fails_with_wrong_password() {
        let response =
            new_log_in_request(get_state(), log_in_data("demo@mybank.com", "wrong")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let fragment = parse_html_fragment(response).await;
        assert_error_under(&fragment, "password", "Wrong password");
    }

    #[tokio::test]
    async fn log_in_fails_with_missing_credentials() {
        let app = Router::new()
            .route(endpoints::LOG_IN_API, post(post_log_in))
            .with_state(get_state());

        let server = TestServer::new(app);

        server
            .post(endpoints::LOG_IN_API)
            .content_type("application/x-www-form-urlencoded")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn log_in_twice_replaces_previous_session() {
        let state = get_state();
        let sessions = state.sessions.clone();
        let app = Router::new()
            .route(endpoints::LOG_IN_API, post(post_log_in))
            .with_state(state);
        let server = TestServer::new(app);
        let form = [("email", "demo@mybank.com"), ("password", "Demo123!")];

        let first = server.post(endpoints::LOG_IN_API).form(&form).await;
        let token_cookie = first.cookie(COOKIE_TOKEN);
        server
            .post(endpoints::LOG_IN_API)
            .add_cookie(token_cookie)
            .form(&form)
            .await;

        assert_eq!(sessions.len(), Ok(1));
    }

    async fn new_log_in_request(state: LogInState, log_in_form: LogInData) -> Response<Body> {
        let jar = PrivateCookieJar::new(state.cookie_key.clone());

        post_log_in(State(state), jar, Form(log_in_form)).await
    }

    #[track_caller]
    fn assert_hx_redirect(response: &Response<Body>, want_location: &str) {
        let redirect_location = response.headers().get(HX_REDIRECT).unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect_location, want_location);
    }

    #[track_caller]
    fn assert_set_cookie(response: &Response<Body>) {
        let mut found_cookies = HashSet::new();

        for cookie_headers in response.headers().get_all(SET_COOKIE) {
            let cookie_string = cookie_headers.to_str().unwrap();
            let cookie = Cookie::parse(cookie_string).unwrap();

            match cookie.name() {
                COOKIE_TOKEN => {
                    assert!(cookie.expires_datetime() > Some(OffsetDateTime::now_utc()));
                    found_cookies.insert(cookie.name().to_string());
                }
                _ => panic!("Unexpected cookie found: {}", cookie.name()),
            }
        }

        assert!(
            found_cookies.contains(COOKIE_TOKEN),
            "could not find cookie '{}' in {:?}",
            COOKIE_TOKEN,
            found_cookies
        );
    }

    #[track_caller]
    fn assert_error_under(fragment: &scraper::Html, input_id: &str, message: &str) {
        let error_selector =
            scraper::Selector::parse(&format!("p#{input_id}-error.text-red-500.text-base"))
                .unwrap();
        let error = fragment
            .select(&error_selector)
            .next()
            .unwrap_or_else(|| panic!("expected error message under #{input_id}"));
        let error_text = error.text().collect::<String>();

        assert_eq!(error_text.trim(), message);
        let error_count = fragment
            .select(&scraper::Selector::parse("p.text-red-500").unwrap())
            .count();
        assert_eq!(error_count, 1, "want exactly one error message");
    }
}
