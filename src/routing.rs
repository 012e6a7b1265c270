//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router,
    extract::State,
    middleware,
    response::Redirect,
    routing::{get, post},
};
use axum_extra::extract::PrivateCookieJar;
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{
        auth_guard, auth_guard_hx, get_authenticated_session, get_log_in_page, get_log_out,
        post_log_in,
    },
    dashboard::get_dashboard_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    more::get_more_page,
    not_found::get_404_not_found,
    notifications::get_notifications_page,
    pay_bills::get_pay_bills_page,
    receive::get_receive_page,
    settings::get_settings_page,
    transfer::{
        back_to_transfer_form, close_transfer, confirm_transfer, continue_transfer,
        get_transfer_page, retry_transfer,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSFER_VIEW, get(get_transfer_page))
        .route(endpoints::RECEIVE_VIEW, get(get_receive_page))
        .route(endpoints::PAY_BILLS_VIEW, get(get_pay_bills_page))
        .route(endpoints::MORE_VIEW, get(get_more_page))
        .route(endpoints::NOTIFICATIONS_VIEW, get(get_notifications_page))
        .route(endpoints::SETTINGS_VIEW, get(get_settings_page))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These POST routes need to use the HX-REDIRECT header for auth redirects to work properly for HTMX requests.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(endpoints::TRANSFER_CONTINUE, post(continue_transfer))
            .route(endpoints::TRANSFER_BACK, post(back_to_transfer_form))
            .route(endpoints::TRANSFER_CONFIRM, post(confirm_transfer))
            .route(endpoints::TRANSFER_RETRY, post(retry_transfer))
            .route(endpoints::TRANSFER_CLOSE, post(close_transfer))
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page if logged in, otherwise to the log-in page.
async fn get_index_page(State(state): State<AppState>, jar: PrivateCookieJar) -> Redirect {
    if get_authenticated_session(&jar, &state.sessions).is_some() {
        Redirect::to(endpoints::DASHBOARD_VIEW)
    } else {
        Redirect::to(endpoints::LOG_IN_VIEW)
    }
}
