//! The API endpoints URIs.

/// The root route which redirects to the dashboard or log in page.
pub const ROOT: &str = "/";
/// The landing page for logged in users.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for sending money.
pub const TRANSFER_VIEW: &str = "/transfer";
/// The page showing the details needed to receive money.
pub const RECEIVE_VIEW: &str = "/receive";
/// The page for browsing bill categories and saved billers.
pub const PAY_BILLS_VIEW: &str = "/pay_bills";
/// The menu of other banking features.
pub const MORE_VIEW: &str = "/more";
/// The list of notifications.
pub const NOTIFICATIONS_VIEW: &str = "/notifications";
/// The profile and settings page.
pub const SETTINGS_VIEW: &str = "/settings";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route to submit the transfer form for review.
pub const TRANSFER_CONTINUE: &str = "/api/transfer/continue";
/// The route to go from reviewing a transfer back to the form.
pub const TRANSFER_BACK: &str = "/api/transfer/back";
/// The route to send a reviewed transfer.
pub const TRANSFER_CONFIRM: &str = "/api/transfer/confirm";
/// The route to go from a failed transfer back to the form.
pub const TRANSFER_RETRY: &str = "/api/transfer/retry";
/// The route to discard the transfer and return to the dashboard.
pub const TRANSFER_CLOSE: &str = "/api/transfer/close";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::TRANSFER_VIEW);
        assert_endpoint_is_valid_uri(endpoints::RECEIVE_VIEW);
        assert_endpoint_is_valid_uri(endpoints::PAY_BILLS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::MORE_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NOTIFICATIONS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::SETTINGS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::LOG_IN_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);

        assert_endpoint_is_valid_uri(endpoints::LOG_IN_API);
        assert_endpoint_is_valid_uri(endpoints::LOG_OUT);
        assert_endpoint_is_valid_uri(endpoints::TRANSFER_CONTINUE);
        assert_endpoint_is_valid_uri(endpoints::TRANSFER_BACK);
        assert_endpoint_is_valid_uri(endpoints::TRANSFER_CONFIRM);
        assert_endpoint_is_valid_uri(endpoints::TRANSFER_RETRY);
        assert_endpoint_is_valid_uri(endpoints::TRANSFER_CLOSE);
    }
}
