//! Cookie based authentication: the log-in and log-out routes, the auth cookie and the
//! middleware that guards the pages and transfer endpoints.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod redirect;
mod token;

pub(crate) use cookie::DEFAULT_COOKIE_DURATION;
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub(crate) use middleware::get_authenticated_session;
pub use middleware::{auth_guard, auth_guard_hx};
pub(super) use token::Token;

#[cfg(test)]
pub(crate) use cookie::{COOKIE_TOKEN, set_auth_cookie};

#[cfg(test)]
pub use middleware::AuthState;
