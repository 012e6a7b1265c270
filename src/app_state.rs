//! Implements a struct that holds the state of the web server.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use time::Duration;
use time_tz::Tz;

use crate::{
    BankConfig, Error, SessionStore,
    auth::DEFAULT_COOKIE_DURATION,
    bank::{BankSession, CredentialVerifier, DemoCredentials, SeedData},
    timezone::get_timezone,
};

/// How long log-in requests wait before checking the credentials.
pub const DEFAULT_LOG_IN_DELAY: std::time::Duration = std::time::Duration::from_millis(800);

/// The state of the web server.
#[derive(Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,

    /// The local timezone, used to date new transfers.
    pub local_timezone: &'static Tz,

    /// How long log-in requests wait before checking the credentials.
    pub log_in_delay: std::time::Duration,

    /// Bank branding, credentials and seed data.
    pub config: Arc<BankConfig>,

    /// The balance and transactions every session starts from.
    pub seed: Arc<SeedData>,

    /// Checks log-in attempts.
    pub verifier: Arc<dyn CredentialVerifier>,

    /// The sessions of every browser that has logged in.
    pub sessions: SessionStore,
}

impl AppState {
    /// Create a new [AppState] from a validated bank configuration.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// - [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    /// - [Error::InvalidConfig] if the seed data in `config` is invalid.
    pub fn new(
        config: BankConfig,
        cookie_secret: &str,
        local_timezone: &str,
        log_in_delay: std::time::Duration,
    ) -> Result<Self, Error> {
        config.validate()?;
        let seed = config.seed_data()?;
        let verifier = DemoCredentials::from(&config.credentials);

        Ok(Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            local_timezone: get_timezone(local_timezone)?,
            log_in_delay,
            config: Arc::new(config),
            seed: Arc::new(seed),
            verifier: Arc::new(verifier),
            sessions: SessionStore::new(),
        })
    }

    /// Create a logged out session populated with the seed data.
    pub fn new_bank_session(&self) -> BankSession {
        BankSession::new(self.seed.clone(), self.verifier.clone(), self.local_timezone)
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

impl FromRef<AppState> for Arc<BankConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

/// Create a signing key for cookies from a `secret`s string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rust_decimal::Decimal;

    use crate::{AppState, BankConfig, Error};

    #[test]
    fn new_state_from_demo_config() {
        let state = AppState::new(BankConfig::demo(), "secret", "Etc/UTC", Duration::ZERO).unwrap();

        let session = state.new_bank_session();

        assert!(!session.is_authenticated());
        assert_eq!(session.balance(), Decimal::new(1284753, 2));
        assert_eq!(session.transactions().len(), 7);
        assert_eq!(state.sessions.len(), Ok(0));
    }

    #[test]
    fn invalid_timezone_is_rejected() {
        let result = AppState::new(BankConfig::demo(), "secret", "Nowhere/Special", Duration::ZERO);

        assert!(matches!(result, Err(Error::InvalidTimezoneError(_))));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = BankConfig::demo();
        config.initial_balance = Decimal::new(-1, 0);

        let result = AppState::new(config, "secret", "Etc/UTC", Duration::ZERO);

        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}
