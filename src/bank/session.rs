//! The state of one logged in (or logged out) browser session.

use std::{fmt, sync::Arc};

use rust_decimal::Decimal;
use time::Date;
use time_tz::{TimeZone, Tz};

use crate::{
    Error,
    bank::{CredentialVerifier, Transaction, User, is_whole_cents, round_to_cents},
    timezone::today_in,
};

/// The values a fresh session starts from, and is reset to on log-out.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedData {
    /// The account balance before any transfers.
    pub initial_balance: Decimal,
    /// The account history before any transfers, newest first.
    pub transactions: Vec<Transaction>,
}

/// The current user, balance and transaction history for one session.
///
/// A session is created logged out with the seed balance and history.
/// [BankSession::logout] puts it back into exactly that state, so every
/// log-in starts from the same demo account.
pub struct BankSession {
    seed: Arc<SeedData>,
    verifier: Arc<dyn CredentialVerifier>,
    timezone: &'static Tz,
    user: Option<User>,
    balance: Decimal,
    transactions: Vec<Transaction>,
}

impl fmt::Debug for BankSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BankSession")
            .field("verifier", &self.verifier)
            .field("timezone", &self.timezone.name())
            .field("user", &self.user)
            .field("balance", &self.balance)
            .field("transactions", &self.transactions.len())
            .finish()
    }
}

impl BankSession {
    /// Create a logged out session populated from `seed`.
    ///
    /// `verifier` checks log-in attempts and `timezone` decides which
    /// calendar date new transfers are recorded on.
    pub fn new(
        seed: Arc<SeedData>,
        verifier: Arc<dyn CredentialVerifier>,
        timezone: &'static Tz,
    ) -> Self {
        let balance = seed.initial_balance;
        let transactions = seed.transactions.clone();

        Self {
            seed,
            verifier,
            timezone,
            user: None,
            balance,
            transactions,
        }
    }

    /// The logged in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The current account balance.
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// The account history, most recent first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Whether a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Log in with `email` and `password`.
    ///
    /// The balance and history are left untouched.
    ///
    /// # Errors
    /// Returns [Error::WrongEmail] or [Error::WrongPassword] and leaves the
    /// session logged out if the credentials are rejected.
    pub fn login(&mut self, email: &str, password: &str) -> Result<&User, Error> {
        let user = self.verifier.verify(email, password)?;

        tracing::info!("{} logged in", user.email);

        Ok(self.user.insert(user))
    }

    /// Log out and reset the balance and history to the seed values.
    ///
    /// Calling this on a logged out session is a no-op apart from the reset.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!("{} logged out", user.email);
        }

        self.balance = self.seed.initial_balance;
        self.transactions = self.seed.transactions.clone();
    }

    /// Send `amount` to `recipient`, returning whether the transfer went through.
    ///
    /// See [BankSession::try_transfer] for the rules.
    pub fn transfer(&mut self, amount: Decimal, recipient: &str, description: &str) -> bool {
        match self.try_transfer(amount, recipient, description) {
            Ok(_) => true,
            Err(error) => {
                tracing::debug!("transfer of {amount} to {recipient} rejected: {error}");
                false
            }
        }
    }

    /// Send `amount` to `recipient` and return the recorded transaction.
    ///
    /// The new debit is put at the front of the history and the balance is
    /// reduced by `amount`, rounded to whole cents.
    ///
    /// # Errors
    /// Nothing is changed if an error is returned:
    /// - [Error::NotAuthenticated] if nobody is logged in.
    /// - [Error::InvalidAmount] if `amount` is zero, negative or has a fraction of a cent.
    /// - [Error::InsufficientBalance] if `amount` is more than the balance.
    pub fn try_transfer(
        &mut self,
        amount: Decimal,
        recipient: &str,
        description: &str,
    ) -> Result<&Transaction, Error> {
        if !self.is_authenticated() {
            return Err(Error::NotAuthenticated);
        }

        if amount <= Decimal::ZERO || !is_whole_cents(amount) {
            return Err(Error::InvalidAmount);
        }

        if amount > self.balance {
            return Err(Error::InsufficientBalance);
        }

        let transaction = Transaction::transfer(amount, recipient, description, self.today());

        self.balance = round_to_cents(self.balance - amount);
        self.transactions.insert(0, transaction);

        Ok(&self.transactions[0])
    }

    fn today(&self) -> Date {
        today_in(self.timezone)
    }
}
