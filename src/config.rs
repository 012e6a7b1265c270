//! The seed data every session starts from: branding, credentials, balance and history.

use std::{collections::HashSet, fmt, fs, path::Path};

use rust_decimal::Decimal;
use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    bank::{DemoCredentials, SeedData, Transaction, TransactionKind, is_whole_cents},
};

/// Seed transaction dates, e.g. "2026-01-13".
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The bank's name and the account details shown across the app.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BankBranding {
    /// The bank's name, e.g. "NexusBank".
    pub name: String,
    /// The line shown under the name on the log-in page.
    pub tagline: String,
    /// The account number as shown on the dashboard, e.g. "****4521".
    pub masked_account_number: String,
    /// The routing number as shown on the dashboard, e.g. "****8847".
    pub masked_routing_number: String,
    /// The full account number shown on the receive page.
    pub account_number: String,
    /// The full routing number shown on the receive page.
    pub routing_number: String,
}

/// The single account that can log in.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialsConfig {
    /// The log-in email.
    pub email: String,
    /// The log-in password, in plain text.
    pub password: String,
    /// The account holder's first name.
    pub first_name: String,
    /// The account holder's last name.
    pub last_name: String,
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("email", &self.email)
            .field("password", &"********")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

impl From<&CredentialsConfig> for DemoCredentials {
    fn from(config: &CredentialsConfig) -> Self {
        Self {
            email: config.email.clone(),
            password: config.password.clone(),
            first_name: config.first_name.clone(),
            last_name: config.last_name.clone(),
        }
    }
}

/// A transaction in the account history before any transfers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedTransaction {
    /// A unique identifier.
    pub id: String,
    /// "credit" or "debit".
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// A human readable summary.
    pub description: String,
    /// The amount of money moved, must be positive.
    pub amount: Decimal,
    /// The date as "YYYY-MM-DD".
    pub date: String,
    /// A free-form label used for grouping.
    pub category: String,
}

/// The seed configuration for the demo bank.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BankConfig {
    /// The starting balance of every session.
    pub initial_balance: Decimal,
    /// Bank name and account details.
    pub bank: BankBranding,
    /// The account that can log in.
    pub credentials: CredentialsConfig,
    /// The starting transaction history, newest first.
    #[serde(default)]
    pub transactions: Vec<SeedTransaction>,
}

impl BankConfig {
    /// Read and validate a TOML config file.
    ///
    /// # Errors
    /// - [Error::ConfigIo] if the file cannot be read.
    /// - [Error::InvalidConfig] if the file is not valid TOML, is missing
    ///   fields or fails [BankConfig::validate].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        tracing::debug!("Loading bank configuration from {}", path.display());

        let contents = fs::read_to_string(path)
            .map_err(|error| Error::ConfigIo(format!("{}: {error}", path.display())))?;

        Self::from_toml(&contents)
    }

    /// Parse and validate a TOML config string.
    ///
    /// # Errors
    /// Returns [Error::InvalidConfig] if the string is not a valid config.
    pub fn from_toml(contents: &str) -> Result<Self, Error> {
        let config: Self =
            toml::from_str(contents).map_err(|error| Error::InvalidConfig(error.to_string()))?;
        config.validate()?;

        Ok(config)
    }

    /// The built-in NexusBank demo account.
    pub fn demo() -> Self {
        let transaction = |id: &str,
                           kind: TransactionKind,
                           description: &str,
                           cents: i64,
                           date: &str,
                           category: &str| SeedTransaction {
            id: id.to_owned(),
            kind,
            description: description.to_owned(),
            amount: Decimal::new(cents, 2),
            date: date.to_owned(),
            category: category.to_owned(),
        };

        Self {
            initial_balance: Decimal::new(1284753, 2),
            bank: BankBranding {
                name: "NexusBank".to_owned(),
                tagline: "Your Digital Banking Partner".to_owned(),
                masked_account_number: "****4521".to_owned(),
                masked_routing_number: "****8847".to_owned(),
                account_number: "1234567890".to_owned(),
                routing_number: "021000021".to_owned(),
            },
            credentials: CredentialsConfig {
                email: "demo@mybank.com".to_owned(),
                password: "Demo123!".to_owned(),
                first_name: "John".to_owned(),
                last_name: "Smith".to_owned(),
            },
            transactions: vec![
                transaction(
                    "1",
                    TransactionKind::Credit,
                    "Salary Deposit",
                    520000,
                    "2026-01-13",
                    "Income",
                ),
                transaction(
                    "2",
                    TransactionKind::Debit,
                    "Netflix Subscription",
                    1599,
                    "2026-01-12",
                    "Entertainment",
                ),
                transaction(
                    "3",
                    TransactionKind::Debit,
                    "Grocery Store",
                    12743,
                    "2026-01-11",
                    "Shopping",
                ),
                transaction(
                    "4",
                    TransactionKind::Credit,
                    "Freelance Payment",
                    85000,
                    "2026-01-10",
                    "Income",
                ),
                transaction(
                    "5",
                    TransactionKind::Debit,
                    "Electric Bill",
                    8950,
                    "2026-01-08",
                    "Utilities",
                ),
                transaction(
                    "6",
                    TransactionKind::Debit,
                    "Coffee Shop",
                    475,
                    "2026-01-07",
                    "Food & Drink",
                ),
                transaction(
                    "7",
                    TransactionKind::Debit,
                    "Amazon Purchase",
                    6799,
                    "2026-01-05",
                    "Shopping",
                ),
            ],
        }
    }

    /// Check the values that cannot be expressed in the types.
    ///
    /// # Errors
    /// Returns [Error::InvalidConfig] if the initial balance is negative or
    /// has a fraction of a cent, the email is empty, or a seed transaction
    /// has an amount that is not a positive number of cents, a duplicate ID
    /// or an unparseable date.
    pub fn validate(&self) -> Result<(), Error> {
        if self.initial_balance < Decimal::ZERO {
            return Err(Error::InvalidConfig(format!(
                "initial balance must not be negative, got {}",
                self.initial_balance
            )));
        }

        if !is_whole_cents(self.initial_balance) {
            return Err(Error::InvalidConfig(format!(
                "initial balance must be in whole cents, got {}",
                self.initial_balance
            )));
        }

        if self.credentials.email.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "credentials.email must not be empty".to_owned(),
            ));
        }

        let mut ids = HashSet::new();

        for transaction in &self.transactions {
            if transaction.amount <= Decimal::ZERO {
                return Err(Error::InvalidConfig(format!(
                    "transaction {} must have a positive amount, got {}",
                    transaction.id, transaction.amount
                )));
            }

            if !is_whole_cents(transaction.amount) {
                return Err(Error::InvalidConfig(format!(
                    "transaction {} must be in whole cents, got {}",
                    transaction.id, transaction.amount
                )));
            }

            if !ids.insert(transaction.id.as_str()) {
                return Err(Error::InvalidConfig(format!(
                    "duplicate transaction id {}",
                    transaction.id
                )));
            }

            parse_date(&transaction.date)?;
        }

        Ok(())
    }

    /// Convert the seed balance and transactions into the form sessions use.
    ///
    /// # Errors
    /// Returns [Error::InvalidConfig] if a seed transaction date cannot be parsed.
    pub fn seed_data(&self) -> Result<SeedData, Error> {
        let transactions = self
            .transactions
            .iter()
            .map(|seed| {
                Ok(Transaction {
                    id: seed.id.clone(),
                    kind: seed.kind,
                    description: seed.description.clone(),
                    amount: seed.amount,
                    date: parse_date(&seed.date)?,
                    category: seed.category.clone(),
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(SeedData {
            initial_balance: self.initial_balance,
            transactions,
        })
    }
}

fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text, DATE_FORMAT)
        .map_err(|error| Error::InvalidConfig(format!("invalid date \"{text}\": {error}")))
}
