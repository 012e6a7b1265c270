//! Transactions shown in the account history.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

/// The category given to every transfer made through the app.
pub const TRANSFER_CATEGORY: &str = "Transfer";

/// Whether money came into or went out of the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money paid into the account.
    Credit,
    /// Money paid out of the account.
    Debit,
}

/// A single entry in the account history.
///
/// Transactions are never modified after they are created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// An opaque, unique identifier.
    pub id: String,
    /// Whether this is money in or money out.
    pub kind: TransactionKind,
    /// A human readable summary, e.g. "Grocery Store".
    pub description: String,
    /// The amount of money moved, always positive.
    pub amount: Decimal,
    /// The calendar date the transaction happened on.
    pub date: Date,
    /// A free-form label used for grouping, e.g. "Shopping".
    pub category: String,
}

impl Transaction {
    /// Create the debit recorded for a transfer of `amount` to `recipient` on `date`.
    pub fn transfer(amount: Decimal, recipient: &str, description: &str, date: Date) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: TransactionKind::Debit,
            description: transfer_description(recipient, description),
            amount,
            date,
            category: TRANSFER_CATEGORY.to_owned(),
        }
    }

    /// Whether the transaction added money to the account.
    pub fn is_credit(&self) -> bool {
        self.kind == TransactionKind::Credit
    }
}

/// The description recorded for a transfer, e.g. "Transfer to Jane Doe - rent".
pub fn transfer_description(recipient: &str, description: &str) -> String {
    if description.is_empty() {
        format!("Transfer to {recipient}")
    } else {
        format!("Transfer to {recipient} - {description}")
    }
}
