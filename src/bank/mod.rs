//! The bank session core: users, transactions, money and the transfer flow.
//!
//! Nothing in this module knows about HTTP. The web layer owns one
//! [BankSession] and one [TransferWizard] per logged in browser and calls
//! into them while holding that session's lock.

mod credentials;
mod money;
mod session;
mod transaction;
mod user;
mod wizard;

pub use credentials::{CredentialVerifier, DemoCredentials};
pub use money::{is_whole_cents, parse_amount, round_to_cents};
pub use session::{BankSession, SeedData};
pub use transaction::{Transaction, TransactionKind, transfer_description};
pub use user::User;
pub use wizard::{TransferFields, TransferStep, TransferWizard, ValidTransfer, validate_transfer};
