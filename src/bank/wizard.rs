//! The multi-step transfer flow: fill in the form, confirm, see the result.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    Error,
    bank::{BankSession, parse_amount},
};

/// The shortest account number accepted by the transfer form.
pub const MIN_ACCOUNT_NUMBER_DIGITS: usize = 8;

/// The raw text entered into the transfer form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TransferFields {
    /// The recipient's account number.
    #[serde(default)]
    pub account_number: String,
    /// The recipient's name.
    #[serde(default)]
    pub recipient_name: String,
    /// The amount to send, as typed.
    #[serde(default)]
    pub amount: String,
}

/// A transfer that passed validation and is waiting to be confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTransfer {
    /// The recipient's account number, digits only.
    pub account_number: String,
    /// The recipient's name, trimmed.
    pub recipient_name: String,
    /// The amount to send.
    pub amount: Decimal,
}

/// Check the transfer form against the current `balance`.
///
/// The rules are applied in order and the first failure is returned.
///
/// # Errors
/// - [Error::InvalidRecipient] if the account number is not at least 8 digits.
/// - [Error::InvalidRecipientName] if the recipient name is blank.
/// - [Error::InvalidAmount] if the amount is not a number greater than zero.
/// - [Error::InsufficientBalance] if the amount is more than `balance`.
pub fn validate_transfer(
    fields: &TransferFields,
    balance: Decimal,
) -> Result<ValidTransfer, Error> {
    let account_number = fields.account_number.trim();
    if account_number.len() < MIN_ACCOUNT_NUMBER_DIGITS
        || !account_number.chars().all(|c| c.is_ascii_digit())
    {
        return Err(Error::InvalidRecipient);
    }

    let recipient_name = fields.recipient_name.trim();
    if recipient_name.is_empty() {
        return Err(Error::InvalidRecipientName);
    }

    let amount = parse_amount(&fields.amount).ok_or(Error::InvalidAmount)?;

    if amount > balance {
        return Err(Error::InsufficientBalance);
    }

    Ok(ValidTransfer {
        account_number: account_number.to_owned(),
        recipient_name: recipient_name.to_owned(),
        amount,
    })
}

/// Where the user is in the transfer flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransferStep {
    /// Filling in the form.
    #[default]
    Form,
    /// Reviewing a validated transfer.
    Confirm,
    /// The transfer went through.
    Success,
    /// The transfer was rejected after confirmation.
    Error,
}

/// The transfer flow for one session.
///
/// ```text
/// Form --submit--> Confirm --confirm--> Success
///  ^                 |         \
///  +------back-------+          +-----> Error --retry--> Form
/// ```
///
/// [TransferWizard::close] returns to an empty form from any step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferWizard {
    step: TransferStep,
    fields: TransferFields,
    pending: Option<ValidTransfer>,
    error: Option<Error>,
    completed: Option<ValidTransfer>,
}

impl TransferWizard {
    /// The current step.
    pub fn step(&self) -> TransferStep {
        self.step
    }

    /// The text last entered into the form.
    pub fn fields(&self) -> &TransferFields {
        &self.fields
    }

    /// The validated transfer shown on the confirm step.
    pub fn pending(&self) -> Option<&ValidTransfer> {
        self.pending.as_ref()
    }

    /// The transfer shown on the success step.
    pub fn completed(&self) -> Option<&ValidTransfer> {
        self.completed.as_ref()
    }

    /// The validation or transfer error to show, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Validate `fields` and move to the confirm step.
    ///
    /// The fields are kept whether or not they are valid so the form can be
    /// shown again with the user's input.
    ///
    /// # Errors
    /// - [Error::InvalidTransferStep] if the wizard is not on the form step.
    /// - Any error from [validate_transfer]. The wizard stays on the form
    ///   step and the error is also available from [TransferWizard::error].
    pub fn submit(&mut self, fields: TransferFields, balance: Decimal) -> Result<(), Error> {
        if self.step != TransferStep::Form {
            return Err(Error::InvalidTransferStep("submitted"));
        }

        let result = validate_transfer(&fields, balance);
        self.fields = fields;

        match result {
            Ok(transfer) => {
                self.pending = Some(transfer);
                self.error = None;
                self.step = TransferStep::Confirm;
                Ok(())
            }
            Err(error) => {
                self.pending = None;
                self.error = Some(error.clone());
                Err(error)
            }
        }
    }

    /// Go from the confirm step back to the form, keeping the entered fields.
    ///
    /// # Errors
    /// Returns [Error::InvalidTransferStep] if the wizard is not on the confirm step.
    pub fn back(&mut self) -> Result<(), Error> {
        if self.step != TransferStep::Confirm {
            return Err(Error::InvalidTransferStep("edited"));
        }

        self.pending = None;
        self.step = TransferStep::Form;

        Ok(())
    }

    /// Send the pending transfer from `session` and move to the success or error step.
    ///
    /// The balance is checked again, so a transfer that was valid when
    /// submitted can still fail here.
    ///
    /// # Errors
    /// Returns [Error::InvalidTransferStep] if the wizard is not on the confirm step.
    pub fn confirm(&mut self, session: &mut BankSession) -> Result<TransferStep, Error> {
        let transfer = match (self.step, self.pending.take()) {
            (TransferStep::Confirm, Some(transfer)) => transfer,
            (_, pending) => {
                self.pending = pending;
                return Err(Error::InvalidTransferStep("confirmed"));
            }
        };

        let description = format!("To account: {}", transfer.account_number);

        if session.transfer(transfer.amount, &transfer.recipient_name, &description) {
            tracing::info!(
                "transfer of {} to {} completed",
                transfer.amount,
                transfer.recipient_name
            );
            self.completed = Some(transfer);
            self.error = None;
            self.step = TransferStep::Success;
        } else {
            tracing::warn!(
                "transfer of {} to {} failed at confirmation",
                transfer.amount,
                transfer.recipient_name
            );
            self.completed = None;
            self.error = Some(Error::TransferFailed);
            self.step = TransferStep::Error;
        }

        Ok(self.step)
    }

    /// Go from the error step back to the form, keeping the entered fields.
    ///
    /// # Errors
    /// Returns [Error::InvalidTransferStep] if the wizard is not on the error step.
    pub fn retry(&mut self) -> Result<(), Error> {
        if self.step != TransferStep::Error {
            return Err(Error::InvalidTransferStep("retried"));
        }

        self.error = None;
        self.step = TransferStep::Form;

        Ok(())
    }

    /// Clear everything and go back to an empty form.
    pub fn close(&mut self) {
        *self = Self::default();
    }
}
