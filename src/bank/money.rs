//! Parsing and rounding of currency amounts.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// The number of decimal places in a whole number of cents.
const CENT_DECIMAL_PLACES: u32 = 2;

/// Parse `text` as a transfer amount.
///
/// Returns `None` unless `text` (ignoring surrounding whitespace) is a
/// decimal number greater than zero in whole cents.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let amount = Decimal::from_str(text.trim()).ok()?;

    (amount > Decimal::ZERO && is_whole_cents(amount)).then_some(amount)
}

/// Whether `amount` has no digits past the cents, e.g. "12.30" or "12.300" but not "12.304".
pub fn is_whole_cents(amount: Decimal) -> bool {
    amount.normalize().scale() <= CENT_DECIMAL_PLACES
}

/// Round `amount` to whole cents, with halves rounded away from zero.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
