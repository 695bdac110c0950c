use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::{AppError, Result};

/// Number of decimal places for BRL currency amounts
pub const CURRENCY_SCALE: u32 = 2;

/// Rounds an amount to currency precision, truncating toward zero.
pub fn truncate_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::ToZero)
}

/// Splits `total` into `parts` currency amounts whose sum equals `total`
/// exactly.
///
/// Each part is the quotient truncated to the cent; the last part absorbs the
/// accumulated residue. Every returned amount is strictly positive.
pub fn divide_evenly(total: Decimal, parts: u32) -> Result<Vec<Decimal>> {
    if parts == 0 {
        return Err(AppError::invalid_count("number of parts cannot be zero"));
    }

    let base = truncate_to_cents(total / Decimal::from(parts));
    let mut amounts = Vec::with_capacity(parts as usize);
    let mut distributed = Decimal::ZERO;

    for i in 0..parts {
        let amount = if i == parts - 1 {
            // Last part absorbs the rounding residue
            total - distributed
        } else {
            base
        };

        if amount <= Decimal::ZERO {
            return Err(AppError::invalid_amount(format!(
                "part {} of {} would be {}, amounts must be positive",
                i + 1,
                parts,
                amount
            )));
        }

        distributed += amount;
        amounts.push(amount);
    }

    Ok(amounts)
}
