use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use crate::core::money::divide_evenly;
use crate::core::{AppError, Result};
use crate::modules::plans::models::Installment;

/// Default upper bound on installments per plan, overridable through the
/// `MAX_INSTALLMENTS` configuration knob
pub const MAX_INSTALLMENT_COUNT: u32 = 120;

/// Builds the installment set for a new receivable plan.
///
/// Amounts come from even division with the rounding residue on the last
/// installment, so the generated set sums to the plan total by construction.
/// Due dates step in calendar months from the first due date; when the target
/// month lacks the day it is clamped to month end.
pub struct PlanGenerator;

impl PlanGenerator {
    pub fn build(
        plan_id: &str,
        total: Decimal,
        count: u32,
        first_due_date: NaiveDate,
        max_count: u32,
    ) -> Result<Vec<Installment>> {
        if count == 0 || count > max_count {
            return Err(AppError::invalid_count(format!(
                "Installment count must be between 1 and {}, got {}",
                max_count, count
            )));
        }

        if total <= Decimal::ZERO {
            return Err(AppError::invalid_amount(
                "Plan total amount must be positive",
            ));
        }

        let amounts = divide_evenly(total, count)?;

        let mut installments = Vec::with_capacity(count as usize);
        for (i, amount) in amounts.into_iter().enumerate() {
            let due_date = first_due_date
                .checked_add_months(Months::new(i as u32))
                .ok_or_else(|| AppError::validation("Failed to calculate due date"))?;

            let installment =
                Installment::new(plan_id.to_string(), (i + 1) as i32, amount, due_date)?;
            installments.push(installment);
        }

        Ok(installments)
    }
}
