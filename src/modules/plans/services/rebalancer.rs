use rust_decimal::Decimal;
use tracing::warn;

use crate::core::money::divide_evenly;
use crate::core::{AppError, Result};
use crate::modules::plans::models::{Installment, InstallmentStatus};

/// Result of redistributing a plan's installment amounts after an edit
#[derive(Debug, Clone)]
pub struct RebalanceOutcome {
    /// Ids of installments whose amount was rewritten (edited one included)
    pub changed_ids: Vec<String>,
    /// True when no sibling could absorb the delta and the installment sum
    /// no longer matches the plan total
    pub total_mismatch: bool,
}

/// Redistributes amounts across a plan's unpaid installments so the plan
/// total survives a single-installment edit.
///
/// The edited installment keeps its new amount; the remaining target is
/// divided evenly over the adjustable set (not paid, not the edited one) in
/// sequence order, residue on the last adjustable installment.
pub struct Rebalancer;

impl Rebalancer {
    pub fn redistribute(
        installments: &mut [Installment],
        edited_sequence: i32,
        new_amount: Decimal,
        plan_total: Decimal,
    ) -> Result<RebalanceOutcome> {
        if new_amount <= Decimal::ZERO {
            return Err(AppError::invalid_amount(
                "Installment amount must be positive",
            ));
        }

        let edited_idx = installments
            .iter()
            .position(|i| i.sequence == edited_sequence)
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Installment {} not found in plan",
                    edited_sequence
                ))
            })?;

        if installments[edited_idx].is_locked() {
            return Err(AppError::locked(format!(
                "Installment {} is paid; reverse the payment before editing",
                edited_sequence
            )));
        }

        let now = chrono::Utc::now().naive_utc();
        installments[edited_idx].amount = new_amount;
        installments[edited_idx].updated_at = now;

        let mut changed_ids = vec![installments[edited_idx].id.clone()];

        let mut adjustable: Vec<usize> = installments
            .iter()
            .enumerate()
            .filter(|(idx, i)| *idx != edited_idx && i.status != InstallmentStatus::Paid)
            .map(|(idx, _)| idx)
            .collect();
        adjustable.sort_by_key(|&idx| installments[idx].sequence);

        if adjustable.is_empty() {
            // No sibling left to absorb the delta. The edit stands, but the
            // plan-total invariant is broken and the caller must surface it.
            warn!(
                edited_sequence,
                %new_amount,
                "No adjustable installments remain, plan total no longer matches"
            );
            return Ok(RebalanceOutcome {
                changed_ids,
                total_mismatch: true,
            });
        }

        let paid_total: Decimal = installments
            .iter()
            .filter(|i| i.status == InstallmentStatus::Paid)
            .map(|i| i.amount)
            .sum();

        let target_remaining = plan_total - paid_total - new_amount;
        if target_remaining <= Decimal::ZERO {
            return Err(AppError::invalid_amount(format!(
                "New amount {} leaves {} for the {} remaining installment(s)",
                new_amount,
                target_remaining,
                adjustable.len()
            )));
        }

        let shares = divide_evenly(target_remaining, adjustable.len() as u32)?;

        for (&idx, share) in adjustable.iter().zip(shares) {
            if installments[idx].amount != share {
                installments[idx].amount = share;
                installments[idx].updated_at = now;
                changed_ids.push(installments[idx].id.clone());
            }
        }

        Ok(RebalanceOutcome {
            changed_ids,
            total_mismatch: false,
        })
    }
}
