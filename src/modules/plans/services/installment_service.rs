// Business logic layer for per-installment actions.
//
// Implements:
// - Explicit pay and reverse actions (soft no-ops when the state already
//   matches, reported via the outcome instead of an error)
// - Due-date edits for unpaid installments
// - The idempotent overdue sweep, global and per plan
//
// Each mutating action runs in its own transaction and re-reads the row
// with a lock, serializing against rebalancing edits on the same plan.

use chrono::NaiveDate;
use sqlx::MySqlPool;
use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::plans::{
    models::Installment, repositories::InstallmentRepository,
};

/// Result of a pay or reverse action.
///
/// `applied` is false when the action was refused as a no-op (paying an
/// already-paid installment, reversing an unpaid one); the installment is
/// returned unchanged in that case.
#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    pub installment: Installment,
    pub applied: bool,
}

/// Service for installment lifecycle actions
pub struct InstallmentService {
    pool: MySqlPool,
    repository: InstallmentRepository,
}

impl InstallmentService {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            repository: InstallmentRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn get_installment(&self, id: &str) -> Result<Installment> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Installment not found"))
    }

    /// Record a payment. The payment date defaults to the reference date.
    pub async fn mark_paid(
        &self,
        id: &str,
        payment_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<PaymentOutcome> {
        let mut tx = self.pool.begin().await?;

        let mut installment = self
            .repository
            .find_by_id_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found("Installment not found"))?;

        let applied = installment.mark_paid(payment_date.unwrap_or(today));
        if !applied {
            warn!(
                installment_id = id,
                sequence = installment.sequence,
                "Installment is already paid, ignoring pay action"
            );
            return Ok(PaymentOutcome {
                installment,
                applied: false,
            });
        }

        self.repository
            .update_payment_with_tx(&mut tx, &installment)
            .await?;
        tx.commit().await?;

        info!(
            installment_id = id,
            sequence = installment.sequence,
            payment_date = %installment.payment_date.unwrap_or(today),
            "Installment marked as paid"
        );

        Ok(PaymentOutcome {
            installment,
            applied: true,
        })
    }

    /// Clear a recorded payment; status falls back to open or overdue
    /// depending on the due date.
    pub async fn reverse_payment(&self, id: &str, today: NaiveDate) -> Result<PaymentOutcome> {
        let mut tx = self.pool.begin().await?;

        let mut installment = self
            .repository
            .find_by_id_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found("Installment not found"))?;

        let applied = installment.reverse_payment(today);
        if !applied {
            warn!(
                installment_id = id,
                sequence = installment.sequence,
                "Installment is not paid, ignoring reversal"
            );
            return Ok(PaymentOutcome {
                installment,
                applied: false,
            });
        }

        self.repository
            .update_payment_with_tx(&mut tx, &installment)
            .await?;
        tx.commit().await?;

        info!(
            installment_id = id,
            sequence = installment.sequence,
            status = %installment.status,
            "Payment reversed"
        );

        Ok(PaymentOutcome {
            installment,
            applied: true,
        })
    }

    /// Move the due date of an unpaid installment.
    /// Paid installments are locked; the amount invariant is untouched.
    pub async fn edit_due_date(
        &self,
        id: &str,
        new_due_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<Installment> {
        let mut tx = self.pool.begin().await?;

        let mut installment = self
            .repository
            .find_by_id_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found("Installment not found"))?;

        installment.reschedule(new_due_date, today)?;
        self.repository
            .update_due_date_with_tx(&mut tx, &installment)
            .await?;
        tx.commit().await?;

        info!(
            installment_id = id,
            due_date = %new_due_date,
            status = %installment.status,
            "Installment rescheduled"
        );

        Ok(installment)
    }

    /// Transition every open installment past its due date to overdue.
    /// Safe to run repeatedly; a second run for the same date is a no-op.
    pub async fn sweep_overdue(&self, today: NaiveDate) -> Result<u64> {
        let transitioned = self.repository.sweep_overdue(today).await?;

        if transitioned > 0 {
            info!(transitioned, %today, "Overdue sweep transitioned installments");
        }

        Ok(transitioned)
    }

    /// Overdue sweep scoped to one plan.
    pub async fn sweep_plan_overdue(&self, plan_id: &str, today: NaiveDate) -> Result<u64> {
        self.repository.sweep_overdue_for_plan(plan_id, today).await
    }
}
