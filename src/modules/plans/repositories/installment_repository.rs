// MySQL CRUD operations for installments.
//
// Provides:
// - Reads by id and by plan, each with a FOR UPDATE variant
// - Transactional updates narrowed to the columns an action may change
// - The idempotent overdue sweep as a single UPDATE statement
//
// Every write goes through a transaction that locked the row(s) first, so
// concurrent actions against the same plan serialize instead of overwriting
// each other's columns.

use chrono::NaiveDate;
use sqlx::{MySql, MySqlPool, Transaction};

use crate::core::{AppError, Result};
use crate::modules::plans::models::Installment;

const SELECT_COLUMNS: &str = r#"
    id, plan_id, sequence, amount, due_date, payment_date,
    status, notes, created_at, updated_at
"#;

/// Repository for installment database operations
pub struct InstallmentRepository {
    pool: MySqlPool,
}

impl InstallmentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Installment>> {
        let installment = sqlx::query_as::<_, Installment>(&format!(
            "SELECT {} FROM installments WHERE id = ?",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(installment)
    }

    /// All installments of a plan, ordered by sequence.
    pub async fn find_by_plan(&self, plan_id: &str) -> Result<Vec<Installment>> {
        let installments = sqlx::query_as::<_, Installment>(&format!(
            "SELECT {} FROM installments WHERE plan_id = ? ORDER BY sequence ASC",
            SELECT_COLUMNS
        ))
        .bind(plan_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(installments)
    }

    /// Locks and loads a single installment row inside a transaction.
    ///
    /// Blocks behind any rebalancing transaction holding the plan-wide lock,
    /// so the caller always sees committed amounts.
    pub async fn find_by_id_for_update(
        &self,
        tx: &mut Transaction<'_, MySql>,
        id: &str,
    ) -> Result<Option<Installment>> {
        let installment = sqlx::query_as::<_, Installment>(&format!(
            "SELECT {} FROM installments WHERE id = ? FOR UPDATE",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(tx.as_mut())
        .await?;

        Ok(installment)
    }

    /// Locks and loads a plan's installment rows inside a transaction.
    ///
    /// Serializes concurrent rebalancing and pay/reverse actions against the
    /// same plan; the lock is held until the transaction ends.
    pub async fn find_by_plan_for_update(
        &self,
        tx: &mut Transaction<'_, MySql>,
        plan_id: &str,
    ) -> Result<Vec<Installment>> {
        let installments = sqlx::query_as::<_, Installment>(&format!(
            "SELECT {} FROM installments WHERE plan_id = ? ORDER BY sequence ASC FOR UPDATE",
            SELECT_COLUMNS
        ))
        .bind(plan_id)
        .fetch_all(tx.as_mut())
        .await?;

        Ok(installments)
    }

    /// Write the payment columns of a locked row. Never touches the amount,
    /// so a pay or reversal cannot clobber a concurrent rebalance.
    pub async fn update_payment_with_tx(
        &self,
        tx: &mut Transaction<'_, MySql>,
        installment: &Installment,
    ) -> Result<()> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE installments
            SET payment_date = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(installment.payment_date)
        .bind(installment.status.to_string())
        .bind(installment.updated_at)
        .bind(&installment.id)
        .execute(tx.as_mut())
        .await?
        .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::not_found("Installment not found"));
        }

        Ok(())
    }

    /// Write the due-date columns of a locked row.
    pub async fn update_due_date_with_tx(
        &self,
        tx: &mut Transaction<'_, MySql>,
        installment: &Installment,
    ) -> Result<()> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE installments
            SET due_date = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(installment.due_date)
        .bind(installment.status.to_string())
        .bind(installment.updated_at)
        .bind(&installment.id)
        .execute(tx.as_mut())
        .await?
        .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::not_found("Installment not found"));
        }

        Ok(())
    }

    /// Update amount and timestamp for several installments within one
    /// transaction. Used by the rebalancing path.
    pub async fn update_amounts_with_tx(
        &self,
        tx: &mut Transaction<'_, MySql>,
        installments: &[&Installment],
    ) -> Result<()> {
        for installment in installments {
            sqlx::query(
                r#"
                UPDATE installments
                SET amount = ?, updated_at = ?
                WHERE id = ?
                "#,
            )
            .bind(installment.amount)
            .bind(installment.updated_at)
            .bind(&installment.id)
            .execute(tx.as_mut())
            .await?;
        }

        Ok(())
    }

    /// Transitions every open installment past its due date to overdue.
    ///
    /// One UPDATE statement; running it again for the same date matches
    /// nothing and changes nothing.
    pub async fn sweep_overdue(&self, today: NaiveDate) -> Result<u64> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE installments
            SET status = 'overdue', updated_at = ?
            WHERE status = 'open' AND due_date < ?
            "#,
        )
        .bind(chrono::Utc::now().naive_utc())
        .bind(today)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows_affected)
    }

    /// Overdue sweep scoped to a single plan, for on-access refresh.
    pub async fn sweep_overdue_for_plan(&self, plan_id: &str, today: NaiveDate) -> Result<u64> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE installments
            SET status = 'overdue', updated_at = ?
            WHERE plan_id = ? AND status = 'open' AND due_date < ?
            "#,
        )
        .bind(chrono::Utc::now().naive_utc())
        .bind(plan_id)
        .bind(today)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows_affected)
    }
}
