// MySQL CRUD operations for receivable plans.
//
// Plan creation and deletion always touch the installment rows in the same
// transaction: a plan and its installments live and die together.

use sqlx::{MySql, MySqlPool, Transaction};

use crate::core::{AppError, Result};
use crate::modules::plans::models::{Installment, ReceivablePlan};

/// Repository for receivable plan database operations
pub struct PlanRepository {
    pool: MySqlPool,
}

impl PlanRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Persist a plan and its full installment set atomically.
    /// On any failure nothing is written.
    pub async fn create_with_installments(
        &self,
        plan: &ReceivablePlan,
        installments: &[Installment],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO receivable_plans (
                id, client_id, description, total_amount, installment_count,
                issue_date, notes, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&plan.id)
        .bind(&plan.client_id)
        .bind(&plan.description)
        .bind(plan.total_amount)
        .bind(plan.installment_count)
        .bind(plan.issue_date)
        .bind(&plan.notes)
        .bind(plan.created_at)
        .bind(plan.updated_at)
        .execute(tx.as_mut())
        .await?;

        for installment in installments {
            Self::insert_installment(&mut tx, installment).await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn insert_installment(
        tx: &mut Transaction<'_, MySql>,
        installment: &Installment,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO installments (
                id, plan_id, sequence, amount, due_date, payment_date,
                status, notes, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&installment.id)
        .bind(&installment.plan_id)
        .bind(installment.sequence)
        .bind(installment.amount)
        .bind(installment.due_date)
        .bind(installment.payment_date)
        .bind(installment.status.to_string())
        .bind(&installment.notes)
        .bind(installment.created_at)
        .bind(installment.updated_at)
        .execute(tx.as_mut())
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<ReceivablePlan>> {
        let plan = sqlx::query_as::<_, ReceivablePlan>(
            r#"
            SELECT
                id, client_id, description, total_amount, installment_count,
                issue_date, notes, created_at, updated_at
            FROM receivable_plans
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(plan)
    }

    /// Plans of a client, most recently issued first.
    pub async fn find_by_client(&self, client_id: &str) -> Result<Vec<ReceivablePlan>> {
        let plans = sqlx::query_as::<_, ReceivablePlan>(
            r#"
            SELECT
                id, client_id, description, total_amount, installment_count,
                issue_date, notes, created_at, updated_at
            FROM receivable_plans
            WHERE client_id = ?
            ORDER BY issue_date DESC
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(plans)
    }

    /// Delete a plan and all of its installments in one transaction.
    pub async fn delete_cascade(&self, id: &str) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM installments WHERE plan_id = ?")
            .bind(id)
            .execute(tx.as_mut())
            .await?;

        let rows_affected = sqlx::query("DELETE FROM receivable_plans WHERE id = ?")
            .bind(id)
            .execute(tx.as_mut())
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::not_found("Plan not found"));
        }

        tx.commit().await?;

        Ok(())
    }
}
