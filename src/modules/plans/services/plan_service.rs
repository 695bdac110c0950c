// Business logic layer for receivable plan operations.
//
// Implements:
// - Atomic plan generation (plan + installments in one transaction)
// - On-access status refresh when reading a plan
// - Amount edits with rebalancing under a row-locked transaction
// - Cascade deletion

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::MySqlPool;
use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::clients::repositories::ClientRepository;
use crate::modules::plans::{
    models::{Installment, NewPlan, PlanState, ReceivablePlan},
    repositories::{InstallmentRepository, PlanRepository},
    services::{PlanGenerator, Rebalancer},
};

/// Service for plan-level business logic
pub struct PlanService {
    pool: MySqlPool,
    plans: PlanRepository,
    installments: InstallmentRepository,
    clients: ClientRepository,
    /// Per-plan installment cap, from `AppConfig.max_installments`
    max_installments: u32,
}

impl PlanService {
    pub fn new(pool: MySqlPool, max_installments: u32) -> Self {
        Self {
            plans: PlanRepository::new(pool.clone()),
            installments: InstallmentRepository::new(pool.clone()),
            clients: ClientRepository::new(pool.clone()),
            pool,
            max_installments,
        }
    }

    /// Create a plan and generate its installment set atomically.
    ///
    /// The reference date is injected by the caller; the first due date may
    /// not lie before it.
    pub async fn create_plan(&self, input: NewPlan, today: NaiveDate) -> Result<PlanState> {
        if input.first_due_date < today {
            return Err(AppError::PastDueDate(format!(
                "First due date {} is before {}",
                input.first_due_date, today
            )));
        }

        self.clients
            .find_by_id(&input.client_id)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))?;

        let plan = ReceivablePlan::new(&input)?;
        let installments = PlanGenerator::build(
            &plan.id,
            plan.total_amount,
            input.installment_count,
            input.first_due_date,
            self.max_installments,
        )?;

        self.plans
            .create_with_installments(&plan, &installments)
            .await?;

        info!(
            plan_id = plan.id.as_str(),
            client_id = plan.client_id.as_str(),
            installment_count = installments.len(),
            total_amount = %plan.total_amount,
            "Receivable plan created"
        );

        Ok(self.assemble_state(plan, installments))
    }

    /// Load a plan with its installments, refreshing overdue statuses on the
    /// way (the on-access variant of the sweep).
    pub async fn get_plan(&self, plan_id: &str, today: NaiveDate) -> Result<PlanState> {
        let plan = self
            .plans
            .find_by_id(plan_id)
            .await?
            .ok_or_else(|| AppError::not_found("Plan not found"))?;

        self.installments
            .sweep_overdue_for_plan(plan_id, today)
            .await?;

        let installments = self.installments.find_by_plan(plan_id).await?;

        Ok(self.assemble_state(plan, installments))
    }

    pub async fn list_client_plans(&self, client_id: &str) -> Result<Vec<ReceivablePlan>> {
        self.plans.find_by_client(client_id).await
    }

    /// Delete a plan and its installments (cascade).
    pub async fn delete_plan(&self, plan_id: &str) -> Result<()> {
        self.plans.delete_cascade(plan_id).await?;

        info!(plan_id, "Plan deleted with its installments");

        Ok(())
    }

    /// Change one installment's amount, redistributing the delta across the
    /// plan's unpaid siblings so the plan total is preserved.
    ///
    /// The whole read-modify-write runs in one transaction with the plan's
    /// installment rows locked; any failure rolls back everything, including
    /// the edit itself.
    pub async fn edit_installment_amount(
        &self,
        installment_id: &str,
        new_amount: Decimal,
        today: NaiveDate,
    ) -> Result<PlanState> {
        let edited = self
            .installments
            .find_by_id(installment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Installment not found"))?;

        let plan = self
            .plans
            .find_by_id(&edited.plan_id)
            .await?
            .ok_or_else(|| AppError::not_found("Plan not found"))?;

        let mut tx = self.pool.begin().await?;

        let mut siblings = self
            .installments
            .find_by_plan_for_update(&mut tx, &plan.id)
            .await?;

        let outcome = Rebalancer::redistribute(
            &mut siblings,
            edited.sequence,
            new_amount,
            plan.total_amount,
        )?;

        let changed: Vec<&_> = siblings
            .iter()
            .filter(|i| outcome.changed_ids.contains(&i.id))
            .collect();
        self.installments
            .update_amounts_with_tx(&mut tx, &changed)
            .await?;

        tx.commit().await?;

        if outcome.total_mismatch {
            warn!(
                plan_id = plan.id.as_str(),
                installment_id,
                %new_amount,
                "Amount edit accepted without rebalancing, plan total no longer matches"
            );
        } else {
            info!(
                plan_id = plan.id.as_str(),
                installment_id,
                %new_amount,
                adjusted = outcome.changed_ids.len() - 1,
                "Installment amount edited and plan rebalanced"
            );
        }

        // Statuses may be stale relative to today after the lock was held
        self.installments
            .sweep_overdue_for_plan(&plan.id, today)
            .await?;
        let installments = self.installments.find_by_plan(&plan.id).await?;

        Ok(self.assemble_state(plan, installments))
    }

    fn assemble_state(&self, plan: ReceivablePlan, installments: Vec<Installment>) -> PlanState {
        let summary = plan.summarize(&installments);
        let total_mismatch = !plan.total_matches(&installments);

        PlanState {
            summary,
            total_mismatch,
            plan,
            installments,
        }
    }
}
