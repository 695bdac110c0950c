use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::plans::models::{Installment, InstallmentStatus};

/// A billing obligation of fixed total amount, divided into installments
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReceivablePlan {
    pub id: String,
    pub client_id: String,
    pub description: String,
    /// Invariant: equals the sum of the plan's installment amounts
    pub total_amount: Decimal,
    pub installment_count: i32,
    pub issue_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input for creating a plan together with its installments
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlan {
    pub client_id: String,
    pub description: String,
    pub total_amount: Decimal,
    pub installment_count: u32,
    pub issue_date: NaiveDate,
    /// Due date of installment 1; later installments step monthly
    pub first_due_date: NaiveDate,
    pub notes: Option<String>,
}

/// Plan-level display state rolled up from the installment set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanDisplayStatus {
    /// No installments (should not occur for generated plans)
    Empty,
    /// Every installment paid
    Settled,
    /// Some, but not all, installments paid
    PartiallyPaid,
    /// Nothing paid and at least one installment overdue
    Overdue,
    /// Nothing paid, nothing overdue
    Open,
}

/// Aggregated amounts and display state for a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub paid_amount: Decimal,
    pub open_amount: Decimal,
    pub display_status: PlanDisplayStatus,
}

/// A plan with its installments and derived summary, as returned by the
/// plan-level operations
#[derive(Debug, Clone, Serialize)]
pub struct PlanState {
    pub plan: ReceivablePlan,
    pub installments: Vec<Installment>,
    pub summary: PlanSummary,
    /// True when an edit left no sibling to absorb the delta, so the
    /// installment sum no longer matches the plan total
    pub total_mismatch: bool,
}

impl ReceivablePlan {
    pub fn new(input: &NewPlan) -> Result<Self> {
        if input.description.trim().is_empty() {
            return Err(AppError::validation("Plan description cannot be empty"));
        }

        if input.total_amount <= Decimal::ZERO {
            return Err(AppError::invalid_amount(
                "Plan total amount must be positive",
            ));
        }

        let now = chrono::Utc::now().naive_utc();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            client_id: input.client_id.clone(),
            description: input.description.clone(),
            total_amount: input.total_amount,
            installment_count: input.installment_count as i32,
            issue_date: input.issue_date,
            notes: input.notes.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Rolls the installment set up into paid/open totals and a display state.
    pub fn summarize(&self, installments: &[Installment]) -> PlanSummary {
        let paid_amount: Decimal = installments
            .iter()
            .filter(|i| i.status == InstallmentStatus::Paid)
            .map(|i| i.amount)
            .sum();

        let paid_count = installments
            .iter()
            .filter(|i| i.status == InstallmentStatus::Paid)
            .count();
        let any_overdue = installments
            .iter()
            .any(|i| i.status == InstallmentStatus::Overdue);

        let display_status = if installments.is_empty() {
            PlanDisplayStatus::Empty
        } else if paid_count == installments.len() {
            PlanDisplayStatus::Settled
        } else if paid_count > 0 {
            PlanDisplayStatus::PartiallyPaid
        } else if any_overdue {
            PlanDisplayStatus::Overdue
        } else {
            PlanDisplayStatus::Open
        };

        PlanSummary {
            paid_amount,
            open_amount: self.total_amount - paid_amount,
            display_status,
        }
    }

    /// Whether the installment amounts still sum to the plan total.
    pub fn total_matches(&self, installments: &[Installment]) -> bool {
        let sum: Decimal = installments.iter().map(|i| i.amount).sum();
        sum == self.total_amount
    }
}
