use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};

/// One scheduled payment unit of a receivable plan
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Installment {
    pub id: String,
    pub plan_id: String,
    /// Sequential number (1-based), unique within the plan
    pub sequence: i32,
    /// Payment amount, 2-decimal currency
    pub amount: Decimal,
    pub due_date: NaiveDate,
    /// Set by the pay action, cleared by reversal
    pub payment_date: Option<NaiveDate>,
    #[sqlx(try_from = "String")]
    pub status: InstallmentStatus,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Installment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    /// Not yet due, not yet paid
    Open,
    /// Due date passed without payment
    Overdue,
    /// Payment recorded
    Paid,
}

impl InstallmentStatus {
    /// Deterministic status from the installment's dates.
    ///
    /// A recorded payment date always wins; otherwise the due date is
    /// compared against the supplied reference date.
    pub fn derive(
        payment_date: Option<NaiveDate>,
        due_date: NaiveDate,
        today: NaiveDate,
    ) -> Self {
        if payment_date.is_some() {
            Self::Paid
        } else if due_date < today {
            Self::Overdue
        } else {
            Self::Open
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Overdue => "overdue",
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for InstallmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for InstallmentStatus {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "open" => Ok(Self::Open),
            "overdue" => Ok(Self::Overdue),
            "paid" => Ok(Self::Paid),
            _ => Err(format!("Invalid installment status: {}", value)),
        }
    }
}

impl Installment {
    pub fn new(
        plan_id: String,
        sequence: i32,
        amount: Decimal,
        due_date: NaiveDate,
    ) -> Result<Self> {
        if sequence < 1 {
            return Err(AppError::invalid_count(format!(
                "Installment sequence must be positive, got {}",
                sequence
            )));
        }

        if amount <= Decimal::ZERO {
            return Err(AppError::invalid_amount(
                "Installment amount must be positive",
            ));
        }

        let now = chrono::Utc::now().naive_utc();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            plan_id,
            sequence,
            amount,
            due_date,
            payment_date: None,
            status: InstallmentStatus::Open,
            notes: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Paid installments are locked against amount and due-date edits.
    pub fn is_locked(&self) -> bool {
        self.status == InstallmentStatus::Paid
    }

    /// Re-derives the status from the stored dates.
    /// Returns true when the status actually changed.
    pub fn refresh_status(&mut self, today: NaiveDate) -> bool {
        let derived = InstallmentStatus::derive(self.payment_date, self.due_date, today);
        if derived != self.status {
            self.status = derived;
            self.touch();
            true
        } else {
            false
        }
    }

    /// Records a payment. Returns false (leaving everything untouched) when
    /// the installment is already paid.
    pub fn mark_paid(&mut self, payment_date: NaiveDate) -> bool {
        if self.status == InstallmentStatus::Paid {
            return false;
        }

        self.payment_date = Some(payment_date);
        self.status = InstallmentStatus::Paid;
        self.touch();
        true
    }

    /// Reverses a payment, re-deriving open/overdue from the due date.
    /// Returns false when the installment is not paid.
    pub fn reverse_payment(&mut self, today: NaiveDate) -> bool {
        if self.status != InstallmentStatus::Paid {
            return false;
        }

        self.payment_date = None;
        self.status = InstallmentStatus::derive(None, self.due_date, today);
        self.touch();
        true
    }

    /// Moves the due date of an unpaid installment.
    pub fn reschedule(&mut self, new_due_date: NaiveDate, today: NaiveDate) -> Result<()> {
        if self.is_locked() {
            return Err(AppError::locked(format!(
                "Installment {} is paid; reverse the payment before editing",
                self.sequence
            )));
        }

        self.due_date = new_due_date;
        self.status = InstallmentStatus::derive(self.payment_date, new_due_date, today);
        self.touch();

        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().naive_utc();
    }
}
