pub mod installment;
pub mod plan;

pub use installment::{Installment, InstallmentStatus};
pub use plan::{NewPlan, PlanDisplayStatus, PlanState, PlanSummary, ReceivablePlan};
