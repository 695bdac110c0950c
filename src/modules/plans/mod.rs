pub mod models;
pub mod repositories;
pub mod services;

pub use models::{
    Installment, InstallmentStatus, NewPlan, PlanDisplayStatus, PlanState, PlanSummary,
    ReceivablePlan,
};
pub use repositories::{InstallmentRepository, PlanRepository};
pub use services::{
    InstallmentService, PaymentOutcome, PlanGenerator, PlanService, RebalanceOutcome, Rebalancer,
    MAX_INSTALLMENT_COUNT,
};
