pub mod installment_service;
pub mod plan_generator;
pub mod plan_service;
pub mod rebalancer;

pub use installment_service::{InstallmentService, PaymentOutcome};
pub use plan_generator::{PlanGenerator, MAX_INSTALLMENT_COUNT};
pub use plan_service::PlanService;
pub use rebalancer::{RebalanceOutcome, Rebalancer};
