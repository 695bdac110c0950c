pub mod installment_repository;
pub mod plan_repository;

pub use installment_repository::InstallmentRepository;
pub use plan_repository::PlanRepository;
