//! Financeiro Receivables Core Library
//!
//! Accounts-receivable domain core: client registry with CPF/CNPJ validation,
//! installment-plan generation, payment lifecycle tracking, and plan
//! rebalancing.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::clients;
pub use modules::plans;
