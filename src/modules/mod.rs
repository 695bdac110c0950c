pub mod clients;
pub mod plans;
