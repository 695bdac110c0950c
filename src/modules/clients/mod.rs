pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Client, ClientReceivableSummary, NewClient};
pub use repositories::ClientRepository;
pub use services::{ClientService, TaxIdKind, TaxIdValidation};
