pub mod client_service;
pub mod tax_id;

pub use client_service::ClientService;
pub use tax_id::{
    format_tax_id, is_valid_cnpj, is_valid_cpf, normalize_tax_id, validate_tax_id, TaxIdKind,
    TaxIdValidation,
};
