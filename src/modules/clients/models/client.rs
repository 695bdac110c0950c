use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::clients::services::tax_id::{normalize_tax_id, validate_tax_id};

/// A registered client that receivable plans are billed against
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: String,
    pub full_name: String,
    /// CPF or CNPJ, stored as bare digits
    pub tax_id: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    /// Soft-delete flag; deactivated clients keep their plans
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input for creating or updating a client
#[derive(Debug, Clone, Deserialize)]
pub struct NewClient {
    pub full_name: String,
    pub tax_id: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// Receivable totals for a single client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClientReceivableSummary {
    /// Sum of open and overdue installment amounts
    pub outstanding_total: Decimal,
    /// Sum of paid installment amounts
    pub received_total: Decimal,
}

impl Client {
    /// Create a new client, validating the tax ID if present.
    pub fn new(input: NewClient) -> Result<Self> {
        let tax_id = Self::validate_input(&input)?;
        let now = chrono::Utc::now().naive_utc();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            full_name: input.full_name,
            tax_id,
            phone: input.phone,
            email: input.email,
            address: input.address,
            notes: input.notes,
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply updated registration data to an existing client.
    pub fn apply_update(&mut self, input: NewClient) -> Result<()> {
        let tax_id = Self::validate_input(&input)?;

        self.full_name = input.full_name;
        self.tax_id = tax_id;
        self.phone = input.phone;
        self.email = input.email;
        self.address = input.address;
        self.notes = input.notes;
        self.updated_at = chrono::Utc::now().naive_utc();

        Ok(())
    }

    /// Validates the registration input, returning the normalized tax ID.
    fn validate_input(input: &NewClient) -> Result<Option<String>> {
        if input.full_name.trim().is_empty() {
            return Err(AppError::validation("Client name cannot be empty"));
        }

        match input.tax_id.as_deref() {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => {
                let validation = validate_tax_id(raw);
                if !validation.valid {
                    return Err(AppError::validation(format!(
                        "Invalid CPF/CNPJ: {}",
                        raw
                    )));
                }
                Ok(Some(normalize_tax_id(raw)))
            }
        }
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = chrono::Utc::now().naive_utc();
    }
}
