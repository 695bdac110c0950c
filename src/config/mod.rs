use crate::core::{AppError, Result};
use crate::modules::plans::MAX_INSTALLMENT_COUNT;
use serde::Deserialize;
use std::env;

pub mod database;

pub use database::DatabaseConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    /// Practical upper bound for installments per plan
    pub max_installments: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                max_installments: env::var("MAX_INSTALLMENTS")
                    .unwrap_or_else(|_| MAX_INSTALLMENT_COUNT.to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid MAX_INSTALLMENTS".to_string())
                    })?,
            },
            database: DatabaseConfig::from_env()?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.app.max_installments == 0 {
            return Err(AppError::Configuration(
                "Max installments must be greater than 0".to_string(),
            ));
        }

        if self.database.max_connections < self.database.pool_size {
            return Err(AppError::Configuration(
                "Max connections must be at least the pool size".to_string(),
            ));
        }

        Ok(())
    }
}
