use chrono::Utc;
use financeiro::config::Config;
use financeiro::plans::InstallmentService;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Batch entry point: runs the overdue sweep once and exits.
/// Intended to be scheduled (cron or similar) once a day.
#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "financeiro=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting Financeiro overdue sweep");
    tracing::info!("Environment: {}", config.app.env);

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    let service = InstallmentService::new(db_pool);
    let today = Utc::now().date_naive();

    match service.sweep_overdue(today).await {
        Ok(transitioned) => {
            tracing::info!(
                transitioned,
                %today,
                "Overdue sweep finished"
            );
        }
        Err(err) => {
            tracing::error!(error = %err, "Overdue sweep failed");
            std::process::exit(1);
        }
    }

    Ok(())
}
