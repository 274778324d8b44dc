//! One-shot monthly reset: marks every student unpaid and exits.
//! Meant for an external cron entry such as `0 0 1 * *`.

use std::sync::Arc;

use cms_backend::config::database_url_from_env;
use cms_backend::db;
use cms_backend::services::{LogNotifier, PaymentService};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if dotenvy::dotenv().is_err() {
        eprintln!(".env file not found, continuing with environment variables");
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "cms_backend=info,reset_payments=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = db::connect(&database_url_from_env()).await?;
    let service = PaymentService::new(pool, Arc::new(LogNotifier));

    match service.monthly_reset_within(db::JOB_TIMEOUT).await {
        Ok(n) => {
            info!("monthly reset finished, {} students marked unpaid", n);
            Ok(())
        }
        Err(e) => {
            error!("Failed to reset payments: {}", e);
            Err(e.into())
        }
    }
}
