use std::net::SocketAddr;
use std::sync::Arc;

use cms_backend::api::router;
use cms_backend::config::AppConfig;
use cms_backend::db;
use cms_backend::services::{LogNotifier, MonthlyResetScheduler, Notifier};
use cms_backend::state::AppState;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "cms_backend=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;
    info!("loaded {} user PINs", config.user_pins.len());

    let pool = db::connect(&config.database_url).await?;
    info!("connected to {}", config.database_url);

    let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);

    if config.monthly_reset {
        let scheduler = MonthlyResetScheduler::new(pool.clone(), notifier.clone());
        tokio::spawn(scheduler.start());
    } else {
        info!("monthly payment reset scheduler disabled");
    }

    let state = AppState {
        db: pool,
        notifier,
        pins: Arc::new(config.user_pins),
    };

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
