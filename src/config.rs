use std::env;

use crate::auth::PinDirectory;
use crate::error::AppError;

const DEFAULT_DATABASE_URL: &str = "sqlite://cms.db?mode=rwc";
const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub user_pins: PinDirectory,
    pub monthly_reset: bool,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn new_from_env() -> Result<Self, AppError> {
        let user_pins = env::var("USER_PINS")
            .map_err(|_| AppError::Config("USER_PINS is not set".to_string()))?;
        let user_pins = PinDirectory::parse(&user_pins);
        if user_pins.is_empty() {
            return Err(AppError::Config("USER_PINS has no valid user:pin pairs".to_string()));
        }

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| AppError::Config(format!("PORT is not a valid port: {}", raw)))?,
            Err(_) => DEFAULT_PORT,
        };

        let monthly_reset = !matches!(
            env::var("MONTHLY_RESET").as_deref().map(str::trim),
            Ok("off") | Ok("false") | Ok("0")
        );

        Ok(Self {
            database_url: database_url_from_env(),
            port,
            user_pins,
            monthly_reset,
        })
    }
}

pub fn database_url_from_env() -> String {
    env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}
