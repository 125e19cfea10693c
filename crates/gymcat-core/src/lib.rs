pub mod app_config;
pub mod config;
pub mod product;
pub mod scraped;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use product::{Nutrition, Product, ProductType};
pub use scraped::{
    ScrapeFailure, ScrapedProduct, ScraperConfig, ScraperResult, DEFAULT_BACKOFF_BASE_MS,
    DEFAULT_DELAY_BETWEEN_REQUESTS_MS, DEFAULT_GRID_SELECTOR, DEFAULT_MAX_RETRIES,
    DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
