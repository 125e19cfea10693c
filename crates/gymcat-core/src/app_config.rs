use crate::scraped::ScraperConfig;
use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl Environment {
    /// Whether log lines carry ANSI colour and event targets. Production
    /// output is plain.
    #[must_use]
    pub fn decorated_logs(&self) -> bool {
        !matches!(self, Environment::Production)
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Only needed by commands that touch the catalog store.
    pub database_url: Option<String>,
    pub env: Environment,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// Collection page to scrape when the CLI is not given `--base-url`.
    pub scraper_base_url: Option<String>,
    pub scraper_grid_selector: String,
    pub scraper_user_agent: String,
    pub scraper_timeout_ms: u64,
    pub scraper_delay_ms: u64,
    pub scraper_max_retries: u32,
    pub scraper_backoff_base_ms: u64,
}

impl AppConfig {
    /// Returns the database URL or the error naming the variable to set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `DATABASE_URL` was not set.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))
    }

    /// Builds the scraper settings for one run against `base_url`, taking every
    /// other field from the environment-derived configuration.
    #[must_use]
    pub fn scraper_config(&self, base_url: &str) -> ScraperConfig {
        ScraperConfig {
            base_url: base_url.to_string(),
            product_grid_selector: self.scraper_grid_selector.clone(),
            delay_between_requests_ms: self.scraper_delay_ms,
            max_retries: self.scraper_max_retries,
            timeout_ms: self.scraper_timeout_ms,
            user_agent: self.scraper_user_agent.clone(),
            backoff_base_ms: self.scraper_backoff_base_ms,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("scraper_base_url", &self.scraper_base_url)
            .field("scraper_grid_selector", &self.scraper_grid_selector)
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field("scraper_timeout_ms", &self.scraper_timeout_ms)
            .field("scraper_delay_ms", &self.scraper_delay_ms)
            .field("scraper_max_retries", &self.scraper_max_retries)
            .field("scraper_backoff_base_ms", &self.scraper_backoff_base_ms)
            .finish()
    }
}
