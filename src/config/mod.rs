use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

pub mod commission_tiers;

pub use commission_tiers::CommissionTierConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub analytics: AnalyticsConfig,
    pub tiers: CommissionTierConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    /// `json` switches the log formatter to structured JSON output
    pub log_format: String,
}

/// Tunables for the analytics services
///
/// Passed explicitly to each service constructor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalyticsConfig {
    /// Most recent daily points kept in a returned series
    pub daily_points: usize,
    pub weekly_points: usize,
    pub monthly_points: usize,
    /// Trailing window of the daily moving average
    pub moving_average_window: usize,
    /// Organizations listed in a monthly statement
    pub top_organizations: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            daily_points: 90,
            weekly_points: 52,
            monthly_points: 24,
            moving_average_window: 7,
            top_organizations: 5,
        }
    }
}

impl AnalyticsConfig {
    /// Load analytics settings, falling back to defaults for unset variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            daily_points: env_or("ANALYTICS_DAILY_POINTS", defaults.daily_points)?,
            weekly_points: env_or("ANALYTICS_WEEKLY_POINTS", defaults.weekly_points)?,
            monthly_points: env_or("ANALYTICS_MONTHLY_POINTS", defaults.monthly_points)?,
            moving_average_window: env_or(
                "ANALYTICS_MOVING_AVERAGE_WINDOW",
                defaults.moving_average_window,
            )?,
            top_organizations: env_or("ANALYTICS_TOP_ORGANIZATIONS", defaults.top_organizations)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        let limits = [
            ("daily_points", self.daily_points),
            ("weekly_points", self.weekly_points),
            ("monthly_points", self.monthly_points),
            ("moving_average_window", self.moving_average_window),
            ("top_organizations", self.top_organizations),
        ];

        for (name, value) in limits {
            if value == 0 {
                return Err(AppError::Configuration(format!(
                    "{} must be greater than 0",
                    name
                )));
            }
        }

        Ok(())
    }
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
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            },
            analytics: AnalyticsConfig::from_env()?,
            tiers: CommissionTierConfig::from_env()?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.analytics.validate()?;
        self.tiers.validate()?;

        if !matches!(self.app.log_format.as_str(), "pretty" | "json") {
            return Err(AppError::Configuration(format!(
                "LOG_FORMAT must be 'pretty' or 'json', got '{}'",
                self.app.log_format
            )));
        }

        Ok(())
    }
}

fn env_or(name: &str, default: usize) -> Result<usize> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", name))),
        Err(_) => Ok(default),
    }
}
