//! Application configuration assembled from environment variables

use serde::Serialize;
use sms_shared::config::{
    ConfigError, DatabaseConfig, Environment, LoggingConfig, MessagingConfig, ProviderConfig,
    ServerConfig,
};

#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub provider: ProviderConfig,
    pub messaging: MessagingConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration, reading a `.env` file first when one exists
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();

        Ok(Config {
            environment,
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            provider: ProviderConfig::from_env(environment)?,
            messaging: MessagingConfig::from_env()?,
            logging: LoggingConfig::from_env(environment),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }

    /// `TWILIO_DISABLED` was set but production ignores it
    pub fn provider_disable_ignored(&self) -> bool {
        ProviderConfig::disabled_flag_ignored(self.environment)
    }
}
