use core_config::server::ServerConfig;
use core_config::{app_info, AppInfo, ConfigError, Environment, FromEnv};
use database::postgres::PostgresConfig;

/// Full runtime configuration, loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: PostgresConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            database: PostgresConfig::from_env()?,
        })
    }
}
