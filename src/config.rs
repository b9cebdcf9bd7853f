//! Configuration management for the roster server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Serve the session cookie with the `Secure` attribute
    pub production: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub name: String,
    pub user: String,
    pub password: String,
    pub port: u16,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared staff password, also used as the session signing secret.
    /// Left unset, logins fail and every gated route answers 500.
    pub app_password: Option<String>,
    pub session_hours: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Nested keys use a double underscore: CLASS_ROSTER_DATABASE__MAX_CONNECTIONS
            .add_source(
                Environment::with_prefix("CLASS_ROSTER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // The plain variables the deployment has always used
            .set_override_option("database.host", env::var("DB_HOST").ok())?
            .set_override_option("database.name", env::var("DB_NAME").ok())?
            .set_override_option("database.user", env::var("DB_USER").ok())?
            .set_override_option("database.password", env::var("DB_PASSWORD").ok())?
            .set_override_option("database.port", env::var("DB_PORT").ok())?
            .set_override_option("auth.app_password", env::var("APP_PASSWORD").ok())?
            .set_override_option(
                "server.production",
                (run_mode == "production").then(|| "true".to_string()),
            )?
            .build()?;

        let mut config: AppConfig = config.try_deserialize()?;
        config.auth.app_password = config.auth.app_password.filter(|p| !p.is_empty());
        Ok(config)
    }
}

impl DatabaseConfig {
    /// Connection options for the attendance database. TLS is disabled.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password)
            .ssl_mode(PgSslMode::Disable)
    }
}

impl AuthConfig {
    pub fn session_duration(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session_hours as i64)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            production: false,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            name: "attendance".to_string(),
            user: "attendance".to_string(),
            password: String::new(),
            port: 5432,
            max_connections: 10,
            min_connections: 1,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            app_password: None,
            session_hours: 24,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
