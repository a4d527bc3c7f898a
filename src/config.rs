use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub session_duration_hours: i64,
    pub session_cookie_name: String,
    /// Passcode required for sign-up; `None` leaves registration open
    pub registration_password: Option<String>,
    pub sweep_interval_secs: u64,
    pub otel_exporter_endpoint: Option<String>,
    pub service_name: String,
    pub metrics_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://drift.db?mode=rwc".to_string(),
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            session_duration_hours: 720,
            session_cookie_name: "drift-session".to_string(),
            registration_password: None,
            sweep_interval_secs: 3600,
            otel_exporter_endpoint: None,
            service_name: "drift".to_string(),
            metrics_port: 9000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database_url);

        let server_host = env::var("SERVER_HOST").unwrap_or(defaults.server_host);

        let server_port = match env::var("SERVER_PORT") {
            Ok(port) => parse_port(&port)?,
            Err(_) => defaults.server_port,
        };

        let session_duration_hours = env::var("SESSION_DURATION_HOURS")
            .ok()
            .and_then(|hours| hours.parse().ok())
            .filter(|hours: &i64| *hours > 0)
            .unwrap_or(defaults.session_duration_hours);

        let session_cookie_name =
            env::var("SESSION_COOKIE_NAME").unwrap_or(defaults.session_cookie_name);

        let registration_password = non_empty(env::var("REGISTRATION_PASSWORD").ok());

        let sweep_interval_secs = env::var("SWEEP_INTERVAL_SECS")
            .ok()
            .and_then(|secs| secs.parse().ok())
            .filter(|secs: &u64| *secs > 0)
            .unwrap_or(defaults.sweep_interval_secs);

        let otel_exporter_endpoint = non_empty(env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok());

        let service_name = env::var("SERVICE_NAME").unwrap_or(defaults.service_name);

        let metrics_port = match env::var("METRICS_PORT") {
            Ok(port) => parse_port(&port)?,
            Err(_) => defaults.metrics_port,
        };

        Ok(Config {
            database_url,
            server_host,
            server_port,
            session_duration_hours,
            session_cookie_name,
            registration_password,
            sweep_interval_secs,
            otel_exporter_endpoint,
            service_name,
            metrics_port,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidPort)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
}
