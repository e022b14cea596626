use festx_auth::AuthConfig;
use festx_database::DatabaseConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database: DatabaseConfig,
    pub session_ttl_hours: i64,
    pub throttle_window_minutes: i64,
    pub throttle_max_failures: i64,
    pub cookie_secure: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = AuthConfig::default();

        Self {
            server_host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3001),
            database: DatabaseConfig::from_env(),
            session_ttl_hours: std::env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.session_ttl_hours),
            throttle_window_minutes: std::env::var("LOGIN_THROTTLE_WINDOW_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.throttle_window_minutes),
            throttle_max_failures: std::env::var("LOGIN_THROTTLE_MAX_FAILURES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.throttle_max_failures),
            // Secure cookies everywhere except local development
            cookie_secure: std::env::var("ENVIRONMENT")
                .map(|env| env == "production")
                .unwrap_or(false),
        }
    }

    pub fn auth(&self) -> AuthConfig {
        AuthConfig {
            session_ttl_hours: self.session_ttl_hours,
            throttle_window_minutes: self.throttle_window_minutes,
            throttle_max_failures: self.throttle_max_failures,
        }
    }
}
