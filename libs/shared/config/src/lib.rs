use std::env;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_SCHEDULING_SERVICE_URL: &str = "http://localhost:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_FRONT_DESK_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the Scheduling Service, without a trailing slash.
    pub scheduling_service_url: String,
    pub request_timeout_secs: u64,
    pub front_desk_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scheduling_service_url: DEFAULT_SCHEDULING_SERVICE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            front_desk_port: DEFAULT_FRONT_DESK_PORT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            scheduling_service_url: env::var("SCHEDULING_SERVICE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| {
                    warn!("SCHEDULING_SERVICE_URL not set, using default");
                    DEFAULT_SCHEDULING_SERVICE_URL.to_string()
                }),
            request_timeout_secs: parse_or_default(
                "SCHEDULING_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            front_desk_port: parse_or_default("FRONT_DESK_PORT", DEFAULT_FRONT_DESK_PORT),
        };

        if !config.is_configured() {
            warn!("Scheduling service URL is empty - every request will fail");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.scheduling_service_url.is_empty()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_or_default<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has an invalid value '{}', using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}
