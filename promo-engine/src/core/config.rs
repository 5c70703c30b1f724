use chrono_tz::Tz;

/// Evaluation service configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 3000 | listen port |
/// | CAMPAIGNS_PATH | campaigns.json | CampaignSet JSON loaded at startup |
/// | BUSINESS_TZ | UTC | IANA timezone for weekday/hour windows |
/// | LOG_LEVEL | info | tracing level |
/// | LOG_DIR | (unset) | directory for rolling log files |
/// | REQUEST_TIMEOUT_MS | 30000 | request timeout (ms) |
///
/// # Example
///
/// ```ignore
/// BUSINESS_TZ=Europe/Madrid CAMPAIGNS_PATH=/etc/promo/campaigns.json promo-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// CampaignSet document path
    pub campaigns_path: String,
    /// Business timezone
    pub business_tz: Tz,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// Request timeout (ms)
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            campaigns_path: std::env::var("CAMPAIGNS_PATH")
                .unwrap_or_else(|_| "campaigns.json".into()),
            business_tz: std::env::var("BUSINESS_TZ")
                .ok()
                .and_then(|tz| tz.parse().ok())
                .unwrap_or(Tz::UTC),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
        }
    }

    /// Override the port and campaign path
    ///
    /// Used by tests
    pub fn with_overrides(http_port: u16, campaigns_path: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config.campaigns_path = campaigns_path.into();
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
