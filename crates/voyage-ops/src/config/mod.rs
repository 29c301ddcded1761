use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub data: DataSourceConfig,
    pub narrative: Option<NarrativeConfig>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            data: DataSourceConfig::from_env()?,
            narrative: NarrativeConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Which backing store supplies traveler and trip batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceMode {
    Fixture,
    Crm,
}

/// Data-provider selection, resolved once at startup.
#[derive(Debug, Clone)]
pub struct DataSourceConfig {
    pub mode: DataSourceMode,
    pub crm: Option<CrmSettings>,
}

impl DataSourceConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let live = env::var("USE_LIVE_CRM")
            .map(|value| value.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        if !live {
            return Ok(Self {
                mode: DataSourceMode::Fixture,
                crm: None,
            });
        }

        let instance_url =
            env::var("CRM_INSTANCE_URL").map_err(|_| ConfigError::MissingCrmCredentials)?;
        let client_id = env::var("CRM_CLIENT_ID").map_err(|_| ConfigError::MissingCrmCredentials)?;
        let client_secret =
            env::var("CRM_CLIENT_SECRET").map_err(|_| ConfigError::MissingCrmCredentials)?;

        Ok(Self {
            mode: DataSourceMode::Crm,
            crm: Some(CrmSettings {
                instance_url,
                api_version: env::var("CRM_API_VERSION").unwrap_or_else(|_| "v59.0".to_string()),
                client_id,
                client_secret,
                // default to the sandbox token host unless explicitly disabled
                sandbox: env::var("CRM_IS_SANDBOX")
                    .map(|value| !value.trim().eq_ignore_ascii_case("false"))
                    .unwrap_or(true),
            }),
        })
    }
}

/// Connection settings for the Salesforce-backed CRM.
#[derive(Debug, Clone)]
pub struct CrmSettings {
    pub instance_url: String,
    pub api_version: String,
    pub client_id: String,
    pub client_secret: String,
    pub sandbox: bool,
}

const DEFAULT_NARRATIVE_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_NARRATIVE_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_NARRATIVE_MAX_TOKENS: u32 = 2048;

/// Settings for the external narrative generator. Absent when no API key is
/// configured, in which case all narrative enrichment is skipped.
#[derive(Debug, Clone)]
pub struct NarrativeConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
}

impl NarrativeConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let api_key = match env::var("ANTHROPIC_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => return Ok(None),
        };

        let max_tokens = match env::var("NARRATIVE_MAX_TOKENS") {
            Ok(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|tokens| *tokens > 0)
                .ok_or(ConfigError::InvalidMaxTokens)?,
            Err(_) => DEFAULT_NARRATIVE_MAX_TOKENS,
        };

        Ok(Some(Self {
            api_key,
            model: env::var("NARRATIVE_MODEL")
                .unwrap_or_else(|_| DEFAULT_NARRATIVE_MODEL.to_string()),
            base_url: env::var("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_NARRATIVE_BASE_URL.to_string()),
            max_tokens,
        }))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    MissingCrmCredentials,
    InvalidMaxTokens,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::MissingCrmCredentials => write!(
                f,
                "USE_LIVE_CRM=true requires CRM_INSTANCE_URL, CRM_CLIENT_ID, and CRM_CLIENT_SECRET"
            ),
            ConfigError::InvalidMaxTokens => {
                write!(f, "NARRATIVE_MAX_TOKENS must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("USE_LIVE_CRM");
        env::remove_var("CRM_INSTANCE_URL");
        env::remove_var("CRM_CLIENT_ID");
        env::remove_var("CRM_CLIENT_SECRET");
        env::remove_var("CRM_IS_SANDBOX");
        env::remove_var("ANTHROPIC_API_KEY");
        env::remove_var("NARRATIVE_MODEL");
        env::remove_var("NARRATIVE_MAX_TOKENS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.data.mode, DataSourceMode::Fixture);
        assert!(config.narrative.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn live_crm_requires_credentials() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("USE_LIVE_CRM", "true");
        let err = AppConfig::load().expect_err("missing credentials rejected");
        assert!(matches!(err, ConfigError::MissingCrmCredentials));
    }

    #[test]
    fn narrative_config_picks_up_key_and_defaults() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ANTHROPIC_API_KEY", "sk-test");
        let config = AppConfig::load().expect("config loads");
        let narrative = config.narrative.expect("narrative configured");
        assert_eq!(narrative.model, DEFAULT_NARRATIVE_MODEL);
        assert_eq!(narrative.max_tokens, DEFAULT_NARRATIVE_MAX_TOKENS);
    }
}
