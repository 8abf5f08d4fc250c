use crate::workflows::stories::acceptance::{AcceptanceConfig, ThresholdError};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

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
    pub moderation: ModerationConfig,
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
        let public_dir = env::var("STORY_PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public"));

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let moderation = ModerationConfig::from_env()?;

        Ok(Self {
            environment,
            server: ServerConfig {
                host,
                port,
                public_dir,
            },
            telemetry: TelemetryConfig { log_level },
            moderation,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the submission and admin pages.
    pub public_dir: PathBuf,
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

/// Acceptance thresholds and the location of the disallowed-word list.
#[derive(Debug, Clone, Default)]
pub struct ModerationConfig {
    pub acceptance: AcceptanceConfig,
    /// Newline-delimited word list; the built-in list is used when unset.
    pub wordlist_path: Option<PathBuf>,
}

impl ModerationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = AcceptanceConfig::default();

        let acceptance = AcceptanceConfig {
            repetition_ratio_max: ratio_from_env(
                "STORY_REPETITION_RATIO_MAX",
                defaults.repetition_ratio_max,
            )?,
            symbol_ratio_max: ratio_from_env("STORY_SYMBOL_RATIO_MAX", defaults.symbol_ratio_max)?,
            gibberish_ratio_max: ratio_from_env(
                "STORY_GIBBERISH_RATIO_MAX",
                defaults.gibberish_ratio_max,
            )?,
            min_length: match env::var("STORY_MIN_LENGTH") {
                Ok(raw) => raw
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| ConfigError::InvalidMinLength(raw))?,
                Err(_) => defaults.min_length,
            },
        };
        acceptance.validate()?;

        let wordlist_path = env::var("STORY_PROFANITY_WORDLIST")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            acceptance,
            wordlist_path,
        })
    }
}

fn ratio_from_env(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidRatio { key, value: raw }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidRatio { key: &'static str, value: String },
    InvalidMinLength(String),
    Thresholds(ThresholdError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRatio { key, value } => {
                write!(f, "{key} must be a decimal number, found '{value}'")
            }
            ConfigError::InvalidMinLength(value) => {
                write!(f, "STORY_MIN_LENGTH must be a non-negative integer, found '{value}'")
            }
            ConfigError::Thresholds(err) => write!(f, "invalid acceptance thresholds: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::Thresholds(err) => Some(err),
            ConfigError::InvalidPort
            | ConfigError::InvalidRatio { .. }
            | ConfigError::InvalidMinLength(_) => None,
        }
    }
}

impl From<ThresholdError> for ConfigError {
    fn from(value: ThresholdError) -> Self {
        Self::Thresholds(value)
    }
}
