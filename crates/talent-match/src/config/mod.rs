use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::matching::{FactorKind, MatchWeights, DEFAULT_MIN_SCORE, DEFAULT_WEIGHTS};

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
    pub matching: MatchingConfig,
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
            matching: MatchingConfig::from_env()?,
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Defaults applied to match requests that do not carry their own.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingConfig {
    pub default_min_score: u8,
    pub weights: MatchWeights,
    /// Upper bound on one scoring run when served over HTTP.
    pub request_timeout: Duration,
    pub dataset_path: Option<PathBuf>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            default_min_score: DEFAULT_MIN_SCORE,
            weights: DEFAULT_WEIGHTS,
            request_timeout: Duration::from_millis(5_000),
            dataset_path: None,
        }
    }
}

impl MatchingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let default_min_score = match env::var("MATCH_MIN_SCORE") {
            Ok(raw) => raw
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|score| *score <= 100)
                .ok_or(ConfigError::InvalidMinScore)?,
            Err(_) => defaults.default_min_score,
        };

        let weights = match env::var("MATCH_WEIGHTS") {
            Ok(raw) => parse_weight_percentages(&raw)?,
            Err(_) => defaults.weights,
        };

        let request_timeout = match env::var("MATCH_TIMEOUT_MS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|millis| *millis > 0)
                .map(Duration::from_millis)
                .ok_or(ConfigError::InvalidTimeout)?,
            Err(_) => defaults.request_timeout,
        };

        let dataset_path = env::var("MATCH_DATASET")
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            default_min_score,
            weights,
            request_timeout,
            dataset_path,
        })
    }
}

/// Parse six comma-separated percentages in factor order. They must be non-negative and add up
/// to 100; the result is expressed as fractions.
pub fn parse_weight_percentages(raw: &str) -> Result<MatchWeights, ConfigError> {
    let values: Vec<f64> = raw
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| ConfigError::InvalidWeights {
            reason: format!("'{raw}' is not a list of numbers"),
        })?;

    let values: [f64; 6] = values
        .try_into()
        .map_err(|values: Vec<f64>| ConfigError::InvalidWeights {
            reason: format!("expected 6 weights, got {}", values.len()),
        })?;

    if let Some((factor, _)) = FactorKind::ALL
        .iter()
        .zip(values)
        .find(|(_, value)| !value.is_finite() || *value < 0.0)
    {
        return Err(ConfigError::InvalidWeights {
            reason: format!("{} weight must be non-negative", factor.label()),
        });
    }

    let total: f64 = values.iter().sum();
    if (total - 100.0).abs() > 1e-6 {
        return Err(ConfigError::InvalidWeights {
            reason: format!("weights must add up to 100, got {total}"),
        });
    }

    Ok(MatchWeights::from_percentages(values))
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidMinScore,
    InvalidWeights { reason: String },
    InvalidTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidMinScore => {
                write!(f, "MATCH_MIN_SCORE must be an integer between 0 and 100")
            }
            ConfigError::InvalidWeights { reason } => {
                write!(f, "MATCH_WEIGHTS is invalid: {reason}")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "MATCH_TIMEOUT_MS must be a positive number of milliseconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidMinScore
            | ConfigError::InvalidWeights { .. }
            | ConfigError::InvalidTimeout => None,
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
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "MATCH_MIN_SCORE",
            "MATCH_WEIGHTS",
            "MATCH_TIMEOUT_MS",
            "MATCH_DATASET",
        ] {
            env::remove_var(key);
        }
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
        assert_eq!(config.matching, MatchingConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_matching_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("MATCH_MIN_SCORE", "55");
        env::set_var("MATCH_WEIGHTS", "50, 10, 10, 10, 10, 10");
        env::set_var("MATCH_TIMEOUT_MS", "250");
        env::set_var("MATCH_DATASET", "data/pool.json");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.matching.default_min_score, 55);
        assert_eq!(config.matching.weights.competency, 0.5);
        assert_eq!(config.matching.request_timeout, Duration::from_millis(250));
        assert_eq!(
            config.matching.dataset_path,
            Some(PathBuf::from("data/pool.json"))
        );
        reset_env();
    }

    #[test]
    fn rejects_out_of_range_min_score() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("MATCH_MIN_SCORE", "140");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidMinScore)
        ));
        reset_env();
    }

    #[test]
    fn weights_must_add_up_to_one_hundred() {
        match parse_weight_percentages("40,20,10,10,10,5") {
            Err(ConfigError::InvalidWeights { reason }) => assert!(reason.contains("add up")),
            other => panic!("expected weight sum error, got {other:?}"),
        }
    }

    #[test]
    fn weights_reject_negative_and_short_lists() {
        match parse_weight_percentages("60,-10,20,10,10,10") {
            Err(ConfigError::InvalidWeights { reason }) => assert!(reason.contains("experience")),
            other => panic!("expected negative weight error, got {other:?}"),
        }
        match parse_weight_percentages("50,50") {
            Err(ConfigError::InvalidWeights { reason }) => assert!(reason.contains("expected 6")),
            other => panic!("expected arity error, got {other:?}"),
        }
        assert!(parse_weight_percentages("a,b,c,d,e,f").is_err());
    }
}
