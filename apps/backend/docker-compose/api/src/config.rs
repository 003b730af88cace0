use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL_PATH: &str = "models/complaint_classifier.msgpack";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub model_path: PathBuf,
    /// Serve in degraded mode (health reports `unhealthy`, predictions 503)
    /// instead of exiting when the artifact cannot be loaded.
    pub allow_missing_model: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("PORT={}", raw)))?,
            None => DEFAULT_PORT,
        };

        let model_path = lookup("MODEL_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));

        let allow_missing_model = match lookup("ALLOW_MISSING_MODEL") {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| ConfigError::InvalidValue(format!("ALLOW_MISSING_MODEL={}", raw)))?,
            None => false,
        };

        Ok(Config {
            port,
            model_path,
            allow_missing_model,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(var) => write!(f, "Invalid value for: {}", var),
        }
    }
}

impl std::error::Error for ConfigError {}
