use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which translation backend serves `/api/translate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Kserve,
    Mock,
}

/// Gateway configuration. Resolved once at startup and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_model_endpoint")]
    pub model_endpoint: String,
    #[serde(default = "default_model_name")]
    pub model_name: String,
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_backend")]
    pub backend: BackendKind,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    #[serde(default = "default_health_check_interval_secs")]
    pub health_check_interval_secs: u64,
    #[serde(default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,
    #[serde(default = "default_predict_timeout_secs")]
    pub predict_timeout_secs: u64,
}

fn default_model_endpoint() -> String {
    "http://localhost:8080".to_string()
}

fn default_model_name() -> String {
    "ai4bharat-bert".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_backend() -> BackendKind {
    BackendKind::Kserve
}

fn default_static_dir() -> String {
    "frontend".to_string()
}

fn default_health_check_interval_secs() -> u64 {
    30
}

fn default_health_timeout_secs() -> u64 {
    5
}

fn default_predict_timeout_secs() -> u64 {
    30
}

// (environment variable, config key)
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("AI4BHARAT_ENDPOINT", "model_endpoint"),
    ("MODEL_NAME", "model_name"),
    ("HOST", "host"),
    ("PORT", "port"),
    ("TRANSLATION_BACKEND", "backend"),
    ("STATIC_DIR", "static_dir"),
];

impl Config {
    /// Load from the optional `CONFIG_PATH` file, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").ok();
        Self::from_sources(path.as_deref(), |name| std::env::var(name).ok())
    }

    pub fn from_sources<F>(path: Option<&str>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }

        for &(var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(key, env(var))?;
        }
        let debug = env("DEBUG").map(|v| v.eq_ignore_ascii_case("true"));
        builder = builder.set_override_option("debug", debug)?;

        let config: Config = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .with_context(|| format!("Invalid configuration (file: {:?})", path))?;
        Ok(config)
    }

    pub fn health_check_interval(&self) -> Duration {
        Duration::from_secs(self.health_check_interval_secs)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    pub fn predict_timeout(&self) -> Duration {
        Duration::from_secs(self.predict_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_endpoint: default_model_endpoint(),
            model_name: default_model_name(),
            debug: false,
            host: default_host(),
            port: default_port(),
            backend: default_backend(),
            static_dir: default_static_dir(),
            health_check_interval_secs: default_health_check_interval_secs(),
            health_timeout_secs: default_health_timeout_secs(),
            predict_timeout_secs: default_predict_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_sources() {
        let config = Config::from_sources(None, env_from(&[])).unwrap();
        assert_eq!(config.model_endpoint, "http://localhost:8080");
        assert_eq!(config.model_name, "ai4bharat-bert");
        assert!(!config.debug);
        assert_eq!(config.port, 5000);
        assert_eq!(config.backend, BackendKind::Kserve);
        assert_eq!(config.health_check_interval(), Duration::from_secs(30));
        assert_eq!(config.health_timeout(), Duration::from_secs(5));
        assert_eq!(config.predict_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn environment_overrides() {
        let env = env_from(&[
            ("AI4BHARAT_ENDPOINT", "http://kserve.local:9000"),
            ("DEBUG", "TRUE"),
            ("PORT", "8088"),
            ("TRANSLATION_BACKEND", "mock"),
        ]);
        let config = Config::from_sources(None, env).unwrap();
        assert_eq!(config.model_endpoint, "http://kserve.local:9000");
        assert!(config.debug);
        assert_eq!(config.port, 8088);
        assert_eq!(config.backend, BackendKind::Mock);
        assert_eq!(config.bind_address(), "0.0.0.0:8088");
    }

    #[test]
    fn debug_requires_literal_true() {
        let config = Config::from_sources(None, env_from(&[("DEBUG", "1")])).unwrap();
        assert!(!config.debug);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let result = Config::from_sources(Some("/nonexistent/gateway.yaml"), env_from(&[]));
        assert!(result.is_err());
    }
}
