use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "MediPredict";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name of the trained model bundle.
pub const MODEL_FILE_NAME: &str = "disease_predictor.json";

const DEFAULT_PORT: u16 = 8000;

const ENV_HOST: &str = "MEDIPREDICT_HOST";
const ENV_PORT: &str = "MEDIPREDICT_PORT";
const ENV_MODEL_PATH: &str = "MEDIPREDICT_MODEL_PATH";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info,medipredict_lib=debug"
}

/// Per-user data directory (`~/.local/share/medipredict` on Linux).
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("medipredict"))
}

/// Candidate locations for the model bundle, in lookup order.
pub fn model_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("models").join(MODEL_FILE_NAME)];
    if let Some(dir) = app_data_dir() {
        paths.push(dir.join("models").join(MODEL_FILE_NAME));
    }
    paths
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Model bundle to load. `None` runs the rule engine only.
    pub model_path: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            model_path: None,
        }
    }
}

impl ServiceConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// When no model path is configured, the first existing entry of
    /// [`model_search_paths`] is used.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_HOST) {
            config.host = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: ENV_HOST,
                value: raw.clone(),
            })?;
        }

        if let Some(raw) = lookup(ENV_PORT) {
            config.port = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: ENV_PORT,
                value: raw.clone(),
            })?;
        }

        config.model_path = match lookup(ENV_MODEL_PATH) {
            Some(raw) if !raw.trim().is_empty() => Some(PathBuf::from(raw.trim())),
            _ => model_search_paths().into_iter().find(|p| p.exists()),
        };

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
