//! Tool configuration.
//!
//! An optional `trailbridge.yaml` in the working directory supplies the
//! default trail name, region and control-plane endpoint. Secrets stay out
//! of the file: it names the environment variables to read, never the
//! values themselves.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = "trailbridge.yaml";

/// Errors raised while loading or resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config file could not be parsed.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// A required environment variable is not set.
    #[error("environment variable '{0}' is not set")]
    MissingEnv(String),
}

/// Configuration for the tool, loaded from [`CONFIG_FILE`] when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Trail to operate on when the command line does not name one.
    #[serde(default = "default_trail")]
    pub trail: String,

    /// Region substituted into the endpoint template.
    #[serde(default = "default_region")]
    pub region: String,

    /// Control-plane endpoint. May contain a `{region}` placeholder.
    /// When unset, the endpoint is read from the environment variable
    /// named by `endpoint_env`.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Environment variable holding the control-plane endpoint.
    #[serde(default = "default_endpoint_env")]
    pub endpoint_env: String,

    /// Environment variable holding the API token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            trail: default_trail(),
            region: default_region(),
            endpoint: None,
            endpoint_env: default_endpoint_env(),
            token_env: default_token_env(),
        }
    }
}

impl ToolConfig {
    /// Load [`CONFIG_FILE`] from `dir`, falling back to compiled defaults
    /// when the file does not exist.
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load configuration from the current working directory.
    pub fn load_from_cwd() -> Result<Self, ConfigError> {
        Self::load_from_dir(Path::new("."))
    }

    /// The control-plane endpoint, with the `{region}` placeholder
    /// substituted. The file takes precedence over the environment
    /// variable named by `endpoint_env`.
    pub fn resolve_endpoint(&self) -> Result<String, ConfigError> {
        let raw = match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => env::var(&self.endpoint_env)
                .map_err(|_| ConfigError::MissingEnv(self.endpoint_env.clone()))?,
        };
        Ok(raw.replace("{region}", &self.region))
    }

    /// The API token from the environment variable named by `token_env`.
    pub fn resolve_token(&self) -> Result<String, ConfigError> {
        env::var(&self.token_env).map_err(|_| ConfigError::MissingEnv(self.token_env.clone()))
    }
}

fn default_trail() -> String {
    "analytics".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_endpoint_env() -> String {
    "TRAILBRIDGE_ENDPOINT".to_string()
}

fn default_token_env() -> String {
    "TRAILBRIDGE_TOKEN".to_string()
}
