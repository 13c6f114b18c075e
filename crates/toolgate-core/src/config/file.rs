//! YAML configuration file (~/.config/toolgate/config.yaml by default)

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("configuration error: {0}")]
    Other(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Launch spec for one tool provider subprocess
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSpec {
    /// Provider name, unique in the registry; also the tool-name namespace
    pub name: String,
    /// Executable to spawn
    pub command: String,
    /// Arguments passed to the executable
    #[serde(default)]
    pub args: Vec<String>,
    /// Environment overlay applied on top of the inherited environment.
    /// Values of the form `${VAR}` expand from the process environment.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl ProviderSpec {
    /// Environment overlay with `${VAR}` values expanded
    pub fn resolved_env(&self) -> HashMap<String, String> {
        self.env
            .iter()
            .map(|(k, v)| (k.clone(), expand_env(v)))
            .collect()
    }
}

/// Language-model API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Chat-completions endpoint base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Model identifier as the API expects it
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
        }
    }
}

impl ModelSettings {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env).ok().filter(|v| !v.is_empty())
    }
}

fn default_api_base() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_model() -> String {
    "mistralai/mixtral-8x7b-instruct".to_string()
}

fn default_api_key_env() -> String {
    "LLM_API_KEY".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

/// HTTP listen settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub model: ModelSettings,

    /// Configured tool providers, initialized in declared order
    #[serde(default)]
    pub providers: Vec<ProviderSpec>,
}

impl ConfigFile {
    /// Default config path (~/.config/toolgate/config.yaml)
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        });
        config_dir.join("toolgate").join("config.yaml")
    }

    /// Load configuration from a YAML file. A missing file yields the
    /// defaults (no providers, local model settings).
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: ConfigFile = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Expand a `${VAR}` reference from the process environment; any other
/// value passes through unchanged. An unset variable expands to empty.
fn expand_env(value: &str) -> String {
    if let Some(name) = value.strip_prefix("${").and_then(|v| v.strip_suffix('}')) {
        std::env::var(name).unwrap_or_default()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let config = ConfigFile::load("/nonexistent/toolgate.yaml").unwrap();
        assert!(config.providers.is_empty());
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.model.api_base, "https://openrouter.ai/api/v1");
    }

    #[test]
    fn test_load_provider_specs() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
server:
  port: 9100
providers:
  - name: github
    command: node
    args: ["mcp-servers/build/index.js"]
    env:
      LOG_LEVEL: debug
  - name: slack
    command: npx
    args: ["-y", "@modelcontextprotocol/server-slack"]
"#
        )
        .unwrap();

        let config = ConfigFile::load(file.path()).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.providers.len(), 2);
        assert_eq!(config.providers[0].name, "github");
        assert_eq!(config.providers[0].args.len(), 1);
        assert_eq!(config.providers[1].command, "npx");
    }

    #[test]
    fn test_env_expansion() {
        std::env::set_var("TOOLGATE_TEST_TOKEN", "tok-123");
        let spec = ProviderSpec {
            name: "github".to_string(),
            command: "node".to_string(),
            args: vec![],
            env: HashMap::from([
                ("GITHUB_TOKEN".to_string(), "${TOOLGATE_TEST_TOKEN}".to_string()),
                ("LOG_LEVEL".to_string(), "debug".to_string()),
                ("MISSING".to_string(), "${TOOLGATE_TEST_UNSET}".to_string()),
            ]),
        };
        let env = spec.resolved_env();
        assert_eq!(env["GITHUB_TOKEN"], "tok-123");
        assert_eq!(env["LOG_LEVEL"], "debug");
        assert_eq!(env["MISSING"], "");
    }
}
