//! Configuration loading
//!
//! One YAML file, read once at startup: HTTP listen address, model API
//! settings, and the launch spec for each tool provider.

mod file;

pub use file::{
    ConfigError, ConfigFile, ConfigResult, ModelSettings, ProviderSpec, ServerSettings,
};
