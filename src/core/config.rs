//! Build configuration resolution
//!
//! Options are resolved exactly once per process run, with CLI arguments
//! taking precedence over environment variables, which take precedence
//! over defaults. The resolved [`BuildConfig`] is immutable afterwards
//! and passed by reference into every step.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default NuGet registry endpoint (the public index)
pub const DEFAULT_NUGET_API_URL: &str = "https://api.nuget.org/v3/index.json";

/// Environment variable names, matching the original build parameters
pub mod env_keys {
    pub const CONFIGURATION: &str = "Configuration";
    pub const NUGET_API_URL: &str = "NugetApiUrl";
    pub const NUGET_API_KEY: &str = "NugetApiKey";
    pub const PACKAGE: &str = "Package";
    pub const CI: &str = "CI";
}

/// Configuration errors - always fatal, reported before any step runs
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid build configuration '{0}' (expected Debug or Release)")]
    InvalidConfiguration(String),

    #[error("repository root must be a non-empty absolute path, got '{0}'")]
    InvalidRoot(String),

    #[error("no package name configured (pass --package or set the Package environment variable)")]
    MissingPackage,
}

/// Build configuration variant passed to the compiler and packager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Configuration {
    Debug,
    Release,
}

impl Configuration {
    /// Check whether this is the release variant (required by push)
    pub fn is_release(self) -> bool {
        self == Configuration::Release
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Configuration::Debug => write!(f, "Debug"),
            Configuration::Release => write!(f, "Release"),
        }
    }
}

impl FromStr for Configuration {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Configuration::Debug),
            "release" => Ok(Configuration::Release),
            _ => Err(ConfigError::InvalidConfiguration(s.to_string())),
        }
    }
}

/// Explicit overrides from the command line (highest precedence)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub configuration: Option<Configuration>,
    pub nuget_api_url: Option<String>,
    pub nuget_api_key: Option<String>,
    pub package: Option<String>,
}

/// Resolved, read-only configuration for a single run
#[derive(Debug, Clone, Serialize)]
pub struct BuildConfig {
    /// Debug or Release; defaults to Release on a build server, Debug locally
    pub configuration: Configuration,

    /// Registry endpoint used by push
    pub nuget_api_url: String,

    /// Registry credential; no default, required only by push
    #[serde(skip_serializing)]
    pub nuget_api_key: Option<String>,

    /// Package/project name used by the path resolver
    pub package: String,
}

impl BuildConfig {
    /// Resolve configuration from overrides and the process environment
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve_from(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve with an injected environment lookup (for tests)
    pub fn resolve_from(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let configuration = match overrides.configuration {
            Some(c) => c,
            None => match env(env_keys::CONFIGURATION) {
                Some(raw) => raw.parse()?,
                // Release on a build server, Debug on a developer machine
                None if env(env_keys::CI).is_some() => Configuration::Release,
                None => Configuration::Debug,
            },
        };

        let nuget_api_url = overrides
            .nuget_api_url
            .or_else(|| env(env_keys::NUGET_API_URL))
            .unwrap_or_else(|| DEFAULT_NUGET_API_URL.to_string());

        let nuget_api_key = overrides
            .nuget_api_key
            .or_else(|| env(env_keys::NUGET_API_KEY));

        let package = overrides
            .package
            .or_else(|| env(env_keys::PACKAGE))
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::MissingPackage)?;

        Ok(Self {
            configuration,
            nuget_api_url,
            nuget_api_key,
            package,
        })
    }
}
