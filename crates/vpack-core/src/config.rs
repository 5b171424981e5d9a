//! TOML packager configuration parsing
//!
//! `packager.toml` pins the upstream release and names the package, so
//! an upstream naming or layout change is a configuration edit, not a
//! code fix.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or parsing the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML content could not be deserialized.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// The `[package]` section: identity of the produced packages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSection {
    /// Package name used in output filenames and metadata.
    pub name: String,
    /// Short human-readable summary stamped into metadata.
    #[serde(default)]
    pub description: String,
}

/// The `[upstream]` section: where release artifacts come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UpstreamSection {
    /// Base URL of the upstream release downloads.
    pub base_url: String,
    /// Pinned upstream release tag.
    pub tag: String,
    /// License file copied into every package root as `LICENSE.txt`.
    #[serde(default = "default_license_file")]
    pub license_file: PathBuf,
}

fn default_license_file() -> PathBuf {
    PathBuf::from("LICENSE.txt")
}

/// Complete packager configuration parsed from `packager.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagerConfig {
    /// Package identity.
    pub package: PackageSection,
    /// Upstream release pin.
    pub upstream: UpstreamSection,
}

impl PackagerConfig {
    /// Parse the configuration from a TOML file on disk.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, or
    /// `ConfigError::Parse` if the TOML content is invalid.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse the configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML content is invalid or
    /// does not match the expected schema.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

impl std::str::FromStr for PackagerConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
