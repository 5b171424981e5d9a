//! Version newtypes for the two independent version axes of a package:
//! the package's own release version and the upstream release tag it
//! repackages.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when validating version inputs.
///
/// Both variants are configuration errors: they are detected at parse
/// time, before any network or filesystem activity.
#[derive(Error, Debug)]
pub enum VersionError {
    /// The package version is not a valid semantic version.
    #[error("invalid package version '{version}': {source}")]
    InvalidPackageVersion {
        /// The rejected input string.
        version: String,
        /// The underlying semver parse failure.
        source: semver::Error,
    },

    /// The upstream tag was empty or whitespace-only.
    #[error("upstream release tag must not be empty")]
    EmptyUpstreamTag,
}

/// A validated semantic version for the produced package.
///
/// The package is versioned independently of the upstream release it
/// wraps; `1.2.3` here says nothing about the Verible tag inside.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version(String);

impl Version {
    /// Parse and validate a package version string.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::InvalidPackageVersion`] if the input is
    /// not valid semver.
    pub fn parse(v: &str) -> Result<Self, VersionError> {
        semver::Version::parse(v).map_err(|source| VersionError::InvalidPackageVersion {
            version: v.to_string(),
            source,
        })?;
        Ok(Self(v.to_string()))
    }

    /// Return the version string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Version {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// An upstream release tag, kept opaque.
///
/// Upstream tags follow the releasing project's own naming (e.g.
/// `v0.0-3862-g936dfb1d`) and are only ever interpolated into artifact
/// names and URLs, never ordered or compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpstreamTag(String);

impl UpstreamTag {
    /// Validate an upstream tag string.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::EmptyUpstreamTag`] if the input is empty
    /// or whitespace-only.
    pub fn parse(tag: &str) -> Result<Self, VersionError> {
        if tag.trim().is_empty() {
            return Err(VersionError::EmptyUpstreamTag);
        }
        Ok(Self(tag.to_string()))
    }

    /// Return the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UpstreamTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UpstreamTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for UpstreamTag {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The two versions that identify one build: the package release and
/// the upstream tag it repackages. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPair {
    /// Version of the produced package.
    pub package: Version,
    /// Tag of the upstream release being repackaged.
    pub upstream: UpstreamTag,
}

impl VersionPair {
    /// Bundle a package version with an upstream tag.
    pub fn new(package: Version, upstream: UpstreamTag) -> Self {
        Self { package, upstream }
    }
}
