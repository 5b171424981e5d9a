//! The package metadata descriptor stamped into every output archive.
//!
//! The descriptor is built directly in memory and serialized once, so
//! there is no text template to substitute and no way to ship a
//! half-filled document: every field exists by construction.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::platform::PlatformId;
use crate::version::VersionPair;

/// Build provenance captured from the CI environment.
///
/// Local builds that lack the environment record `unknown` for each
/// field rather than failing; provenance is descriptive, not a gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provenance {
    /// Repository the build ran from (`owner/repo`).
    pub repo: String,
    /// Workflow name that produced the build.
    pub workflow: String,
    /// Unique run id assigned by the CI system.
    pub run_id: String,
    /// Monotonic run number within the workflow.
    pub run_number: String,
    /// Commit hash the build was made from.
    pub commit: String,
}

fn env_or_unknown(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| "unknown".to_string())
}

impl Provenance {
    /// Capture provenance from the standard GitHub Actions variables.
    pub fn from_env() -> Self {
        Self {
            repo: env_or_unknown("GITHUB_REPOSITORY"),
            workflow: env_or_unknown("GITHUB_WORKFLOW"),
            run_id: env_or_unknown("GITHUB_RUN_ID"),
            run_number: env_or_unknown("GITHUB_RUN_NUMBER"),
            commit: env_or_unknown("GITHUB_SHA"),
        }
    }
}

/// The `package-info.json` document written into each package root.
///
/// Field order here is document order; serde preserves struct order so
/// the emitted JSON keys always appear in this sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildInfo {
    /// Name of the produced package.
    pub package_name: String,
    /// Human-readable description of the packaged tools.
    pub description: String,
    /// Platform this package targets.
    pub platform_id: String,
    /// The package's own release version.
    pub release_tag: String,
    /// Tag of the upstream release the binaries came from.
    pub upstream_release_tag: String,
    /// Repository that ran the packaging build.
    pub build_repo: String,
    /// Workflow name that ran the packaging build.
    pub build_workflow: String,
    /// CI run id.
    pub workflow_run_id: String,
    /// CI run number.
    pub workflow_run_number: String,
    /// RFC 3339 UTC timestamp of the build.
    pub build_time: String,
    /// Commit the packaging build was made from.
    pub commit: String,
}

impl BuildInfo {
    /// Assemble the descriptor for one platform build.
    pub fn new(
        package_name: &str,
        description: &str,
        platform: PlatformId,
        versions: &VersionPair,
        provenance: &Provenance,
    ) -> Self {
        Self {
            package_name: package_name.to_string(),
            description: description.to_string(),
            platform_id: platform.as_str().to_string(),
            release_tag: versions.package.as_str().to_string(),
            upstream_release_tag: versions.upstream.as_str().to_string(),
            build_repo: provenance.repo.clone(),
            build_workflow: provenance.workflow.clone(),
            workflow_run_id: provenance.run_id.clone(),
            workflow_run_number: provenance.run_number.clone(),
            build_time: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            commit: provenance.commit.clone(),
        }
    }

    /// Serialize the descriptor to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
