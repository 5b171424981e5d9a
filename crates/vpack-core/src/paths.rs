//! Working-directory layout for the assembler.
//!
//! The work dir is an explicit, injected parameter; the pipeline never
//! changes the process current directory. Upstream downloads are
//! platform-scoped so concurrent platform builds cannot interfere.

use std::path::{Path, PathBuf};

use vpack_schema::{PlatformId, UpstreamTag, Version};

/// Filesystem layout rooted at an injected working directory.
///
/// ```text
/// <root>/
/// ├── _upstream/<platform-id>/   # downloaded artifacts (persistent cache)
/// └── _packages/
///     ├── <platform-id>/         # staging dir, removed after compression
///     └── <name>-<plat>-<ver>.tar.gz
/// ```
#[derive(Debug, Clone)]
pub struct WorkLayout {
    root: PathBuf,
}

impl WorkLayout {
    /// Create a layout rooted at `root`. Nothing is created on disk
    /// until the assembler runs.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The layout's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Platform-scoped download cache: `<root>/_upstream/<platform-id>`.
    pub fn upstream_dir(&self, platform: PlatformId) -> PathBuf {
        self.root.join("_upstream").join(platform.as_str())
    }

    /// Cache path of the upstream artifact for one platform and tag.
    pub fn artifact_path(&self, platform: PlatformId, tag: &UpstreamTag) -> PathBuf {
        self.upstream_dir(platform)
            .join(platform.artifact_file_name(tag))
    }

    /// Platform-scoped staging directory whose contents become the
    /// package root: `<root>/_packages/<platform-id>`.
    pub fn staging_dir(&self, platform: PlatformId) -> PathBuf {
        self.root.join("_packages").join(platform.as_str())
    }

    /// Directory that receives the final package archives.
    pub fn package_dir(&self) -> PathBuf {
        self.root.join("_packages")
    }

    /// Deterministic path of the final package archive.
    pub fn output_path(
        &self,
        package_name: &str,
        platform: PlatformId,
        version: &Version,
    ) -> PathBuf {
        self.package_dir()
            .join(platform.package_file_name(package_name, version))
    }
}
