//! The package assembly pipeline.
//!
//! Maps (platform, version pair) to a compressed package archive:
//! resolve the platform's upstream parameters, fetch the artifact if
//! it is not already cached, extract it, restructure the contents into
//! the package layout, stamp the metadata descriptor and license, and
//! compress the result.
//!
//! Every step is terminal for the current platform's build on error;
//! nothing is retried and no later step runs after a failure. The
//! assembler has no cross-platform awareness: a driver invokes
//! [`Assembler::assemble`] once per platform and aggregates results.

use std::path::{Path, PathBuf};

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info};

use vpack_schema::{BuildInfo, PlatformId, Provenance, VersionPair};

use crate::config::PackagerConfig;
use crate::io::archive::{self, ArchiveError};
use crate::io::download::{self, DownloadError};
use crate::io::extract::{self, ExtractError};
use crate::paths::WorkLayout;

/// Name of the metadata descriptor inside every package root.
pub const BUILD_INFO_FILE: &str = "package-info.json";

/// Name the license file takes inside every package root.
pub const LICENSE_FILE: &str = "LICENSE.txt";

/// Errors that abort a platform's build.
///
/// Underlying causes are carried verbatim so a stale version pin or an
/// upstream layout change can be diagnosed from the message alone.
#[derive(Error, Debug)]
pub enum AssembleError {
    /// The upstream artifact could not be fetched.
    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    /// The upstream archive could not be extracted.
    #[error("Extract error: {0}")]
    Extract(#[from] ExtractError),

    /// The output archive could not be written.
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// A working-directory filesystem operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Restructuring copy into the staging directory failed.
    #[error("Copy error: {0}")]
    Copy(#[from] fs_extra::error::Error),

    /// The metadata descriptor could not be serialized.
    #[error("Metadata error: {0}")]
    Metadata(#[from] serde_json::Error),

    /// The extracted archive is missing the directory structure the
    /// platform table promises. This signals an upstream release
    /// naming/layout change that needs a table or pin update.
    #[error("expected upstream structure missing: {path}")]
    MissingStructure {
        /// The path that was expected to exist.
        path: PathBuf,
    },
}

/// Assembles one package per invocation.
///
/// Holds only immutable, shareable inputs; all mutable state lives in
/// the platform-scoped working directories of the injected
/// [`WorkLayout`], which is what makes parallel per-platform processes
/// safe.
#[derive(Debug)]
pub struct Assembler<'a> {
    client: &'a Client,
    config: &'a PackagerConfig,
    layout: WorkLayout,
    provenance: Provenance,
}

impl<'a> Assembler<'a> {
    /// Create an assembler over the given HTTP client, configuration,
    /// and working-directory layout.
    pub fn new(
        client: &'a Client,
        config: &'a PackagerConfig,
        layout: WorkLayout,
        provenance: Provenance,
    ) -> Self {
        Self {
            client,
            config,
            layout,
            provenance,
        }
    }

    /// Run the full pipeline for one platform.
    ///
    /// Returns the path of the produced package archive. The upstream
    /// download is kept in the platform's cache directory; the
    /// extracted tree and the staging directory are removed on the way
    /// out.
    ///
    /// # Errors
    ///
    /// Any step failure aborts the build and is returned as the
    /// corresponding [`AssembleError`] variant with its cause intact.
    pub async fn assemble(
        &self,
        platform: PlatformId,
        versions: &VersionPair,
    ) -> Result<PathBuf, AssembleError> {
        let spec = platform.spec();
        let tag = &versions.upstream;

        // Fetch (idempotent: a cached artifact short-circuits the network)
        let artifact_path = self.layout.artifact_path(platform, tag);
        let url = platform.download_url(&self.config.upstream.base_url, tag);
        info!(platform = %platform, %url, "fetching upstream artifact");
        let outcome = download::fetch_artifact(self.client, &url, &artifact_path).await?;
        if outcome.cached {
            info!(platform = %platform, "upstream artifact already cached, skipping download");
        }
        debug!(sha256 = %outcome.sha256, path = %outcome.path.display(), "upstream artifact ready");

        // Extract next to the cached artifact
        let upstream_dir = self.layout.upstream_dir(platform);
        let wrapper = upstream_dir.join(platform.wrapper_dir_name(tag));
        if wrapper.exists() {
            // Stale tree from an earlier (possibly failed) run
            tokio::fs::remove_dir_all(&wrapper).await?;
        }
        info!(platform = %platform, archive = %artifact_path.display(), "extracting upstream archive");
        extract::extract_archive(&artifact_path, &upstream_dir, spec.format).await?;
        if !wrapper.is_dir() {
            return Err(AssembleError::MissingStructure { path: wrapper });
        }

        // The table promises where binaries live; verify before copying
        if !spec.synthesize_bin {
            let bin = wrapper.join("bin");
            if !bin.is_dir() {
                return Err(AssembleError::MissingStructure { path: bin });
            }
        }

        // Restructure into a fresh staging directory
        let staging = self.layout.staging_dir(platform);
        if staging.exists() {
            tokio::fs::remove_dir_all(&staging).await?;
        }
        let content_dst = if spec.synthesize_bin {
            staging.join("bin")
        } else {
            staging.clone()
        };
        tokio::fs::create_dir_all(&content_dst).await?;
        copy_dir_contents(&wrapper, &content_dst).await?;
        tokio::fs::remove_dir_all(&wrapper).await?;

        let staged_files = walkdir::WalkDir::new(&staging)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .count();
        debug!(platform = %platform, files = staged_files, "staged package content");

        // Stamp the metadata descriptor
        let build_info = BuildInfo::new(
            &self.config.package.name,
            &self.config.package.description,
            platform,
            versions,
            &self.provenance,
        );
        let json = build_info.to_json_pretty()?;
        tokio::fs::write(staging.join(BUILD_INFO_FILE), json).await?;

        // Attach the license, byte for byte
        tokio::fs::copy(
            &self.config.upstream.license_file,
            staging.join(LICENSE_FILE),
        )
        .await?;

        // Compress the staging contents; the archive root is the package root
        let output = self
            .layout
            .output_path(&self.config.package.name, platform, &versions.package);
        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let src = staging.clone();
        let out = output.clone();
        tokio::task::spawn_blocking(move || archive::compress_dir_contents(&src, &out))
            .await
            .map_err(std::io::Error::other)??;
        tokio::fs::remove_dir_all(&staging).await?;

        info!(platform = %platform, output = %output.display(), "package assembled");
        Ok(output)
    }
}

/// Copy a directory's contents (not the directory itself) into `dst`,
/// preserving symlinks.
async fn copy_dir_contents(src: &Path, dst: &Path) -> Result<(), AssembleError> {
    let src = src.to_path_buf();
    let dst = dst.to_path_buf();
    tokio::task::spawn_blocking(move || {
        fs_extra::dir::copy(
            &src,
            &dst,
            &fs_extra::dir::CopyOptions::new()
                .content_only(true)
                .overwrite(true),
        )
    })
    .await
    .map_err(std::io::Error::other)??;
    Ok(())
}
