//! Idempotent upstream artifact fetching with streaming SHA256 digests.
//!
//! A fetch whose destination already exists performs no network
//! activity at all: the cached file is digested and reused. This is
//! what makes repeated local builds cheap and what keeps a platform's
//! download cache authoritative across runs.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use reqwest::Client;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Errors raised while fetching an upstream artifact.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// HTTP transport failure or error status from the upstream host.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local filesystem failure while writing or digesting the artifact.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of a fetch: where the artifact lives, its digest, and
/// whether the cache satisfied the request.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Local path of the artifact.
    pub path: PathBuf,
    /// Hex-encoded SHA-256 of the artifact bytes.
    pub sha256: String,
    /// `true` when the file already existed and no request was made.
    pub cached: bool,
}

/// Fetch `url` to `dest`, skipping the network when `dest` exists.
///
/// The digest is computed over the bytes as they stream; on a transport
/// error mid-download the partial file is removed so a later run cannot
/// mistake it for a complete cached artifact.
///
/// # Errors
///
/// Returns [`DownloadError::Http`] for transport failures and non-2xx
/// statuses, or [`DownloadError::Io`] for local write failures.
pub async fn fetch_artifact(
    client: &Client,
    url: &str,
    dest: &Path,
) -> Result<FetchOutcome, DownloadError> {
    if dest.exists() {
        let sha256 = digest_file(dest).await?;
        debug!(path = %dest.display(), %sha256, "using cached upstream artifact");
        return Ok(FetchOutcome {
            path: dest.to_path_buf(),
            sha256,
            cached: true,
        });
    }

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let result = stream_to_file(client, url, dest).await;
    if result.is_err() {
        tokio::fs::remove_file(dest).await.ok();
    }
    let sha256 = result?;

    Ok(FetchOutcome {
        path: dest.to_path_buf(),
        sha256,
        cached: false,
    })
}

async fn stream_to_file(client: &Client, url: &str, dest: &Path) -> Result<String, DownloadError> {
    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
        .send()
        .await?
        .error_for_status()?;

    let mut file = File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut hasher = Sha256::new();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        hasher.update(&chunk);
        downloaded += chunk.len() as u64;
    }

    file.flush().await?;
    let sha256 = hex::encode(hasher.finalize());
    debug!(%url, bytes = downloaded, %sha256, "downloaded upstream artifact");
    Ok(sha256)
}

/// Digest an existing file in a blocking task.
async fn digest_file(path: &Path) -> Result<String, DownloadError> {
    let path = path.to_path_buf();
    let sha256 = tokio::task::spawn_blocking(move || {
        use std::io::Read;
        let mut hasher = Sha256::new();
        let mut file = std::fs::File::open(&path)?;
        let mut buffer = [0u8; 8192];
        loop {
            let count = file.read(&mut buffer)?;
            if count == 0 {
                break;
            }
            hasher.update(&buffer[..count]);
        }
        Ok::<String, std::io::Error>(hex::encode(hasher.finalize()))
    })
    .await
    .map_err(std::io::Error::other)??;
    Ok(sha256)
}
