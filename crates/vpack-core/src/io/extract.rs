//! Archive extraction driven by the platform table's declared format.
//!
//! The format is never sniffed from file contents: the table says
//! tar.gz or zip, and a mismatch surfaces as a hard extraction error
//! (which signals an upstream release layout change, fixed in
//! configuration).

use std::path::Path;

use thiserror::Error;

use vpack_schema::ArtifactFormat;

/// Errors raised while extracting an upstream archive.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Corrupt archive data or filesystem failure during unpacking.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Zip-specific structural failure.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The blocking extraction task panicked or was cancelled.
    #[error("extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Extract `archive` into `dest` according to `format`.
///
/// Decompression runs on the blocking pool; `dest` is created if
/// absent. Entries keep their archive-internal paths, so the upstream
/// wrapper directory appears directly under `dest`.
///
/// # Errors
///
/// Returns [`ExtractError::Io`] for corrupt tar/gzip data or
/// filesystem failures, [`ExtractError::Zip`] for corrupt zip data.
pub async fn extract_archive(
    archive: &Path,
    dest: &Path,
    format: ArtifactFormat,
) -> Result<(), ExtractError> {
    tokio::fs::create_dir_all(dest).await?;
    let archive = archive.to_path_buf();
    let dest = dest.to_path_buf();
    match format {
        ArtifactFormat::TarGz => {
            tokio::task::spawn_blocking(move || extract_tar_gz(&archive, &dest)).await??;
        }
        ArtifactFormat::Zip => {
            tokio::task::spawn_blocking(move || extract_zip(&archive, &dest)).await??;
        }
    }
    Ok(())
}

fn extract_tar_gz(archive: &Path, dest: &Path) -> Result<(), ExtractError> {
    let file = std::fs::File::open(archive)?;
    let decoder = flate2::read::GzDecoder::new(std::io::BufReader::new(file));
    let mut tar = tar::Archive::new(decoder);
    tar.unpack(dest)?;
    Ok(())
}

fn extract_zip(archive: &Path, dest: &Path) -> Result<(), ExtractError> {
    let file = std::fs::File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file)?;
    zip.extract(dest)?;
    Ok(())
}
