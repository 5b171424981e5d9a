//! The archive format enum declared per platform in the platform table.
//!
//! The format drives the cache filename extension and the extraction
//! path; it is never sniffed from archive contents.

use serde::{Deserialize, Serialize};

/// Archive format of an upstream artifact.
///
/// The format is declared per platform in the [platform
/// table](crate::PlatformId::spec) and drives both the cache filename
/// extension and the extraction path. It is never sniffed from archive
/// contents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    /// Gzip-compressed tar archive (`.tar.gz`).
    #[serde(rename = "tar.gz")]
    TarGz,
    /// Zip archive (`.zip`).
    Zip,
}

impl ArtifactFormat {
    /// File extension used in artifact names (no leading dot).
    pub fn extension(self) -> &'static str {
        match self {
            Self::TarGz => "tar.gz",
            Self::Zip => "zip",
        }
    }
}

impl std::fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}
