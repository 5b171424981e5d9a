//! Platform identifiers and the static per-platform parameter table.
//!
//! Adding a platform means adding an enum variant and a table entry;
//! no pipeline logic changes. The table records how the upstream
//! project names its release artifacts for each platform, which archive
//! format it ships, what the archive's top-level wrapper directory is
//! called, and whether the artifact needs the `bin/` structural
//! correction (see [`PlatformSpec::synthesize_bin`]).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::ArtifactFormat;
use crate::version::{UpstreamTag, Version};

/// One of the five platforms packages are produced for.
///
/// The hyphenated identifier (`linux-x86-64`) is the canonical form
/// used on the command line and in working-directory names; output
/// archive names use the underscored [`package_suffix`](Self::package_suffix)
/// form instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformId {
    /// macOS on Apple Silicon.
    #[serde(rename = "darwin-arm64")]
    DarwinArm64,
    /// macOS on Intel.
    #[serde(rename = "darwin-x86-64")]
    DarwinX86_64,
    /// Linux on `x86_64` (static upstream binaries).
    #[serde(rename = "linux-x86-64")]
    LinuxX86_64,
    /// Linux on ARM64 (static upstream binaries).
    #[serde(rename = "linux-aarch64")]
    LinuxAarch64,
    /// Windows on `x86_64`.
    #[serde(rename = "windows-amd64")]
    WindowsAmd64,
}

/// Rejection of a platform identifier outside the supported set.
///
/// This is a configuration error: it is raised while parsing inputs,
/// before any network or filesystem side effect.
#[derive(Error, Debug)]
#[error(
    "unsupported platform id '{0}' (expected one of: darwin-arm64, darwin-x86-64, \
     linux-x86-64, linux-aarch64, windows-amd64)"
)]
pub struct PlatformParseError(String);

/// Immutable upstream parameters for one platform.
///
/// One entry exists per [`PlatformId`]; entries are static data and
/// never computed from archive contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformSpec {
    /// Platform part of the upstream artifact filename
    /// (`verible-<tag>-<upstream_suffix>.<ext>`).
    pub upstream_suffix: &'static str,
    /// Archive format the upstream project ships for this platform.
    pub format: ArtifactFormat,
    /// Suffix of the archive's top-level wrapper directory, when the
    /// wrapper name differs from the bare `verible-<tag>` form.
    pub wrapper_suffix: Option<&'static str>,
    /// Structural correction flag: the upstream artifact for this
    /// platform ships its binaries at the archive root instead of under
    /// `bin/`, so the assembler must synthesize that directory.
    pub synthesize_bin: bool,
}

const DARWIN_ARM64: PlatformSpec = PlatformSpec {
    upstream_suffix: "macOS",
    format: ArtifactFormat::TarGz,
    wrapper_suffix: Some("macOS"),
    synthesize_bin: false,
};

const DARWIN_X86_64: PlatformSpec = PlatformSpec {
    upstream_suffix: "macOS",
    format: ArtifactFormat::TarGz,
    wrapper_suffix: Some("macOS"),
    synthesize_bin: false,
};

const LINUX_X86_64: PlatformSpec = PlatformSpec {
    upstream_suffix: "linux-static-x86_64",
    format: ArtifactFormat::TarGz,
    // The linux archives unpack to a bare `verible-<tag>` directory
    wrapper_suffix: None,
    synthesize_bin: false,
};

const LINUX_AARCH64: PlatformSpec = PlatformSpec {
    upstream_suffix: "linux-static-arm64",
    format: ArtifactFormat::TarGz,
    wrapper_suffix: None,
    synthesize_bin: false,
};

const WINDOWS_AMD64: PlatformSpec = PlatformSpec {
    upstream_suffix: "win64",
    format: ArtifactFormat::Zip,
    wrapper_suffix: Some("win64"),
    // The win64 artifact has no 'bin' dir; executables sit at the root
    synthesize_bin: true,
};

impl PlatformId {
    /// All supported platforms, in build order.
    pub const ALL: [Self; 5] = [
        Self::DarwinArm64,
        Self::DarwinX86_64,
        Self::LinuxX86_64,
        Self::LinuxAarch64,
        Self::WindowsAmd64,
    ];

    /// Canonical hyphenated identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DarwinArm64 => "darwin-arm64",
            Self::DarwinX86_64 => "darwin-x86-64",
            Self::LinuxX86_64 => "linux-x86-64",
            Self::LinuxAarch64 => "linux-aarch64",
            Self::WindowsAmd64 => "windows-amd64",
        }
    }

    /// Underscored form used in output archive filenames
    /// (`tools-verible-linux_x86_64-1.2.3.tar.gz`).
    pub fn package_suffix(self) -> &'static str {
        match self {
            Self::DarwinArm64 => "darwin_arm64",
            Self::DarwinX86_64 => "darwin_x86_64",
            Self::LinuxX86_64 => "linux_x86_64",
            Self::LinuxAarch64 => "linux_aarch64",
            Self::WindowsAmd64 => "windows_amd64",
        }
    }

    /// Look up this platform's entry in the static parameter table.
    pub const fn spec(self) -> &'static PlatformSpec {
        match self {
            Self::DarwinArm64 => &DARWIN_ARM64,
            Self::DarwinX86_64 => &DARWIN_X86_64,
            Self::LinuxX86_64 => &LINUX_X86_64,
            Self::LinuxAarch64 => &LINUX_AARCH64,
            Self::WindowsAmd64 => &WINDOWS_AMD64,
        }
    }

    /// Upstream artifact filename for the given release tag. Also used
    /// as the local cache filename.
    pub fn artifact_file_name(self, tag: &UpstreamTag) -> String {
        let spec = self.spec();
        format!(
            "verible-{tag}-{}.{}",
            spec.upstream_suffix,
            spec.format.extension()
        )
    }

    /// Name of the top-level wrapper directory inside the upstream
    /// archive.
    pub fn wrapper_dir_name(self, tag: &UpstreamTag) -> String {
        match self.spec().wrapper_suffix {
            Some(suffix) => format!("verible-{tag}-{suffix}"),
            None => format!("verible-{tag}"),
        }
    }

    /// Download URL for the upstream artifact:
    /// `<base>/<tag>/<artifact-file-name>`.
    pub fn download_url(self, base_url: &str, tag: &UpstreamTag) -> String {
        format!(
            "{}/{tag}/{}",
            base_url.trim_end_matches('/'),
            self.artifact_file_name(tag)
        )
    }

    /// Deterministic output archive filename for this platform and
    /// package version. Output packages are always gzip-compressed tar,
    /// regardless of the upstream input format.
    pub fn package_file_name(self, package_name: &str, version: &Version) -> String {
        format!("{package_name}-{}-{version}.tar.gz", self.package_suffix())
    }
}

impl std::fmt::Display for PlatformId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PlatformId {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "darwin-arm64" => Ok(Self::DarwinArm64),
            "darwin-x86-64" => Ok(Self::DarwinX86_64),
            "linux-x86-64" => Ok(Self::LinuxX86_64),
            "linux-aarch64" => Ok(Self::LinuxAarch64),
            "windows-amd64" => Ok(Self::WindowsAmd64),
            other => Err(PlatformParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn tag() -> UpstreamTag {
        UpstreamTag::parse("v0.0-3862-g936dfb1d").unwrap()
    }

    #[test]
    fn test_from_str_roundtrip() {
        for platform in PlatformId::ALL {
            assert_eq!(PlatformId::from_str(platform.as_str()).unwrap(), platform);
        }
    }

    #[test]
    fn test_unknown_platform_rejected() {
        let err = PlatformId::from_str("linux-riscv64").unwrap_err();
        assert!(err.to_string().contains("linux-riscv64"));
        assert!(err.to_string().contains("unsupported platform"));
    }

    #[test]
    fn test_artifact_names_match_upstream_convention() {
        let tag = tag();
        assert_eq!(
            PlatformId::LinuxX86_64.artifact_file_name(&tag),
            "verible-v0.0-3862-g936dfb1d-linux-static-x86_64.tar.gz"
        );
        assert_eq!(
            PlatformId::DarwinArm64.artifact_file_name(&tag),
            "verible-v0.0-3862-g936dfb1d-macOS.tar.gz"
        );
        assert_eq!(
            PlatformId::WindowsAmd64.artifact_file_name(&tag),
            "verible-v0.0-3862-g936dfb1d-win64.zip"
        );
    }

    #[test]
    fn test_wrapper_dir_names() {
        let tag = tag();
        // linux archives have no platform suffix on the wrapper dir
        assert_eq!(
            PlatformId::LinuxX86_64.wrapper_dir_name(&tag),
            "verible-v0.0-3862-g936dfb1d"
        );
        assert_eq!(
            PlatformId::LinuxAarch64.wrapper_dir_name(&tag),
            "verible-v0.0-3862-g936dfb1d"
        );
        assert_eq!(
            PlatformId::DarwinX86_64.wrapper_dir_name(&tag),
            "verible-v0.0-3862-g936dfb1d-macOS"
        );
        assert_eq!(
            PlatformId::WindowsAmd64.wrapper_dir_name(&tag),
            "verible-v0.0-3862-g936dfb1d-win64"
        );
    }

    #[test]
    fn test_download_url() {
        let tag = tag();
        let base = "https://github.com/chipsalliance/verible/releases/download";
        assert_eq!(
            PlatformId::LinuxX86_64.download_url(base, &tag),
            "https://github.com/chipsalliance/verible/releases/download/\
             v0.0-3862-g936dfb1d/verible-v0.0-3862-g936dfb1d-linux-static-x86_64.tar.gz"
        );
        // Trailing slash on the base must not double up
        let with_slash = format!("{base}/");
        assert_eq!(
            PlatformId::LinuxX86_64.download_url(&with_slash, &tag),
            PlatformId::LinuxX86_64.download_url(base, &tag)
        );
    }

    #[test]
    fn test_package_file_name() {
        let version = Version::parse("1.2.3").unwrap();
        assert_eq!(
            PlatformId::LinuxX86_64.package_file_name("tools-verible", &version),
            "tools-verible-linux_x86_64-1.2.3.tar.gz"
        );
        assert_eq!(
            PlatformId::WindowsAmd64.package_file_name("tools-verible", &version),
            "tools-verible-windows_amd64-1.2.3.tar.gz"
        );
    }

    #[test]
    fn test_only_windows_gets_bin_synthesis() {
        for platform in PlatformId::ALL {
            assert_eq!(
                platform.spec().synthesize_bin,
                platform == PlatformId::WindowsAmd64
            );
        }
    }

    #[test]
    fn test_only_windows_ships_zip() {
        for platform in PlatformId::ALL {
            let expected = if platform == PlatformId::WindowsAmd64 {
                ArtifactFormat::Zip
            } else {
                ArtifactFormat::TarGz
            };
            assert_eq!(platform.spec().format, expected);
        }
    }

    #[test]
    fn test_naming_is_deterministic() {
        let tag = tag();
        let version = Version::parse("1.2.3").unwrap();
        for platform in PlatformId::ALL {
            assert_eq!(
                platform.artifact_file_name(&tag),
                platform.artifact_file_name(&tag)
            );
            assert_eq!(
                platform.package_file_name("tools-verible", &version),
                platform.package_file_name("tools-verible", &version)
            );
        }
    }
}
