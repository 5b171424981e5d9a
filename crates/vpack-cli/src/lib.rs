//! vpack - tools-verible package builder
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
//!
//! Command-line front end for the package assembly pipeline. One
//! invocation builds one platform (or, with `--all`, every supported
//! platform in sequence with an aggregated summary).

pub mod cmd;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use vpack_schema::{PlatformId, UpstreamTag, Version};

#[derive(Debug, Parser)]
#[command(name = "vpack")]
#[command(author, version, about = "vpack - tools-verible package builder")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Assemble the package for one platform (or all of them)
    Assemble {
        /// Platform to build (e.g. linux-x86-64)
        #[arg(
            long = "platform-id",
            required_unless_present = "all",
            conflicts_with = "all"
        )]
        platform_id: Option<PlatformId>,

        /// Build every supported platform sequentially
        #[arg(long)]
        all: bool,

        /// Package version for the output file name and metadata
        #[arg(long)]
        package_version: Version,

        /// Override the upstream release tag pinned in the config
        #[arg(long)]
        upstream_tag: Option<UpstreamTag>,

        /// Working directory for downloads, staging, and outputs
        #[arg(long, default_value = "_work")]
        work_dir: PathBuf,

        /// Path to the packager configuration
        #[arg(long, default_value = "packager.toml")]
        config: PathBuf,
    },

    /// List supported platforms and their upstream parameters
    Platforms,
}
