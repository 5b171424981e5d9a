//! Core library for vpack - the tools-verible package assembly pipeline.
//!
//! The pipeline maps (platform, version pair) to a compressed package
//! archive: resolve the platform's upstream parameters, fetch the
//! artifact (idempotently), extract it, restructure the contents into
//! the package layout, stamp metadata and the license, and compress.
//! See [`assembler::Assembler`] for the full contract.

pub mod assembler;
pub mod config;
pub mod io;
pub mod paths;

pub use assembler::{AssembleError, Assembler};
pub use config::{ConfigError, PackagerConfig};
pub use paths::WorkLayout;

/// User Agent string for upstream fetches
pub const USER_AGENT: &str = concat!("vpack/", env!("CARGO_PKG_VERSION"));
