//! vpack - tools-verible package builder

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vpack_cli::cmd;
use vpack_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Assemble {
            platform_id,
            all,
            package_version,
            upstream_tag,
            work_dir,
            config,
        } => {
            cmd::assemble::assemble(
                platform_id,
                all,
                package_version,
                upstream_tag,
                work_dir,
                config,
            )
            .await
        }
        Commands::Platforms => {
            cmd::platforms::platforms();
            Ok(())
        }
    }
}
