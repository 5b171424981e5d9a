//! The `assemble` command: run the pipeline for one platform, or for
//! all of them with an aggregated per-platform summary.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::Client;

use vpack_core::{Assembler, PackagerConfig, WorkLayout};
use vpack_schema::{PlatformId, Provenance, UpstreamTag, Version, VersionPair};

/// Result of one platform's build.
struct BuildResult {
    platform: PlatformId,
    outcome: BuildOutcome,
    duration: Duration,
}

enum BuildOutcome {
    Built(PathBuf),
    Failed,
}

pub async fn assemble(
    platform_id: Option<PlatformId>,
    all: bool,
    package_version: Version,
    upstream_tag: Option<UpstreamTag>,
    work_dir: PathBuf,
    config_path: PathBuf,
) -> Result<()> {
    let config = PackagerConfig::from_file(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    let tag = match upstream_tag {
        Some(tag) => tag,
        None => UpstreamTag::parse(&config.upstream.tag)
            .with_context(|| format!("invalid upstream tag in {}", config_path.display()))?,
    };
    let versions = VersionPair::new(package_version, tag);

    let platforms: Vec<PlatformId> = if all {
        PlatformId::ALL.to_vec()
    } else {
        // clap guarantees platform_id is present when --all is absent
        platform_id.into_iter().collect()
    };

    println!("vpack package builder");
    println!();
    println!("  package:      {} {}", config.package.name, versions.package);
    println!("  upstream tag: {}", versions.upstream);
    println!("  work dir:     {}", work_dir.display());

    let client = Client::new();
    let layout = WorkLayout::new(work_dir);
    let assembler = Assembler::new(&client, &config, layout, Provenance::from_env());

    let mut results: Vec<BuildResult> = Vec::new();
    for platform in platforms {
        println!();
        println!("  processing {platform}");
        let start = Instant::now();
        let outcome = match assembler.assemble(platform, &versions).await {
            Ok(path) => {
                println!("    built {}", path.display());
                BuildOutcome::Built(path)
            }
            Err(e) => {
                eprintln!("    error: {platform}: {e}");
                BuildOutcome::Failed
            }
        };
        results.push(BuildResult {
            platform,
            outcome,
            duration: start.elapsed(),
        });
    }

    // Summary
    let built: Vec<_> = results
        .iter()
        .filter(|r| matches!(r.outcome, BuildOutcome::Built(_)))
        .collect();
    let failed: Vec<_> = results
        .iter()
        .filter(|r| matches!(r.outcome, BuildOutcome::Failed))
        .collect();

    println!();
    println!("  summary");
    for r in &built {
        if let BuildOutcome::Built(path) = &r.outcome {
            println!(
                "    built {} ({:.1}s) -> {}",
                r.platform,
                r.duration.as_secs_f64(),
                path.display()
            );
        }
    }
    for r in &failed {
        println!("    failed {}", r.platform);
    }
    println!();
    println!("  {} built, {} failed", built.len(), failed.len());

    if !failed.is_empty() {
        anyhow::bail!("{} platform build(s) failed", failed.len());
    }
    Ok(())
}
