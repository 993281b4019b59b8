//! `modrules matrix` command
//!
//! Resolves every supported combination in parallel and prints one
//! fingerprint per line, in a stable order.

use anyhow::{bail, Result};
use rayon::prelude::*;

use modrules::rules::table;
use modrules::util::Config;
use modrules::{ModuleId, PlatformId, ResolveError, Resolver, TargetKind, ToolchainVersion};

use super::third_party_root;
use crate::cli::MatrixArgs;

/// Toolchains checked when none are given: each side of every version gate.
const DEFAULT_TOOLCHAINS: &[&str] = &["4.15", "4.16", "4.18", "4.19", "4.20", "4.21", "4.22", "4.24"];

struct Combination {
    module: ModuleId,
    platform: PlatformId,
    target: TargetKind,
    toolchain: ToolchainVersion,
}

pub fn execute(args: MatrixArgs, config: &Config) -> Result<()> {
    let toolchains = if args.engine.is_empty() {
        DEFAULT_TOOLCHAINS
            .iter()
            .map(|v| v.parse())
            .collect::<Result<Vec<ToolchainVersion>, _>>()?
    } else {
        args.engine
            .iter()
            .map(|v| v.parse())
            .collect::<Result<Vec<ToolchainVersion>, _>>()?
    };

    let modules = match args.module.as_deref() {
        Some(name) => vec![name.parse::<ModuleId>()?],
        None => ModuleId::ALL.to_vec(),
    };

    let root = third_party_root(args.root.as_deref(), config);

    let mut combinations = Vec::new();
    for module in &modules {
        for platform in PlatformId::ALL.into_iter().filter(|p| table::has_rules(*p)) {
            for target in TargetKind::ALL.into_iter().filter(|t| module.supports(*t)) {
                for toolchain in &toolchains {
                    combinations.push(Combination {
                        module: *module,
                        platform,
                        target,
                        toolchain: *toolchain,
                    });
                }
            }
        }
    }

    tracing::debug!("resolving {} combinations", combinations.len());

    let results: Vec<(&Combination, Result<String, ResolveError>)> = combinations
        .par_iter()
        .map(|c| {
            let resolved = Resolver::new(root.clone())
                .module(c.module)
                .resolve(c.platform, c.target, c.toolchain)
                .and_then(|config| config.fingerprint());
            (c, resolved)
        })
        .collect();

    let mut failures = 0;
    for (c, result) in &results {
        match result {
            Ok(fingerprint) => println!(
                "{:<24} {:<8} {:<7} {:<5} {}",
                c.module.name(),
                c.platform,
                c.target,
                c.toolchain,
                fingerprint
            ),
            Err(e) => {
                failures += 1;
                println!(
                    "{:<24} {:<8} {:<7} {:<5} FAILED: {}",
                    c.module.name(),
                    c.platform,
                    c.target,
                    c.toolchain,
                    e
                );
            }
        }
    }

    tracing::info!(
        "{} combinations resolved, {} failed",
        results.len() - failures,
        failures
    );

    if failures > 0 {
        bail!("{} of {} combinations failed to resolve", failures, results.len());
    }

    Ok(())
}
