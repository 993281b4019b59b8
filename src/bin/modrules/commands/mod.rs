//! Command implementations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use modrules::rules::resolve::DEFAULT_THIRD_PARTY_ROOT;
use modrules::util::config::{self, Config};
use modrules::util::diagnostic::emit;
use modrules::{ModuleId, PlatformId, Resolver, TargetKind, ToolchainVersion};

use crate::cli::BuildInputs;

pub mod completions;
pub mod flags;
pub mod matrix;
pub mod platforms;
pub mod resolve;
pub mod targets;

/// Load the explicit config file, or the merged global and project config.
///
/// An explicit file must load. Unreadable global or project files are
/// reported as warnings and skipped.
pub fn load_config(explicit: Option<&Path>, color: bool) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path);
    }

    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let project = config::project_config_path(&cwd);
    let global = config::global_config_path().unwrap_or_default();

    let (config, warnings) = config::load_config(&global, &project);
    for warning in &warnings {
        emit(warning, color);
    }

    Ok(config)
}

/// Third-party root: command line, then config, then the plugin default.
pub fn third_party_root(root: Option<&Path>, config: &Config) -> PathBuf {
    root.map(Path::to_path_buf)
        .or_else(|| config.paths.third_party.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_THIRD_PARTY_ROOT))
}

/// Module: command line, then config, then the SDK.
pub fn module(module: Option<&str>, config: &Config) -> Result<ModuleId> {
    match module {
        Some(name) => Ok(name.parse()?),
        None => Ok(config.module()?.unwrap_or_default()),
    }
}

/// Toolchain version: command line, then config.
pub fn engine(engine: Option<&str>, config: &Config) -> Result<ToolchainVersion> {
    match engine {
        Some(version) => Ok(version.parse()?),
        None => config.engine()?.ok_or_else(|| {
            anyhow::anyhow!(
                "no toolchain version given\n\
                 help: pass `--engine <version>` or set `defaults.engine` in .modrules/config.toml"
            )
        }),
    }
}

/// A fully parsed single-build request.
pub struct Request {
    pub resolver: Resolver,
    pub platform: PlatformId,
    pub target: TargetKind,
    pub toolchain: ToolchainVersion,
}

impl Request {
    pub fn from_inputs(inputs: &BuildInputs, config: &Config) -> Result<Self> {
        let platform: PlatformId = inputs.platform.parse()?;
        let target: TargetKind = inputs.target.parse()?;
        let toolchain = engine(inputs.engine.as_deref(), config)?;
        let module = module(inputs.module.as_deref(), config)?;
        let root = third_party_root(inputs.root.as_deref(), config);

        tracing::debug!("third-party root: {}", root.display());

        Ok(Request {
            resolver: Resolver::new(root).module(module),
            platform,
            target,
            toolchain,
        })
    }

    pub fn resolve(&self) -> Result<modrules::ResolvedConfig> {
        Ok(self
            .resolver
            .resolve(self.platform, self.target, self.toolchain)?)
    }
}
