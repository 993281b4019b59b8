//! Configuration file support for modrules.
//!
//! Two configuration file locations are read:
//! - Global: `~/.modrules/config.toml` - User-wide defaults
//! - Project: `.modrules/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::version::ToolchainVersion;
use crate::rules::module::ModuleId;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Directory holding the project config file.
const CONFIG_DIR: &str = ".modrules";

/// modrules configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path settings
    pub paths: PathsConfig,

    /// Defaults for omitted command-line inputs
    pub defaults: DefaultsConfig,
}

/// Path-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Third-party root holding `include/` and `lib/`
    pub third_party: Option<PathBuf>,
}

/// Default resolver inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default toolchain version (e.g. "4.21")
    pub engine: Option<String>,

    /// Default module (Funapi, FunapiDedicatedServer, funapi_plugin_ue4)
    pub module: Option<String>,

    /// Default output format
    pub format: Option<OutputFormat>,
}

/// How `resolve` prints the configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty JSON, read by the orchestrator
    #[default]
    Json,
    /// Compiler and linker flags
    Flags,
    /// Human-readable summary
    Summary,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Json, OutputFormat::Flags, OutputFormat::Summary];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Flags => "flags",
            OutputFormat::Summary => "summary",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown output format `{}` (expected json, flags or summary)", s))
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        if let Some(root) = config.paths.third_party.take() {
            config.paths.third_party = Some(if root.is_relative() {
                relative_base(path).join(root)
            } else {
                root
            });
        }

        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is
    /// missing. An unreadable file is skipped with a warning.
    pub fn load_or_warn(path: &Path, warnings: &mut Vec<Diagnostic>) -> Self {
        if !path.exists() {
            return Self::default();
        }

        Self::load(path).unwrap_or_else(|e| {
            tracing::debug!("skipping config {}: {:#}", path.display(), e);
            warnings.push(
                Diagnostic::warning("config file ignored")
                    .with_location(path)
                    .with_context(format!("{:#}", e))
                    .with_suggestion(suggestions::CHECK_CONFIG),
            );
            Self::default()
        })
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.paths.third_party.is_some() {
            self.paths.third_party = other.paths.third_party;
        }
        if other.defaults.engine.is_some() {
            self.defaults.engine = other.defaults.engine;
        }
        if other.defaults.module.is_some() {
            self.defaults.module = other.defaults.module;
        }
        if other.defaults.format.is_some() {
            self.defaults.format = other.defaults.format;
        }
    }

    /// Parse the default toolchain version.
    pub fn engine(&self) -> Result<Option<ToolchainVersion>> {
        self.defaults
            .engine
            .as_deref()
            .map(|s| s.parse().context("invalid `defaults.engine` in config"))
            .transpose()
    }

    /// Parse the default module.
    pub fn module(&self) -> Result<Option<ModuleId>> {
        self.defaults
            .module
            .as_deref()
            .map(|s| s.parse().context("invalid `defaults.module` in config"))
            .transpose()
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.modrules/config.toml)
/// 2. Global config (~/.modrules/config.toml)
/// 3. Defaults
///
/// Files that exist but cannot be read are reported in the returned
/// warnings instead of failing the load.
pub fn load_config(global_path: &Path, project_path: &Path) -> (Config, Vec<Diagnostic>) {
    let mut config = Config::default();
    let mut warnings = Vec::new();

    config.merge(Config::load_or_warn(global_path, &mut warnings));
    config.merge(Config::load_or_warn(project_path, &mut warnings));

    (config, warnings)
}

/// Directory a relative `paths.third_party` is resolved against: the
/// project root for `.modrules/config.toml`, the file's own directory
/// otherwise.
fn relative_base(path: &Path) -> &Path {
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    if dir.file_name().is_some_and(|name| name == CONFIG_DIR) {
        dir.parent().unwrap_or_else(|| Path::new(""))
    } else {
        dir
    }
}

/// Get the global config directory (~/.modrules).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR))
}

/// Get the global config path (~/.modrules/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.modrules/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join("config.toml")
}
