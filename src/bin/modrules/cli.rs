//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use modrules::util::config::OutputFormat;

/// modrules - resolve build rules of the networking plugin
#[derive(Parser)]
#[command(name = "modrules")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use this config file instead of the global and project ones
    #[arg(long, global = true, env = "MODRULES_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the configuration of a module for one build
    Resolve(ResolveArgs),

    /// Show compile/link flags for one build
    Flags(FlagsArgs),

    /// Resolve every module/platform/target/toolchain combination
    Matrix(MatrixArgs),

    /// List platforms and whether rules exist for them
    Platforms,

    /// List the project's targets
    Targets,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Inputs shared by every single-build command.
#[derive(Args, Debug, Clone)]
pub struct BuildInputs {
    /// Target platform (Win32, Win64, Mac, Linux, Android, IOS, PS4)
    #[arg(short, long)]
    pub platform: String,

    /// Target kind (game, editor, server)
    #[arg(short, long, default_value = "game")]
    pub target: String,

    /// Host toolchain version (e.g. 4.21 or UE_4_21)
    #[arg(short, long)]
    pub engine: Option<String>,

    /// Module to resolve (Funapi, FunapiDedicatedServer, funapi_plugin_ue4)
    #[arg(short, long)]
    pub module: Option<String>,

    /// Third-party root holding `include/` and `lib/`
    #[arg(long)]
    pub root: Option<PathBuf>,
}

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub inputs: BuildInputs,

    /// Output format: json, flags or summary [default: json]
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

#[derive(Args)]
pub struct FlagsArgs {
    #[command(flatten)]
    pub inputs: BuildInputs,

    /// Only show compile flags
    #[arg(long, conflicts_with = "link")]
    pub compile: bool,

    /// Only show link flags
    #[arg(long)]
    pub link: bool,
}

#[derive(Args)]
pub struct MatrixArgs {
    /// Toolchain versions to resolve (repeatable)
    #[arg(short, long)]
    pub engine: Vec<String>,

    /// Restrict to one module
    #[arg(short, long)]
    pub module: Option<String>,

    /// Third-party root holding `include/` and `lib/`
    #[arg(long)]
    pub root: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
