//! modrules - build rule resolver for an engine networking plugin
//!
//! Given a target platform, a target kind and the host toolchain version,
//! this crate resolves the preprocessor definitions, include directories,
//! library search directories and link inputs needed to build the plugin.
//! Resolution is pure: it never touches the filesystem.

pub mod core;
pub mod rules;
pub mod util;

pub use crate::core::{
    platform::PlatformId, resolved::ResolvedConfig, target::TargetKind,
    version::ToolchainVersion,
};

pub use rules::{resolve, ModuleId, ResolveError, Resolver};
