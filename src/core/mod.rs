//! Core data structures for modrules.
//!
//! This module contains the foundational types used throughout the crate:
//! - Platforms, target kinds and toolchain versions (the resolver inputs)
//! - Compile/link surface items (definitions, link inputs)
//! - The resolved configuration (the resolver output)

pub mod platform;
pub mod resolved;
pub mod surface;
pub mod target;
pub mod version;

pub use platform::{AndroidAbi, PlatformId};
pub use resolved::ResolvedConfig;
pub use surface::{Define, DefineSet, LibRef};
pub use target::TargetKind;
pub use version::{ToolchainVersion, VersionRange};
