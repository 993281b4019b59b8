//! Build rules of the plugin and their resolution.
//!
//! - `features`: per-platform capability switches
//! - `table`: third-party directories and libraries per (platform, version range)
//! - `module`: base rules of each plugin module
//! - `target`: target rules of the sample project
//! - `resolve`: applies all of the above to one build

pub mod errors;
pub mod features;
pub mod module;
pub mod resolve;
pub mod table;
pub mod target;

pub use errors::ResolveError;
pub use features::FeatureSet;
pub use module::ModuleId;
pub use resolve::{resolve, Resolver};
pub use target::TargetRules;
