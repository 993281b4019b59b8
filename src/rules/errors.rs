//! Resolution error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::platform::PlatformId;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error during build rule resolution.
///
/// Every variant is a configuration-time failure: the orchestrator must
/// abort the build rather than fall back to a default rule set.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum ResolveError {
    #[error("unsupported platform `{platform}`")]
    #[diagnostic(code(modrules::resolve::unsupported_platform))]
    UnsupportedPlatform { platform: String },

    #[error("invalid target `{target}`")]
    #[diagnostic(code(modrules::resolve::invalid_target))]
    InvalidTarget {
        target: String,
        module: Option<String>,
    },

    #[error("invalid toolchain version `{input}`")]
    #[diagnostic(
        code(modrules::resolve::invalid_version),
        help("versions look like `4.16`, `4.21.2` or `UE_4_21`")
    )]
    InvalidVersion { input: String },

    #[error("unknown module `{module}`")]
    #[diagnostic(code(modrules::resolve::invalid_module))]
    InvalidModule { module: String },

    #[error("resolved configuration for `{module}` on {platform} is inconsistent: {message}")]
    #[diagnostic(code(modrules::resolve::invariant))]
    InvariantViolation {
        module: String,
        platform: PlatformId,
        message: String,
    },

    #[error("resolved configuration for `{module}` on {platform} cannot be written as JSON: {message}")]
    #[diagnostic(code(modrules::resolve::unrepresentable))]
    Unrepresentable {
        module: String,
        platform: PlatformId,
        message: String,
    },
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::UnsupportedPlatform { platform } => {
                Diagnostic::error(format!("no build rules for platform `{}`", platform))
                    .with_context(
                        "linking a default library set could pull in binaries for the wrong ABI",
                    )
                    .with_suggestion(suggestions::LIST_PLATFORMS)
            }

            ResolveError::InvalidTarget { target, module } => {
                let mut diag = match module {
                    Some(module) => Diagnostic::error(format!(
                        "module `{}` cannot be built for `{}` targets",
                        module, target
                    )),
                    None => Diagnostic::error(format!("unknown target kind `{}`", target)),
                };
                diag = diag.with_context("supported target kinds: game, editor, server");
                diag.with_suggestion(suggestions::LIST_TARGETS)
            }

            ResolveError::InvalidVersion { input } => {
                Diagnostic::error(format!("`{}` is not a toolchain version", input))
                    .with_suggestion("Pass a version such as `--engine 4.21`")
            }

            ResolveError::InvalidModule { module } => {
                Diagnostic::error(format!("unknown module `{}`", module))
                    .with_context("modules: Funapi, FunapiDedicatedServer, funapi_plugin_ue4")
            }

            ResolveError::InvariantViolation {
                module,
                platform,
                message,
            } => Diagnostic::error(format!(
                "inconsistent rules for `{}` on {}",
                module, platform
            ))
            .with_context(message.clone())
            .with_suggestion(suggestions::REPORT_RULES),

            ResolveError::Unrepresentable {
                module,
                platform,
                message,
            } => Diagnostic::error(format!(
                "cannot write the configuration for `{}` on {} as JSON",
                module, platform
            ))
            .with_context(message.clone())
            .with_suggestion("Pass a UTF-8 `--root` or set `paths.third_party` to a UTF-8 path"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_platform_diagnostic() {
        let err = ResolveError::UnsupportedPlatform {
            platform: "HTML5".to_string(),
        };
        let output = err.to_diagnostic().format(false);
        assert!(output.contains("error: no build rules for platform `HTML5`"));
        assert!(output.contains("modrules platforms"));
    }

    #[test]
    fn test_invalid_target_mentions_module() {
        let err = ResolveError::InvalidTarget {
            target: "server".to_string(),
            module: Some("Funapi".to_string()),
        };
        assert_eq!(err.to_string(), "invalid target `server`");
        let output = err.to_diagnostic().format(false);
        assert!(output.contains("module `Funapi` cannot be built for `server` targets"));
    }

    #[test]
    fn test_unrepresentable_points_at_root() {
        let err = ResolveError::Unrepresentable {
            module: "Funapi".to_string(),
            platform: PlatformId::Mac,
            message: "path contains invalid UTF-8 characters".to_string(),
        };
        let output = err.to_diagnostic().format(false);
        assert!(output.starts_with("error: cannot write the configuration for `Funapi` on Mac as JSON"));
        assert!(output.contains("  = path contains invalid UTF-8 characters"));
        assert!(output.contains("UTF-8 `--root`"));
    }
}
