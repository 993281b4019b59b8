//! Diagnostics printed by the CLI.
//!
//! Resolution errors and skipped config files are reported with their
//! cause, the context that led to them and a suggested fix.

use std::fmt;
use std::path::PathBuf;

/// Suggestions shared across diagnostics.
pub mod suggestions {
    pub const LIST_PLATFORMS: &str = "Run `modrules platforms` to see platforms with rules";

    pub const LIST_TARGETS: &str = "Run `modrules targets` to see available targets";

    pub const REPORT_RULES: &str =
        "The rule tables are inconsistent; run `modrules matrix` to find every affected combination";

    pub const CHECK_CONFIG: &str = "Check `.modrules/config.toml` or pass `--config <file>`";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The command failed
    Error,
    /// The command continues with a fallback
    Warning,
}

impl Severity {
    fn label(&self, color: bool) -> &'static str {
        match (self, color) {
            (Severity::Error, false) => "error",
            (Severity::Error, true) => "\x1b[1;31merror\x1b[0m",
            (Severity::Warning, false) => "warning",
            (Severity::Warning, true) => "\x1b[1;33mwarning\x1b[0m",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label(false))
    }
}

/// A message with its context and suggested fixes.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    pub context: Vec<String>,
    pub suggestions: Vec<String>,
    /// File the diagnostic is about, if any
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic::new(message, Severity::Error)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic::new(message, Severity::Warning)
    }

    fn new(message: impl Into<String>, severity: Severity) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Render for the terminal, with ANSI colors when `color` is set.
    pub fn format(&self, color: bool) -> String {
        let mut lines = vec![format!("{}: {}", self.severity.label(color), self.message)];

        if let Some(path) = &self.location {
            lines.push(format!("  --> {}", path.display()));
        }
        lines.extend(self.context.iter().map(|ctx| format!("  = {}", ctx)));

        let help = if color { "\x1b[1;32mhelp\x1b[0m" } else { "help" };
        lines.extend(self.suggestions.iter().map(|s| format!("{}: {}", help, s)));

        let mut output = lines.join("\n");
        output.push('\n');
        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_layout() {
        let diag = Diagnostic::error("no build rules for platform `HTML5`")
            .with_context("the plugin ships no HTML5 binaries")
            .with_suggestion(suggestions::LIST_PLATFORMS);

        assert_eq!(
            diag.format(false),
            "error: no build rules for platform `HTML5`\n\
             \x20 = the plugin ships no HTML5 binaries\n\
             help: Run `modrules platforms` to see platforms with rules\n"
        );
    }

    #[test]
    fn test_warning_with_location() {
        let diag = Diagnostic::warning("config file ignored")
            .with_location("/proj/.modrules/config.toml")
            .with_suggestion(suggestions::CHECK_CONFIG);

        let output = diag.to_string();
        assert!(output.starts_with("warning: config file ignored\n  --> /proj/.modrules/config.toml\n"));
        assert!(output.ends_with("help: Check `.modrules/config.toml` or pass `--config <file>`\n"));
    }

    #[test]
    fn test_color_only_when_asked() {
        let diag = Diagnostic::error("boom").with_suggestion("retry");
        assert!(!diag.format(false).contains('\x1b'));
        assert!(diag.format(true).starts_with("\x1b[1;31merror"));
    }
}
