//! Target kinds - which binary a build produces.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rules::errors::ResolveError;

/// The kind of binary being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Shipping game binary
    Game,

    /// Development editor binary
    Editor,

    /// Dedicated server binary
    Server,

    /// Client-only binary
    Client,

    /// Standalone program (tools, commandlets)
    Program,
}

impl Default for TargetKind {
    fn default() -> Self {
        TargetKind::Game
    }
}

impl TargetKind {
    pub const ALL: [TargetKind; 5] = [
        TargetKind::Game,
        TargetKind::Editor,
        TargetKind::Server,
        TargetKind::Client,
        TargetKind::Program,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Game => "game",
            TargetKind::Editor => "editor",
            TargetKind::Server => "server",
            TargetKind::Client => "client",
            TargetKind::Program => "program",
        }
    }

    /// Suffix the engine appends to target names (`MyGameEditor`).
    pub fn target_suffix(&self) -> &'static str {
        match self {
            TargetKind::Game => "",
            TargetKind::Editor => "Editor",
            TargetKind::Server => "Server",
            TargetKind::Client => "Client",
            TargetKind::Program => "Program",
        }
    }

    pub fn is_editor(&self) -> bool {
        matches!(self, TargetKind::Editor)
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "game" => Ok(TargetKind::Game),
            "editor" => Ok(TargetKind::Editor),
            "server" => Ok(TargetKind::Server),
            "client" => Ok(TargetKind::Client),
            "program" => Ok(TargetKind::Program),
            _ => Err(ResolveError::InvalidTarget {
                target: s.to_string(),
                module: None,
            }),
        }
    }
}
