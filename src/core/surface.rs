//! Compile and link surface items.
//!
//! These are the building blocks of a resolved configuration: preprocessor
//! definitions, and the link inputs handed to the orchestrator.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A preprocessor define.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Define {
    /// Simple flag: -DFOO
    Flag(String),
    /// Key-value: -DFOO=bar
    KeyValue { name: String, value: String },
}

impl Define {
    /// Create a key-value define.
    pub fn key_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Define::KeyValue {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a `NAME=1` / `NAME=0` define.
    pub fn switch(name: impl Into<String>, enabled: bool) -> Self {
        Define::key_value(name, if enabled { "1" } else { "0" })
    }

    /// Get the define name.
    pub fn name(&self) -> &str {
        match self {
            Define::Flag(n) => n,
            Define::KeyValue { name, .. } => name,
        }
    }

    /// Get the define value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Define::Flag(_) => None,
            Define::KeyValue { value, .. } => Some(value),
        }
    }

    /// Convert to compiler flag format.
    pub fn to_flag(&self) -> String {
        match self {
            Define::Flag(name) => format!("-D{}", name),
            Define::KeyValue { name, value } => format!("-D{}={}", name, value),
        }
    }
}

impl std::fmt::Display for Define {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Define::Flag(name) => f.write_str(name),
            Define::KeyValue { name, value } => write!(f, "{}={}", name, value),
        }
    }
}

/// Ordered definitions, unique by name.
///
/// Setting an existing name replaces its value in place, so the first
/// rule to mention a name fixes its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefineSet {
    defines: Vec<Define>,
}

impl DefineSet {
    pub fn new() -> Self {
        DefineSet::default()
    }

    /// Insert or override a define.
    pub fn set(&mut self, define: Define) {
        match self.defines.iter_mut().find(|d| d.name() == define.name()) {
            Some(existing) => *existing = define,
            None => self.defines.push(define),
        }
    }

    /// Insert or override every define in order.
    pub fn extend(&mut self, defines: impl IntoIterator<Item = Define>) {
        for define in defines {
            self.set(define);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Define> {
        self.defines.iter().find(|d| d.name() == name)
    }

    /// Value of a define, `None` when absent or a bare flag.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Define::value)
    }

    /// Whether `NAME=1` is present.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.value(name) == Some("1")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Define> {
        self.defines.iter()
    }

    pub fn len(&self) -> usize {
        self.defines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defines.is_empty()
    }
}

impl<'a> IntoIterator for &'a DefineSet {
    type Item = &'a Define;
    type IntoIter = std::slice::Iter<'a, Define>;

    fn into_iter(self) -> Self::IntoIter {
        self.defines.iter()
    }
}

/// A link input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LibRef {
    /// Static or import library at a specific path
    Path { path: PathBuf },

    /// Library resolved by name through the search directories (-lfoo)
    Named { name: String },

    /// Third-party package provided by the host engine
    Engine { name: String },
}

impl LibRef {
    /// Create a path library reference.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        LibRef::Path { path: path.into() }
    }

    /// Create a named library reference.
    pub fn named(name: impl Into<String>) -> Self {
        LibRef::Named { name: name.into() }
    }

    /// Create an engine package reference.
    pub fn engine(name: impl Into<String>) -> Self {
        LibRef::Engine { name: name.into() }
    }

    /// Directory the library lives in, for path references.
    pub fn dir(&self) -> Option<&Path> {
        match self {
            LibRef::Path { path } => path.parent(),
            _ => None,
        }
    }

    /// Convert to linker flag(s).
    pub fn to_flags(&self) -> Vec<String> {
        match self {
            LibRef::Path { path } => vec![path.display().to_string()],
            LibRef::Named { name } => vec![format!("-l{}", name)],
            LibRef::Engine { .. } => {
                // Resolved by the orchestrator's package registry
                vec![]
            }
        }
    }
}

impl std::fmt::Display for LibRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LibRef::Path { path } => write!(f, "{}", path.display()),
            LibRef::Named { name } => write!(f, "-l{}", name),
            LibRef::Engine { name } => write!(f, "engine:{}", name),
        }
    }
}
