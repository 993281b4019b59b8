//! Host toolchain versions and version ranges.
//!
//! The engine build system is versioned `major.minor` (4.16, 4.21, ...).
//! Patch levels never change which rule fields exist, so they are parsed
//! but dropped.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use semver::Version;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::rules::errors::ResolveError;

/// Matches `UE_4_21`, `UE4_21_OR_LATER`, `ue-4.21` style engine macros.
static ENGINE_MACRO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^UE[_-]?(\d+)[_.](\d+)(?:_OR_LATER)?$").expect("valid engine macro regex")
});

/// Ordered `major.minor` version of the host build toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToolchainVersion {
    pub major: u64,
    pub minor: u64,
}

impl ToolchainVersion {
    pub const fn new(major: u64, minor: u64) -> Self {
        ToolchainVersion { major, minor }
    }

    /// `Definitions` was renamed to `PublicDefinitions`.
    pub const PUBLIC_DEFINITIONS: ToolchainVersion = ToolchainVersion::new(4, 19);

    /// First toolchain with the `PrivatePCHHeaderFile` field.
    pub const PRIVATE_PCH: ToolchainVersion = ToolchainVersion::new(4, 21);

    /// Check whether this toolchain is at least `other`.
    pub fn at_least(&self, other: ToolchainVersion) -> bool {
        *self >= other
    }

    /// Whether the toolchain supports a private precompiled header path.
    pub fn supports_private_pch(&self) -> bool {
        self.at_least(Self::PRIVATE_PCH)
    }

    /// Name of the rules field that holds preprocessor definitions.
    pub fn definitions_field(&self) -> &'static str {
        if self.at_least(Self::PUBLIC_DEFINITIONS) {
            "PublicDefinitions"
        } else {
            "Definitions"
        }
    }

    /// Convert to a semver version (patch is always zero).
    pub fn to_semver(&self) -> Version {
        Version::new(self.major, self.minor, 0)
    }

    /// Parse a version string, allowing incomplete versions and engine macros.
    pub fn parse_lenient(s: &str) -> Option<Self> {
        let s = s.trim();

        if let Some(caps) = ENGINE_MACRO.captures(s) {
            let major = caps[1].parse().ok()?;
            let minor = caps[2].parse().ok()?;
            return Some(ToolchainVersion::new(major, minor));
        }

        let s = s.strip_prefix('v').unwrap_or(s);

        // Try exact parse first
        if let Ok(v) = s.parse::<Version>() {
            return Some(ToolchainVersion::new(v.major, v.minor));
        }

        let parts: Vec<&str> = s.split('.').collect();
        match parts.len() {
            1 => Some(ToolchainVersion::new(parts[0].parse().ok()?, 0)),
            2 | 3 => {
                let major = parts[0].parse().ok()?;
                let minor = parts[1].parse().ok()?;
                if let Some(patch) = parts.get(2) {
                    patch.parse::<u64>().ok()?;
                }
                Some(ToolchainVersion::new(major, minor))
            }
            _ => None,
        }
    }
}

impl PartialOrd for ToolchainVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ToolchainVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_semver().cmp(&other.to_semver())
    }
}

impl fmt::Display for ToolchainVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{}.{}", self.major, self.minor))
    }
}

impl FromStr for ToolchainVersion {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolchainVersion::parse_lenient(s).ok_or_else(|| ResolveError::InvalidVersion {
            input: s.to_string(),
        })
    }
}

impl Serialize for ToolchainVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ToolchainVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Half-open version range `[min, max)`. Missing bounds are unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRange {
    pub min: Option<ToolchainVersion>,
    pub max: Option<ToolchainVersion>,
}

impl VersionRange {
    /// Every version.
    pub const ANY: VersionRange = VersionRange {
        min: None,
        max: None,
    };

    /// Versions strictly below `max`.
    pub const fn below(max: ToolchainVersion) -> Self {
        VersionRange {
            min: None,
            max: Some(max),
        }
    }

    /// Versions at or above `min`.
    pub const fn starting(min: ToolchainVersion) -> Self {
        VersionRange {
            min: Some(min),
            max: None,
        }
    }

    /// Versions in `[min, max)`.
    pub const fn between(min: ToolchainVersion, max: ToolchainVersion) -> Self {
        VersionRange {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn contains(&self, version: ToolchainVersion) -> bool {
        self.min.map_or(true, |min| version >= min) && self.max.map_or(true, |max| version < max)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (None, None) => write!(f, "*"),
            (Some(min), None) => write!(f, ">={}", min),
            (None, Some(max)) => write!(f, "<{}", max),
            (Some(min), Some(max)) => write!(f, ">={}, <{}", min, max),
        }
    }
}
