//! Compilation target platforms.
//!
//! The set mirrors the platforms the host engine knows about. Only some of
//! them have plugin rules; the rest are recognised so they can be rejected
//! with a precise error instead of being mistaken for a typo.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rules::errors::ResolveError;

/// A target operating system / CPU-ABI combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlatformId {
    Win32,
    Win64,
    Mac,
    Linux,
    Android,
    IOS,
    PS4,
    XboxOne,
    Switch,
    HTML5,
}

impl PlatformId {
    /// Every platform the engine knows about.
    pub const ALL: [PlatformId; 10] = [
        PlatformId::Win32,
        PlatformId::Win64,
        PlatformId::Mac,
        PlatformId::Linux,
        PlatformId::Android,
        PlatformId::IOS,
        PlatformId::PS4,
        PlatformId::XboxOne,
        PlatformId::Switch,
        PlatformId::HTML5,
    ];

    /// The engine's name for the platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformId::Win32 => "Win32",
            PlatformId::Win64 => "Win64",
            PlatformId::Mac => "Mac",
            PlatformId::Linux => "Linux",
            PlatformId::Android => "Android",
            PlatformId::IOS => "IOS",
            PlatformId::PS4 => "PS4",
            PlatformId::XboxOne => "XboxOne",
            PlatformId::Switch => "Switch",
            PlatformId::HTML5 => "HTML5",
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, PlatformId::Win32 | PlatformId::Win64)
    }

    /// Device ABIs the platform's third-party binaries are shipped for.
    ///
    /// Only Android ships more than one; the toolchain picks the matching
    /// directory per ABI.
    pub fn android_abis(&self) -> &'static [AndroidAbi] {
        match self {
            PlatformId::Android => &[AndroidAbi::ARMv7, AndroidAbi::ARM64],
            _ => &[],
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PlatformId {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let platform = match s.trim().to_ascii_lowercase().as_str() {
            "win32" | "windows-x86" | "windows32" | "x86-windows" => PlatformId::Win32,
            "win64" | "windows-x64" | "windows" | "x64-windows" => PlatformId::Win64,
            "mac" | "macos" | "osx" | "darwin" => PlatformId::Mac,
            "linux" => PlatformId::Linux,
            "android" => PlatformId::Android,
            "ios" => PlatformId::IOS,
            "ps4" => PlatformId::PS4,
            "xboxone" | "xbox-one" => PlatformId::XboxOne,
            "switch" => PlatformId::Switch,
            "html5" => PlatformId::HTML5,
            _ => {
                return Err(ResolveError::UnsupportedPlatform {
                    platform: s.to_string(),
                })
            }
        };
        Ok(platform)
    }
}

/// Android device ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AndroidAbi {
    ARMv7,
    ARM64,
}

impl AndroidAbi {
    /// Directory segment under `include/Android` and `lib/Android`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AndroidAbi::ARMv7 => "ARMv7",
            AndroidAbi::ARM64 => "ARM64",
        }
    }
}

impl fmt::Display for AndroidAbi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
