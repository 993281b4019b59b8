//! Base rules of the plugin's modules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::target::TargetKind;
use crate::rules::errors::ResolveError;

/// Modules added to every editor build.
pub const EDITOR_MODULES: &[&str] = &["UnrealEd", "Slate", "SlateCore", "EditorStyle"];

/// A module of the plugin that can be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModuleId {
    /// The networking SDK itself
    #[default]
    Sdk,
    /// Dedicated server integration
    DedicatedServer,
    /// Sample game module
    SampleGame,
}

/// Platform-independent rules of a module.
#[derive(Debug, Clone, Copy)]
pub struct ModuleRules {
    pub name: &'static str,
    pub targets: &'static [TargetKind],
    pub defines: &'static [(&'static str, &'static str)],
    pub public_include_dirs: &'static [&'static str],
    pub private_include_dirs: &'static [&'static str],
    pub editor_include_dir: &'static str,
    pub public_dependencies: &'static [&'static str],
    pub private_dependencies: &'static [&'static str],
    pub dynamically_loaded: &'static [&'static str],
    pub private_pch: &'static str,
    /// Whether the per-platform feature and third-party rules apply
    pub platform_rules: bool,
}

const SDK: ModuleRules = ModuleRules {
    name: "Funapi",
    targets: &[TargetKind::Game, TargetKind::Editor],
    defines: &[
        ("WITH_FUNAPI", "1"),
        ("FUNAPI_UE4", "1"),
        ("RAPIDJSON_HAS_STDSTRING", "0"),
    ],
    public_include_dirs: &[
        "Funapi/Public",
        "Funapi/Public/funapi",
        "Funapi/Public/funapi/management",
        "Funapi/Public/funapi/network",
        "Funapi/Public/funapi/service",
        "Funapi/Public/funapi/rpc",
    ],
    private_include_dirs: &["Funapi/Private"],
    editor_include_dir: "Funapi/Editor",
    public_dependencies: &["Core", "Engine", "zlib"],
    private_dependencies: &[],
    dynamically_loaded: &[],
    private_pch: "Funapi/Private/FunapiPrivatePCH.h",
    platform_rules: true,
};

const DEDICATED_SERVER: ModuleRules = ModuleRules {
    name: "FunapiDedicatedServer",
    targets: &[TargetKind::Game, TargetKind::Editor, TargetKind::Server],
    defines: &[("WITH_FUNAPIDEDICATEDSERVER", "1")],
    public_include_dirs: &["FunapiDedicatedServer/Public"],
    private_include_dirs: &[],
    editor_include_dir: "FunapiDedicatedServer/Editor",
    public_dependencies: &[],
    private_dependencies: &["Core", "Engine", "Json", "Http"],
    dynamically_loaded: &[],
    private_pch: "Private/FunapiDedicatedServerPrivatePCH.h",
    platform_rules: false,
};

const SAMPLE_GAME: ModuleRules = ModuleRules {
    name: "funapi_plugin_ue4",
    targets: &[TargetKind::Game, TargetKind::Editor],
    defines: &[],
    public_include_dirs: &[],
    private_include_dirs: &[],
    editor_include_dir: "funapi_plugin_ue4/Editor",
    public_dependencies: &["Core", "CoreUObject", "Engine", "InputCore", "Json", "UMG"],
    private_dependencies: &["Slate", "SlateCore", "Funapi"],
    dynamically_loaded: &[],
    private_pch: "funapi_plugin_ue4.h",
    platform_rules: false,
};

impl ModuleId {
    pub const ALL: [ModuleId; 3] = [ModuleId::Sdk, ModuleId::DedicatedServer, ModuleId::SampleGame];

    pub fn rules(&self) -> &'static ModuleRules {
        match self {
            ModuleId::Sdk => &SDK,
            ModuleId::DedicatedServer => &DEDICATED_SERVER,
            ModuleId::SampleGame => &SAMPLE_GAME,
        }
    }

    pub fn name(&self) -> &'static str {
        self.rules().name
    }

    pub fn supports(&self, kind: TargetKind) -> bool {
        self.rules().targets.contains(&kind)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ModuleId {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ModuleId::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .or(match wanted.to_ascii_lowercase().as_str() {
                "sdk" => Some(ModuleId::Sdk),
                "server" | "dedicated-server" => Some(ModuleId::DedicatedServer),
                "game" | "sample" => Some(ModuleId::SampleGame),
                _ => None,
            })
            .ok_or_else(|| ResolveError::InvalidModule {
                module: s.to_string(),
            })
    }
}
