//! Build rule resolution.
//!
//! Resolution applies, in order:
//!
//! 1. module base definitions and directories
//! 2. platform feature switches (RPC, compression, secure random, AES)
//! 3. Windows family markers
//! 4. per-platform third-party rules from the version-keyed table
//! 5. editor-only dependencies
//! 6. the private precompiled header, on toolchains that have the field
//!
//! Later steps override earlier definitions by name; list entries are
//! appended, duplicates dropped.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::platform::PlatformId;
use crate::core::resolved::ResolvedConfig;
use crate::core::surface::{Define, DefineSet, LibRef};
use crate::core::target::TargetKind;
use crate::core::version::ToolchainVersion;
use crate::rules::errors::ResolveError;
use crate::rules::features::FeatureSet;
use crate::rules::module::{ModuleId, EDITOR_MODULES};
use crate::rules::table::{self, LibEntry};

/// Default third-party root, relative to the plugin's source directory.
pub const DEFAULT_THIRD_PARTY_ROOT: &str = "../../ThirdParty";

const WINDOWS_MARKERS: [&str; 2] = ["FUNAPI_PLATFORM_WINDOWS", "FUNAPI_UE4_PLATFORM_WINDOWS"];

/// Resolves module rules against an injected third-party root.
#[derive(Debug, Clone)]
pub struct Resolver {
    third_party_root: PathBuf,
    module: ModuleId,
}

impl Default for Resolver {
    fn default() -> Self {
        Resolver::new(DEFAULT_THIRD_PARTY_ROOT)
    }
}

impl Resolver {
    /// Create a resolver for the SDK module.
    pub fn new(third_party_root: impl Into<PathBuf>) -> Self {
        Resolver {
            third_party_root: third_party_root.into(),
            module: ModuleId::Sdk,
        }
    }

    /// Select the module to resolve.
    pub fn module(mut self, module: ModuleId) -> Self {
        self.module = module;
        self
    }

    /// Resolve the module's configuration for one build.
    pub fn resolve(
        &self,
        platform: PlatformId,
        target: TargetKind,
        toolchain: ToolchainVersion,
    ) -> Result<ResolvedConfig, ResolveError> {
        if !table::has_rules(platform) {
            return Err(ResolveError::UnsupportedPlatform {
                platform: platform.to_string(),
            });
        }

        let rules = self.module.rules();
        if !self.module.supports(target) {
            return Err(ResolveError::InvalidTarget {
                target: target.to_string(),
                module: Some(rules.name.to_string()),
            });
        }

        debug!(
            "resolving {} for {} {} on toolchain {}",
            rules.name, platform, target, toolchain
        );

        let mut builder = ConfigBuilder::new(rules.name, platform, target, toolchain);

        builder.definitions.extend(
            rules
                .defines
                .iter()
                .map(|(name, value)| Define::key_value(*name, *value)),
        );
        for dir in rules.public_include_dirs {
            builder.public_include(PathBuf::from(dir));
        }
        for dir in rules.private_include_dirs {
            builder.private_include(PathBuf::from(dir));
        }
        builder.add_public_dependencies(rules.public_dependencies);
        builder.add_private_dependencies(rules.private_dependencies);
        for name in rules.dynamically_loaded {
            push_unique(&mut builder.dynamically_loaded, name.to_string());
        }

        if rules.platform_rules {
            self.apply_platform_rules(&mut builder);
        }

        if target.is_editor() {
            debug!("adding editor modules for {}", rules.name);
            builder.add_private_dependencies(EDITOR_MODULES);
            builder.private_include(PathBuf::from(rules.editor_include_dir));
        }

        if toolchain.supports_private_pch() {
            builder.private_pch = Some(PathBuf::from(rules.private_pch));
        }

        let config = builder.finish();
        config.validate()?;
        Ok(config)
    }

    fn apply_platform_rules(&self, builder: &mut ConfigBuilder) {
        let platform = builder.platform;
        let features = FeatureSet::for_platform(platform);
        debug!("{} features: {:?}", platform, features);

        builder.features = Some(features);
        builder.definitions.extend(features.definitions());

        if platform.is_windows() {
            for marker in WINDOWS_MARKERS {
                builder.define(Define::switch(marker, true));
            }
        }

        let include_root = self.third_party_root.join("include");
        let lib_root = self.third_party_root.join("lib");
        builder.public_include(include_root.clone());

        for rule in table::rules_for(platform, builder.toolchain) {
            debug!("applying {} rule for toolchain {}", rule.platform, rule.versions);

            builder.definitions.extend(
                rule.defines
                    .iter()
                    .map(|(name, value)| Define::key_value(*name, *value)),
            );
            for segment in rule.include_dirs {
                for expanded in table::expand_segment(segment, platform) {
                    builder.public_include(join_segment(&include_root, &expanded));
                }
            }
            for segment in rule.lib_dirs {
                for expanded in table::expand_segment(segment, platform) {
                    builder.library_dir(join_segment(&lib_root, &expanded));
                }
            }
            for lib in rule.libs {
                let lib = match lib {
                    LibEntry::File(file) => LibRef::path(join_segment(&lib_root, file)),
                    LibEntry::Named(name) => LibRef::named(*name),
                    LibEntry::Engine(name) => LibRef::engine(*name),
                };
                push_unique(&mut builder.libraries, lib);
            }
            builder.add_public_dependencies(rule.public_modules);
        }
    }
}

/// Resolve the SDK module with the given third-party root.
pub fn resolve(
    platform: PlatformId,
    target: TargetKind,
    toolchain: ToolchainVersion,
    third_party_root: impl Into<PathBuf>,
) -> Result<ResolvedConfig, ResolveError> {
    Resolver::new(third_party_root).resolve(platform, target, toolchain)
}

/// Join a `/`-separated segment onto a base path component by component.
fn join_segment(base: &Path, segment: &str) -> PathBuf {
    segment
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(base.to_path_buf(), |path, part| path.join(part))
}

fn push_unique<T: PartialEq>(list: &mut Vec<T>, item: T) {
    if !list.contains(&item) {
        list.push(item);
    }
}

/// Accumulates rule output before it is frozen into a `ResolvedConfig`.
struct ConfigBuilder {
    module: &'static str,
    platform: PlatformId,
    target: TargetKind,
    toolchain: ToolchainVersion,
    features: Option<FeatureSet>,
    definitions: DefineSet,
    public_include_dirs: Vec<PathBuf>,
    private_include_dirs: Vec<PathBuf>,
    library_dirs: Vec<PathBuf>,
    libraries: Vec<LibRef>,
    public_dependencies: Vec<String>,
    private_dependencies: Vec<String>,
    dynamically_loaded: Vec<String>,
    private_pch: Option<PathBuf>,
}

impl ConfigBuilder {
    fn new(
        module: &'static str,
        platform: PlatformId,
        target: TargetKind,
        toolchain: ToolchainVersion,
    ) -> Self {
        ConfigBuilder {
            module,
            platform,
            target,
            toolchain,
            features: None,
            definitions: DefineSet::new(),
            public_include_dirs: Vec::new(),
            private_include_dirs: Vec::new(),
            library_dirs: Vec::new(),
            libraries: Vec::new(),
            public_dependencies: Vec::new(),
            private_dependencies: Vec::new(),
            dynamically_loaded: Vec::new(),
            private_pch: None,
        }
    }

    fn define(&mut self, define: Define) {
        self.definitions.set(define);
    }

    fn public_include(&mut self, dir: PathBuf) {
        push_unique(&mut self.public_include_dirs, dir);
    }

    fn private_include(&mut self, dir: PathBuf) {
        push_unique(&mut self.private_include_dirs, dir);
    }

    fn library_dir(&mut self, dir: PathBuf) {
        push_unique(&mut self.library_dirs, dir);
    }

    fn add_public_dependencies(&mut self, names: &[&str]) {
        for name in names {
            push_unique(&mut self.public_dependencies, name.to_string());
        }
    }

    fn add_private_dependencies(&mut self, names: &[&str]) {
        for name in names {
            if !self.public_dependencies.iter().any(|d| d == name) {
                push_unique(&mut self.private_dependencies, name.to_string());
            }
        }
    }

    fn finish(self) -> ResolvedConfig {
        ResolvedConfig {
            module: self.module.to_string(),
            platform: self.platform,
            target: self.target,
            toolchain: self.toolchain,
            features: self.features,
            definitions: self.definitions,
            public_include_dirs: self.public_include_dirs,
            private_include_dirs: self.private_include_dirs,
            library_dirs: self.library_dirs,
            libraries: self.libraries,
            public_dependencies: self.public_dependencies,
            private_dependencies: self.private_dependencies,
            dynamically_loaded: self.dynamically_loaded,
            private_pch: self.private_pch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::features::{HAVE_AES128, HAVE_RPC, HAVE_SODIUM, HAVE_ZSTD};

    fn v(major: u64, minor: u64) -> ToolchainVersion {
        ToolchainVersion::new(major, minor)
    }

    fn sdk(platform: PlatformId, target: TargetKind, version: ToolchainVersion) -> ResolvedConfig {
        Resolver::new("/tp").resolve(platform, target, version).unwrap()
    }

    #[test]
    fn test_win64_game_416() {
        let config = sdk(PlatformId::Win64, TargetKind::Game, v(4, 16));
        let defs = &config.definitions;
        assert!(defs.is_enabled("FUNAPI_PLATFORM_WINDOWS"));
        assert!(defs.is_enabled("FUNAPI_UE4_PLATFORM_WINDOWS"));
        assert!(defs.is_enabled(HAVE_RPC));
        assert!(defs.is_enabled(HAVE_AES128));
        assert!(defs.is_enabled(HAVE_SODIUM));
        assert!(defs.is_enabled("CURL_STATICLIB"));

        for lib in ["libeay32.lib", "libcurl_a.lib", "libsodium.lib", "websockets_static.lib"] {
            assert!(config.links_file(lib), "missing {}", lib);
        }
        assert!(config
            .library_dirs
            .contains(&PathBuf::from("/tp/lib/Windows/x64/VS2015")));
        assert!(!config.module_dependencies().contains("UnrealEd"));
        assert!(config.private_pch.is_none());
    }

    #[test]
    fn test_win64_tls_variant_by_toolchain() {
        let old = sdk(PlatformId::Win64, TargetKind::Game, v(4, 15));
        assert!(old
            .library_dirs
            .contains(&PathBuf::from("/tp/lib/Windows/x64/VS2013")));

        let new = sdk(PlatformId::Win64, TargetKind::Game, v(4, 22));
        assert!(!new.links_file("libeay32.lib"));
        assert_eq!(new.engine_packages(), vec!["OpenSSL"]);
    }

    #[test]
    fn test_linux_game_424() {
        let config = sdk(PlatformId::Linux, TargetKind::Game, v(4, 24));
        for name in [HAVE_ZSTD, HAVE_SODIUM, HAVE_AES128] {
            assert!(!config.definitions.is_enabled(name), "{} enabled", name);
        }
        assert_eq!(
            config.engine_packages(),
            vec!["OpenSSL", "libWebSockets", "libcurl"]
        );
        assert!(config.library_dirs.is_empty());
        assert!(config.definitions.is_enabled("FUNAPI_UE4_PLATFORM_LINUX"));
    }

    #[test]
    fn test_android_dirs_per_abi() {
        let config = sdk(PlatformId::Android, TargetKind::Game, v(4, 21));
        assert_eq!(
            config.library_dirs,
            vec![
                PathBuf::from("/tp/lib/Android/ARMv7"),
                PathBuf::from("/tp/lib/Android/ARM64"),
            ]
        );
        assert!(config.libraries.contains(&LibRef::named("sodium")));
        assert!(!config.definitions.is_enabled(HAVE_AES128));
        assert!(config.definitions.is_enabled(HAVE_ZSTD));
    }

    #[test]
    fn test_ps4_has_no_rpc_and_uses_engine_websockets() {
        let config = sdk(PlatformId::PS4, TargetKind::Game, v(4, 21));
        assert_eq!(config.definitions.value(HAVE_RPC), Some("0"));
        assert!(config.public_dependencies.contains(&"WebSockets".to_string()));
        assert_eq!(config.engine_packages(), vec!["OpenSSL", "libWebSockets"]);
    }

    #[test]
    fn test_editor_adds_modules_and_include() {
        let game = sdk(PlatformId::Mac, TargetKind::Game, v(4, 21));
        let editor = sdk(PlatformId::Mac, TargetKind::Editor, v(4, 21));

        let game_deps = game.module_dependencies();
        let editor_deps = editor.module_dependencies();
        assert!(editor_deps.is_superset(&game_deps));
        assert!(editor_deps.len() > game_deps.len());
        assert!(editor
            .private_include_dirs
            .contains(&PathBuf::from("Funapi/Editor")));
    }

    #[test]
    fn test_pch_gated_by_toolchain() {
        assert!(sdk(PlatformId::Mac, TargetKind::Game, v(4, 20)).private_pch.is_none());
        assert_eq!(
            sdk(PlatformId::Mac, TargetKind::Game, v(4, 21)).private_pch,
            Some(PathBuf::from("Funapi/Private/FunapiPrivatePCH.h"))
        );
    }

    #[test]
    fn test_unsupported_platform() {
        let err = Resolver::default()
            .resolve(PlatformId::HTML5, TargetKind::Game, v(4, 16))
            .unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedPlatform { .. }));
    }

    #[test]
    fn test_server_target_only_for_dedicated_server() {
        let err = Resolver::new("/tp")
            .resolve(PlatformId::Linux, TargetKind::Server, v(4, 21))
            .unwrap_err();
        assert!(matches!(err, ResolveError::InvalidTarget { module: Some(_), .. }));

        let config = Resolver::new("/tp")
            .module(ModuleId::DedicatedServer)
            .resolve(PlatformId::Linux, TargetKind::Server, v(4, 21))
            .unwrap();
        assert!(config.definitions.is_enabled("WITH_FUNAPIDEDICATEDSERVER"));
        assert!(config.features.is_none());
        assert!(config.libraries.is_empty());
        assert_eq!(
            config.private_pch,
            Some(PathBuf::from("Private/FunapiDedicatedServerPrivatePCH.h"))
        );
    }

    #[test]
    fn test_sample_game_private_dependencies() {
        let config = Resolver::default()
            .module(ModuleId::SampleGame)
            .resolve(PlatformId::Win64, TargetKind::Editor, v(4, 19))
            .unwrap();
        assert!(config.private_dependencies.contains(&"Funapi".to_string()));
        assert!(config.private_dependencies.contains(&"UnrealEd".to_string()));
        assert!(config.definitions.is_empty());
    }

    #[test]
    fn test_join_segment() {
        assert_eq!(
            join_segment(Path::new("/tp/lib"), "Windows/x64/VS2015"),
            PathBuf::from("/tp/lib/Windows/x64/VS2015")
        );
    }
}
