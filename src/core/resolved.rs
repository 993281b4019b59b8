//! The resolved build configuration handed to the orchestrator.
//!
//! Field order is the wire contract: the JSON form serializes fields in
//! declaration order, and list fields keep rule order.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::platform::PlatformId;
use crate::core::surface::{DefineSet, LibRef};
use crate::core::target::TargetKind;
use crate::core::version::ToolchainVersion;
use crate::rules::errors::ResolveError;
use crate::rules::features::FeatureSet;
use crate::util::hash::{sha256_str, Fingerprint};

/// Resolved definitions, paths and link inputs for one module build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    /// Module the configuration belongs to
    pub module: String,
    pub platform: PlatformId,
    pub target: TargetKind,
    pub toolchain: ToolchainVersion,

    /// Feature switches the definitions were derived from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureSet>,

    /// Preprocessor definitions (-D)
    pub definitions: DefineSet,

    /// Include directories exported to dependents (-I)
    pub public_include_dirs: Vec<PathBuf>,

    /// Include directories used only by the module itself (-I)
    pub private_include_dirs: Vec<PathBuf>,

    /// Library search directories (-L)
    pub library_dirs: Vec<PathBuf>,

    /// Link inputs
    pub libraries: Vec<LibRef>,

    pub public_dependencies: Vec<String>,
    pub private_dependencies: Vec<String>,
    pub dynamically_loaded: Vec<String>,

    /// Private precompiled header, on toolchains that support it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_pch: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Public and private module dependencies together.
    pub fn module_dependencies(&self) -> BTreeSet<&str> {
        self.public_dependencies
            .iter()
            .chain(&self.private_dependencies)
            .map(String::as_str)
            .collect()
    }

    /// Public then private include directories.
    pub fn include_dirs(&self) -> impl Iterator<Item = &Path> {
        self.public_include_dirs
            .iter()
            .chain(&self.private_include_dirs)
            .map(PathBuf::as_path)
    }

    /// Engine third-party packages the orchestrator must resolve itself.
    pub fn engine_packages(&self) -> Vec<&str> {
        self.libraries
            .iter()
            .filter_map(|lib| match lib {
                LibRef::Engine { name } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Check whether a path library with this file name is linked.
    pub fn links_file(&self, file_name: &str) -> bool {
        self.libraries.iter().any(|lib| match lib {
            LibRef::Path { path } => path.file_name().is_some_and(|n| n == file_name),
            _ => false,
        })
    }

    /// Convert to compiler flags.
    pub fn compile_flags(&self) -> Vec<String> {
        let mut flags = Vec::new();

        for dir in self.include_dirs() {
            flags.push(format!("-I{}", dir.display()));
        }

        for define in &self.definitions {
            flags.push(define.to_flag());
        }

        flags
    }

    /// Convert to linker flags. Engine packages produce no flags.
    pub fn link_flags(&self) -> Vec<String> {
        let mut flags = Vec::new();

        for dir in &self.library_dirs {
            flags.push(format!("-L{}", dir.display()));
        }

        for lib in &self.libraries {
            flags.extend(lib.to_flags());
        }

        flags
    }

    /// Check the internal consistency of the configuration.
    pub fn validate(&self) -> Result<(), ResolveError> {
        let violation = |message: String| ResolveError::InvariantViolation {
            module: self.module.clone(),
            platform: self.platform,
            message,
        };

        for lib in &self.libraries {
            match lib {
                LibRef::Path { path } => {
                    let dir = lib.dir().unwrap_or(Path::new(""));
                    if !self.library_dirs.iter().any(|d| d == dir) {
                        return Err(violation(format!(
                            "library `{}` is outside every library directory",
                            path.display()
                        )));
                    }
                }
                LibRef::Named { name } if self.library_dirs.is_empty() => {
                    return Err(violation(format!(
                        "named library `{}` has no library directory to be found in",
                        name
                    )));
                }
                _ => {}
            }
        }

        let mut seen = BTreeSet::new();
        for define in &self.definitions {
            if !seen.insert(define.name()) {
                return Err(violation(format!("`{}` is defined twice", define.name())));
            }
        }

        if let Some(features) = &self.features {
            for (name, enabled) in features.switches() {
                if !enabled && self.definitions.is_enabled(name) {
                    return Err(violation(format!(
                        "`{}` is enabled but the feature is unavailable",
                        name
                    )));
                }
            }
        }

        Ok(())
    }

    /// Canonical JSON form.
    ///
    /// Fails when a path is not valid UTF-8, since the orchestrator could
    /// not read it back.
    pub fn to_json(&self) -> Result<String, ResolveError> {
        serde_json::to_string_pretty(self).map_err(|e| ResolveError::Unrepresentable {
            module: self.module.clone(),
            platform: self.platform,
            message: e.to_string(),
        })
    }

    /// Short, stable hash of the configuration.
    pub fn fingerprint(&self) -> Result<String, ResolveError> {
        let json = sha256_str(&self.to_json()?);
        let mut fp = Fingerprint::new();
        fp.update_strs([
            self.module.as_str(),
            self.platform.as_str(),
            self.target.as_str(),
            json.as_str(),
        ]);
        Ok(fp.finish_short())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::Define;

    fn sample() -> ResolvedConfig {
        let mut definitions = DefineSet::new();
        definitions.set(Define::switch("FUNAPI_HAVE_ZLIB", true));

        ResolvedConfig {
            module: "Funapi".to_string(),
            platform: PlatformId::Mac,
            target: TargetKind::Game,
            toolchain: ToolchainVersion::new(4, 21),
            features: None,
            definitions,
            public_include_dirs: vec![PathBuf::from("/tp/include")],
            private_include_dirs: vec![PathBuf::from("Funapi/Private")],
            library_dirs: vec![PathBuf::from("/tp/lib/Mac")],
            libraries: vec![
                LibRef::path("/tp/lib/Mac/libz.a"),
                LibRef::engine("OpenSSL"),
            ],
            public_dependencies: vec!["Core".to_string()],
            private_dependencies: vec!["Json".to_string()],
            dynamically_loaded: Vec::new(),
            private_pch: None,
        }
    }

    #[test]
    fn test_flags() {
        let config = sample();
        assert_eq!(
            config.compile_flags(),
            vec!["-I/tp/include", "-IFunapi/Private", "-DFUNAPI_HAVE_ZLIB=1"]
        );
        assert_eq!(config.link_flags(), vec!["-L/tp/lib/Mac", "/tp/lib/Mac/libz.a"]);
        assert_eq!(config.engine_packages(), vec!["OpenSSL"]);
        assert!(config.links_file("libz.a"));
    }

    #[test]
    fn test_validate_rejects_library_outside_search_dirs() {
        let mut config = sample();
        assert!(config.validate().is_ok());

        config.libraries.push(LibRef::path("/elsewhere/libssl.a"));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ResolveError::InvariantViolation { .. }));
    }

    #[test]
    fn test_validate_rejects_named_library_without_dirs() {
        let mut config = sample();
        config.library_dirs.clear();
        config.libraries = vec![LibRef::named("sodium")];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_enabled_unavailable_feature() {
        let mut config = sample();
        let features = FeatureSet::for_platform(PlatformId::Linux);
        config.definitions.set(Define::switch("FUNAPI_HAVE_ZSTD", true));
        config.features = Some(features);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fingerprint_is_stable_and_sensitive() {
        let a = sample();
        let b = sample();
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
        assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());

        let mut c = sample();
        c.public_dependencies.push("Engine".to_string());
        assert_ne!(a.fingerprint().unwrap(), c.fingerprint().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_fails_serialization() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let mut config = sample();
        config
            .public_include_dirs
            .push(PathBuf::from(OsStr::from_bytes(b"/tp\xff/include")));

        assert!(matches!(
            config.to_json(),
            Err(ResolveError::Unrepresentable { .. })
        ));
        assert!(config.fingerprint().is_err());
    }

    #[test]
    fn test_module_dependencies_union() {
        let config = sample();
        let deps = config.module_dependencies();
        assert!(deps.contains("Core"));
        assert!(deps.contains("Json"));
    }
}
