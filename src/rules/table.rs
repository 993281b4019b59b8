//! Per-platform third-party rules, keyed by (platform, toolchain version range).
//!
//! Every rule whose platform and version range match is applied, in table
//! order. Directory segments are relative to `<root>/include` and
//! `<root>/lib`; library files are relative to `<root>/lib`. A segment
//! containing `{abi}` is expanded once per device ABI of the platform.

use crate::core::platform::PlatformId;
use crate::core::version::{ToolchainVersion, VersionRange};

/// Toolchain where Win64 switched from VS2013 to VS2015 TLS binaries.
pub const WIN64_VS2015_TLS: ToolchainVersion = ToolchainVersion::new(4, 16);

/// Toolchain where Win64 takes TLS from the engine's OpenSSL package.
pub const WIN64_ENGINE_OPENSSL: ToolchainVersion = ToolchainVersion::new(4, 22);

/// A link input declared by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibEntry {
    /// Library file under `<root>/lib`
    File(&'static str),
    /// Bare library name found through the search directories
    Named(&'static str),
    /// Engine third-party package
    Engine(&'static str),
}

/// Third-party requirements of one platform over one version range.
#[derive(Debug, Clone, Copy)]
pub struct PlatformRule {
    pub platform: PlatformId,
    pub versions: VersionRange,
    pub defines: &'static [(&'static str, &'static str)],
    pub include_dirs: &'static [&'static str],
    pub lib_dirs: &'static [&'static str],
    pub libs: &'static [LibEntry],
    pub public_modules: &'static [&'static str],
}

impl PlatformRule {
    const EMPTY: PlatformRule = PlatformRule {
        platform: PlatformId::Linux,
        versions: VersionRange::ANY,
        defines: &[],
        include_dirs: &[],
        lib_dirs: &[],
        libs: &[],
        public_modules: &[],
    };

    pub fn matches(&self, platform: PlatformId, version: ToolchainVersion) -> bool {
        self.platform == platform && self.versions.contains(version)
    }
}

use LibEntry::{Engine, File, Named};

const CURL_STATICLIB: (&str, &str) = ("CURL_STATICLIB", "1");
const NO_RVALUE_REFS: (&str, &str) = ("RAPIDJSON_HAS_CXX11_RVALUE_REFS", "0");

pub static PLATFORM_RULES: &[PlatformRule] = &[
    PlatformRule {
        platform: PlatformId::Mac,
        include_dirs: &["Mac"],
        lib_dirs: &["Mac"],
        libs: &[
            File("Mac/libcurl.a"),
            File("Mac/libcrypto.a"),
            File("Mac/libssl.a"),
            File("Mac/libz.a"),
            File("Mac/libsodium.a"),
            File("Mac/libwebsockets.a"),
            File("Mac/libzstd.a"),
        ],
        ..PlatformRule::EMPTY
    },
    PlatformRule {
        platform: PlatformId::Win32,
        defines: &[CURL_STATICLIB],
        include_dirs: &["Windows/x86"],
        lib_dirs: &["Windows/x86"],
        libs: &[
            File("Windows/x86/libcurl_a.lib"),
            File("Windows/x86/libeay32.lib"),
            File("Windows/x86/libsodium.lib"),
            File("Windows/x86/websockets_static.lib"),
            File("Windows/x86/libzstd_static.lib"),
        ],
        ..PlatformRule::EMPTY
    },
    PlatformRule {
        platform: PlatformId::Win64,
        defines: &[CURL_STATICLIB],
        include_dirs: &["Windows/x64"],
        lib_dirs: &["Windows/x64"],
        libs: &[
            File("Windows/x64/libcurl_a.lib"),
            File("Windows/x64/libsodium.lib"),
            File("Windows/x64/websockets_static.lib"),
            File("Windows/x64/libzstd_static.lib"),
        ],
        ..PlatformRule::EMPTY
    },
    PlatformRule {
        platform: PlatformId::Win64,
        versions: VersionRange::below(WIN64_VS2015_TLS),
        lib_dirs: &["Windows/x64/VS2013"],
        libs: &[
            File("Windows/x64/VS2013/libeay32.lib"),
            File("Windows/x64/VS2013/ssleay32.lib"),
        ],
        ..PlatformRule::EMPTY
    },
    PlatformRule {
        platform: PlatformId::Win64,
        versions: VersionRange::between(WIN64_VS2015_TLS, WIN64_ENGINE_OPENSSL),
        lib_dirs: &["Windows/x64/VS2015"],
        libs: &[
            File("Windows/x64/VS2015/libeay32.lib"),
            File("Windows/x64/VS2015/ssleay32.lib"),
        ],
        ..PlatformRule::EMPTY
    },
    PlatformRule {
        platform: PlatformId::Win64,
        versions: VersionRange::starting(WIN64_ENGINE_OPENSSL),
        libs: &[Engine("OpenSSL")],
        ..PlatformRule::EMPTY
    },
    PlatformRule {
        platform: PlatformId::Android,
        defines: &[("FUNAPI_UE4_PLATFORM_ANDROID", "1")],
        include_dirs: &["Android/{abi}"],
        lib_dirs: &["Android/{abi}"],
        libs: &[
            Named("sodium"),
            Named("curl"),
            Named("ssl"),
            Named("crypto"),
            Named("websockets"),
            Named("zstd"),
        ],
        ..PlatformRule::EMPTY
    },
    PlatformRule {
        platform: PlatformId::IOS,
        include_dirs: &["iOS"],
        lib_dirs: &["iOS"],
        libs: &[
            File("iOS/libcurl.a"),
            File("iOS/libcrypto.a"),
            File("iOS/libssl.a"),
            File("iOS/libsodium.a"),
            File("iOS/libwebsockets.a"),
            File("iOS/libzstd.a"),
        ],
        ..PlatformRule::EMPTY
    },
    PlatformRule {
        platform: PlatformId::PS4,
        defines: &[("FUNAPI_UE4_PLATFORM_PS4", "1"), NO_RVALUE_REFS],
        include_dirs: &["PS4"],
        lib_dirs: &["PS4"],
        libs: &[
            File("PS4/libsodium.a"),
            File("PS4/libzstd_static.a"),
            Engine("OpenSSL"),
            Engine("libWebSockets"),
        ],
        public_modules: &["WebSockets"],
        ..PlatformRule::EMPTY
    },
    PlatformRule {
        platform: PlatformId::Linux,
        defines: &[("FUNAPI_UE4_PLATFORM_LINUX", "1"), NO_RVALUE_REFS],
        libs: &[Engine("OpenSSL"), Engine("libWebSockets"), Engine("libcurl")],
        ..PlatformRule::EMPTY
    },
];

/// Rules applying to a platform at a toolchain version, in table order.
pub fn rules_for(
    platform: PlatformId,
    version: ToolchainVersion,
) -> impl Iterator<Item = &'static PlatformRule> {
    PLATFORM_RULES
        .iter()
        .filter(move |rule| rule.matches(platform, version))
}

/// Whether the plugin has any rules for the platform.
pub fn has_rules(platform: PlatformId) -> bool {
    PLATFORM_RULES.iter().any(|rule| rule.platform == platform)
}

/// Expand `{abi}` placeholders into one segment per device ABI.
pub fn expand_segment(segment: &str, platform: PlatformId) -> Vec<String> {
    if segment.contains("{abi}") {
        platform
            .android_abis()
            .iter()
            .map(|abi| segment.replace("{abi}", abi.as_str()))
            .collect()
    } else {
        vec![segment.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_platforms() {
        let supported: Vec<_> = PlatformId::ALL
            .into_iter()
            .filter(|p| has_rules(*p))
            .collect();
        assert_eq!(
            supported,
            vec![
                PlatformId::Win32,
                PlatformId::Win64,
                PlatformId::Mac,
                PlatformId::Linux,
                PlatformId::Android,
                PlatformId::IOS,
                PlatformId::PS4,
            ]
        );
    }

    #[test]
    fn test_win64_tls_variants_do_not_overlap() {
        for minor in 10..=27 {
            let version = ToolchainVersion::new(4, minor);
            let tls_rules = rules_for(PlatformId::Win64, version)
                .filter(|r| r.versions != VersionRange::ANY)
                .count();
            assert_eq!(tls_rules, 1, "toolchain {}", version);
        }
    }

    #[test]
    fn test_library_files_live_in_declared_dirs() {
        for rule in PLATFORM_RULES {
            for lib in rule.libs {
                if let File(file) = lib {
                    let dir = file.rsplit_once('/').map(|(d, _)| d).unwrap_or("");
                    assert!(rule.lib_dirs.contains(&dir), "{} not in {:?}", file, rule.lib_dirs);
                }
            }
        }
    }

    #[test]
    fn test_expand_abi_segment() {
        assert_eq!(
            expand_segment("Android/{abi}", PlatformId::Android),
            vec!["Android/ARMv7", "Android/ARM64"]
        );
        assert_eq!(expand_segment("Mac", PlatformId::Mac), vec!["Mac"]);
    }
}
