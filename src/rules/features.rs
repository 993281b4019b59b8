//! Per-platform feature switches of the networking SDK.
//!
//! Each switch becomes a `FUNAPI_HAVE_<NAME>=0|1` definition. Switch values
//! depend on the platform only.

use serde::{Deserialize, Serialize};

use crate::core::platform::PlatformId;
use crate::core::surface::Define;

pub const HAVE_ZLIB: &str = "FUNAPI_HAVE_ZLIB";
pub const HAVE_DELAYED_ACK: &str = "FUNAPI_HAVE_DELAYED_ACK";
pub const HAVE_TCP_TLS: &str = "FUNAPI_HAVE_TCP_TLS";
pub const HAVE_WEBSOCKET: &str = "FUNAPI_HAVE_WEBSOCKET";
pub const HAVE_RPC: &str = "FUNAPI_HAVE_RPC";
pub const HAVE_ZSTD: &str = "FUNAPI_HAVE_ZSTD";
pub const HAVE_SODIUM: &str = "FUNAPI_HAVE_SODIUM";
pub const HAVE_AES128: &str = "FUNAPI_HAVE_AES128";

/// Capabilities available to the SDK on one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub zlib: bool,
    pub delayed_ack: bool,
    pub tcp_tls: bool,
    pub websocket: bool,
    pub rpc: bool,
    /// zstd compression
    pub zstd: bool,
    /// libsodium secure random and ciphers
    pub sodium: bool,
    /// hardware-accelerated AES-128
    pub aes128: bool,
}

impl FeatureSet {
    /// Features shared by every platform, before platform rules.
    pub const BASE: FeatureSet = FeatureSet {
        zlib: true,
        delayed_ack: true,
        tcp_tls: true,
        websocket: true,
        rpc: true,
        zstd: true,
        sodium: true,
        aes128: true,
    };

    pub fn for_platform(platform: PlatformId) -> Self {
        let mut features = FeatureSet::BASE;

        features.rpc = platform != PlatformId::PS4;

        if platform == PlatformId::Linux {
            features.zstd = false;
            features.sodium = false;
            features.aes128 = false;
        } else {
            features.aes128 = platform != PlatformId::Android;
        }

        features
    }

    /// Definition name and value of every switch, in emission order.
    pub fn switches(&self) -> [(&'static str, bool); 8] {
        [
            (HAVE_ZLIB, self.zlib),
            (HAVE_DELAYED_ACK, self.delayed_ack),
            (HAVE_TCP_TLS, self.tcp_tls),
            (HAVE_WEBSOCKET, self.websocket),
            (HAVE_RPC, self.rpc),
            (HAVE_ZSTD, self.zstd),
            (HAVE_SODIUM, self.sodium),
            (HAVE_AES128, self.aes128),
        ]
    }

    pub fn definitions(&self) -> impl Iterator<Item = Define> {
        self.switches()
            .into_iter()
            .map(|(name, enabled)| Define::switch(name, enabled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linux_lacks_compression_and_crypto() {
        let f = FeatureSet::for_platform(PlatformId::Linux);
        assert!(!f.zstd && !f.sodium && !f.aes128);
        assert!(f.rpc && f.zlib && f.websocket);
    }

    #[test]
    fn test_android_lacks_hardware_aes_only() {
        let f = FeatureSet::for_platform(PlatformId::Android);
        assert!(!f.aes128);
        assert!(f.zstd && f.sodium);
    }

    #[test]
    fn test_rpc_everywhere_but_ps4() {
        for platform in PlatformId::ALL {
            assert_eq!(FeatureSet::for_platform(platform).rpc, platform != PlatformId::PS4);
        }
    }

    #[test]
    fn test_definitions_follow_switches() {
        let defs: Vec<String> = FeatureSet::for_platform(PlatformId::PS4)
            .definitions()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(defs.len(), 8);
        assert!(defs.contains(&"FUNAPI_HAVE_RPC=0".to_string()));
        assert!(defs.contains(&"FUNAPI_HAVE_AES128=1".to_string()));
    }
}
