// kdf-core/src/chains/mod.rs
pub mod iota;

use crate::crypto::key_deriver::CurveType;
use crate::crypto::paths::coin_type;
use serde::{Deserialize, Serialize};

/// Per-network derivation and address settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub name: String,
    /// Bech32 human-readable part
    pub prefix: String,
    /// SLIP-44 coin type
    pub coin_type: u32,
    pub curve: CurveType,
    /// Default account path, e.g. 44'/4218'/0'/0'
    pub path: String,
}

// Presets for the known networks
impl NetworkConfig {
    pub fn iota_mainnet() -> Self {
        Self {
            name: "IOTA Mainnet".to_string(),
            prefix: iota::prefix::IOTA.to_string(),
            coin_type: coin_type::IOTA,
            curve: CurveType::Ed25519,
            path: format!("44'/{}'/0'/0'", coin_type::IOTA),
        }
    }

    pub fn iota_testnet() -> Self {
        Self {
            name: "IOTA Testnet".to_string(),
            prefix: iota::prefix::IOTA_TESTNET.to_string(),
            ..Self::iota_mainnet()
        }
    }

    pub fn shimmer() -> Self {
        Self {
            name: "Shimmer Mainnet".to_string(),
            prefix: iota::prefix::SHIMMER.to_string(),
            coin_type: coin_type::SHIMMER,
            curve: CurveType::Ed25519,
            path: format!("44'/{}'/0'/0'", coin_type::SHIMMER),
        }
    }

    pub fn shimmer_testnet() -> Self {
        Self {
            name: "Shimmer Testnet".to_string(),
            prefix: iota::prefix::SHIMMER_TESTNET.to_string(),
            ..Self::shimmer()
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::iota_mainnet(),
            Self::iota_testnet(),
            Self::shimmer(),
            Self::shimmer_testnet(),
        ]
    }

    /// Preset whose prefix matches `prefix` (case-insensitive).
    pub fn by_prefix(prefix: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|n| n.prefix.eq_ignore_ascii_case(prefix.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::paths::{DerivationPath, DerivationPaths};

    #[test]
    fn test_presets() {
        let iota = NetworkConfig::iota_mainnet();
        assert_eq!(iota.path, DerivationPaths::DEFAULT);
        assert_eq!(NetworkConfig::shimmer_testnet().coin_type, 4219);
        assert_eq!(NetworkConfig::iota_testnet().prefix, "atoi");
    }

    #[test]
    fn test_preset_paths_parse() {
        for network in NetworkConfig::all() {
            let path: DerivationPath = network.path.parse().unwrap();
            assert!(path.is_fully_hardened(), "{}", network.name);
        }
    }

    #[test]
    fn test_by_prefix() {
        assert_eq!(NetworkConfig::by_prefix("SMR").unwrap().name, "Shimmer Mainnet");
        assert!(NetworkConfig::by_prefix("bc").is_none());
    }
}
