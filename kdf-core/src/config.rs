//! Tool configuration.
//!
//! Defaults for the derivation parameters, optionally loaded from a TOML
//! file. Mnemonics and passphrases are never read from configuration.

use crate::chains::NetworkConfig;
use crate::crypto::key_deriver::CurveType;
use crate::crypto::mnemonic::WordCount;
use crate::crypto::paths::{DerivationPath, DerivationPaths};
use crate::crypto::wordlist::DEFAULT_LANGUAGE;
use crate::encoding::bech32::Hrp;
use crate::error::{KdfError, KdfResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Derivation defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KdfConfig {
    /// Word-list language
    pub language: String,
    /// Derivation path
    pub path: String,
    /// Bech32 address prefix
    pub prefix: String,
    /// Curve used for derivation
    pub curve: CurveType,
    /// Entropy size when a new mnemonic is generated
    pub entropy_bytes: usize,
}

impl Default for KdfConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            path: DerivationPaths::DEFAULT.to_string(),
            prefix: "iota".to_string(),
            curve: CurveType::Ed25519,
            entropy_bytes: 32, // 24 words
        }
    }
}

impl From<&NetworkConfig> for KdfConfig {
    fn from(network: &NetworkConfig) -> Self {
        Self {
            path: network.path.clone(),
            prefix: network.prefix.clone(),
            curve: network.curve,
            ..Self::default()
        }
    }
}

impl KdfConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> KdfResult<Self> {
        let config: KdfConfig =
            toml::from_str(contents).map_err(|e| KdfError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file.
    pub fn load(path: impl AsRef<Path>) -> KdfResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| KdfError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> KdfResult<String> {
        toml::to_string_pretty(self).map_err(|e| KdfError::Config(e.to_string()))
    }

    /// Check path, prefix and entropy size; the language is checked when it
    /// is looked up in a registry.
    pub fn validate(&self) -> KdfResult<()> {
        self.derivation_path()?;
        self.hrp()?;
        self.word_count()?;
        Ok(())
    }

    pub fn derivation_path(&self) -> KdfResult<DerivationPath> {
        self.path.parse()
    }

    pub fn hrp(&self) -> KdfResult<Hrp> {
        Hrp::parse(&self.prefix)
    }

    /// Mnemonic length produced from `entropy_bytes`.
    pub fn word_count(&self) -> KdfResult<WordCount> {
        WordCount::from_entropy_bytes(self.entropy_bytes).ok_or_else(|| {
            KdfError::Config(format!(
                "entropy_bytes must be 16, 20, 24, 28 or 32, got {}",
                self.entropy_bytes
            ))
        })
    }
}
