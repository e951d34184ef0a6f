// kdf-core/src/crypto/key_deriver/mod.rs
//
// Key Derivation Engine - SLIP-0010 over two curve families
//
// ┌──────────────────────────────────────────────────┐
// │  Seed (16..=64 bytes, usually a BIP-39 seed)     │
// │                    │                             │
// │     ┌──────────────┴──────────────┐              │
// │     ▼                             ▼              │
// │  ed25519 (seed-only)       secp256k1 (point)     │
// │  "ed25519 seed"            "Bitcoin seed"        │
// │  hardened steps only       hardened + normal     │
// │  └─ IOTA / Shimmer         └─ BIP-44 chains      │
// └──────────────────────────────────────────────────┘
//
// master = curve.master_key(seed); key = fold(curve.child_key, path)

pub mod ed25519;
pub mod secp256k1;

pub use ed25519::{Ed25519Deriver, Ed25519Seed};
pub use secp256k1::{Secp256k1Deriver, Secp256k1Key};

use crate::crypto::paths::{DerivationPath, Segment};
use crate::error::{CryptoError, KdfError, KdfResult};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha512;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};
use zeroize::Zeroizing;

type HmacSha512 = Hmac<Sha512>;

/// Shortest accepted master seed (128 bits).
pub const MIN_SEED_LEN: usize = 16;

/// Longest accepted master seed (512 bits).
pub const MAX_SEED_LEN: usize = 64;

// =============================================================================
// CURVE ABSTRACTION
// =============================================================================

/// A curve family able to produce SLIP-0010 master and child keys.
pub trait Curve {
    /// Secret key material carried through the derivation.
    type PrivateKey: Clone;

    /// Lower-case curve name, e.g. `"ed25519"`.
    fn name(&self) -> &'static str;

    /// HMAC key used to derive the master key from a seed.
    fn hmac_key(&self) -> &'static [u8];

    fn master_key(&self, seed: &[u8]) -> KdfResult<ExtendedKey<Self::PrivateKey>>;

    fn child_key(
        &self,
        parent: &ExtendedKey<Self::PrivateKey>,
        segment: Segment,
    ) -> KdfResult<ExtendedKey<Self::PrivateKey>>;
}

/// A private key paired with its chain code.
#[derive(Clone)]
pub struct ExtendedKey<K> {
    key: K,
    chain_code: Zeroizing<[u8; 32]>,
}

impl<K> ExtendedKey<K> {
    pub(crate) fn new(key: K, chain_code: Zeroizing<[u8; 32]>) -> Self {
        Self { key, chain_code }
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }
}

impl<K> fmt::Debug for ExtendedKey<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("key", &"[REDACTED]")
            .field("chain_code", &"[REDACTED]")
            .finish()
    }
}

/// I = HMAC-SHA512(key, data[0] || data[1] || ...)
pub(crate) fn hmac_sha512(key: &[u8], data: &[&[u8]]) -> KdfResult<Zeroizing<[u8; 64]>> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| CryptoError::DerivationFailed(format!("HMAC init failed: {}", e)))?;
    for part in data {
        mac.update(part);
    }

    let mut out = Zeroizing::new([0u8; 64]);
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

/// Split I into (IL, IR).
pub(crate) fn split_halves(i: &[u8; 64]) -> (Zeroizing<[u8; 32]>, Zeroizing<[u8; 32]>) {
    let mut left = Zeroizing::new([0u8; 32]);
    let mut right = Zeroizing::new([0u8; 32]);
    left.copy_from_slice(&i[..32]);
    right.copy_from_slice(&i[32..]);
    (left, right)
}

#[inline]
fn validate_seed(seed: &[u8]) -> KdfResult<()> {
    if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&seed.len()) {
        return Err(CryptoError::InvalidSeedLength(seed.len()).into());
    }
    Ok(())
}

// =============================================================================
// DERIVATION ENGINE
// =============================================================================

/// Derive the key at `path` below the master key of `seed`.
///
/// # Arguments
/// * `seed` - 16..=64 byte seed
/// * `curve` - curve family, e.g. `&Ed25519Deriver`
/// * `path` - steps applied in order; the empty path returns the master key
pub fn derive_key_from_path<C: Curve>(
    seed: &[u8],
    curve: &C,
    path: &DerivationPath,
) -> KdfResult<ExtendedKey<C::PrivateKey>> {
    validate_seed(seed)?;
    debug!(curve = curve.name(), depth = path.len(), "deriving key");

    let master = curve.master_key(seed)?;
    derive_path_from(curve, master, path)
}

/// Continue a derivation from an intermediate key.
///
/// `derive_path_from(c, derive_key_from_path(s, c, a)?, b)` equals
/// `derive_key_from_path(s, c, &a.join(b))`.
pub fn derive_path_from<C: Curve>(
    curve: &C,
    key: ExtendedKey<C::PrivateKey>,
    path: &DerivationPath,
) -> KdfResult<ExtendedKey<C::PrivateKey>> {
    path.iter().try_fold(key, |parent, &segment| {
        trace!(curve = curve.name(), step = %segment, "child key");
        curve.child_key(&parent, segment)
    })
}

// =============================================================================
// UNIFIED DERIVER
// =============================================================================

/// Curve selected at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveType {
    /// Ed25519, hardened-only (IOTA, Shimmer, ...)
    #[default]
    Ed25519,
    /// secp256k1, hardened and normal steps (Bitcoin, EVM, ...)
    Secp256k1,
}

impl CurveType {
    pub fn name(self) -> &'static str {
        match self {
            CurveType::Ed25519 => Ed25519Deriver.name(),
            CurveType::Secp256k1 => Secp256k1Deriver.name(),
        }
    }

    /// Master-key HMAC key, e.g. `b"ed25519 seed"`.
    pub fn hmac_key(self) -> &'static [u8] {
        match self {
            CurveType::Ed25519 => Ed25519Deriver.hmac_key(),
            CurveType::Secp256k1 => Secp256k1Deriver.hmac_key(),
        }
    }

    /// Capitalized name for reports.
    pub fn title(self) -> &'static str {
        match self {
            CurveType::Ed25519 => "Ed25519",
            CurveType::Secp256k1 => "Secp256k1",
        }
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CurveType {
    type Err = KdfError;

    fn from_str(s: &str) -> KdfResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "ed25519" => Ok(CurveType::Ed25519),
            "secp256k1" => Ok(CurveType::Secp256k1),
            other => Err(KdfError::Config(format!("unknown curve '{}'", other))),
        }
    }
}

/// Result of a runtime-dispatched derivation.
#[derive(Debug, Clone)]
pub enum DerivedKey {
    Ed25519(ExtendedKey<Ed25519Seed>),
    Secp256k1(ExtendedKey<Secp256k1Key>),
}

impl DerivedKey {
    pub fn curve(&self) -> CurveType {
        match self {
            DerivedKey::Ed25519(_) => CurveType::Ed25519,
            DerivedKey::Secp256k1(_) => CurveType::Secp256k1,
        }
    }

    /// 32-byte private key, auto-zeroize on drop
    pub fn private_key(&self) -> Zeroizing<[u8; 32]> {
        match self {
            DerivedKey::Ed25519(k) => Zeroizing::new(*k.key().as_bytes()),
            DerivedKey::Secp256k1(k) => k.key().to_bytes(),
        }
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        match self {
            DerivedKey::Ed25519(k) => k.chain_code(),
            DerivedKey::Secp256k1(k) => k.chain_code(),
        }
    }

    /// 32-byte Ed25519 key or 33-byte compressed secp256k1 point.
    pub fn public_key(&self) -> Vec<u8> {
        match self {
            DerivedKey::Ed25519(k) => k.key().public_key().to_vec(),
            DerivedKey::Secp256k1(k) => k.key().public_key().to_vec(),
        }
    }
}

/// Entry point for callers that pick the curve at runtime.
pub struct KeyDeriver;

impl KeyDeriver {
    /// Derive the key at `path` with the given curve.
    ///
    /// # Arguments
    /// * `seed` - 16..=64 byte seed
    /// * `path` - e.g. `44'/4218'/0'/0'`
    /// * `curve` - curve family
    pub fn derive(seed: &[u8], path: &DerivationPath, curve: CurveType) -> KdfResult<DerivedKey> {
        match curve {
            CurveType::Ed25519 => {
                derive_key_from_path(seed, &Ed25519Deriver, path).map(DerivedKey::Ed25519)
            }
            CurveType::Secp256k1 => {
                derive_key_from_path(seed, &Secp256k1Deriver, path).map(DerivedKey::Secp256k1)
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
