// kdf-core/src/crypto/key_deriver/ed25519.rs
//
// Ed25519 Key Derivation - SLIP-0010
//
// Used by: IOTA, Shimmer
// Reference: https://github.com/satoshilabs/slips/blob/master/slip-0010.md
//
// SLIP-0010 ed25519 supports hardened child derivation ONLY.
// e.g. 44'/4218'/0'/0' (OK)    44'/4218'/0'/0 (UnsupportedDerivation)

use super::{hmac_sha512, split_halves, Curve, ExtendedKey};
use crate::crypto::paths::Segment;
use crate::error::{CryptoError, KdfResult};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// 32-byte Ed25519 private key (the RFC 8032 "seed", not the expanded key).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Ed25519Seed([u8; 32]);

impl Ed25519Seed {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Compressed Edwards point A = [s]B, 32 bytes.
    pub fn public_key(&self) -> [u8; 32] {
        ed25519_dalek::SigningKey::from_bytes(&self.0)
            .verifying_key()
            .to_bytes()
    }
}

impl fmt::Debug for Ed25519Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Ed25519Seed([REDACTED])")
    }
}

/// Ed25519 Key Deriver - SLIP-0010
///
/// # Differences from secp256k1
/// - Master HMAC key: "ed25519 seed" (instead of "Bitcoin seed")
/// - Hardened derivation only
/// - No key range check; any 32 bytes is a valid ed25519 private key
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Deriver;

impl Ed25519Deriver {
    const MASTER_SECRET: &'static [u8] = b"ed25519 seed";
}

impl Curve for Ed25519Deriver {
    type PrivateKey = Ed25519Seed;

    fn name(&self) -> &'static str {
        "ed25519"
    }

    fn hmac_key(&self) -> &'static [u8] {
        Self::MASTER_SECRET
    }

    /// I = HMAC-SHA512(Key = "ed25519 seed", Data = seed)
    /// IL = private key, IR = chain code
    fn master_key(&self, seed: &[u8]) -> KdfResult<ExtendedKey<Ed25519Seed>> {
        let i = hmac_sha512(self.hmac_key(), &[seed])?;
        let (il, ir) = split_halves(&i);
        Ok(ExtendedKey::new(Ed25519Seed(*il), ir))
    }

    /// I = HMAC-SHA512(Key = chain_code, Data = 0x00 || key || ser32(i))
    fn child_key(
        &self,
        parent: &ExtendedKey<Ed25519Seed>,
        segment: Segment,
    ) -> KdfResult<ExtendedKey<Ed25519Seed>> {
        if !segment.is_hardened() {
            return Err(CryptoError::UnsupportedDerivation {
                curve: self.name(),
                index: segment.index(),
            }
            .into());
        }

        let index = segment.to_u32().to_be_bytes();
        let data: [&[u8]; 3] = [&[0x00], parent.key().as_bytes(), &index];
        let i = hmac_sha512(parent.chain_code(), &data)?;
        let (il, ir) = split_halves(&i);
        Ok(ExtendedKey::new(Ed25519Seed(*il), ir))
    }
}

// =============================================================================
// TESTS
// =============================================================================
