// kdf-core/src/crypto/key_deriver/secp256k1.rs
//
// secp256k1 Key Derivation - SLIP-0010 / BIP-32
//
// Used by: Bitcoin and other BIP-44 chains
// Reference: https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki
//
// hardened:  I = HMAC-SHA512(c_par, 0x00 || k_par || ser32(i))
// normal:    I = HMAC-SHA512(c_par, serP(point(k_par)) || ser32(i))
// k_i = (IL + k_par) mod n, c_i = IR

use super::{hmac_sha512, split_halves, Curve, ExtendedKey};
use crate::crypto::paths::Segment;
use crate::error::{CryptoError, KdfResult};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, NonZeroScalar, Scalar, SecretKey};
use std::fmt;
use tracing::trace;
use zeroize::Zeroizing;

/// Compressed SEC1 point length.
pub const PUBLIC_KEY_LEN: usize = 33;

/// Non-zero scalar below the curve order; zeroized on drop by `k256`.
#[derive(Clone)]
pub struct Secp256k1Key(SecretKey);

impl Secp256k1Key {
    /// Fails when `bytes` is zero or not below the curve order.
    pub fn from_bytes(bytes: &[u8; 32]) -> KdfResult<Self> {
        SecretKey::from_slice(bytes).map(Self).map_err(|_| {
            CryptoError::InvalidKeyFormat("secp256k1 scalar out of range".to_string()).into()
        })
    }

    /// Big-endian scalar, auto-zeroize on drop.
    pub fn to_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.0.to_bytes().into())
    }

    /// Compressed SEC1 encoding of point(k).
    pub fn public_key(&self) -> [u8; PUBLIC_KEY_LEN] {
        let point = self.0.public_key().to_encoded_point(true);
        let mut out = [0u8; PUBLIC_KEY_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }
}

impl fmt::Debug for Secp256k1Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secp256k1Key([REDACTED])")
    }
}

/// secp256k1 Key Deriver - hardened and normal steps.
///
/// # Range checks
/// - Master: IL == 0 or IL >= n retries with I as the HMAC data
/// - Child: IL >= n or a zero child key fails with `InvalidChildKey`;
///   the caller moves on to the next index
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Deriver;

impl Secp256k1Deriver {
    const MASTER_SECRET: &'static [u8] = b"Bitcoin seed";
}

impl Curve for Secp256k1Deriver {
    type PrivateKey = Secp256k1Key;

    fn name(&self) -> &'static str {
        "secp256k1"
    }

    fn hmac_key(&self) -> &'static [u8] {
        Self::MASTER_SECRET
    }

    fn master_key(&self, seed: &[u8]) -> KdfResult<ExtendedKey<Secp256k1Key>> {
        let mut data = Zeroizing::new(seed.to_vec());
        loop {
            let i = hmac_sha512(self.hmac_key(), &[data.as_slice()])?;
            let (il, ir) = split_halves(&i);
            match SecretKey::from_slice(&il[..]) {
                Ok(secret) => return Ok(ExtendedKey::new(Secp256k1Key(secret), ir)),
                Err(_) => {
                    trace!("master scalar out of range, rehashing");
                    data = Zeroizing::new(i.to_vec());
                }
            }
        }
    }

    fn child_key(
        &self,
        parent: &ExtendedKey<Secp256k1Key>,
        segment: Segment,
    ) -> KdfResult<ExtendedKey<Secp256k1Key>> {
        let mut data = Zeroizing::new(Vec::with_capacity(37));
        if segment.is_hardened() {
            data.push(0x00);
            data.extend_from_slice(&*parent.key().to_bytes());
        } else {
            data.extend_from_slice(&parent.key().public_key());
        }
        data.extend_from_slice(&segment.to_u32().to_be_bytes());

        let i = hmac_sha512(parent.chain_code(), &[data.as_slice()])?;
        let (il, ir) = split_halves(&i);

        let invalid = || CryptoError::InvalidChildKey(segment.to_u32());
        let tweak = Option::<Scalar>::from(Scalar::from_repr(FieldBytes::from(*il)))
            .ok_or_else(invalid)?;
        let child = Option::<NonZeroScalar>::from(NonZeroScalar::new(
            tweak + *parent.key().0.to_nonzero_scalar(),
        ))
        .ok_or_else(invalid)?;

        Ok(ExtendedKey::new(Secp256k1Key(SecretKey::from(child)), ir))
    }
}

// =============================================================================
// TESTS
// =============================================================================
