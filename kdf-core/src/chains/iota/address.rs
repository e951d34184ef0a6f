// kdf-core/src/chains/iota/address.rs
//
// IOTA / Shimmer Ed25519 Address
//
// Flow:  Public Key (32B) -> BLAKE2b-256 -> payload (32B)
//        bech32(prefix, 0x00 || payload)

use crate::encoding::bech32::{self, Hrp};
use crate::error::{AddressError, KdfResult};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

/// Registered network prefixes (Bech32 HRPs).
pub mod prefix {
    pub const IOTA: &str = "iota";
    pub const IOTA_TESTNET: &str = "atoi";
    pub const SHIMMER: &str = "smr";
    pub const SHIMMER_TESTNET: &str = "rms";

    pub const ALL: [&str; 4] = [IOTA, IOTA_TESTNET, SHIMMER, SHIMMER_TESTNET];
}

/// BLAKE2b-256 hash of an Ed25519 public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ed25519Address([u8; 32]);

impl Ed25519Address {
    /// Address type byte prepended to the hash.
    pub const VERSION: u8 = 0x00;

    pub const LENGTH: usize = 32;

    pub fn from_public_key(public_key: &[u8; 32]) -> Self {
        Self(Blake2b256::digest(public_key).into())
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// `prefix1...` with payload `VERSION || hash`.
    pub fn to_bech32(&self, hrp: &Hrp) -> KdfResult<String> {
        let mut payload = [0u8; 1 + Self::LENGTH];
        payload[0] = Self::VERSION;
        payload[1..].copy_from_slice(&self.0);
        bech32::encode(hrp, &payload)
    }

    /// Parse a Bech32 address, returning its prefix and hash.
    pub fn from_bech32(address: &str) -> KdfResult<(Hrp, Self)> {
        let (hrp, payload) = bech32::decode(address)?;
        match payload.split_first() {
            Some((&Self::VERSION, hash)) if hash.len() == Self::LENGTH => {
                let mut bytes = [0u8; 32];
                bytes.copy_from_slice(hash);
                Ok((hrp, Self(bytes)))
            }
            Some((&version, _)) if version != Self::VERSION => Err(AddressError::InvalidAddress(
                format!("unsupported address type {:#04x}", version),
            )
            .into()),
            _ => Err(AddressError::InvalidAddress(format!(
                "expected {} payload bytes, got {}",
                1 + Self::LENGTH,
                payload.len()
            ))
            .into()),
        }
    }
}

/// Bech32 address of an Ed25519 public key under `prefix`.
///
/// # Arguments
/// * `prefix` - network HRP, e.g. `"iota"` or `"smr"`
/// * `public_key` - 32-byte Ed25519 public key
pub fn encode_address(prefix: &str, public_key: &[u8; 32]) -> KdfResult<String> {
    let hrp = Hrp::parse(prefix)?;
    Ed25519Address::from_public_key(public_key).to_bech32(&hrp)
}

// =============================================================================
// TESTS
// =============================================================================
