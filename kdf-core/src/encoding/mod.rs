// kdf-core/src/encoding/mod.rs

//! Text Encodings
//!
//! - **Bech32** (BIP-173): checksummed human-readable encoding used for
//!   addresses, see [`bech32::encode`] and [`bech32::decode`].

pub mod bech32;

pub use self::bech32::Hrp;
