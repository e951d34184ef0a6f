// kdf-core/src/chains/iota/mod.rs

//! IOTA / Shimmer Support
//!
//! Ed25519 keys derived along `44'/4218'/...` (IOTA) or `44'/4219'/...`
//! (Shimmer) are turned into Bech32 addresses via [`Ed25519Address`].
//! Network prefixes live in [`address::prefix`].

pub mod address;

pub use address::{encode_address, prefix, Ed25519Address};
