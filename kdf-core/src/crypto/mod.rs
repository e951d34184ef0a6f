// kdf-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! - **Word Lists**: 2048-word BIP-39 vocabularies and a language registry via [`WordListRegistry`].
//! - **Mnemonics**: BIP-39 entropy <-> sentence codec and PBKDF2 seed stretching via [`mnemonic`].
//! - **Derivation Paths**: parser and SLIP-44 path builders via [`DerivationPath`] / [`DerivationPaths`].
//! - **Key Derivation**: SLIP-0010 for Ed25519 and secp256k1 behind the [`Curve`] trait, with
//!   runtime selection via [`KeyDeriver`].

pub mod key_deriver;
pub mod mnemonic;
pub mod paths;
pub mod wordlist;

// Re-exports for cleaner API access
pub use key_deriver::{
    derive_key_from_path, derive_path_from, Curve, CurveType, DerivedKey, Ed25519Deriver,
    ExtendedKey, KeyDeriver, Secp256k1Deriver,
};
pub use mnemonic::{Mnemonic, Seed, WordCount};
pub use paths::{DerivationPath, DerivationPaths, Segment};
pub use wordlist::{WordList, WordListRegistry};
