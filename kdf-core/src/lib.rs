// kdf-core/src/lib.rs

//! BIP-39 mnemonics, SLIP-0010 hierarchical key derivation and Bech32
//! addresses.
//!
//! ```no_run
//! use kdf_core::api::{derive, DerivationRequest};
//! use kdf_core::config::KdfConfig;
//! use kdf_core::crypto::WordListRegistry;
//!
//! # fn main() -> kdf_core::KdfResult<()> {
//! let registry = WordListRegistry::with_builtin()?;
//! let request = DerivationRequest::from_config(&KdfConfig::default())?
//!     .with_mnemonic("abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about");
//! let report = derive(&request, &registry)?;
//! println!("{}", report.address.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod chains;
pub mod config;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod telemetry;

pub use error::{ErrorKind, KdfError, KdfResult};
