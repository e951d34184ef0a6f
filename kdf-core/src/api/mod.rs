// kdf-core/src/api/mod.rs

//! One-call pipeline: mnemonic -> seed -> key -> address.

#[allow(clippy::module_inception)]
mod api;

pub use api::{derive, DerivationReport, DerivationRequest};
