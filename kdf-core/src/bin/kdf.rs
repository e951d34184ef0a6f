//! kdf - derive a key and address from a BIP-39 mnemonic.
//!
//! ```text
//! kdf --mnemonic "abandon ... about" --path "44'/4218'/0'/0'" --prefix iota
//! kdf --mnemonic ""            # generate a fresh 24-word mnemonic
//! ```

use clap::Parser;
use kdf_core::api::{self, DerivationRequest};
use kdf_core::config::KdfConfig;
use kdf_core::crypto::{CurveType, WordListRegistry};
use kdf_core::telemetry;
use kdf_core::KdfResult;
use std::path::PathBuf;
use zeroize::Zeroizing;

const DEFAULT_MNEMONIC: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

/// Key derivation demo.
#[derive(Parser)]
#[command(name = "kdf")]
#[command(about = "BIP-39 mnemonic -> SLIP-10 key -> Bech32 address")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Mnemonic sentence (12-24 words); empty generates random entropy
    #[arg(long, env = "KDF_MNEMONIC", hide_env_values = true, default_value = DEFAULT_MNEMONIC)]
    mnemonic: String,

    /// Word-list language of the mnemonic
    #[arg(long)]
    language: Option<String>,

    /// Secret passphrase mixed into the master seed; can be empty
    #[arg(long, env = "KDF_PASSPHRASE", hide_env_values = true, default_value = "")]
    passphrase: String,

    /// BIP-32 style path of the key to derive
    #[arg(long)]
    path: Option<String>,

    /// Network prefix of the address
    #[arg(long)]
    prefix: Option<String>,

    /// Curve: ed25519 or secp256k1
    #[arg(long)]
    curve: Option<CurveType>,

    /// TOML file with defaults for language, path, prefix and curve
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init_logging(&cli.log_level) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {:?}: {}", e.kind(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> KdfResult<()> {
    let mnemonic = Zeroizing::new(cli.mnemonic);
    let passphrase = Zeroizing::new(cli.passphrase);

    let mut config = match &cli.config {
        Some(path) => KdfConfig::load(path)?,
        None => KdfConfig::default(),
    };
    if let Some(language) = cli.language {
        config.language = language;
    }
    if let Some(path) = cli.path {
        config.path = path;
    }
    if let Some(prefix) = cli.prefix {
        config.prefix = prefix;
    }
    if let Some(curve) = cli.curve {
        config.curve = curve;
    }
    config.validate()?;

    let registry = WordListRegistry::with_builtin()?;
    let request = DerivationRequest::from_config(&config)?
        .with_mnemonic(&mnemonic)
        .with_passphrase(&passphrase);

    let report = api::derive(&request, &registry)?;
    print!("{}", report);
    Ok(())
}
