use crate::chains::iota::encode_address;
use crate::config::KdfConfig;
use crate::crypto::key_deriver::{CurveType, DerivedKey, KeyDeriver};
use crate::crypto::mnemonic::{
    entropy_to_mnemonic, generate_entropy, mnemonic_to_entropy, mnemonic_to_seed, Mnemonic, Seed,
    WordCount,
};
use crate::crypto::paths::DerivationPath;
use crate::crypto::wordlist::WordListRegistry;
use crate::encoding::bech32::Hrp;
use crate::error::{KdfResult, MnemonicError};
use std::fmt;
use tracing::debug;
use zeroize::Zeroizing;

// --- Request ---

/// Inputs of a full derivation run.
#[derive(Clone)]
pub struct DerivationRequest {
    /// Sentence to decode; `None` or blank generates a fresh one.
    pub mnemonic: Option<Zeroizing<String>>,
    pub passphrase: Zeroizing<String>,
    pub language: String,
    pub path: DerivationPath,
    pub prefix: String,
    pub curve: CurveType,
    /// Size of generated entropy.
    pub entropy_bytes: usize,
}

impl DerivationRequest {
    /// Request built from configuration defaults, without secrets.
    pub fn from_config(config: &KdfConfig) -> KdfResult<Self> {
        Ok(Self {
            mnemonic: None,
            passphrase: Zeroizing::new(String::new()),
            language: config.language.clone(),
            path: config.derivation_path()?,
            prefix: config.prefix.clone(),
            curve: config.curve,
            entropy_bytes: config.entropy_bytes,
        })
    }

    pub fn with_mnemonic(mut self, sentence: &str) -> Self {
        self.mnemonic = Some(Zeroizing::new(sentence.to_string()));
        self
    }

    pub fn with_passphrase(mut self, passphrase: &str) -> Self {
        self.passphrase = Zeroizing::new(passphrase.to_string());
        self
    }
}

impl fmt::Debug for DerivationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivationRequest")
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "[REDACTED]"))
            .field("passphrase", &"[REDACTED]")
            .field("language", &self.language)
            .field("path", &self.path.to_string())
            .field("prefix", &self.prefix)
            .field("curve", &self.curve)
            .field("entropy_bytes", &self.entropy_bytes)
            .finish()
    }
}

// --- Report ---

/// Everything produced by [`derive`]. `Display` prints the key material;
/// `Debug` does not.
pub struct DerivationReport {
    pub entropy: Zeroizing<Vec<u8>>,
    pub mnemonic: Mnemonic,
    pub passphrase: Zeroizing<String>,
    pub seed: Seed,
    pub path: DerivationPath,
    pub key: DerivedKey,
    /// Present for curves with an address format (Ed25519).
    pub address: Option<String>,
}

impl DerivationReport {
    #[inline]
    pub fn curve(&self) -> CurveType {
        self.key.curve()
    }
}

impl fmt::Debug for DerivationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivationReport")
            .field("mnemonic", &self.mnemonic)
            .field("seed", &self.seed)
            .field("path", &self.path.to_string())
            .field("key", &self.key)
            .field("address", &self.address)
            .finish()
    }
}

impl fmt::Display for DerivationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let curve = self.curve();
        let private_key = self.key.private_key();
        let public_key = self.key.public_key();

        writeln!(f, "==> Key Derivation Parameters")?;
        writeln!(f, " entropy ({}-byte):\t{}", self.entropy.len(), hex::encode(&*self.entropy))?;
        writeln!(f, " mnemonic ({}-word):\t{}", self.mnemonic.len(), self.mnemonic)?;
        writeln!(f, " optional passphrase:\t\"{}\"", self.passphrase.as_str())?;
        writeln!(f, " master seed ({}-byte):\t{}", self.seed.as_bytes().len(), hex::encode(self.seed.as_bytes()))?;

        writeln!(f)?;
        writeln!(f, "==> {} Private Key Derivation", curve.title())?;
        writeln!(f, " SLIP-10 curve seed:\t{}", String::from_utf8_lossy(curve.hmac_key()))?;
        writeln!(f, " SLIP-10 address path:\t{}", self.path)?;
        writeln!(f, " private key ({}-byte):\t{}", private_key.len(), hex::encode(&*private_key))?;
        writeln!(f, " chain code ({}-byte):\t{}", self.key.chain_code().len(), hex::encode(self.key.chain_code()))?;
        writeln!(f, " public key ({}-byte):\t{}", public_key.len(), hex::encode(&public_key))?;
        if let Some(address) = &self.address {
            writeln!(f, " address ({}-char):\t{}", address.len(), address)?;
        }
        Ok(())
    }
}

// --- Pipeline ---

/// Run mnemonic -> entropy -> seed -> key -> address.
///
/// # Arguments
/// * `request` - derivation inputs
/// * `registry` - word lists; `request.language` selects one
pub fn derive(request: &DerivationRequest, registry: &WordListRegistry) -> KdfResult<DerivationReport> {
    let wordlist = registry.get(&request.language)?;
    let hrp = Hrp::parse(&request.prefix)?;

    let sentence = request
        .mnemonic
        .as_deref()
        .filter(|sentence| !sentence.trim().is_empty());
    let (entropy, mnemonic) = match sentence {
        Some(sentence) => {
            let mnemonic = Mnemonic::parse(sentence);
            let entropy = mnemonic_to_entropy(&mnemonic, wordlist)?;
            (entropy, mnemonic)
        }
        None => {
            let count = WordCount::from_entropy_bytes(request.entropy_bytes)
                .ok_or(MnemonicError::InvalidEntropySize(request.entropy_bytes))?;
            let entropy = generate_entropy(count.entropy_bytes())?;
            let mnemonic = entropy_to_mnemonic(&entropy, wordlist)?;
            (entropy, mnemonic)
        }
    };

    let seed = mnemonic_to_seed(&mnemonic, &request.passphrase, wordlist)?;
    let key = KeyDeriver::derive(seed.as_bytes(), &request.path, request.curve)?;

    let address = match &key {
        DerivedKey::Ed25519(k) => Some(encode_address(hrp.as_str(), &k.key().public_key())?),
        DerivedKey::Secp256k1(_) => None,
    };

    debug!(
        curve = %request.curve,
        path = %request.path,
        language = wordlist.name(),
        generated = sentence.is_none(),
        "derivation complete"
    );

    Ok(DerivationReport {
        entropy,
        mnemonic,
        passphrase: request.passphrase.clone(),
        seed,
        path: request.path.clone(),
        key,
        address,
    })
}
