// kdf-core/src/error.rs

use thiserror::Error;

pub type KdfResult<T> = std::result::Result<T, KdfError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KdfError {
    #[error("Mnemonic Error: {0}")]
    Mnemonic(#[from] MnemonicError),

    #[error("Word List Error: {0}")]
    WordList(#[from] WordListError),

    #[error("Path Error: {0}")]
    Path(#[from] PathError),

    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Address Error: {0}")]
    Address(#[from] AddressError),

    #[error("Random source failure: {0}")]
    RandomSource(String),

    #[error("Configuration Error: {0}")]
    Config(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Invalid entropy size: {0} bytes. Expected 16..=64 bytes in steps of 4.")]
    InvalidEntropySize(usize),

    #[error("Invalid word count: {0}. Expected 12, 15, 18, 21 or 24 words.")]
    InvalidWordCount(usize),

    #[error("Word #{position} is not in the '{language}' word list.")]
    UnknownWord { position: usize, language: String },

    #[error("Checksum validation failed.")]
    ChecksumFailed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordListError {
    #[error("Word list '{0}' is not registered.")]
    NotFound(String),

    #[error("Word list must contain exactly 2048 words, got {0}.")]
    InvalidLength(usize),

    #[error("Word list contains duplicate word at index {0}.")]
    DuplicateWord(usize),

    #[error("Word list contains an empty word at index {0}.")]
    EmptyWord(usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("Empty derivation path")]
    Empty,

    #[error("Empty path component at position {0}")]
    EmptySegment(usize),

    #[error("Invalid path component '{0}'")]
    InvalidSegment(String),

    #[error("Path index '{0}' out of range, must be below 2^31")]
    IndexOutOfRange(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("{curve} only supports hardened derivation, got non-hardened index {index}")]
    UnsupportedDerivation { curve: &'static str, index: u32 },

    #[error("Derived child key for index {0:#010x} is invalid; try the next index")]
    InvalidChildKey(u32),

    #[error("Invalid seed length: expected 16..=64 bytes, got {0}")]
    InvalidSeedLength(usize),

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid prefix '{0}'")]
    InvalidPrefix(String),

    #[error("Encoding failed: {0}")]
    Encoding(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

/// Flat classification of every error this crate can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidEntropySize,
    InvalidMnemonic,
    InvalidChecksum,
    InvalidWordList,
    WordListNotFound,
    InvalidPath,
    InvalidSeed,
    UnsupportedDerivation,
    InvalidChildKey,
    InvalidPrefix,
    EncodingError,
    InvalidAddress,
    RandomSourceFailure,
    Config,
}

impl KdfError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KdfError::Mnemonic(e) => match e {
                MnemonicError::InvalidEntropySize(_) => ErrorKind::InvalidEntropySize,
                MnemonicError::InvalidWordCount(_) | MnemonicError::UnknownWord { .. } => {
                    ErrorKind::InvalidMnemonic
                }
                MnemonicError::ChecksumFailed => ErrorKind::InvalidChecksum,
            },
            KdfError::WordList(WordListError::NotFound(_)) => ErrorKind::WordListNotFound,
            KdfError::WordList(_) => ErrorKind::InvalidWordList,
            KdfError::Path(_) => ErrorKind::InvalidPath,
            KdfError::Crypto(e) => match e {
                CryptoError::UnsupportedDerivation { .. } => ErrorKind::UnsupportedDerivation,
                CryptoError::InvalidChildKey(_) => ErrorKind::InvalidChildKey,
                CryptoError::InvalidSeedLength(_)
                | CryptoError::DerivationFailed(_)
                | CryptoError::InvalidKeyFormat(_) => ErrorKind::InvalidSeed,
            },
            KdfError::Address(e) => match e {
                AddressError::InvalidPrefix(_) => ErrorKind::InvalidPrefix,
                AddressError::Encoding(_) => ErrorKind::EncodingError,
                AddressError::InvalidAddress(_) => ErrorKind::InvalidAddress,
            },
            KdfError::RandomSource(_) => ErrorKind::RandomSourceFailure,
            KdfError::Config(_) => ErrorKind::Config,
        }
    }
}
