// kdf-core/src/crypto/mnemonic.rs
//
// Mnemonic Codec - BIP-39
// Entropy <-> word sequence (SHA-256 checksum), mnemonic + passphrase -> seed
// (PBKDF2-HMAC-SHA512). The word list is always passed in explicitly.

use crate::crypto::wordlist::{WordList, INDEX_BITS};
use crate::error::{KdfError, KdfResult, MnemonicError};
use pbkdf2::pbkdf2_hmac;
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Size, in bytes, of a BIP-39 seed.
pub const SEED_SIZE: usize = 64;

/// PBKDF2 iteration count fixed by BIP-39.
pub const PBKDF2_ROUNDS: u32 = 2048;

const MIN_ENTROPY_BYTES: usize = 16;
const MAX_ENTROPY_BYTES: usize = 64;
const SALT_PREFIX: &str = "mnemonic";

// =============================================================================
// WORD COUNT
// =============================================================================

/// Sentence lengths accepted when decoding a mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    /// 12 words (128-bit entropy)
    Twelve = 12,
    /// 15 words (160-bit entropy)
    Fifteen = 15,
    /// 18 words (192-bit entropy)
    Eighteen = 18,
    /// 21 words (224-bit entropy)
    TwentyOne = 21,
    /// 24 words (256-bit entropy)
    TwentyFour = 24,
}

impl WordCount {
    pub const fn from_len(words: usize) -> Option<Self> {
        match words {
            12 => Some(WordCount::Twelve),
            15 => Some(WordCount::Fifteen),
            18 => Some(WordCount::Eighteen),
            21 => Some(WordCount::TwentyOne),
            24 => Some(WordCount::TwentyFour),
            _ => None,
        }
    }

    /// Word count whose entropy is `bytes` long.
    pub const fn from_entropy_bytes(bytes: usize) -> Option<Self> {
        match bytes {
            16 => Some(WordCount::Twelve),
            20 => Some(WordCount::Fifteen),
            24 => Some(WordCount::Eighteen),
            28 => Some(WordCount::TwentyOne),
            32 => Some(WordCount::TwentyFour),
            _ => None,
        }
    }

    #[inline]
    pub const fn words(self) -> usize {
        self as usize
    }

    /// ENT = 32 * words / 3
    #[inline]
    pub const fn entropy_bits(self) -> usize {
        32 * self.words() / 3
    }

    #[inline]
    pub const fn entropy_bytes(self) -> usize {
        self.entropy_bits() / 8
    }

    /// CS = ENT / 32
    #[inline]
    pub const fn checksum_bits(self) -> usize {
        self.entropy_bits() / 32
    }
}

// =============================================================================
// VALUE TYPES
// =============================================================================

/// An ordered sequence of mnemonic words.
///
/// Holding a `Mnemonic` says nothing about validity; run it through
/// [`mnemonic_to_entropy`] to check words and checksum.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic {
    words: Vec<String>,
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("word_count", &self.words.len())
            .field("words", &"[REDACTED]")
            .finish()
    }
}

/// Space-joined sentence, the exact byte string fed to PBKDF2.
impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(word)?;
        }
        Ok(())
    }
}

impl Mnemonic {
    /// Split a sentence into words after NFKD normalization.
    ///
    /// Any Unicode whitespace separates words, so sentences joined with the
    /// ideographic space (Japanese) parse the same as ASCII ones.
    pub fn parse(sentence: &str) -> Self {
        let normalized = Zeroizing::new(sentence.nfkd().collect::<String>());
        Self {
            words: normalized.split_whitespace().map(str::to_owned).collect(),
        }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().nfkd().collect::<String>())
                .collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// 64-byte BIP-39 seed, zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_SIZE]);

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed([REDACTED])")
    }
}

impl Seed {
    #[inline]
    pub fn as_bytes(&self) -> &[u8; SEED_SIZE] {
        &self.0
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// =============================================================================
// BIT CURSOR
// =============================================================================

/// MSB-first bit reader over a byte buffer.
struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Read `width` (<= 16) bits. Caller guarantees they exist.
    fn read(&mut self, width: usize) -> u16 {
        let mut value = 0u16;
        for _ in 0..width {
            let bit = (self.bytes[self.pos / 8] >> (7 - self.pos % 8)) & 1;
            value = (value << 1) | bit as u16;
            self.pos += 1;
        }
        value
    }
}

/// MSB-first bit writer producing a zero-padded byte buffer.
struct BitWriter {
    bytes: Zeroizing<Vec<u8>>,
    pos: usize,
}

impl BitWriter {
    fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Zeroizing::new(vec![0u8; (bits + 7) / 8]),
            pos: 0,
        }
    }

    /// Append the low `width` bits of `value`, most significant first.
    fn write(&mut self, value: u16, width: usize) {
        for shift in (0..width).rev() {
            if (value >> shift) & 1 == 1 {
                self.bytes[self.pos / 8] |= 0x80 >> (self.pos % 8);
            }
            self.pos += 1;
        }
    }

    fn into_bytes(self) -> Zeroizing<Vec<u8>> {
        self.bytes
    }
}

/// Leading `bits` (<= 16) bits of SHA-256(`entropy`).
fn checksum(entropy: &[u8], bits: usize) -> u16 {
    let hash = Sha256::digest(entropy);
    BitReader::new(&hash).read(bits)
}

fn validate_entropy(entropy: &[u8]) -> KdfResult<()> {
    let len = entropy.len();
    if !(MIN_ENTROPY_BYTES..=MAX_ENTROPY_BYTES).contains(&len) || len % 4 != 0 {
        return Err(MnemonicError::InvalidEntropySize(len).into());
    }
    Ok(())
}

// =============================================================================
// CODEC
// =============================================================================

/// Encode entropy (16..=64 bytes, multiple of 4) as a mnemonic.
pub fn entropy_to_mnemonic(entropy: &[u8], wordlist: &WordList) -> KdfResult<Mnemonic> {
    validate_entropy(entropy)?;

    let entropy_bits = entropy.len() * 8;
    let checksum_bits = entropy_bits / 32;
    let word_count = (entropy_bits + checksum_bits) / INDEX_BITS;

    // entropy || checksum, checksum left-aligned in two trailing bytes
    let mut buffer = Zeroizing::new(Vec::with_capacity(entropy.len() + 2));
    buffer.extend_from_slice(entropy);
    let cs = checksum(entropy, checksum_bits) << (16 - checksum_bits);
    buffer.extend_from_slice(&cs.to_be_bytes());

    let mut reader = BitReader::new(&buffer);
    let mut words = Vec::with_capacity(word_count);
    for _ in 0..word_count {
        let index = reader.read(INDEX_BITS);
        let word = wordlist.word(index).ok_or_else(|| {
            KdfError::from(MnemonicError::UnknownWord {
                position: words.len() + 1,
                language: wordlist.name().to_string(),
            })
        })?;
        words.push(word.to_string());
    }

    debug!(words = word_count, language = wordlist.name(), "encoded mnemonic");
    Ok(Mnemonic { words })
}

/// Decode a mnemonic back into its entropy, verifying words and checksum.
pub fn mnemonic_to_entropy(
    mnemonic: &Mnemonic,
    wordlist: &WordList,
) -> KdfResult<Zeroizing<Vec<u8>>> {
    let count = WordCount::from_len(mnemonic.len())
        .ok_or(MnemonicError::InvalidWordCount(mnemonic.len()))?;

    let entropy_bits = count.entropy_bits();
    let checksum_bits = count.checksum_bits();

    let mut writer = BitWriter::with_capacity(entropy_bits + checksum_bits);
    for (i, word) in mnemonic.words().enumerate() {
        let index = wordlist.index(word).ok_or_else(|| MnemonicError::UnknownWord {
            position: i + 1,
            language: wordlist.name().to_string(),
        })?;
        writer.write(index, INDEX_BITS);
    }
    let buffer = writer.into_bytes();

    let entropy = Zeroizing::new(buffer[..count.entropy_bytes()].to_vec());
    let mut reader = BitReader::new(&buffer);
    reader.pos = entropy_bits;
    let stored = reader.read(checksum_bits);

    if stored != checksum(&entropy, checksum_bits) {
        return Err(MnemonicError::ChecksumFailed.into());
    }
    Ok(entropy)
}

/// Stretch a validated mnemonic and passphrase into the 64-byte seed.
///
/// seed = PBKDF2-HMAC-SHA512(sentence, "mnemonic" || NFKD(passphrase), 2048)
pub fn mnemonic_to_seed(
    mnemonic: &Mnemonic,
    passphrase: &str,
    wordlist: &WordList,
) -> KdfResult<Seed> {
    mnemonic_to_entropy(mnemonic, wordlist)?;

    let password = Zeroizing::new(mnemonic.to_string());
    let mut salt = Zeroizing::new(String::with_capacity(SALT_PREFIX.len() + passphrase.len()));
    salt.push_str(SALT_PREFIX);
    salt.extend(passphrase.nfkd());

    let mut seed = Seed([0u8; SEED_SIZE]);
    pbkdf2_hmac::<Sha512>(password.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS, &mut seed.0);
    Ok(seed)
}

/// True when `mnemonic` decodes under `wordlist` with a matching checksum.
#[inline]
pub fn validate(mnemonic: &Mnemonic, wordlist: &WordList) -> bool {
    mnemonic_to_entropy(mnemonic, wordlist).is_ok()
}

// =============================================================================
// GENERATION
// =============================================================================

/// Fill `size` bytes from the OS CSPRNG. `size` follows the entropy rules.
pub fn generate_entropy(size: usize) -> KdfResult<Zeroizing<Vec<u8>>> {
    let mut entropy = Zeroizing::new(vec![0u8; size]);
    validate_entropy(&entropy)?;
    OsRng
        .try_fill_bytes(&mut entropy)
        .map_err(|e| KdfError::RandomSource(e.to_string()))?;
    Ok(entropy)
}

/// Fresh random mnemonic of the given length.
pub fn generate_mnemonic(word_count: WordCount, wordlist: &WordList) -> KdfResult<Mnemonic> {
    let entropy = generate_entropy(word_count.entropy_bytes())?;
    entropy_to_mnemonic(&entropy, wordlist)
}

// =============================================================================
// UNIT TESTS
// =============================================================================
