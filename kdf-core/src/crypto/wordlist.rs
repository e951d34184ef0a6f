// kdf-core/src/crypto/wordlist.rs
//
// Word List Registry - BIP-39 vocabularies
//
// A word list is 2048 NFKD-normalized words; the position of a word is its
// 11-bit index. The registry maps a language name to a list and remembers
// which one is active. It is a plain value: callers hand `registry.active()`
// to the mnemonic codec explicitly, so there is no process-wide state.

use crate::error::{KdfResult, WordListError};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

/// Number of words in every BIP-39 word list.
pub const WORD_COUNT: usize = 2048;

/// Bits needed to address one word.
pub const INDEX_BITS: usize = 11;

/// Language enabled when a registry is created.
pub const DEFAULT_LANGUAGE: &str = "english";

// =============================================================================
// WORD LIST
// =============================================================================

/// An ordered BIP-39 vocabulary with constant-time lookups in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    name: String,
    words: Vec<String>,
    index: HashMap<String, u16>,
}

impl WordList {
    /// Build a word list, normalizing every entry to NFKD.
    ///
    /// Fails unless there are exactly 2048 unique, non-empty words.
    pub fn new<I, S>(name: &str, words: I) -> KdfResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().nfkd().collect::<String>())
            .collect();

        if words.len() != WORD_COUNT {
            return Err(WordListError::InvalidLength(words.len()).into());
        }

        let mut index = HashMap::with_capacity(WORD_COUNT);
        for (i, word) in words.iter().enumerate() {
            if word.is_empty() {
                return Err(WordListError::EmptyWord(i).into());
            }
            // i < 2048, always fits in 11 bits
            if index.insert(word.clone(), i as u16).is_some() {
                return Err(WordListError::DuplicateWord(i).into());
            }
        }

        Ok(Self {
            name: name.to_lowercase(),
            words,
            index,
        })
    }

    /// The bundled English list.
    pub fn english() -> KdfResult<Self> {
        Self::new(DEFAULT_LANGUAGE, bip39::Language::English.word_list().iter())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Word at `index`, `None` when `index >= 2048`.
    #[inline]
    pub fn word(&self, index: u16) -> Option<&str> {
        self.words.get(index as usize).map(String::as_str)
    }

    /// Index of an (already NFKD-normalized) word.
    #[inline]
    pub fn index(&self, word: &str) -> Option<u16> {
        self.index.get(word).copied()
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// Vocabularies shipped with the `bip39` crate, registered by `with_builtin`.
const BUILTIN_LANGUAGES: [(&str, bip39::Language); 4] = [
    ("japanese", bip39::Language::Japanese),
    ("spanish", bip39::Language::Spanish),
    ("french", bip39::Language::French),
    ("italian", bip39::Language::Italian),
];

// =============================================================================
// REGISTRY
// =============================================================================

/// Named word lists plus the currently selected one.
#[derive(Debug, Clone)]
pub struct WordListRegistry {
    lists: HashMap<String, Arc<WordList>>,
    active: Arc<WordList>,
}

impl WordListRegistry {
    /// Registry with English active and only English registered.
    pub fn english() -> KdfResult<Self> {
        let english = Arc::new(WordList::english()?);
        let mut lists = HashMap::new();
        lists.insert(english.name().to_string(), Arc::clone(&english));
        Ok(Self {
            lists,
            active: english,
        })
    }

    /// Registry with every bundled language registered and English active.
    pub fn with_builtin() -> KdfResult<Self> {
        let mut registry = Self::english()?;
        for (name, language) in BUILTIN_LANGUAGES {
            let list = WordList::new(name, language.word_list().iter())?;
            registry.insert(list);
        }
        Ok(registry)
    }

    /// Register a custom word list under `name` (case-insensitive).
    ///
    /// Replaces an existing list of the same name. The active selection is
    /// left untouched unless it pointed at the replaced list.
    pub fn register<I, S>(&mut self, name: &str, words: I) -> KdfResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list = WordList::new(name, words)?;
        self.insert(list);
        Ok(())
    }

    fn insert(&mut self, list: WordList) {
        debug!(language = list.name(), "registered word list");
        let list = Arc::new(list);
        if self.active.name() == list.name() {
            self.active = Arc::clone(&list);
        }
        self.lists.insert(list.name().to_string(), list);
    }

    /// Select the list used by subsequent `active()` calls.
    pub fn set_active(&mut self, name: &str) -> KdfResult<()> {
        let list = Arc::clone(self.lookup(name)?);
        debug!(language = list.name(), "active word list changed");
        self.active = list;
        Ok(())
    }

    #[inline]
    pub fn active(&self) -> &WordList {
        &self.active
    }

    pub fn get(&self, name: &str) -> KdfResult<&WordList> {
        self.lookup(name).map(|list| list.as_ref())
    }

    fn lookup(&self, name: &str) -> KdfResult<&Arc<WordList>> {
        let key = name.trim().to_lowercase();
        self.lists
            .get(&key)
            .ok_or_else(|| WordListError::NotFound(key).into())
    }

    /// Registered language names, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.lists.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

// =============================================================================
// TESTS
// =============================================================================
