//! Dictionary gate for word validation
//!
//! The engine never owns a word list. Anything that can answer "is this a
//! word?" and "is the list loaded yet?" is a [`Lexicon`]:
//! - plain closures `Fn(&str) -> bool`, always ready
//! - [`WordGate`], a predicate paired with an explicit readiness flag
//! - [`Dictionary`], a word list read from a text file
//!
//! Lookups are case-insensitive.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Word predicate plus readiness.
pub trait Lexicon {
    fn is_valid_word(&self, word: &str) -> bool;

    /// While false, move search returns nothing.
    fn is_ready(&self) -> bool {
        true
    }
}

impl<F> Lexicon for F
where
    F: Fn(&str) -> bool,
{
    fn is_valid_word(&self, word: &str) -> bool {
        self(word)
    }
}

/// A predicate whose readiness is controlled by the caller, e.g. while a
/// word list is still loading elsewhere.
pub struct WordGate<F> {
    predicate: F,
    ready: bool,
}

impl<F: Fn(&str) -> bool> WordGate<F> {
    pub fn new(predicate: F, ready: bool) -> Self {
        Self { predicate, ready }
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }
}

impl<F: Fn(&str) -> bool> Lexicon for WordGate<F> {
    fn is_valid_word(&self, word: &str) -> bool {
        (self.predicate)(word)
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

/// Errors from loading a word list.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("word list {0} contains no usable words")]
    Empty(PathBuf),
}

/// A loaded word list. `Dictionary::default()` is empty and not ready.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashSet<String>,
    ready: bool,
}

impl Dictionary {
    /// Read one word per line. Lines with anything but letters are skipped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut skipped = 0usize;
        let mut words = HashSet::new();
        for line in text.lines() {
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            if word.chars().all(|c| c.is_ascii_alphabetic()) {
                words.insert(word.to_ascii_uppercase());
            } else {
                skipped += 1;
            }
        }

        if skipped > 0 {
            log::warn!("skipped {} malformed lines in {}", skipped, path.display());
        }
        if words.is_empty() {
            return Err(DictionaryError::Empty(path.to_path_buf()));
        }
        log::info!("loaded {} words from {}", words.len(), path.display());
        Ok(Self { words, ready: true })
    }

    /// A ready dictionary over the given words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_ascii_uppercase())
                .filter(|w| !w.is_empty())
                .collect(),
            ready: true,
        }
    }

    /// Returns the total number of words in the dictionary
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

impl Lexicon for Dictionary {
    fn is_valid_word(&self, word: &str) -> bool {
        self.words.contains(&word.to_ascii_uppercase())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}
