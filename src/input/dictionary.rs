//! Dictionary: candidate words for lesson text
//!
//! Handles:
//! - One word per line, first column only
//! - Annotations after `/` (hunspell-style affix flags) are dropped
//! - Lower-casing, shuffling and truncation

use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::path::Path;

use super::InputError;

/// Ordered list of candidate words
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<String>,
}

/// Normalize one dictionary line into a word
fn entry(line: &str) -> Option<String> {
    let column = line.split_whitespace().next()?;
    let word = column.split('/').next().unwrap_or(column);
    if word.is_empty() {
        None
    } else {
        Some(word.to_lowercase())
    }
}

impl Dictionary {
    /// Dictionary with no words; every lesson uses synthesized words
    pub fn empty() -> Self {
        Dictionary::default()
    }

    pub fn from_text(text: &str) -> Self {
        Dictionary {
            words: text.lines().filter_map(entry).collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, InputError> {
        let content = fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(&content))
    }

    /// Truncate to `max_words`, then shuffle if asked
    ///
    /// Truncating first keeps the head of a frequency-sorted list.
    pub fn prepare<R: Rng + ?Sized>(
        mut self,
        max_words: Option<usize>,
        shuffle: bool,
        rng: &mut R,
    ) -> Self {
        if let Some(max) = max_words {
            self.words.truncate(max);
        }
        if shuffle {
            self.words.shuffle(rng);
        }
        self
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
