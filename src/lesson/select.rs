//! Word selection: Filter dictionary words by letter coverage
//!
//! Picks the words a lesson may use:
//! - Words made only of learned letters and containing a new one
//! - Length bounds (inclusive on both ends)
//! - Optional balancing across the new letters
//! - Synthesized pseudo-words when the dictionary has nothing to offer

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashMap;
use std::collections::HashSet;

use super::classify::union;
use super::synth::synthesize;

/// Coverage rule for the words of one lesson
#[derive(Clone, Debug)]
pub struct Coverage {
    /// Letters introduced by the lesson
    current: Vec<char>,
    /// Letters a word may be made of
    allowed: HashSet<char>,
}

impl Coverage {
    /// Build the rule for a lesson
    ///
    /// With no new letters (a review lesson) a word only has to be made of
    /// previous letters. With `exclude_previous` it has to be made of new
    /// letters only.
    pub fn new(current: &[char], previous: &[char], exclude_previous: bool) -> Self {
        let allowed = if exclude_previous {
            current.iter().copied().collect()
        } else {
            current.iter().chain(previous).copied().collect()
        };

        Coverage {
            current: current.to_vec(),
            allowed,
        }
    }

    pub fn is_review(&self) -> bool {
        self.current.is_empty()
    }

    /// Letters pseudo-words are synthesized from
    pub fn alphabet(&self, previous: &[char]) -> Vec<char> {
        let mut alphabet = union(&self.current, previous);
        alphabet.retain(|c| self.allowed.contains(c));
        alphabet
    }

    /// Check a word against the rule, end to end
    pub fn matches(&self, word: &str) -> bool {
        if word.is_empty() || !word.chars().all(|c| self.allowed.contains(&c)) {
            return false;
        }
        self.is_review() || word.chars().any(|c| self.current.contains(&c))
    }
}

/// How selected words are capitalized
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capitalization {
    /// A new letter is uppercase: every word is title-cased
    Always,
    /// A previous letter is uppercase: about half of the words are
    Sometimes,
    Never,
}

impl Capitalization {
    pub fn for_letters(current: &[char], previous: &[char]) -> Self {
        if current.iter().any(|c| c.is_uppercase()) {
            Capitalization::Always
        } else if previous.iter().any(|c| c.is_uppercase()) {
            Capitalization::Sometimes
        } else {
            Capitalization::Never
        }
    }

    pub fn apply<R: Rng + ?Sized>(self, word: &str, rng: &mut R) -> String {
        match self {
            Capitalization::Always => title_case(word),
            Capitalization::Sometimes if rng.gen_bool(0.5) => title_case(word),
            _ => word.to_string(),
        }
    }
}

/// Uppercase the first letter of every run of letters, lowercase the rest
pub fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut in_letters = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            if in_letters {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_letters = true;
        } else {
            out.push(c);
            in_letters = false;
        }
    }
    out
}

/// Selection parameters taken from the lesson configuration
#[derive(Clone, Debug)]
pub struct SelectOptions {
    pub min_length: usize,
    pub max_length: usize,
    pub exclude_previous: bool,
    pub balance: bool,
    /// Characters of words to collect before stopping
    pub char_budget: usize,
    /// Longest synthesized pseudo-word
    pub max_combination_length: usize,
}

/// Running per-letter totals used to keep frequent letters from crowding out rare ones
struct LetterBalance<'a> {
    current: &'a [char],
    totals: FxHashMap<char, usize>,
    share: usize,
}

impl<'a> LetterBalance<'a> {
    fn new(current: &'a [char], char_budget: usize) -> Self {
        LetterBalance {
            current,
            totals: FxHashMap::default(),
            share: char_budget / current.len().max(1),
        }
    }

    fn letters_in(&self, word: &str) -> Vec<char> {
        let mut letters: Vec<char> = word.chars().filter(|c| self.current.contains(c)).collect();
        letters.sort_unstable();
        letters.dedup();
        letters
    }

    /// Keep the word if one of its new letters is still under its share
    fn admit(&mut self, word: &str, length: usize) -> bool {
        let letters = self.letters_in(word);
        let under_share = letters
            .iter()
            .any(|c| self.totals.get(c).copied().unwrap_or(0) <= self.share);
        if under_share {
            for c in letters {
                *self.totals.entry(c).or_insert(0) += length;
            }
        }
        under_share
    }
}

/// Select words for a lesson from `dictionary`, falling back to synthesized pseudo-words
pub fn select_words<R: Rng + ?Sized>(
    dictionary: &[String],
    current: &[char],
    previous: &[char],
    options: &SelectOptions,
    rng: &mut R,
) -> Vec<String> {
    let coverage = Coverage::new(current, previous, options.exclude_previous);
    let capitalization = Capitalization::for_letters(current, previous);
    let mut balance = if options.balance && !coverage.is_review() {
        Some(LetterBalance::new(current, options.char_budget))
    } else {
        None
    };

    let mut total = 0;
    let mut selected = Vec::new();

    for entry in dictionary {
        let word = capitalization.apply(entry, rng);
        if !coverage.matches(&word) {
            continue;
        }

        let length = word.chars().count();
        if length < options.min_length || length > options.max_length {
            continue;
        }

        if let Some(balance) = balance.as_mut() {
            if !balance.admit(&word, length) {
                continue;
            }
        }

        total += length;
        selected.push(word);
        if total > options.char_budget {
            break;
        }
    }

    if selected.is_empty() {
        selected = synthesized_words(&coverage, previous, capitalization, options, rng);
    } else {
        debug!(
            "selected {} dictionary words ({} characters)",
            selected.len(),
            total
        );
    }

    selected
}

/// Sample synthesized pseudo-words until the character budget is met
fn synthesized_words<R: Rng + ?Sized>(
    coverage: &Coverage,
    previous: &[char],
    capitalization: Capitalization,
    options: &SelectOptions,
    rng: &mut R,
) -> Vec<String> {
    let pool: Vec<String> = synthesize(&coverage.alphabet(previous), options.max_combination_length)
        .into_iter()
        .filter(|w| coverage.matches(w))
        .collect();

    if pool.is_empty() {
        debug!("no synthesized word satisfies the coverage rule");
        return Vec::new();
    }
    debug!("falling back to {} synthesized words", pool.len());

    let mut total = 0;
    let mut words = Vec::new();
    while total < options.char_budget {
        let Some(base) = pool.choose(rng) else {
            break;
        };
        let capitalized = capitalization.apply(base, rng);
        let word = if coverage.matches(&capitalized) {
            capitalized
        } else {
            base.clone()
        };
        total += word.chars().count();
        words.push(word);
    }

    words
}
