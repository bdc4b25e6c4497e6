//! Combinatorial pseudo-word synthesis
//!
//! Every permutation of every combination (with repetition) of an alphabet up
//! to a maximum length is exactly the set of all strings over that alphabet
//! of length `1..=max_length`, so they are enumerated directly, shortest
//! first. Used for the first lessons, before the dictionary has any word made
//! of the letters learned so far, and for numbers built from learned digits.

use super::classify::union;

/// All distinct strings over `alphabet` with length in `1..=max_length`
///
/// Output order is deterministic: by length, then by the order of the
/// characters in `alphabet`. Size grows as `alphabet^max_length`, so keep
/// `max_length` small.
pub fn synthesize(alphabet: &[char], max_length: usize) -> Vec<String> {
    let alphabet = union(alphabet, &[]);
    if alphabet.is_empty() {
        return Vec::new();
    }

    let mut words = Vec::new();
    let mut level: Vec<String> = vec![String::new()];

    for _ in 0..max_length {
        let mut next = Vec::with_capacity(level.len() * alphabet.len());
        for prefix in &level {
            for &c in &alphabet {
                let mut word = String::with_capacity(prefix.len() + c.len_utf8());
                word.push_str(prefix);
                word.push(c);
                next.push(word);
            }
        }
        words.extend(next.iter().cloned());
        level = next;
    }

    words
}

/// Whether `word` contains at least one of `chars`
pub fn contains_any(word: &str, chars: &[char]) -> bool {
    word.chars().any(|c| chars.contains(&c))
}
