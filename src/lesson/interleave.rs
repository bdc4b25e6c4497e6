//! Symbol and number injection
//!
//! Decides how many symbol and number tokens a lesson gets and spreads them
//! through the word sequence:
//! - Symbols split between the current lesson and previous lessons
//! - `LR` symbols split between left-bound and right-bound variants
//! - Numbers synthesized from the digits learned so far
//!
//! Injected tokens only go into gaps between two words, so two injected
//! tokens never end up next to each other. When there are too few gaps,
//! symbols and numbers share them in proportion to their counts.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use super::classify::{union, Affinity, CharacterSet};
use super::synth::{contains_any, synthesize};
use super::token::{Side, Token};

fn repeat(out: &mut Vec<Token>, token: Token, count: usize) {
    out.extend(std::iter::repeat(token).take(count));
}

/// Symbol tokens for one pool of symbols at the given density
pub fn symbol_tokens(set: &CharacterSet, words: usize, density: f64) -> Vec<Token> {
    if set.symbols.is_empty() || density <= 0.0 {
        return Vec::new();
    }

    let per_symbol = (words as f64 * density / set.symbols.len() as f64).round() as usize;
    let mut tokens = Vec::new();

    for symbol in &set.symbols {
        match symbol.affinity {
            Affinity::Detached => repeat(&mut tokens, Token::detached(symbol.ch), per_symbol),
            Affinity::Left => repeat(&mut tokens, Token::bound(symbol.ch, Side::Left), per_symbol),
            Affinity::Right => {
                repeat(&mut tokens, Token::bound(symbol.ch, Side::Right), per_symbol)
            }
            Affinity::LeftOrRight => {
                repeat(&mut tokens, Token::bound(symbol.ch, Side::Left), per_symbol / 2);
                repeat(
                    &mut tokens,
                    Token::bound(symbol.ch, Side::Right),
                    per_symbol - per_symbol / 2,
                );
            }
        }
    }

    tokens
}

/// Shuffled symbol tokens from the current lesson and, for
/// `previous_fraction` of the total, from previous lessons
pub fn symbol_pool<R: Rng + ?Sized>(
    words: usize,
    current: &CharacterSet,
    previous: &CharacterSet,
    density: f64,
    previous_fraction: f64,
    rng: &mut R,
) -> Vec<Token> {
    let previous_fraction = if previous.symbols.is_empty() {
        0.0
    } else {
        previous_fraction
    };

    let mut pool = symbol_tokens(current, words, (1.0 - previous_fraction) * density);
    pool.extend(symbol_tokens(previous, words, previous_fraction * density));
    pool.shuffle(rng);
    pool
}

/// Number generation parameters
#[derive(Clone, Copy, Debug)]
pub struct NumberOptions {
    pub density: f64,
    pub include_previous: bool,
    pub max_length: usize,
}

/// Numbers made of the lesson's digits (and previous digits if included)
pub fn number_pool<R: Rng + ?Sized>(
    words: usize,
    current_digits: &[char],
    previous_digits: &[char],
    options: NumberOptions,
    rng: &mut R,
) -> Vec<Token> {
    let digits = if options.include_previous {
        union(current_digits, previous_digits)
    } else {
        current_digits.to_vec()
    };
    if digits.is_empty() || options.density <= 0.0 {
        return Vec::new();
    }

    let candidates: Vec<String> = synthesize(&digits, options.max_length)
        .into_iter()
        .filter(|n| current_digits.is_empty() || contains_any(n, current_digits))
        .collect();

    let count = (words as f64 * options.density).round() as usize;
    (0..count)
        .filter_map(|_| candidates.choose(rng).cloned())
        .map(Token::Number)
        .collect()
}

/// Gaps with a word on both sides
fn free_gaps(tokens: &[Token]) -> usize {
    (1..tokens.len())
        .filter(|&i| tokens[i - 1].is_word() && tokens[i].is_word())
        .count()
}

/// How many symbols and numbers fit into `gaps`
///
/// When both pools do not fit, the gaps are shared in proportion to the
/// requested counts, and any share one pool cannot use goes to the other.
pub fn split_gaps(gaps: usize, symbols: usize, numbers: usize) -> (usize, usize) {
    if symbols + numbers <= gaps {
        return (symbols, numbers);
    }
    let share = (gaps as f64 * symbols as f64 / (symbols + numbers) as f64).round() as usize;
    let kept_symbols = share.min(symbols);
    let kept_numbers = (gaps - kept_symbols).min(numbers);
    let kept_symbols = (gaps - kept_numbers).min(symbols);
    (kept_symbols, kept_numbers)
}

/// Word sequence with symbols and numbers injected, and what did not fit
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Injection {
    pub tokens: Vec<Token>,
    pub dropped_symbols: usize,
    pub dropped_numbers: usize,
}

/// Inject both pools into the gaps between words, mixed together
pub fn inject<R: Rng + ?Sized>(
    tokens: Vec<Token>,
    mut symbols: Vec<Token>,
    mut numbers: Vec<Token>,
    rng: &mut R,
) -> Injection {
    let (kept_symbols, kept_numbers) = split_gaps(free_gaps(&tokens), symbols.len(), numbers.len());
    let dropped_symbols = symbols.len() - kept_symbols;
    let dropped_numbers = numbers.len() - kept_numbers;
    symbols.truncate(kept_symbols);
    numbers.truncate(kept_numbers);

    let mut injected = symbols;
    injected.append(&mut numbers);
    injected.shuffle(rng);

    Injection {
        tokens: interleave(tokens, injected),
        dropped_symbols,
        dropped_numbers,
    }
}

/// Spread `injected` evenly over the gaps between consecutive words
///
/// Only interior gaps with a word on both sides are used, so the sequence
/// keeps starting and ending with a word. When there are more injected
/// tokens than free gaps, the surplus is dropped.
pub fn interleave(tokens: Vec<Token>, mut injected: Vec<Token>) -> Vec<Token> {
    if injected.is_empty() {
        return tokens;
    }

    let free: Vec<usize> = (1..tokens.len())
        .filter(|&i| tokens[i - 1].is_word() && tokens[i].is_word())
        .collect();
    if free.len() < injected.len() {
        debug!(
            "dropping {} injected tokens: only {} free gaps",
            injected.len() - free.len(),
            free.len()
        );
        injected.truncate(free.len());
    }
    if injected.is_empty() {
        return tokens;
    }

    // Centre of each of n equal slices of the free gaps; distinct since free.len() >= n
    let n = injected.len();
    let mut picks = (0..n)
        .map(|j| free[(2 * j + 1) * free.len() / (2 * n)])
        .peekable();

    let mut out = Vec::with_capacity(tokens.len() + n);
    let mut injected = injected.into_iter();
    for (i, token) in tokens.into_iter().enumerate() {
        if picks.peek() == Some(&i) {
            picks.next();
            out.extend(injected.next());
        }
        out.push(token);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn words(n: usize) -> Vec<Token> {
        (0..n).map(|i| Token::word(format!("w{}", i))).collect()
    }

    fn no_adjacent_injected(tokens: &[Token]) -> bool {
        tokens
            .windows(2)
            .all(|w| !(w[0].is_injected() && w[1].is_injected()))
    }

    #[test]
    fn test_symbol_counts_per_affinity() {
        let set = CharacterSet::classify("$LL(LR\"");
        let tokens = symbol_tokens(&set, 30, 0.5);
        // 15 symbols over 3 distinct symbols: 5 each
        assert_eq!(tokens.iter().filter(|t| **t == Token::detached('$')).count(), 5);
        assert_eq!(
            tokens
                .iter()
                .filter(|t| **t == Token::bound('(', Side::Left))
                .count(),
            5
        );
        assert_eq!(
            tokens
                .iter()
                .filter(|t| **t == Token::bound('"', Side::Left))
                .count(),
            2
        );
        assert_eq!(
            tokens
                .iter()
                .filter(|t| **t == Token::bound('"', Side::Right))
                .count(),
            3
        );
    }

    #[test]
    fn test_interleave_spreads_without_adjacency() {
        let out = interleave(words(20), vec![Token::detached('$'); 5]);
        assert_eq!(out.len(), 25);
        assert!(no_adjacent_injected(&out));
        assert!(out.first().is_some_and(Token::is_word));
        assert!(out.last().is_some_and(Token::is_word));

        // first and last injected tokens sit well inside the sequence
        let positions: Vec<usize> = out
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_injected())
            .map(|(i, _)| i)
            .collect();
        assert!(positions[0] >= 2);
        assert!(positions[4] <= 22);
    }

    #[test]
    fn test_interleave_drops_surplus() {
        let out = interleave(words(3), vec![Token::detached('$'); 10]);
        assert_eq!(out.iter().filter(|t| t.is_injected()).count(), 2);
        assert!(no_adjacent_injected(&out));
    }

    #[test]
    fn test_interleave_into_single_word() {
        let out = interleave(words(1), vec![Token::detached('$')]);
        assert_eq!(out, words(1));
    }

    #[test]
    fn test_symbol_pool_uses_previous_fraction() {
        let mut rng = StdRng::seed_from_u64(2);
        let current = CharacterSet::classify("$");
        let previous = CharacterSet::classify("jf%");
        let pool = symbol_pool(100, &current, &previous, 0.2, 0.5, &mut rng);
        assert_eq!(pool.iter().filter(|t| **t == Token::detached('$')).count(), 10);
        assert_eq!(pool.iter().filter(|t| **t == Token::detached('%')).count(), 10);
    }

    #[test]
    fn test_previous_fraction_ignored_without_previous_symbols() {
        let mut rng = StdRng::seed_from_u64(2);
        let current = CharacterSet::classify("$");
        let previous = CharacterSet::classify("jf");
        let pool = symbol_pool(100, &current, &previous, 0.2, 0.5, &mut rng);
        assert_eq!(pool.len(), 20);
    }

    #[test]
    fn test_numbers_contain_current_digit() {
        let mut rng = StdRng::seed_from_u64(9);
        let options = NumberOptions {
            density: 0.3,
            include_previous: true,
            max_length: 3,
        };
        let pool = number_pool(50, &['5'], &['1', '2'], options, &mut rng);
        assert_eq!(pool.len(), 15);
        for token in pool {
            match token {
                Token::Number(n) => {
                    assert!(n.contains('5'));
                    assert!(n.chars().count() <= 3);
                    assert!(n.chars().all(|c| "125".contains(c)));
                }
                other => panic!("unexpected token {:?}", other),
            }
        }
    }

    #[test]
    fn test_numbers_without_digits() {
        let mut rng = StdRng::seed_from_u64(9);
        let options = NumberOptions {
            density: 0.3,
            include_previous: false,
            max_length: 3,
        };
        assert!(number_pool(10, &[], &['1'], options, &mut rng).is_empty());
    }

    #[test]
    fn test_split_gaps() {
        assert_eq!(split_gaps(99, 10, 20), (10, 20));
        assert_eq!(split_gaps(99, 100, 100), (50, 49));
        assert_eq!(split_gaps(10, 2, 100), (0, 10));
        assert_eq!(split_gaps(10, 30, 70), (3, 7));
        assert_eq!(split_gaps(10, 100, 0), (10, 0));
        assert_eq!(split_gaps(0, 5, 5), (0, 0));
    }

    #[test]
    fn test_full_densities_keep_numbers() {
        let mut rng = StdRng::seed_from_u64(4);
        let symbols = symbol_pool(
            100,
            &CharacterSet::classify("$"),
            &CharacterSet::default(),
            1.0,
            0.4,
            &mut rng,
        );
        let options = NumberOptions {
            density: 1.0,
            include_previous: false,
            max_length: 3,
        };
        let numbers = number_pool(100, &['1'], &[], options, &mut rng);
        assert_eq!((symbols.len(), numbers.len()), (100, 100));

        let injection = inject(words(100), symbols, numbers, &mut rng);
        let count = |f: fn(&Token) -> bool| injection.tokens.iter().filter(|t| f(t)).count();
        let numbers = count(|t| matches!(t, Token::Number(_)));
        let symbols = count(|t| matches!(t, Token::Symbol { .. }));

        assert_eq!(numbers, 49);
        assert_eq!(symbols, 50);
        assert_eq!(injection.dropped_numbers, 51);
        assert_eq!(injection.dropped_symbols, 50);
        assert!(no_adjacent_injected(&injection.tokens));
    }

    #[test]
    fn test_inject_keeps_everything_that_fits() {
        let mut rng = StdRng::seed_from_u64(5);
        let symbols = vec![Token::detached('$'); 3];
        let numbers = vec![Token::Number("12".into()); 4];
        let injection = inject(words(20), symbols, numbers, &mut rng);
        assert_eq!(injection.tokens.len(), 27);
        assert_eq!((injection.dropped_symbols, injection.dropped_numbers), (0, 0));
        assert!(no_adjacent_injected(&injection.tokens));
    }
}
