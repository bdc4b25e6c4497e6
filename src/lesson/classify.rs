//! Character classification for lesson character lists
//!
//! Splits raw lesson text into letters, digits and symbols. A symbol can be
//! preceded by a two-letter position marker:
//! - `LL`: next to the left word boundary
//! - `RR`: next to the right word boundary
//! - `LR`: next to either boundary
//!
//! Markers are resolved by a small stack scanner. Every marker pair that
//! forms on top of the stack is popped, so stripped text never contains one;
//! the pair popped right before a symbol gives that symbol its affinity.

/// Where a symbol may be rendered relative to a word
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Affinity {
    /// Free-floating, separated by whitespace
    Detached,
    Left,
    Right,
    LeftOrRight,
}

/// A symbol together with its positional affinity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClassifiedSymbol {
    pub ch: char,
    pub affinity: Affinity,
}

/// Letters, digits and symbols of a span of lesson text
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharacterSet {
    pub letters: Vec<char>,
    pub digits: Vec<char>,
    pub symbols: Vec<ClassifiedSymbol>,
}

/// Anything that is neither alphanumeric nor whitespace (`_` included)
pub fn is_symbol(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace()
}

enum Scanned {
    Plain(char),
    Symbol(char, Affinity),
}

fn marker_affinity(first: char, second: char) -> Option<Affinity> {
    match (first, second) {
        ('L', 'L') => Some(Affinity::Left),
        ('R', 'R') => Some(Affinity::Right),
        ('L', 'R') => Some(Affinity::LeftOrRight),
        _ => None,
    }
}

fn trailing_marker(stack: &[Scanned]) -> Option<Affinity> {
    match stack {
        [.., Scanned::Plain(a), Scanned::Plain(b)] => marker_affinity(*a, *b),
        _ => None,
    }
}

fn scan(raw: &str) -> Vec<Scanned> {
    let mut stack: Vec<Scanned> = Vec::with_capacity(raw.len());
    // Marker popped by the previous character, if any
    let mut pending: Option<Affinity> = None;

    for c in raw.chars() {
        if is_symbol(c) {
            let affinity = pending.take().unwrap_or(Affinity::Detached);
            stack.push(Scanned::Symbol(c, affinity));
            continue;
        }

        stack.push(Scanned::Plain(c));
        pending = trailing_marker(&stack);
        if pending.is_some() {
            stack.truncate(stack.len() - 2);
        }
    }

    stack
}

/// Remove position markers, leaving every other character in place
pub fn strip_markers(raw: &str) -> String {
    scan(raw)
        .into_iter()
        .map(|item| match item {
            Scanned::Plain(c) | Scanned::Symbol(c, _) => c,
        })
        .collect()
}

fn push_unique(chars: &mut Vec<char>, c: char) {
    if !chars.contains(&c) {
        chars.push(c);
    }
}

/// Union of two character lists, keeping first-seen order
pub fn union(a: &[char], b: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    for &c in a.iter().chain(b) {
        push_unique(&mut out, c);
    }
    out
}

impl CharacterSet {
    /// Classify a raw lesson string
    pub fn classify(raw: &str) -> Self {
        let mut set = CharacterSet::default();

        for item in scan(raw) {
            match item {
                Scanned::Plain(c) if c.is_alphabetic() => push_unique(&mut set.letters, c),
                Scanned::Plain(c) if c.is_numeric() => push_unique(&mut set.digits, c),
                Scanned::Plain(_) => {}
                Scanned::Symbol(ch, affinity) => set.add_symbol(ClassifiedSymbol { ch, affinity }),
            }
        }

        set
    }

    /// A symbol marked anywhere is never also detached
    fn add_symbol(&mut self, symbol: ClassifiedSymbol) {
        if self.symbols.contains(&symbol) {
            return;
        }
        if symbol.affinity == Affinity::Detached {
            if self.symbols.iter().any(|s| s.ch == symbol.ch) {
                return;
            }
        } else {
            self.symbols
                .retain(|s| !(s.ch == symbol.ch && s.affinity == Affinity::Detached));
        }
        self.symbols.push(symbol);
    }

    /// Characters of `self` followed by those of `other`
    pub fn merged(&self, other: &CharacterSet) -> CharacterSet {
        let mut set = CharacterSet {
            letters: union(&self.letters, &other.letters),
            digits: union(&self.digits, &other.digits),
            symbols: Vec::with_capacity(self.symbols.len() + other.symbols.len()),
        };
        for &symbol in self.symbols.iter().chain(&other.symbols) {
            set.add_symbol(symbol);
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty() && self.digits.is_empty() && self.symbols.is_empty()
    }
}
