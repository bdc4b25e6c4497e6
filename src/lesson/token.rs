//! Token model for generated lesson text
//!
//! A lesson is built as a sequence of tokens before it is rendered:
//! - Words from the dictionary or the synthesizer
//! - Symbols, optionally bound to a word boundary
//! - Numbers built from the digits learned so far

/// Word boundary a symbol is bound to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Glued to the left boundary of the following word, e.g. `(word`
    Left,
    /// Glued to the right boundary of the preceding word, e.g. `word)`
    Right,
}

/// Atomic unit of generated text
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Word(String),
    Symbol { ch: char, side: Option<Side> },
    Number(String),
}

impl Token {
    pub fn word(text: impl Into<String>) -> Self {
        Token::Word(text.into())
    }

    pub fn detached(ch: char) -> Self {
        Token::Symbol { ch, side: None }
    }

    pub fn bound(ch: char, side: Side) -> Self {
        Token::Symbol {
            ch,
            side: Some(side),
        }
    }

    /// Words are the only tokens injected tokens may sit between
    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word(_))
    }

    /// Symbol or number added by the interleaver
    pub fn is_injected(&self) -> bool {
        !self.is_word()
    }

    /// Side this token is bound to, if it is a bound symbol
    pub fn side(&self) -> Option<Side> {
        match self {
            Token::Symbol { side, .. } => *side,
            _ => None,
        }
    }

    /// Length in characters of the raw form (marker included)
    pub fn char_len(&self) -> usize {
        match self {
            Token::Word(w) | Token::Number(w) => w.chars().count(),
            Token::Symbol { side: None, .. } => 1,
            Token::Symbol { side: Some(_), .. } => 2,
        }
    }

    /// Text of the token once its marker has been resolved
    pub fn rendered(&self) -> String {
        match self {
            Token::Word(w) | Token::Number(w) => w.clone(),
            Token::Symbol { ch, .. } => ch.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_symbol_lengths() {
        assert_eq!(Token::detached('$').char_len(), 1);
        assert_eq!(Token::bound(')', Side::Right).char_len(), 2);
        assert_eq!(Token::bound(')', Side::Right).rendered(), ")");
    }

    #[test]
    fn test_injected_tokens() {
        assert!(!Token::word("jolt").is_injected());
        assert!(Token::Number("42".into()).is_injected());
        assert!(Token::detached('%').is_injected());
    }
}
