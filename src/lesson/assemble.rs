//! Lesson text assembly
//!
//! Turns a token sequence into the final lesson text:
//! - Pads by appending re-shuffled copies until the length target is met
//! - Renders tokens, gluing bound symbols to their word
//! - Cuts to the character budget on a word boundary
//! - Wraps lines at the configured width

use rand::seq::SliceRandom;
use rand::Rng;

use super::token::{Side, Token};

fn raw_len(tokens: &[Token]) -> usize {
    tokens.iter().map(Token::char_len).sum()
}

/// Copy of `tokens` with the words shuffled among the word positions
///
/// Injected tokens keep their slots, so no two of them become neighbours.
fn reshuffled_words<R: Rng + ?Sized>(tokens: &[Token], rng: &mut R) -> Vec<Token> {
    let mut words: Vec<Token> = tokens.iter().filter(|t| t.is_word()).cloned().collect();
    words.shuffle(rng);

    let mut words = words.into_iter();
    tokens
        .iter()
        .map(|t| {
            if t.is_injected() {
                t.clone()
            } else {
                words.next().unwrap_or_else(|| t.clone())
            }
        })
        .collect()
}

/// Append re-shuffled copies of the sequence until its raw length reaches `target_chars`
pub fn pad<R: Rng + ?Sized>(mut tokens: Vec<Token>, target_chars: usize, rng: &mut R) -> Vec<Token> {
    let template = tokens.clone();
    let step = raw_len(&template);
    if step == 0 {
        return tokens;
    }

    let mut length = step;
    while length < target_chars {
        tokens.extend(reshuffled_words(&template, rng));
        length += step;
    }
    tokens
}

/// Join tokens with single spaces, resolving bound symbols
///
/// A left-bound symbol loses the space after it, a right-bound symbol the
/// space before it. A bound symbol with no word on its side is dropped.
pub fn render(tokens: &[Token]) -> String {
    let mut start = 0;
    let mut end = tokens.len();
    while start < end && tokens[start].side() == Some(Side::Right) {
        start += 1;
    }
    while end > start && tokens[end - 1].side() == Some(Side::Left) {
        end -= 1;
    }

    let mut text = String::new();
    let mut glue_next = true;
    for token in &tokens[start..end] {
        if !glue_next && token.side() != Some(Side::Right) {
            text.push(' ');
        }
        text.push_str(&token.rendered());
        glue_next = token.side() == Some(Side::Left);
    }
    text
}

/// Cut `text` to at most `max_chars` characters without leaving a partial word
pub fn truncate(text: &str, max_chars: usize) -> String {
    let Some((cut, next)) = text.char_indices().nth(max_chars) else {
        return text.trim_end().to_string();
    };

    let head = &text[..cut];
    if next.is_whitespace() {
        return head.trim_end().to_string();
    }
    match head.rfind(char::is_whitespace) {
        Some(space) => head[..space].trim_end().to_string(),
        None => String::new(),
    }
}

/// Greedy word wrap; words longer than `width` get a line of their own
pub fn wrap(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len > 0 && line_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.push_str(word);
        line_len += word_len;
    }
    if !line.is_empty() {
        lines.push(line);
    }

    lines.join("\n")
}

/// Pad, render, cut and wrap a token sequence into lesson text
pub fn assemble<R: Rng + ?Sized>(
    tokens: Vec<Token>,
    target_chars: usize,
    word_wrap: usize,
    rng: &mut R,
) -> String {
    let tokens = pad(tokens, target_chars, rng);
    let text = truncate(&render(&tokens), target_chars);
    wrap(&text, word_wrap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tokens(raw: &[&str]) -> Vec<Token> {
        raw.iter()
            .map(|r| {
                let mut chars = r.chars();
                match (chars.next(), chars.next(), chars.next()) {
                    (Some('L'), Some(c), None) if !c.is_alphanumeric() => Token::bound(c, Side::Left),
                    (Some('R'), Some(c), None) if !c.is_alphanumeric() => Token::bound(c, Side::Right),
                    (Some(c), None, None) if !c.is_alphanumeric() => Token::detached(c),
                    _ => Token::word(*r),
                }
            })
            .collect()
    }

    #[test]
    fn test_render_resolves_markers() {
        assert_eq!(render(&tokens(&["cat", "L.", "dog"])), "cat .dog");
        assert_eq!(render(&tokens(&["cat", "R.", "dog"])), "cat. dog");
        assert_eq!(render(&tokens(&["say", "L(", "hi", "R)", "now"])), "say (hi) now");
        assert_eq!(render(&tokens(&["a", "$", "b"])), "a $ b");
    }

    #[test]
    fn test_render_drops_lone_bound_symbols() {
        assert_eq!(render(&tokens(&["R)", "cat", "L("])), "cat");
        assert_eq!(render(&tokens(&["L(", "cat", "R)"])), "(cat)");
        assert_eq!(render(&tokens(&["R)"])), "");
    }

    #[test]
    fn test_render_leaves_no_marker_text() {
        let text = render(&tokens(&["cat", "L.", "dog", "R,", "fish"]));
        assert!(!text.contains("L."));
        assert!(!text.contains("R,"));
        assert_eq!(text, "cat .dog, fish");
    }

    #[test]
    fn test_truncate_on_word_boundary() {
        assert_eq!(truncate("alpha beta gamma", 13), "alpha beta");
        assert_eq!(truncate("alpha beta gamma", 10), "alpha beta");
        assert_eq!(truncate("alpha beta gamma", 11), "alpha beta");
        assert_eq!(truncate("alpha beta", 50), "alpha beta");
        assert_eq!(truncate("alphabet", 3), "");
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("aa bb cc dd", 5), "aa bb\ncc dd");
        assert_eq!(wrap("aa verylongword b", 4), "aa\nverylongword\nb");
        assert_eq!(wrap("", 10), "");
    }

    #[test]
    fn test_pad_reaches_target() {
        let mut rng = StdRng::seed_from_u64(4);
        let padded = pad(tokens(&["ab", "$", "cd"]), 20, &mut rng);
        assert!(raw_len(&padded) >= 20);
        assert!(padded
            .windows(2)
            .all(|w| !(w[0].is_injected() && w[1].is_injected())));
    }

    #[test]
    fn test_assemble_empty() {
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(assemble(Vec::new(), 100, 60, &mut rng), "");
    }

    proptest! {
        #[test]
        fn assembled_text_fits_budget_and_width(
            words in prop::collection::vec("[a-z]{1,8}", 1..20),
            target in 1usize..400,
            width in 5usize..40,
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let tokens: Vec<Token> = words.into_iter().map(Token::Word).collect();
            let text = assemble(tokens, target, width, &mut rng);

            prop_assert!(text.chars().count() <= target);
            for line in text.lines() {
                prop_assert!(line.chars().count() <= width || !line.contains(' '));
            }
        }

        #[test]
        fn truncation_stays_within_one_word(
            words in prop::collection::vec("[a-z]{1,8}", 60..80),
            target in 20usize..100,
        ) {
            let text = words.join(" ");
            let cut = truncate(&text, target);
            prop_assert!(cut.chars().count() <= target);
            prop_assert!(cut.chars().count() + 9 >= target);
            prop_assert!(text.starts_with(&cut));
        }
    }
}
