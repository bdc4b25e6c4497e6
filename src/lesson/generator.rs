//! Lesson orchestration
//!
//! Drives the pipeline once per lesson, in order:
//! - Classify the lesson's characters against everything learned before
//! - Select (or synthesize) words, inject symbols and numbers
//! - Assemble the wrapped text
//!
//! Lesson `i` depends on the characters of lessons `0..i`, so lessons are
//! generated strictly in sequence, folding each one's characters into the
//! previous-characters set.

use log::{debug, info, warn};
use rand::Rng;

use super::assemble::assemble;
use super::classify::CharacterSet;
use super::interleave::{inject, number_pool, symbol_pool, NumberOptions};
use super::select::{select_words, SelectOptions};
use super::token::Token;
use crate::config::GenerationConfig;
use crate::input::{Dictionary, LessonSpec};

/// Text produced for one lesson
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedLesson {
    /// 1-based position in the character list
    pub number: usize,
    /// New characters shown in the lesson header
    pub display_chars: String,
    /// Wrapped lesson text, possibly empty
    pub text: String,
}

impl GeneratedLesson {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<&GenerationConfig> for SelectOptions {
    fn from(config: &GenerationConfig) -> Self {
        SelectOptions {
            min_length: config.min_word_length,
            max_length: config.max_word_length,
            exclude_previous: config.exclude_previous_letters,
            balance: config.balance_words,
            char_budget: config.characters_per_lesson,
            max_combination_length: config.max_letters_combination_length,
        }
    }
}

impl From<&GenerationConfig> for NumberOptions {
    fn from(config: &GenerationConfig) -> Self {
        NumberOptions {
            density: config.numbers_density,
            include_previous: config.include_previous_numbers,
            max_length: config.max_number_length,
        }
    }
}

/// Generates lesson text from a dictionary
pub struct LessonGenerator<'a> {
    dictionary: &'a Dictionary,
}

impl<'a> LessonGenerator<'a> {
    pub fn new(dictionary: &'a Dictionary) -> Self {
        LessonGenerator { dictionary }
    }

    /// Text for lesson `number` given its characters and everything learned before
    pub fn lesson_text<R: Rng + ?Sized>(
        &self,
        number: usize,
        current: &CharacterSet,
        previous: &CharacterSet,
        config: &GenerationConfig,
        rng: &mut R,
    ) -> String {
        let words = select_words(
            self.dictionary.words(),
            &current.letters,
            &previous.letters,
            &SelectOptions::from(config),
            rng,
        );

        let word_count = words.len();
        let tokens: Vec<Token> = words.into_iter().map(Token::word).collect();
        let symbols = symbol_pool(
            word_count,
            current,
            previous,
            config.symbols_density,
            config.previous_symbols_fraction,
            rng,
        );
        let numbers = number_pool(
            word_count,
            &current.digits,
            &previous.digits,
            NumberOptions::from(config),
            rng,
        );

        let injection = inject(tokens, symbols, numbers, rng);
        if injection.dropped_symbols + injection.dropped_numbers > 0 {
            warn!(
                "lesson {}: {} words leave too few gaps, dropped {} symbols and {} numbers",
                number, word_count, injection.dropped_symbols, injection.dropped_numbers
            );
        }
        debug!("{} tokens before padding", injection.tokens.len());

        assemble(
            injection.tokens,
            config.characters_per_lesson,
            config.word_wrap,
            rng,
        )
    }

    /// Generate every lesson of `spec`, or only lesson `only` (1-based)
    ///
    /// `configs` holds one resolved configuration per lesson. Lessons before
    /// `only` are still replayed so their characters count as learned.
    /// `progress` is called with each lesson number before it is generated.
    pub fn generate<R, F>(
        &self,
        spec: &LessonSpec,
        configs: &[GenerationConfig],
        only: Option<usize>,
        rng: &mut R,
        mut progress: F,
    ) -> Vec<GeneratedLesson>
    where
        R: Rng + ?Sized,
        F: FnMut(usize, &str),
    {
        let mut previous = CharacterSet::default();
        let mut lessons = Vec::new();

        for (index, (entry, config)) in spec.lessons.iter().zip(configs).enumerate() {
            let number = index + 1;
            let current = entry.characters();
            if current.is_empty() {
                debug!("lesson {} introduces no characters", number);
            }

            if only.map_or(true, |n| n == number) {
                let display_chars = entry.display_chars();
                info!("Processing lesson {}: {}", number, display_chars);
                progress(number, &display_chars);

                let text = self.lesson_text(number, &current, &previous, config, rng);
                if text.is_empty() {
                    warn!(
                        "lesson {} ({}) produced no text; check the order of letter, number and \
                         symbol-only lessons, or whether exclude_previous_letters is too strict",
                        number, display_chars
                    );
                }

                lessons.push(GeneratedLesson {
                    number,
                    display_chars,
                    text,
                });
            }

            if only.is_some_and(|n| n <= number) {
                break;
            }
            previous = previous.merged(&current);
        }

        lessons
    }
}
