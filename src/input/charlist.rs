//! Character list parsing
//!
//! One lesson per line, e.g.
//!
//! ```text
//! ## min_word_length=3, balance_words
//! jf
//! èy
//! ABCDEFGHIJKLMNOPQRSTUVWXYZ ## symbols_density=0
//! LR"$
//! LL(RR)
//! @@
//! ```
//!
//! - A first line starting with `##` sets options for the whole run
//! - `##` after the characters sets options for that lesson only
//! - `@@` alone is a review lesson with no new characters
//! - Blank lines are ignored

use std::fs;
use std::path::Path;

use super::InputError;
use crate::config::{ConfigError, ConfigOverrides, GenerationConfig, Origin};
use crate::lesson::classify::{strip_markers, CharacterSet};

/// Line content marking a review lesson
pub const REVIEW_SENTINEL: &str = "@@";
/// Start of an inline option block
pub const OPTIONS_PREFIX: &str = "##";
/// Shown instead of new characters for review lessons
pub const REVIEW_LABEL: &str = "(review)";

/// One line of the character list
#[derive(Clone, Debug, PartialEq)]
pub struct LessonEntry {
    /// 1-based line in the source file
    pub line: usize,
    /// Characters as written, markers included
    pub raw_text: String,
    pub review: bool,
    pub overrides: ConfigOverrides,
}

impl LessonEntry {
    /// Characters this lesson introduces
    pub fn characters(&self) -> CharacterSet {
        if self.review {
            CharacterSet::default()
        } else {
            CharacterSet::classify(&self.raw_text)
        }
    }

    /// New characters with position markers removed
    pub fn display_chars(&self) -> String {
        if self.review {
            REVIEW_LABEL.to_string()
        } else {
            strip_markers(&self.raw_text)
        }
    }
}

/// Ordered lessons plus the run-wide option layer
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LessonSpec {
    pub global: ConfigOverrides,
    /// Line of the run-wide option line, if any
    pub global_line: Option<usize>,
    pub lessons: Vec<LessonEntry>,
}

impl LessonSpec {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut spec = LessonSpec::default();
        let mut first = true;

        for (index, line) in text.lines().enumerate() {
            let number = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            let (chars, options) = match line.find(OPTIONS_PREFIX) {
                Some(at) => (&line[..at], Some(&line[at + OPTIONS_PREFIX.len()..])),
                None => (line, None),
            };
            let chars = chars.trim();
            let overrides = match options {
                Some(block) => ConfigOverrides::parse(block, Origin::Line(number))?,
                None => ConfigOverrides::default(),
            };

            if chars.is_empty() {
                if !first {
                    return Err(ConfigError::Invalid {
                        reason: "options without characters; only the first line may set run-wide options"
                            .into(),
                        origin: Origin::Line(number),
                    });
                }
                spec.global = overrides;
                spec.global_line = Some(number);
            } else {
                if let Some(key) = overrides.run_wide_key() {
                    return Err(ConfigError::Invalid {
                        reason: format!(
                            "`{}` applies to the whole run; set it on the first line",
                            key
                        ),
                        origin: Origin::Line(number),
                    });
                }
                spec.lessons.push(LessonEntry {
                    line: number,
                    raw_text: chars.to_string(),
                    review: chars == REVIEW_SENTINEL,
                    overrides,
                });
            }
            first = false;
        }

        Ok(spec)
    }

    pub fn load(path: &Path) -> Result<Self, InputError> {
        let content = fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let spec = Self::parse(&content).map_err(|source| InputError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        if spec.lessons.is_empty() {
            return Err(InputError::NoLessons {
                path: path.to_path_buf(),
            });
        }
        Ok(spec)
    }

    /// Run-wide configuration: `base` with the global line applied
    pub fn run_config(&self, base: &GenerationConfig) -> GenerationConfig {
        base.with_overrides(&self.global)
    }

    /// Validated configuration for every lesson, in order
    ///
    /// `base` is expected to be validated by the caller already.
    pub fn resolve(&self, base: &GenerationConfig) -> Result<Vec<GenerationConfig>, ConfigError> {
        let run = self.run_config(base);
        if let Some(line) = self.global_line {
            run.validate(&Origin::Line(line))?;
        }

        self.lessons
            .iter()
            .map(|entry| -> Result<GenerationConfig, ConfigError> {
                if entry.overrides.is_empty() {
                    return Ok(run.clone());
                }
                let config = run.with_overrides(&entry.overrides);
                config.validate(&Origin::Line(entry.line))?;
                Ok(config)
            })
            .collect()
    }

    /// Check a 1-based lesson number against the list
    pub fn check_lesson_number(&self, requested: usize) -> Result<(), InputError> {
        if requested == 0 || requested > self.lessons.len() {
            return Err(InputError::LessonOutOfRange {
                requested,
                available: self.lessons.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lessons_and_options() {
        let spec = LessonSpec::parse(
            "## min_word_length=2\n\njf\nky ## symbols_density=0, balance_words\n@@\nLL(RR)\n",
        )
        .unwrap();

        assert_eq!(spec.global.min_word_length, Some(2));
        assert_eq!(spec.global_line, Some(1));
        assert_eq!(spec.lessons.len(), 4);

        assert_eq!(spec.lessons[0].raw_text, "jf");
        assert_eq!(spec.lessons[0].line, 3);
        assert_eq!(spec.lessons[1].raw_text, "ky");
        assert_eq!(spec.lessons[1].overrides.symbols_density, Some(0.0));
        assert_eq!(spec.lessons[1].overrides.balance_words, Some(true));
        assert!(spec.lessons[2].review);
        assert_eq!(spec.lessons[2].display_chars(), REVIEW_LABEL);
        assert!(spec.lessons[2].characters().is_empty());
        assert_eq!(spec.lessons[3].display_chars(), "()");
    }

    #[test]
    fn test_options_only_allowed_first() {
        let err = LessonSpec::parse("jf\n## word_wrap=10\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { origin: Origin::Line(2), .. }));
    }

    #[test]
    fn test_dictionary_options_rejected_per_lesson() {
        let err = LessonSpec::parse("jf\nky ## no_shuffle_dict\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 2: `shuffle_dict` applies to the whole run; set it on the first line"
        );

        let err = LessonSpec::parse("jf ## max_dictionary_words=10\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { origin: Origin::Line(1), .. }));

        let spec = LessonSpec::parse("## max_dictionary_words=10, no_shuffle_dict\njf\n").unwrap();
        assert_eq!(spec.global.max_dictionary_words, Some(10));
    }

    #[test]
    fn test_resolve_layers_and_validates() {
        let spec = LessonSpec::parse("## word_wrap=40\njf\nky ## word_wrap=20\n").unwrap();
        let configs = spec.resolve(&GenerationConfig::default()).unwrap();
        assert_eq!(configs[0].word_wrap, 40);
        assert_eq!(configs[1].word_wrap, 20);

        let spec = LessonSpec::parse("jf\nky ## min_word_length=9, max_word_length=3\n").unwrap();
        let err = spec.resolve(&GenerationConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { origin: Origin::Line(2), .. }));
    }

    #[test]
    fn test_malformed_option_reports_line() {
        let err = LessonSpec::parse("jf\nky ## word_wrap=x\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 2: invalid value `x` for `word_wrap` (expected a non-negative integer)"
        );
    }

    #[test]
    fn test_lesson_number_range() {
        let spec = LessonSpec::parse("jf\nky\n").unwrap();
        assert!(spec.check_lesson_number(2).is_ok());
        assert!(spec.check_lesson_number(0).is_err());
        assert!(spec.check_lesson_number(3).is_err());
    }
}
