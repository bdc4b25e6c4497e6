//! Generation configuration
//!
//! # Components
//! - `GenerationConfig`: every tunable parameter, with defaults
//! - `ConfigOverrides`: a partial layer (config file, command line, `##` lines)
//! - `error.rs`: ConfigError and the Origin of a value
//!
//! Layers are resolved lowest first: defaults, config file, command line,
//! the global `##` line, then the lesson's own `##` block.

pub mod error;

pub use error::{ConfigError, Origin};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Longest synthesized word or number accepted; enumeration grows as alphabet^length
pub const MAX_SYNTHESIS_LENGTH: usize = 8;

/// Resolved parameters for generating one lesson
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Wrap lesson text at this width
    pub word_wrap: usize,
    /// Characters in a lesson
    pub characters_per_lesson: usize,
    /// Shortest dictionary word accepted (inclusive)
    pub min_word_length: usize,
    /// Longest dictionary word accepted (inclusive)
    pub max_word_length: usize,
    /// Symbols per word
    pub symbols_density: f64,
    /// Numbers per word
    pub numbers_density: f64,
    /// Share of symbols taken from previous lessons
    pub previous_symbols_fraction: f64,
    /// Build numbers from previous digits as well
    pub include_previous_numbers: bool,
    /// Only accept words made of the new letters
    pub exclude_previous_letters: bool,
    pub max_number_length: usize,
    /// Longest synthesized pseudo-word (first lessons only)
    pub max_letters_combination_length: usize,
    /// Shuffle the dictionary once at load time
    pub shuffle_dict: bool,
    /// Spread selected words evenly across the new letters
    pub balance_words: bool,
    /// Keep only the first N dictionary words
    pub max_dictionary_words: Option<usize>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            word_wrap: 60,
            characters_per_lesson: 2000,
            min_word_length: 4,
            max_word_length: 100,
            symbols_density: 0.05,
            numbers_density: 0.3,
            previous_symbols_fraction: 0.4,
            include_previous_numbers: false,
            exclude_previous_letters: false,
            max_number_length: 3,
            max_letters_combination_length: 4,
            shuffle_dict: true,
            balance_words: false,
            max_dictionary_words: None,
        }
    }
}

/// A partial configuration layer
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub word_wrap: Option<usize>,
    pub characters_per_lesson: Option<usize>,
    pub min_word_length: Option<usize>,
    pub max_word_length: Option<usize>,
    pub symbols_density: Option<f64>,
    pub numbers_density: Option<f64>,
    pub previous_symbols_fraction: Option<f64>,
    pub include_previous_numbers: Option<bool>,
    pub exclude_previous_letters: Option<bool>,
    pub max_number_length: Option<usize>,
    pub max_letters_combination_length: Option<usize>,
    pub shuffle_dict: Option<bool>,
    pub balance_words: Option<bool>,
    pub max_dictionary_words: Option<usize>,
}

const INTEGER: &str = "a non-negative integer";
const NUMBER: &str = "a number";
const FLAG: &str = "true or false";

fn parse_value<T: FromStr>(
    key: &str,
    value: Option<&str>,
    expected: &'static str,
    origin: &Origin,
) -> Result<T, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingValue {
        key: key.to_string(),
        origin: origin.clone(),
    })?;
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected,
        origin: origin.clone(),
    })
}

/// A bare key means true
fn parse_flag(key: &str, value: Option<&str>, origin: &Origin) -> Result<bool, ConfigError> {
    match value.map(|v| v.to_ascii_lowercase()).as_deref() {
        None | Some("true") | Some("yes") | Some("1") => Ok(true),
        Some("false") | Some("no") | Some("0") => Ok(false),
        Some(other) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: other.to_string(),
            expected: FLAG,
            origin: origin.clone(),
        }),
    }
}

impl ConfigOverrides {
    /// Parse a `key=value, key, ...` block
    pub fn parse(block: &str, origin: Origin) -> Result<Self, ConfigError> {
        let mut overrides = ConfigOverrides::default();

        for item in block.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, value) = match item.split_once('=') {
                Some((key, value)) => (key.trim(), Some(value.trim())),
                None => (item, None),
            };
            overrides.set(key, value, &origin)?;
        }

        Ok(overrides)
    }

    /// Load a JSON layer, e.g. `{"word_wrap": 72, "balance_words": true}`
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Set one option by name; `-` and `_` are interchangeable in names
    pub fn set(&mut self, key: &str, value: Option<&str>, origin: &Origin) -> Result<(), ConfigError> {
        let key = key.trim_start_matches('-').replace('-', "_");

        match key.as_str() {
            "word_wrap" => self.word_wrap = Some(parse_value(&key, value, INTEGER, origin)?),
            "characters_per_lesson" => {
                self.characters_per_lesson = Some(parse_value(&key, value, INTEGER, origin)?)
            }
            "min_word_length" => {
                self.min_word_length = Some(parse_value(&key, value, INTEGER, origin)?)
            }
            "max_word_length" => {
                self.max_word_length = Some(parse_value(&key, value, INTEGER, origin)?)
            }
            "symbols_density" => {
                self.symbols_density = Some(parse_value(&key, value, NUMBER, origin)?)
            }
            "numbers_density" => {
                self.numbers_density = Some(parse_value(&key, value, NUMBER, origin)?)
            }
            "previous_symbols_fraction" => {
                self.previous_symbols_fraction = Some(parse_value(&key, value, NUMBER, origin)?)
            }
            "include_previous_numbers" => {
                self.include_previous_numbers = Some(parse_flag(&key, value, origin)?)
            }
            "exclude_previous_letters" => {
                self.exclude_previous_letters = Some(parse_flag(&key, value, origin)?)
            }
            "max_number_length" => {
                self.max_number_length = Some(parse_value(&key, value, INTEGER, origin)?)
            }
            "max_letters_combination_length" => {
                self.max_letters_combination_length =
                    Some(parse_value(&key, value, INTEGER, origin)?)
            }
            "shuffle_dict" => self.shuffle_dict = Some(parse_flag(&key, value, origin)?),
            "no_shuffle_dict" => self.shuffle_dict = Some(!parse_flag(&key, value, origin)?),
            "balance_words" => self.balance_words = Some(parse_flag(&key, value, origin)?),
            "max_dictionary_words" => {
                self.max_dictionary_words = Some(parse_value(&key, value, INTEGER, origin)?)
            }
            _ => {
                return Err(ConfigError::UnknownKey {
                    key,
                    origin: origin.clone(),
                })
            }
        }

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == ConfigOverrides::default()
    }

    /// First option set here that only takes effect when the dictionary is loaded
    pub fn run_wide_key(&self) -> Option<&'static str> {
        if self.shuffle_dict.is_some() {
            Some("shuffle_dict")
        } else if self.max_dictionary_words.is_some() {
            Some("max_dictionary_words")
        } else {
            None
        }
    }
}

macro_rules! apply_overrides {
    ($config:ident, $overrides:ident, $($field:ident),* $(,)?) => {
        $(
            if let Some(value) = $overrides.$field {
                $config.$field = value;
            }
        )*
    };
}

impl GenerationConfig {
    /// New configuration with every option set in `overrides` replaced
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> GenerationConfig {
        let mut config = self.clone();
        apply_overrides!(
            config,
            overrides,
            word_wrap,
            characters_per_lesson,
            min_word_length,
            max_word_length,
            symbols_density,
            numbers_density,
            previous_symbols_fraction,
            include_previous_numbers,
            exclude_previous_letters,
            max_number_length,
            max_letters_combination_length,
            shuffle_dict,
            balance_words,
        );
        if overrides.max_dictionary_words.is_some() {
            config.max_dictionary_words = overrides.max_dictionary_words;
        }
        config
    }

    /// Check value ranges, naming `origin` in the error
    pub fn validate(&self, origin: &Origin) -> Result<(), ConfigError> {
        let invalid = |reason: String| -> Result<(), ConfigError> {
            Err(ConfigError::Invalid {
                reason,
                origin: origin.clone(),
            })
        };

        if self.word_wrap == 0 {
            return invalid("word_wrap must be greater than 0".into());
        }
        if self.characters_per_lesson == 0 {
            return invalid("characters_per_lesson must be greater than 0".into());
        }
        if self.min_word_length > self.max_word_length {
            return invalid(format!(
                "min_word_length ({}) exceeds max_word_length ({})",
                self.min_word_length, self.max_word_length
            ));
        }
        for (name, density) in [
            ("symbols_density", self.symbols_density),
            ("numbers_density", self.numbers_density),
        ] {
            if !density.is_finite() || density < 0.0 {
                return invalid(format!("{} must be a non-negative number", name));
            }
        }
        if !(0.0..=1.0).contains(&self.previous_symbols_fraction) {
            return invalid("previous_symbols_fraction must be between 0 and 1".into());
        }
        for (name, length) in [
            ("max_number_length", self.max_number_length),
            (
                "max_letters_combination_length",
                self.max_letters_combination_length,
            ),
        ] {
            if length == 0 || length > MAX_SYNTHESIS_LENGTH {
                return invalid(format!(
                    "{} must be between 1 and {}",
                    name, MAX_SYNTHESIS_LENGTH
                ));
            }
        }

        Ok(())
    }
}
