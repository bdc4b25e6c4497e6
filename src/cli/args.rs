//! Command-line arguments

use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

use crate::config::ConfigOverrides;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "lessongen", version)]
#[command(about = "Generate progressive touch-typing lessons from a character list")]
pub struct Args {
    /// Character list: one lesson per line, optional `## key=value` options
    pub charslist: PathBuf,

    /// Dictionary, one word per line; synthesized words are used without it
    pub dictionary: Option<PathBuf>,

    /// Generate only this lesson (1-based); earlier lessons still count as learned
    #[arg(short = 'n', long)]
    pub lesson_number: Option<usize>,

    /// Output file [default: ktouch-lessons.xml/txt, or <characters>.xml/txt with -n]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write plain text instead of a KTouch course
    #[arg(short, long)]
    pub plain_text: bool,

    /// JSON file with default options
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Wrap lesson text at this width [default: 60]
    #[arg(long)]
    pub word_wrap: Option<usize>,

    /// Characters per lesson [default: 2000]
    #[arg(long)]
    pub characters_per_lesson: Option<usize>,

    /// Shortest dictionary word [default: 4]
    #[arg(long)]
    pub min_word_length: Option<usize>,

    /// Longest dictionary word [default: 100]
    #[arg(long)]
    pub max_word_length: Option<usize>,

    /// Symbols per word [default: 0.05]
    #[arg(long)]
    pub symbols_density: Option<f64>,

    /// Numbers per word [default: 0.3]
    #[arg(long)]
    pub numbers_density: Option<f64>,

    /// Share of symbols taken from previous lessons [default: 0.4]
    #[arg(long)]
    pub previous_symbols_fraction: Option<f64>,

    /// Longest generated number [default: 3]
    #[arg(long)]
    pub max_number_length: Option<usize>,

    /// Longest synthesized letter combination [default: 4]
    #[arg(long)]
    pub max_letters_combination_length: Option<usize>,

    /// Accepted for compatibility with older character lists; has no effect
    #[arg(long, hide = true)]
    pub previous_numbers_fraction: Option<f64>,

    /// Keep only the first N dictionary words
    #[arg(long)]
    pub max_dictionary_words: Option<usize>,

    /// Build numbers from previous digits as well
    #[arg(long)]
    pub include_previous_numbers: bool,

    /// Only use words made of the new letters
    #[arg(long)]
    pub exclude_previous_letters: bool,

    /// Keep dictionary order
    #[arg(long)]
    pub no_shuffle_dict: bool,

    /// Spread words evenly across the new letters
    #[arg(long)]
    pub balance_words: bool,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Prefix of course lesson titles
    #[arg(long, default_value = "Lesson")]
    pub title_prefix: String,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", value_parser = clap::value_parser!(LevelFilter))]
    pub log_level: LevelFilter,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

/// `Some(true)` for a given flag, `None` to leave the lower layer alone
fn flag(set: bool) -> Option<bool> {
    set.then_some(true)
}

impl Args {
    /// Options given on the command line, as a configuration layer
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            word_wrap: self.word_wrap,
            characters_per_lesson: self.characters_per_lesson,
            min_word_length: self.min_word_length,
            max_word_length: self.max_word_length,
            symbols_density: self.symbols_density,
            numbers_density: self.numbers_density,
            previous_symbols_fraction: self.previous_symbols_fraction,
            include_previous_numbers: flag(self.include_previous_numbers),
            exclude_previous_letters: flag(self.exclude_previous_letters),
            max_number_length: self.max_number_length,
            max_letters_combination_length: self.max_letters_combination_length,
            shuffle_dict: self.no_shuffle_dict.then_some(false),
            balance_words: flag(self.balance_words),
            max_dictionary_words: self.max_dictionary_words,
        }
    }

    pub fn format(&self) -> OutputFormat {
        if self.plain_text {
            OutputFormat::PlainText
        } else {
            OutputFormat::Course
        }
    }
}
