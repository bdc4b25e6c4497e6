//! Input files: character list and dictionary
//!
//! # Components
//! - `charlist.rs`: LessonSpec parsing (lessons, `##` overrides, review lines)
//! - `dictionary.rs`: Dictionary loading, shuffling and truncation

pub mod charlist;
pub mod dictionary;

pub use charlist::LessonSpec;
pub use dictionary::Dictionary;

use crate::config::ConfigError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("{}: {source}", path.display())]
    Config { path: PathBuf, source: ConfigError },

    #[error("{} defines no lessons", path.display())]
    NoLessons { path: PathBuf },

    #[error("lesson {requested} requested, but lessons are numbered 1 to {available}")]
    LessonOutOfRange { requested: usize, available: usize },
}
