//! Configuration errors
//!
//! A malformed option is never silently replaced by its default: every
//! problem aborts the run before the first lesson is generated.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Where an option value came from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Origin {
    File(PathBuf),
    CommandLine,
    /// 1-based line of the character list
    Line(usize),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::File(path) => write!(f, "config file {}", path.display()),
            Origin::CommandLine => f.write_str("command line"),
            Origin::Line(line) => write!(f, "line {}", line),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{origin}: unknown option `{key}`")]
    UnknownKey { key: String, origin: Origin },

    #[error("{origin}: invalid value `{value}` for `{key}` (expected {expected})")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
        origin: Origin,
    },

    #[error("{origin}: option `{key}` needs a value")]
    MissingValue { key: String, origin: Origin },

    #[error("{origin}: {reason}")]
    Invalid { reason: String, origin: Origin },

    #[error("cannot read config file {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("malformed config file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}
