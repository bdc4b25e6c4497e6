//! CLI Interface: Arguments and terminal progress
//!
//! # Components
//! - `args.rs`: Command-line arguments and the option layer they form
//! - `display.rs`: Colored per-lesson progress and run summary

pub mod args;
pub mod display;

pub use args::Args;
pub use display::Display;
