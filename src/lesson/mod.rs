//! Lesson generation: From character lists to practice text
//!
//! # Components
//! - `classify.rs`: CharacterSet (letters, digits, symbols with affinity)
//! - `synth.rs`: Combinatorial pseudo-words and numbers
//! - `select.rs`: Dictionary word selection, coverage and balancing
//! - `interleave.rs`: Symbol and number injection
//! - `assemble.rs`: Padding, rendering, truncation and wrapping
//! - `token.rs`: Token sequence model
//! - `generator.rs`: LessonGenerator, one lesson after another

pub mod assemble;
pub mod classify;
pub mod generator;
pub mod interleave;
pub mod select;
pub mod synth;
pub mod token;

pub use generator::{GeneratedLesson, LessonGenerator};
