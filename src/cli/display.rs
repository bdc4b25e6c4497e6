//! Terminal progress display
//!
//! Features:
//! - One colored line per processed lesson
//! - Run summary with empty lessons highlighted
//!
//! Writes to stdout; logging goes to stderr.

use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, stdout, Write};
use std::path::Path;

use crate::lesson::GeneratedLesson;

/// Terminal progress reporter
pub struct Display {
    /// Print nothing at all
    quiet: bool,
}

impl Display {
    pub fn new(quiet: bool) -> Self {
        Display { quiet }
    }

    /// Announce a lesson before it is generated
    pub fn show_lesson(&self, number: usize, total: usize, chars: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stdout = stdout();

        execute!(
            stdout,
            SetForegroundColor(Color::Cyan),
            Print(format!("Processing lesson {}/{}: ", number, total)),
            ResetColor,
            Print(chars),
            Print("\n")
        )?;
        stdout.flush()
    }

    /// Final line: lessons written, empty lessons and where they went
    pub fn show_summary(&self, lessons: &[GeneratedLesson], path: &Path) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stdout = stdout();
        let empty: Vec<String> = lessons
            .iter()
            .filter(|l| l.is_empty())
            .map(|l| l.number.to_string())
            .collect();

        execute!(
            stdout,
            SetForegroundColor(Color::Green),
            Print(format!("Wrote {} lessons to {}\n", lessons.len(), path.display())),
            ResetColor
        )?;
        if !empty.is_empty() {
            execute!(
                stdout,
                SetForegroundColor(Color::Yellow),
                Print(format!("Empty lessons: {}\n", empty.join(", "))),
                ResetColor
            )?;
        }
        stdout.flush()
    }
}
