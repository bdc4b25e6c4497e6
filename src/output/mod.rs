//! Output formats for generated lessons
//!
//! # Components
//! - `plain.rs`: Plain text, one headed section per lesson
//! - `course.rs`: XML course document importable by KTouch

pub mod course;
pub mod plain;

use rand::Rng;

use crate::lesson::GeneratedLesson;

/// Base name used when no output path is given
pub const DEFAULT_BASE_NAME: &str = "ktouch-lessons";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    PlainText,
    Course,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::PlainText => "txt",
            OutputFormat::Course => "xml",
        }
    }

    /// Render `lessons` as a complete document
    ///
    /// Course documents draw their identifiers from `rng`.
    pub fn render<R: Rng + ?Sized>(
        self,
        lessons: &[GeneratedLesson],
        title_prefix: &str,
        rng: &mut R,
    ) -> String {
        match self {
            OutputFormat::PlainText => plain::render(lessons),
            OutputFormat::Course => course::render(lessons, title_prefix, rng),
        }
    }
}

/// File name used when `--output` is not given
///
/// A single selected lesson is named after its characters, e.g. `fj.txt`.
pub fn default_file_name(format: OutputFormat, single: Option<&GeneratedLesson>) -> String {
    let base = match single {
        Some(lesson) if lesson.display_chars == crate::input::charlist::REVIEW_LABEL => {
            "review".to_string()
        }
        Some(lesson) => lesson
            .display_chars
            .chars()
            .map(|c| match c {
                '/' | '\\' | '\0' => '_',
                c => c,
            })
            .collect(),
        None => DEFAULT_BASE_NAME.to_string(),
    };
    format!("{}.{}", base, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(chars: &str) -> GeneratedLesson {
        GeneratedLesson {
            number: 1,
            display_chars: chars.to_string(),
            text: "fj jf".to_string(),
        }
    }

    #[test]
    fn test_default_file_names() {
        assert_eq!(default_file_name(OutputFormat::Course, None), "ktouch-lessons.xml");
        assert_eq!(default_file_name(OutputFormat::PlainText, None), "ktouch-lessons.txt");
        assert_eq!(
            default_file_name(OutputFormat::PlainText, Some(&lesson("fj"))),
            "fj.txt"
        );
        assert_eq!(
            default_file_name(OutputFormat::Course, Some(&lesson("(review)"))),
            "review.xml"
        );
        assert_eq!(
            default_file_name(OutputFormat::PlainText, Some(&lesson("/?"))),
            "_?.txt"
        );
    }
}
