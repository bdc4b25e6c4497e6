//! Plain text lessons

use crate::lesson::GeneratedLesson;

const RULE_WIDTH: usize = 60;

/// Header, rule, text and a blank line for every lesson
pub fn render(lessons: &[GeneratedLesson]) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut out = String::new();
    for lesson in lessons {
        out.push_str(&format!("New characters: {}\n", lesson.display_chars));
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&lesson.text);
        out.push_str("\n\n");
    }
    out
}
