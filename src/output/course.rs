//! KTouch course document
//!
//! ```text
//! <?xml version="1.0"?>
//! <course>
//!     <id>{uuid}</id>
//!     <title>KTouch-Generator-xxxxxxxx</title>
//!     ...
//!     <lessons>
//!         <lesson>...</lesson>
//!     </lessons>
//! </course>
//! ```

use rand::Rng;
use uuid::{Builder, Uuid};

use crate::lesson::GeneratedLesson;

/// Random v4 identifier drawn from the run RNG, so seeded runs are reproducible
fn next_id<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// Escape the characters KTouch rejects in element text
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;")
}

pub fn render<R: Rng + ?Sized>(lessons: &[GeneratedLesson], title_prefix: &str, rng: &mut R) -> String {
    let course_id = next_id(rng).to_string();
    let mut out = String::new();

    out.push_str("<?xml version=\"1.0\"?>\n<course>\n");
    out.push_str(&format!("    <id>{{{}}}</id>\n", course_id));
    out.push_str(&format!("    <title>KTouch-Generator-{}</title>\n", &course_id[..8]));
    out.push_str("    <description></description>\n");
    out.push_str("    <keyboardLayout></keyboardLayout>\n");
    out.push_str("    <lessons>\n");

    for lesson in lessons {
        let chars = escape(&lesson.display_chars);
        out.push_str("        <lesson>\n");
        out.push_str(&format!("            <id>{{{}}}</id>\n", next_id(rng)));
        out.push_str(&format!(
            "            <title>{} {}: {}</title>\n",
            escape(title_prefix),
            lesson.number,
            chars
        ));
        out.push_str(&format!("            <newCharacters>{}</newCharacters>\n", chars));
        out.push_str(&format!("            <text>{}</text>\n", escape(&lesson.text)));
        out.push_str("        </lesson>\n");
    }

    out.push_str("    </lessons>\n</course>\n");
    out
}
