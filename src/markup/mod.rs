//! Markup rendering for backend text
//!
//! The generative backend answers with lightly formatted text: `**bold**`
//! spans, `*` bullet lines and plain newlines. [`transform`] turns such a
//! blob into a flat list of [`Segment`]s that a presentation layer can render
//! however it likes; [`render_html`] and [`to_plain_text`] cover the two
//! common targets.
//!
//! Rules, in order:
//!
//! 1. `**text**` becomes [`Segment::Bold`]. Pairs are matched left to right,
//!    shortest first, and never span a newline. Unmatched markers stay
//!    literal.
//! 2. With [`TransformOptions::bullets`], a line starting with a single `*`
//!    becomes [`Segment::Bullet`] holding the rest of the line up to its
//!    first bold span; bold spans and text after it follow as their own
//!    segments.
//! 3. Every `\n` becomes [`Segment::Break`].
//!
//! The transform is total: any input, including empty or unbalanced text,
//! yields segments rather than an error.

mod scanner;

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

const BULLET_GLYPH: &str = "•";

/// One unit of rendered markup
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Segment {
    PlainText(String),
    Bold(String),
    Bullet(String),
    Break,
}

impl Segment {
    pub fn is_break(&self) -> bool {
        matches!(self, Segment::Break)
    }

    /// Text carried by the segment, empty for breaks
    pub fn text(&self) -> &str {
        match self {
            Segment::PlainText(s) | Segment::Bold(s) | Segment::Bullet(s) => s,
            Segment::Break => "",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOptions {
    /// Render `*` lines as bullet items (steps view only)
    pub bullets: bool,
}

impl TransformOptions {
    pub const PLAIN: Self = Self { bullets: false };
    pub const WITH_BULLETS: Self = Self { bullets: true };
}

/// Convert raw backend text into display segments.
pub fn transform(raw: &str, options: TransformOptions) -> Vec<Segment> {
    let mut segments = Vec::new();

    for (index, line) in raw.split('\n').enumerate() {
        if index > 0 {
            segments.push(Segment::Break);
        }
        let line = line.strip_suffix('\r').unwrap_or(line);

        if options.bullets {
            if let Some(item) = scanner::bullet_item(line) {
                scanner::scan_bullet(item, &mut segments);
                continue;
            }
        }

        scanner::scan_inline(line, &mut segments);
    }

    segments
}

/// Flatten segments back into unmarked text.
///
/// Bold spans lose their markers, bullets keep their glyph and breaks become
/// `\n`. Feeding the result back into [`transform`] never produces bold
/// spans.
pub fn to_plain_text(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::PlainText(s) | Segment::Bold(s) => out.push_str(s),
            Segment::Bullet(s) => {
                out.push_str(BULLET_GLYPH);
                out.push(' ');
                out.push_str(s);
            }
            Segment::Break => out.push('\n'),
        }
    }
    out
}

/// Render segments as an HTML fragment.
///
/// Text is emitted verbatim: backend output is trusted and this is not a
/// sanitizer.
pub fn render_html(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::PlainText(s) => out.push_str(s),
            Segment::Bold(s) => {
                let _ = write!(out, "<strong>{s}</strong>");
            }
            Segment::Bullet(s) => {
                let _ = write!(out, "{BULLET_GLYPH} {s}");
            }
            Segment::Break => out.push_str("<br />"),
        }
    }
    out
}
