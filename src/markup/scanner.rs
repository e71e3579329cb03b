//! Line-oriented scanner behind [`super::transform`]

use super::Segment;

const BOLD_MARKER: &str = "**";
const BULLET_MARKER: char = '*';

/// Scan one line (no `\n`) into plain and bold segments.
///
/// Pairs of `**` are matched left to right, shortest first. An opener
/// without a closer on the same line stays literal, along with the rest of
/// the line.
pub(crate) fn scan_inline(line: &str, out: &mut Vec<Segment>) {
    let mut plain = String::new();
    let mut rest = line;

    while let Some(open) = rest.find(BOLD_MARKER) {
        let after_open = &rest[open + BOLD_MARKER.len()..];
        let Some(close) = after_open.find(BOLD_MARKER) else {
            break;
        };

        plain.push_str(&rest[..open]);
        if !plain.is_empty() {
            out.push(Segment::PlainText(std::mem::take(&mut plain)));
        }
        out.push(Segment::Bold(after_open[..close].to_string()));
        rest = &after_open[close + BOLD_MARKER.len()..];
    }

    plain.push_str(rest);
    if !plain.is_empty() {
        out.push(Segment::PlainText(plain));
    }
}

/// If `line` is a bullet item, return the item text.
///
/// A bullet line starts (after optional indentation) with a single `*`
/// that is not part of a `**` marker.
pub(crate) fn bullet_item(line: &str) -> Option<&str> {
    let content = line.trim_start_matches([' ', '\t']);
    let rest = content.strip_prefix(BULLET_MARKER)?;
    if rest.starts_with(BULLET_MARKER) {
        return None;
    }
    Some(rest.trim_start())
}

/// Scan a bullet item into a [`Segment::Bullet`] holding the leading plain
/// run, followed by the rest of the item's inline segments
pub(crate) fn scan_bullet(item: &str, out: &mut Vec<Segment>) {
    let mut inline = Vec::new();
    scan_inline(item, &mut inline);

    let mut rest = inline.into_iter().peekable();
    let text = match rest.next_if(|s| matches!(s, Segment::PlainText(_))) {
        Some(Segment::PlainText(s)) => s,
        _ => String::new(),
    };
    out.push(Segment::Bullet(text));
    out.extend(rest);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(line: &str) -> Vec<Segment> {
        let mut out = Vec::new();
        scan_inline(line, &mut out);
        out
    }

    #[test]
    fn test_scan_plain_line() {
        assert_eq!(inline("A classic dish."), vec![Segment::PlainText("A classic dish.".into())]);
        assert!(inline("").is_empty());
    }

    #[test]
    fn test_scan_bold_pairs_left_to_right() {
        assert_eq!(
            inline("**a** and **b**"),
            vec![
                Segment::Bold("a".into()),
                Segment::PlainText(" and ".into()),
                Segment::Bold("b".into()),
            ]
        );
    }

    #[test]
    fn test_scan_non_greedy() {
        assert_eq!(
            inline("***a***"),
            vec![Segment::Bold("*a".into()), Segment::PlainText("*".into())]
        );
    }

    #[test]
    fn test_scan_unmatched_marker_is_literal() {
        assert_eq!(
            inline("**a** then **b"),
            vec![Segment::Bold("a".into()), Segment::PlainText(" then **b".into())]
        );
        assert_eq!(inline("**"), vec![Segment::PlainText("**".into())]);
    }

    #[test]
    fn test_scan_empty_bold() {
        assert_eq!(inline("****"), vec![Segment::Bold(String::new())]);
    }

    #[test]
    fn test_bullet_item_detection() {
        assert_eq!(bullet_item("*Boil water"), Some("Boil water"));
        assert_eq!(bullet_item("* Boil water"), Some("Boil water"));
        assert_eq!(bullet_item("  *indented"), Some("indented"));
        assert_eq!(bullet_item("**Step 1**"), None);
        assert_eq!(bullet_item("***x"), None);
        assert_eq!(bullet_item("no marker"), None);
        assert_eq!(bullet_item("mid * line"), None);
        assert_eq!(bullet_item("*"), Some(""));
    }

    #[test]
    fn test_scan_bullet_keeps_bold_spans() {
        let mut out = Vec::new();
        scan_bullet("Add **salt** now", &mut out);
        assert_eq!(
            out,
            vec![
                Segment::Bullet("Add ".into()),
                Segment::Bold("salt".into()),
                Segment::PlainText(" now".into()),
            ]
        );

        let mut out = Vec::new();
        scan_bullet("**Whisk** eggs", &mut out);
        assert_eq!(
            out,
            vec![
                Segment::Bullet(String::new()),
                Segment::Bold("Whisk".into()),
                Segment::PlainText(" eggs".into()),
            ]
        );
    }
}
