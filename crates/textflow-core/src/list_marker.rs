//! List-item marker detection.

/// Glyphs that open an unordered list item.
pub const LIST_BULLETS: [char; 32] = [
    '•', '‣', '∙', '●', '▪', '▫', '■', '□', '▣', '▤', '▥', '▦', '▧', '▨', '▩', '→', '⇒', '➤',
    '▶', '➔', '➢', '♦', '◆', '◇', '○', '✓', '✔', '✦', '★', '✧', '❖', '❑',
];

/// Prefixes that open an ordered list item, tried in this order.
pub const ORDERED_MARKERS: [&str; 55] = [
    "i.", "ii.", "iii.", "iv.", "v.", "vi.", "vii.", "viii.", "ix.", "x.", "1.", "2.", "3.", "4.",
    "5.", "6.", "7.", "8.", "9.", "10.", "1)", "2)", "3)", "4)", "5)", "6)", "7)", "8)", "9)",
    "10)", "1-", "2-", "3-", "4-", "5-", "a.", "b.", "c.", "d.", "e.", "A.", "B.", "C.", "D.",
    "E.", "a)", "b)", "c)", "d)", "e)", "A)", "B)", "C)", "D)", "E)",
];

/// A detected list-item marker.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListMarker {
    pub ordered: bool,
    /// The marker as it appears, with one trailing space when text follows it.
    pub bullet: String,
}

/// Detect whether `text` begins a list item.
///
/// A marker counts only when it stands alone or is followed by whitespace.
/// Ordered prefixes are tried in table order and the first one that matches
/// the start of the text decides the outcome.
pub fn list_marker(text: &str) -> Option<ListMarker> {
    let text = text.trim();
    let first = text.chars().next()?;

    if LIST_BULLETS.contains(&first) {
        let rest = &text[first.len_utf8()..];
        return marker_followed_by_space(rest).then(|| ListMarker {
            ordered: false,
            bullet: with_separator(first.to_string(), rest),
        });
    }

    let tag = ORDERED_MARKERS.iter().find(|tag| text.starts_with(**tag))?;
    let rest = &text[tag.len()..];
    marker_followed_by_space(rest).then(|| ListMarker {
        ordered: true,
        bullet: with_separator(tag.to_string(), rest),
    })
}

fn marker_followed_by_space(rest: &str) -> bool {
    rest.chars().next().is_none_or(char::is_whitespace)
}

fn with_separator(mut marker: String, rest: &str) -> String {
    if !rest.is_empty() {
        marker.push(' ');
    }
    marker
}
