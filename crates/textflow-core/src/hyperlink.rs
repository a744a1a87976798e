//! Hyperlink types.
//!
//! Provides [`WebLink`] for URL spans detected in page text by the page
//! collaborator, and [`Link`] for a link attached to a text element.

/// A URL detected in the page's text stream.
///
/// Spans `char_count` characters starting at page character index
/// `start_char_index`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WebLink {
    pub start_char_index: usize,
    pub char_count: usize,
    pub url: String,
}

impl WebLink {
    pub fn new(start_char_index: usize, char_count: usize, url: &str) -> Self {
        Self {
            start_char_index,
            char_count,
            url: url.to_string(),
        }
    }

    /// Whether the page character at `index` lies inside this link.
    pub fn covers(&self, index: usize) -> bool {
        index
            .checked_sub(self.start_char_index)
            .is_some_and(|offset| offset < self.char_count)
    }
}

/// First web link covering the page character at `index`.
pub fn web_link_at(links: &[WebLink], index: usize) -> Option<&WebLink> {
    links.iter().find(|link| link.covers(index))
}

/// A hyperlink attached to a text element.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Link {
    pub url: String,
    /// Text shown for the link; empty when it is the element text itself.
    pub tooltip: String,
}

impl Link {
    pub fn new(url: &str, tooltip: &str) -> Self {
        Self {
            url: url.to_string(),
            tooltip: tooltip.to_string(),
        }
    }
}
