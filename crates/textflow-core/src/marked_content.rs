//! Page-wide marked-content id to text map.

use std::collections::BTreeMap;

use crate::element::TextElement;

/// Text painted under each marked-content id on one page.
///
/// Built once after run assembly and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct McidTextMap {
    entries: BTreeMap<u32, String>,
}

impl McidTextMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the fragments of every element, in element order.
    pub fn from_elements(elements: &[TextElement]) -> Self {
        let mut map = Self::new();
        for element in elements {
            for (mcid, text) in element.marked_content() {
                map.append(*mcid, text);
            }
        }
        map
    }

    /// Append `text` to the fragment for `mcid`.
    pub fn append(&mut self, mcid: u32, text: &str) {
        self.entries.entry(mcid).or_default().push_str(text);
    }

    pub fn get(&self, mcid: u32) -> Option<&str> {
        self.entries.get(&mcid).map(String::as_str)
    }

    /// Concatenate the fragments for `mcids` in the given order.
    ///
    /// Ids with no text contribute nothing.
    pub fn text_for(&self, mcids: &[u32]) -> String {
        mcids.iter().filter_map(|id| self.get(*id)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.entries.iter().map(|(id, text)| (*id, text.as_str()))
    }
}

impl FromIterator<(u32, String)> for McidTextMap {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (mcid, text) in iter {
            map.append(mcid, &text);
        }
        map
    }
}
