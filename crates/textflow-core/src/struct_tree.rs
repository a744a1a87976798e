//! Structure tree nodes and accessible-text resolution.
//!
//! Tagged PDFs carry a logical structure tree whose nodes point at page
//! content through marked-content ids. When a node has no authored
//! `/ActualText`, its text is recovered from the page's [`McidTextMap`].

use std::fmt;

use crate::geometry::BBox;
use crate::marked_content::McidTextMap;

/// A node in the document structure tree.
///
/// ```
/// use textflow_core::{McidTextMap, StructElement};
///
/// let map: McidTextMap = [(3, "Hello ".to_string()), (7, "World".to_string())]
///     .into_iter()
///     .collect();
/// let para = StructElement::new("P").with_mcids(vec![3, 7]);
/// assert_eq!(para.resolve_actual_text(&map).as_deref(), Some("Hello World"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StructElement {
    /// The structure type or role (e.g., "H1", "P", "Table", "Figure").
    pub element_type: String,
    /// Marked-content ids linking the node to page content.
    pub mcids: Vec<u32>,
    /// Alternative text (`/Alt`).
    pub alt_text: Option<String>,
    /// Replacement text (`/ActualText`).
    pub actual_text: Option<String>,
    /// Language (`/Lang`, e.g., "en-US").
    pub lang: Option<String>,
    /// Title (`/T`).
    pub title: Option<String>,
    pub bbox: Option<BBox>,
    pub children: Vec<StructElement>,
    /// Page index (0-based) this node belongs to, if known.
    pub page_index: Option<usize>,
}

impl StructElement {
    pub fn new(element_type: &str) -> Self {
        Self {
            element_type: element_type.to_string(),
            ..Self::default()
        }
    }

    pub fn with_mcids(mut self, mcids: Vec<u32>) -> Self {
        self.mcids = mcids;
        self
    }

    pub fn with_child(mut self, child: StructElement) -> Self {
        self.children.push(child);
        self
    }

    /// Authored actual text, if present and non-empty.
    fn authored_actual_text(&self) -> Option<&str> {
        self.actual_text.as_deref().filter(|t| !t.is_empty())
    }

    /// The node's actual text, falling back to the text of its marked-content ids.
    ///
    /// Returns `None` when nothing was authored and none of the ids has text.
    pub fn resolve_actual_text(&self, map: &McidTextMap) -> Option<String> {
        if let Some(text) = self.authored_actual_text() {
            return Some(text.to_string());
        }
        let text = map.text_for(&self.mcids);
        (!text.is_empty()).then_some(text)
    }

    /// Accessible description of this node alone.
    pub fn describe(&self, map: &McidTextMap) -> AccessibleText {
        AccessibleText {
            element_type: self.element_type.clone(),
            actual_text: self.resolve_actual_text(map),
            actual_text_derived: self.authored_actual_text().is_none(),
            alt_text: self.alt_text.clone(),
            lang: self.lang.clone(),
            title: self.title.clone(),
        }
    }

    /// Fill in missing actual text throughout the subtree.
    pub fn annotate(&mut self, map: &McidTextMap) {
        if self.authored_actual_text().is_none() {
            if let Some(text) = self.resolve_actual_text(map) {
                self.actual_text = Some(text);
            }
        }
        for child in &mut self.children {
            child.annotate(map);
        }
    }
}

/// Accessible description of one structure node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessibleText {
    pub element_type: String,
    pub actual_text: Option<String>,
    /// Whether `actual_text` came from marked content rather than the document.
    pub actual_text_derived: bool,
    pub alt_text: Option<String>,
    pub lang: Option<String>,
    pub title: Option<String>,
}

impl AccessibleText {
    /// Text a reader should announce: alt text first, then actual text.
    pub fn spoken_text(&self) -> Option<&str> {
        self.alt_text
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.actual_text.as_deref())
    }
}

impl fmt::Display for AccessibleText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        write!(
            f,
            "type: {} | alt text: {} | actual text: {} | lang: {} | title: {}",
            self.element_type,
            opt(&self.alt_text),
            opt(&self.actual_text),
            opt(&self.lang),
            opt(&self.title),
        )
    }
}

/// A node description with its depth in the tree (root = 0).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessibleNode {
    pub depth: usize,
    pub description: AccessibleText,
}

/// Describe every node of the tree rooted at `root`, in pre-order.
pub fn describe_tree(root: &StructElement, map: &McidTextMap) -> Vec<AccessibleNode> {
    let mut out = Vec::new();
    let mut stack = vec![(root, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        out.push(AccessibleNode {
            depth,
            description: node.describe(map),
        });
        for child in node.children.iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    out
}
