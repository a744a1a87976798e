//! Page annotation types.
//!
//! Provides [`Annotation`], a tagged variant over the annotation kinds the
//! page collaborator reports. Word segmentation matches words against their
//! bounding boxes.

use crate::BBox;

/// A page annotation with its kind-specific payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind")
)]
pub enum Annotation {
    /// Form field widget.
    Widget {
        bbox: BBox,
        field_name: String,
        field_value: String,
    },
    /// Link annotation. `uri` is `None` for non-URI actions.
    Link { bbox: BBox, uri: Option<String> },
    /// Free text annotation with its rich text (`/RC`).
    FreeText { bbox: BBox, rich_text: String },
    /// Popup attached to another annotation.
    Popup { bbox: BBox },
    /// Sticky note with its `/Contents`.
    Text { bbox: BBox, contents: String },
}

impl Annotation {
    /// Bounding box of the annotation on the page.
    pub fn bbox(&self) -> BBox {
        match self {
            Annotation::Widget { bbox, .. }
            | Annotation::Link { bbox, .. }
            | Annotation::FreeText { bbox, .. }
            | Annotation::Popup { bbox }
            | Annotation::Text { bbox, .. } => *bbox,
        }
    }

    /// Human-readable text for the annotation.
    pub fn display_text(&self) -> String {
        match self {
            Annotation::Widget { field_value, .. } => field_value.clone(),
            Annotation::Link { uri, .. } => {
                format!("Link to: {}", uri.as_deref().unwrap_or_default())
            }
            Annotation::FreeText { rich_text, .. } => rich_text.clone(),
            Annotation::Popup { .. } => String::new(),
            Annotation::Text { contents, .. } => contents.clone(),
        }
    }

    /// Target URI for link annotations.
    pub fn uri(&self) -> Option<&str> {
        match self {
            Annotation::Link { uri, .. } => uri.as_deref(),
            _ => None,
        }
    }

    /// Whether `bbox` lies entirely inside the annotation.
    pub fn contains(&self, bbox: &BBox) -> bool {
        self.bbox().contains(bbox)
    }
}

/// Index of the first annotation containing `bbox`, in list order.
pub fn containing_annotation(annotations: &[Annotation], bbox: &BBox) -> Option<usize> {
    annotations.iter().position(|annot| annot.contains(bbox))
}
