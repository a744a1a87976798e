//! The page collaborator seam.
//!
//! A [`PageSource`] supplies, per page, the glyph event stream and the
//! side data (web links, annotations, structure tree) that the engine
//! consumes. [`MemorySource`] holds pages already in memory.

use textflow_core::{Annotation, GlyphEvent, StructElement, WebLink};

use crate::error::SourceError;

/// Everything the engine needs to reconstruct one page.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageInput {
    /// Glyph events in content-stream order.
    pub events: Vec<GlyphEvent>,
    pub web_links: Vec<WebLink>,
    pub annotations: Vec<Annotation>,
    /// Root of the page's structure tree, for tagged documents.
    pub struct_tree: Option<StructElement>,
}

impl PageInput {
    pub fn new(events: Vec<GlyphEvent>) -> Self {
        Self {
            events,
            ..Self::default()
        }
    }

    /// Check the geometry the engine relies on.
    ///
    /// Every coordinate must be finite and every box must have
    /// `left <= right` and `bottom <= top`.
    pub fn validate(&self) -> Result<(), SourceError> {
        for (i, event) in self.events.iter().enumerate() {
            let b = &event.bbox;
            let coords = [event.origin.x, event.origin.y, b.left, b.bottom, b.right, b.top];
            let glyph_coords = event.chars.iter().flat_map(|c| {
                [c.origin.x, c.origin.y, c.bbox.left, c.bbox.bottom, c.bbox.right, c.bbox.top]
            });
            if coords.into_iter().chain(glyph_coords).any(|v| !v.is_finite()) {
                return Err(SourceError::Malformed(format!(
                    "event {i} has a non-finite coordinate"
                )));
            }
            if b.left > b.right || b.bottom > b.top {
                return Err(SourceError::Malformed(format!("event {i} has an inverted bbox")));
            }
        }
        Ok(())
    }
}

/// Supplies page inputs by index.
pub trait PageSource {
    /// Number of pages available.
    fn page_count(&self) -> usize;

    /// Input for the page at `index` (0-based).
    fn page_input(&self, index: usize) -> Result<PageInput, SourceError>;
}

/// Pages held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<PageInput>,
}

impl MemorySource {
    pub fn new(pages: Vec<PageInput>) -> Self {
        Self { pages }
    }

    pub fn push(&mut self, page: PageInput) {
        self.pages.push(page);
    }

    /// Load pages from a JSON array of page inputs.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self, SourceError> {
        let pages: Vec<PageInput> = serde_json::from_str(json)?;
        Ok(Self::new(pages))
    }

    /// Load pages from a reader producing a JSON array of page inputs.
    #[cfg(feature = "serde")]
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, SourceError> {
        let pages: Vec<PageInput> = serde_json::from_reader(std::io::BufReader::new(reader))?;
        Ok(Self::new(pages))
    }
}

impl PageSource for MemorySource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_input(&self, index: usize) -> Result<PageInput, SourceError> {
        let page = self
            .pages
            .get(index)
            .cloned()
            .ok_or(SourceError::MissingPage(index))?;
        page.validate()?;
        Ok(page)
    }
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn page_input(&self, index: usize) -> Result<PageInput, SourceError> {
        (**self).page_input(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textflow_core::{BBox, CharGeometry, GraphicsState, Point, TextState};

    fn make_event(text: &str, bbox: BBox) -> GlyphEvent {
        GlyphEvent::new(
            text,
            Point::new(bbox.left, bbox.bottom + 2.0),
            bbox,
            GraphicsState::new(TextState::new("Helvetica", 10.0)),
        )
    }

    #[test]
    fn memory_source_serves_pages() {
        let source = MemorySource::new(vec![
            PageInput::new(vec![make_event("a", BBox::new(0.0, 0.0, 5.0, 10.0))]),
            PageInput::default(),
        ]);
        assert_eq!(source.page_count(), 2);
        assert_eq!(source.page_input(0).unwrap().events.len(), 1);
        assert!(source.page_input(1).unwrap().events.is_empty());
        assert!(matches!(source.page_input(2), Err(SourceError::MissingPage(2))));
    }

    #[test]
    fn rejects_inverted_bbox() {
        let mut source = MemorySource::default();
        source.push(PageInput::new(vec![make_event("a", BBox::new(5.0, 0.0, 0.0, 10.0))]));
        let err = source.page_input(0).unwrap_err();
        assert_eq!(err.to_string(), "malformed page input: event 0 has an inverted bbox");
    }

    #[test]
    fn rejects_non_finite_origin() {
        let mut event = make_event("a", BBox::new(0.0, 0.0, 5.0, 10.0));
        event.origin.y = f64::NAN;
        let source = MemorySource::new(vec![PageInput::new(vec![event])]);
        assert!(matches!(source.page_input(0), Err(SourceError::Malformed(_))));
    }

    #[test]
    fn rejects_non_finite_glyph_placement() {
        let event = make_event("a", BBox::new(0.0, 0.0, 5.0, 10.0)).with_chars(vec![CharGeometry {
            ch: 'a',
            origin: Point::new(f64::INFINITY, 2.0),
            bbox: BBox::new(0.0, 0.0, 5.0, 10.0),
            index: 0,
        }]);
        let source = MemorySource::new(vec![PageInput::new(vec![event])]);
        assert!(matches!(source.page_input(0), Err(SourceError::Malformed(_))));
    }

    #[test]
    fn references_are_sources() {
        let source = MemorySource::new(vec![PageInput::default()]);
        let by_ref: &dyn PageSource = &source;
        assert_eq!(PageSource::page_count(&by_ref), 1);
    }
}
