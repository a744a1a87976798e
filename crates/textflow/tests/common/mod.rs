//! Shared fixture builder for integration tests.
//!
//! Glyphs are laid out with a fixed advance of half the font size per
//! character, so a 10pt run of `n` characters is `5 * n` points wide.

#![allow(dead_code)]

use textflow::{BBox, ColorState, GlyphEvent, GraphicsState, PageInput, Point, TextState};

/// Default font size of body text.
pub const BODY_SIZE: f32 = 10.0;

/// Body text state with a declared space width of 2.5pt.
pub fn body_state(size: f32) -> GraphicsState {
    GraphicsState::new(TextState::new("Helvetica", size).with_space_width(2.5))
        .with_fill(ColorState::rgb(0, 0, 0))
}

/// Advance of one character at `size`.
pub fn advance(size: f32) -> f64 {
    size as f64 / 2.0
}

/// An event whose box sits on baseline `y` and spans `text` at `size`.
pub fn event(text: &str, x: f64, y: f64, state: GraphicsState) -> GlyphEvent {
    let size = state.font_size() as f64;
    let width = advance(state.font_size()) * text.chars().count() as f64;
    GlyphEvent::new(
        text,
        Point::new(x, y),
        BBox::new(x, y - 0.2 * size, x + width, y + 0.8 * size),
        state,
    )
}

/// Builds a page one event at a time, numbering page characters as it goes.
#[derive(Default)]
pub struct PageBuilder {
    input: PageInput,
    next_char: usize,
}

impl PageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body text at `(x, y)`.
    pub fn text(self, text: &str, x: f64, y: f64) -> Self {
        self.styled(text, x, y, body_state(BODY_SIZE))
    }

    /// Text in an explicit state.
    pub fn styled(self, text: &str, x: f64, y: f64, state: GraphicsState) -> Self {
        self.push(event(text, x, y, state))
    }

    /// Body text tagged with marked-content id `mcid`.
    pub fn tagged(self, text: &str, x: f64, y: f64, mcid: u32) -> Self {
        self.push(event(text, x, y, body_state(BODY_SIZE)).with_mcid(mcid))
    }

    /// Text placed directly after the previous event on the same baseline.
    pub fn then(self, text: &str) -> Self {
        let last = self.input.events.last().map(|e| (e.bbox.right, e.origin.y));
        let (x, y) = last.unwrap_or((72.0, 700.0));
        self.text(text, x, y)
    }

    pub fn push(mut self, event: GlyphEvent) -> Self {
        let count = event.text.chars().count();
        self.input
            .events
            .push(event.with_char_index(self.next_char));
        self.next_char += count;
        self
    }

    pub fn build(self) -> PageInput {
        self.input
    }
}

/// Rows of `cells` elements each, 20pt apart, followed by one footer line.
pub fn table_page(rows: usize, cells: usize) -> PageInput {
    let mut builder = PageBuilder::new();
    for r in 0..rows {
        let y = 700.0 - 20.0 * r as f64;
        for c in 0..cells {
            builder = builder.text(&format!("r{r}c{c}"), 72.0 + 128.0 * c as f64, y);
        }
    }
    let footer_y = 700.0 - 20.0 * rows as f64;
    builder.text("Footer", 72.0, footer_y).build()
}
