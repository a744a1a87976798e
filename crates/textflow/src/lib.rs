//! textflow: Rebuild structured, reflowable text from PDF glyph placements.
//!
//! This is the public API facade crate. It re-exports the types and
//! algorithms of textflow-core and drives them page by page over a
//! [`PageSource`].
//!
//! # Architecture
//!
//! - **textflow-core**: Backend-independent data types and algorithms
//! - **textflow** (this crate): Page sources, the per-page pipeline
//!   ([`PageThread`]), the multi-page [`Document`] driver and logging

mod document;
mod error;
mod page;
mod source;

pub use document::{Document, PagesIter};
pub use error::SourceError;
pub use page::PageThread;
pub use source::{MemorySource, PageInput, PageSource};
pub use textflow_core;
pub use textflow_core::{
    AccessibleNode, AccessibleText, Annotation, AssemblerOptions, BBox, CharGeometry, ColorState,
    ColumnGroup, ColumnInfo, ExtractOptions, GlyphEvent, GraphicsState, LineLayout, LineOptions,
    Link, ListMarker, Matrix, McidTextMap, Point, Rejection, StructElement, TextElement,
    TextLine, TextRenderMode, TextState, TextflowError, UnicodeNorm, WebLink, WordBlock,
    WordOptions, is_space_between, list_marker,
};
