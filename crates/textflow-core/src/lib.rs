//! textflow-core: Backend-independent data types and algorithms.
//!
//! This crate turns the per-glyph placement stream of a PDF page into
//! structured text: runs ([`TextElement`]), words ([`WordBlock`]),
//! reading-order lines and column groups ([`LineLayout`]), and accessible
//! text for structure-tree nodes ([`StructElement`]). It performs no I/O.

pub mod annotation;
pub mod assembler;
pub mod element;
pub mod error;
pub mod geometry;
pub mod hyperlink;
pub mod layout;
pub mod list_marker;
pub mod marked_content;
pub mod markup;
pub mod options;
pub mod state;
pub mod struct_tree;
pub mod unicode_norm;
pub mod words;

pub use annotation::{Annotation, containing_annotation};
pub use assembler::{Outcome, RunAssembler, RunState, assemble};
pub use element::{
    AssemblerOptions, CharGeometry, GlyphEvent, Rejection, SUBSCRIPT_DIGITS, SUPERSCRIPT_DIGITS,
    TextElement, Transition, is_space_between,
};
pub use error::TextflowError;
pub use geometry::{BBox, Matrix, Point};
pub use hyperlink::{Link, WebLink, web_link_at};
pub use layout::{
    ColumnGroup, ColumnInfo, LineLayout, LineOptions, TextLine, column_groups, group_lines,
    reading_order,
};
pub use list_marker::{LIST_BULLETS, ListMarker, ORDERED_MARKERS, list_marker};
pub use marked_content::McidTextMap;
pub use markup::{HtmlRenderer, element_html, escape_html, state_to_css};
pub use options::ExtractOptions;
pub use state::{ColorState, GraphicsState, TextRenderMode, TextState};
pub use struct_tree::{AccessibleNode, AccessibleText, StructElement, describe_tree};
pub use unicode_norm::UnicodeNorm;
pub use words::{
    TextRun, WordBlock, WordOptions, WordSegmenter, attach_links, merge_word_links,
};
