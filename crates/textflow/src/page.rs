//! Per-page reconstruction pipeline.

use textflow_core::{
    AccessibleNode, Annotation, ColumnGroup, ExtractOptions, HtmlRenderer, LineLayout,
    McidTextMap, Outcome, RunAssembler, StructElement, TextElement, TextLine, TextRun, WordBlock,
    WordSegmenter, describe_tree, merge_word_links,
};
use tracing::{debug, debug_span, trace};

use crate::source::PageInput;

/// The reconstructed text flow of one page.
///
/// Owns its elements, lines and marked-content map exclusively; nothing is
/// shared with other pages.
#[derive(Debug, Clone)]
pub struct PageThread {
    index: usize,
    elements: Vec<TextElement>,
    words: Vec<Vec<WordBlock>>,
    layout: LineLayout,
    mcid_map: McidTextMap,
    annotations: Vec<Annotation>,
    struct_tree: Option<StructElement>,
    line_epsilon: f64,
}

impl PageThread {
    /// Run the full pipeline over one page's input.
    ///
    /// Events are merged into elements, each element is split into words
    /// whose links are carried back to it, the marked-content map is frozen,
    /// and lines and column groups are derived.
    pub fn build(index: usize, input: PageInput, options: &ExtractOptions) -> Self {
        let span = debug_span!("page", page = index);
        let _enter = span.enter();

        let PageInput {
            events,
            web_links,
            annotations,
            struct_tree,
        } = input;

        let mut assembler = RunAssembler::new(options.assembler.clone());
        let mut folded = 0usize;
        for (i, event) in events.iter().enumerate() {
            match assembler.push(event) {
                Outcome::Split(reason) => {
                    trace!(event = i, %reason, text = %event.text, "run closed");
                }
                Outcome::Folded => folded += 1,
                Outcome::Opened | Outcome::Extended | Outcome::Skipped => {}
            }
        }
        let mut elements = assembler.finish();

        let words: Vec<Vec<WordBlock>> = elements
            .iter_mut()
            .map(|element| {
                let run = TextRun::from_element(element);
                let words = WordSegmenter::segment_with_links(
                    &run,
                    &options.words,
                    &web_links,
                    &annotations,
                );
                merge_word_links(element, &words, &annotations);
                words
            })
            .collect();

        let mcid_map = McidTextMap::from_elements(&elements);
        let layout = LineLayout::build(&elements, &options.lines);

        debug!(
            events = events.len(),
            elements = elements.len(),
            folded,
            words = words.iter().map(Vec::len).sum::<usize>(),
            lines = layout.lines.len(),
            column_groups = layout.groups.len(),
            marked_content = mcid_map.len(),
            "page reconstructed"
        );

        Self {
            index,
            elements,
            words,
            layout,
            mcid_map,
            annotations,
            struct_tree,
            line_epsilon: options.lines.baseline_epsilon,
        }
    }

    /// Page index (0-based).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Elements in creation order.
    pub fn elements(&self) -> &[TextElement] {
        &self.elements
    }

    /// Words of the element at the same position in [`elements`](Self::elements).
    pub fn words(&self) -> &[Vec<WordBlock>] {
        &self.words
    }

    pub fn layout(&self) -> &LineLayout {
        &self.layout
    }

    pub fn lines(&self) -> &[TextLine] {
        &self.layout.lines
    }

    pub fn column_groups(&self) -> &[ColumnGroup] {
        &self.layout.groups
    }

    pub fn mcid_map(&self) -> &McidTextMap {
        &self.mcid_map
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn struct_tree(&self) -> Option<&StructElement> {
        self.struct_tree.as_ref()
    }

    /// Elements of line `line` in left-to-right order.
    ///
    /// # Panics
    ///
    /// Panics if `line` is out of range.
    pub fn line_elements(&self, line: usize) -> impl Iterator<Item = &TextElement> {
        self.layout.lines[line]
            .elements()
            .iter()
            .map(|&i| &self.elements[i])
    }

    /// Text of line `line`.
    ///
    /// # Panics
    ///
    /// Panics if `line` is out of range.
    pub fn line_text(&self, line: usize) -> String {
        self.layout.lines[line].text(&self.elements, self.line_epsilon)
    }

    /// Page text, one line per row in reading order.
    pub fn text(&self) -> String {
        self.layout
            .lines
            .iter()
            .map(|line| line.text(&self.elements, self.line_epsilon))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Page text with links rendered as markdown.
    pub fn markdown(&self) -> String {
        self.layout
            .lines
            .iter()
            .map(|line| line.markdown_text(&self.elements, self.line_epsilon))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Page text as inline HTML.
    pub fn html(&self) -> String {
        HtmlRenderer::render(&self.elements, &self.layout, self.line_epsilon)
    }

    /// Accessible descriptions of the structure tree, in pre-order.
    pub fn accessible_nodes(&self) -> Vec<AccessibleNode> {
        self.struct_tree
            .as_ref()
            .map(|root| describe_tree(root, &self.mcid_map))
            .unwrap_or_default()
    }

    /// A copy of the structure tree with missing actual text filled in.
    pub fn annotated_struct_tree(&self) -> Option<StructElement> {
        self.struct_tree.clone().map(|mut root| {
            root.annotate(&self.mcid_map);
            root
        })
    }
}
