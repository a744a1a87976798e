//! Reading-order lines and column groups.
//!
//! [`LineLayout::build`] sorts a page's elements top-to-bottom and
//! left-to-right, clusters them into baseline-aligned [`TextLine`]s, derives
//! [`ColumnInfo`] between neighbours and reports runs of lines with equal
//! column counts as [`ColumnGroup`]s, the page's table hypothesis.
//!
//! Lines refer to elements by index into the page's element list.

use crate::element::{TextElement, is_space_between};

/// Options for line clustering and column-group detection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LineOptions {
    /// Maximum baseline spread (exclusive) within one line. Default: 1.0.
    pub baseline_epsilon: f64,
    /// Minimum column count for a line to take part in a group. Default: 2.
    pub min_columns: usize,
    /// Minimum number of consecutive lines forming a group. Default: 2.
    pub min_group_lines: usize,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            baseline_epsilon: 1.0,
            min_columns: 2,
            min_group_lines: 2,
        }
    }
}

/// Horizontal extents derived from two neighbouring elements of a line.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnInfo {
    /// Left edge of the left element.
    pub start: f64,
    /// Horizontal midpoint of the left element.
    pub middle: f64,
    /// Right edge of the right element.
    pub end: f64,
    /// Index of the left element.
    pub element: usize,
}

/// Elements sharing one baseline, left to right once columnized.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextLine {
    elements: Vec<usize>,
    min_baseline: f64,
    max_baseline: f64,
    columns: Vec<ColumnInfo>,
}

impl TextLine {
    fn new(index: usize, baseline: f64) -> Self {
        Self {
            elements: vec![index],
            min_baseline: baseline,
            max_baseline: baseline,
            columns: Vec::new(),
        }
    }

    /// Add the element if the line's baseline spread stays below `epsilon`.
    fn try_add(&mut self, index: usize, baseline: f64, epsilon: f64) -> bool {
        let lo = self.min_baseline.min(baseline);
        let hi = self.max_baseline.max(baseline);
        if hi - lo >= epsilon {
            return false;
        }
        self.min_baseline = lo;
        self.max_baseline = hi;
        self.elements.push(index);
        true
    }

    /// Sort members by left edge and derive one [`ColumnInfo`] per neighbour pair.
    fn columnize(&mut self, arena: &[TextElement]) {
        self.elements
            .sort_by(|a, b| arena[*a].bbox().left.total_cmp(&arena[*b].bbox().left));
        self.columns = self
            .elements
            .windows(2)
            .map(|pair| {
                let left = arena[pair[0]].bbox();
                let right = arena[pair[1]].bbox();
                ColumnInfo {
                    start: left.left,
                    middle: (left.left + left.right) / 2.0,
                    end: right.right,
                    element: pair[0],
                }
            })
            .collect();
    }

    /// Element indices in line order.
    pub fn elements(&self) -> &[usize] {
        &self.elements
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Highest baseline among the members.
    pub fn baseline(&self) -> f64 {
        self.max_baseline
    }

    /// Lowest and highest member baselines.
    pub fn baseline_range(&self) -> (f64, f64) {
        (self.min_baseline, self.max_baseline)
    }

    /// Element index at `position` within the line.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of range.
    pub fn element_at(&self, position: usize) -> usize {
        match self.elements.get(position) {
            Some(index) => *index,
            None => panic!(
                "element position {position} out of range (0..{})",
                self.elements.len()
            ),
        }
    }

    /// Line text, with a space wherever neighbours are separated by a gap.
    pub fn text(&self, arena: &[TextElement], baseline_epsilon: f64) -> String {
        self.render(arena, baseline_epsilon, TextElement::text)
    }

    /// Like [`text`](Self::text) with links rendered as markdown.
    pub fn markdown_text(&self, arena: &[TextElement], baseline_epsilon: f64) -> String {
        self.render(arena, baseline_epsilon, |el| el.markdown_text())
    }

    fn render<'a, F, S>(&self, arena: &'a [TextElement], baseline_epsilon: f64, piece: F) -> String
    where
        F: Fn(&'a TextElement) -> S,
        S: AsRef<str>,
    {
        let mut out = String::new();
        let mut prev: Option<&TextElement> = None;
        for &index in &self.elements {
            let el = &arena[index];
            if let Some(p) = prev {
                if is_space_between(p, el, baseline_epsilon) {
                    out.push(' ');
                }
            }
            out.push_str(piece(el).as_ref());
            prev = Some(el);
        }
        out
    }
}

/// An inclusive range of line indices with equal column counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnGroup {
    pub start: usize,
    pub end: usize,
}

impl ColumnGroup {
    pub fn contains(&self, line: usize) -> bool {
        line >= self.start && line <= self.end
    }

    pub fn line_count(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Lines and column groups for one page.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineLayout {
    pub lines: Vec<TextLine>,
    pub groups: Vec<ColumnGroup>,
}

impl LineLayout {
    /// Cluster `elements` into lines and detect column groups.
    pub fn build(elements: &[TextElement], options: &LineOptions) -> Self {
        let mut lines = group_lines(elements, options.baseline_epsilon);
        for line in &mut lines {
            line.columnize(elements);
        }
        let groups = column_groups(&lines, options);
        Self { lines, groups }
    }

    /// The group containing line `line`, if any.
    pub fn group_of(&self, line: usize) -> Option<&ColumnGroup> {
        self.groups.iter().find(|g| g.contains(line))
    }
}

/// Reading order: descending baseline, then ascending left edge.
pub fn reading_order(elements: &[TextElement]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..elements.len()).collect();
    order.sort_by(|a, b| {
        let (ea, eb) = (&elements[*a], &elements[*b]);
        eb.baseline()
            .y
            .total_cmp(&ea.baseline().y)
            .then(ea.bbox().left.total_cmp(&eb.bbox().left))
    });
    order
}

/// Attach each element, in reading order, to the earliest line it fits.
pub fn group_lines(elements: &[TextElement], baseline_epsilon: f64) -> Vec<TextLine> {
    let mut lines: Vec<TextLine> = Vec::new();
    for index in reading_order(elements) {
        let y = elements[index].baseline().y;
        let attached = lines
            .iter_mut()
            .any(|line| line.try_add(index, y, baseline_epsilon));
        if !attached {
            lines.push(TextLine::new(index, y));
        }
    }
    lines
}

/// Maximal runs of consecutive lines sharing a column count of at least
/// `min_columns`, at least `min_group_lines` long.
pub fn column_groups(lines: &[TextLine], options: &LineOptions) -> Vec<ColumnGroup> {
    let counts: Vec<usize> = lines.iter().map(TextLine::column_count).collect();
    let mut groups = Vec::new();
    let mut i = 0;
    while i < counts.len() {
        let count = counts[i];
        let start = i;
        while i + 1 < counts.len() && counts[i + 1] == count {
            i += 1;
        }
        let end = i;
        if count >= options.min_columns.max(1) && end - start + 1 >= options.min_group_lines {
            groups.push(ColumnGroup { start, end });
        }
        i += 1;
    }
    groups
}
