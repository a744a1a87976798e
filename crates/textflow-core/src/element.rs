//! Text elements: runs of glyphs sharing one paint state and baseline.
//!
//! A [`TextElement`] is created from the first [`GlyphEvent`] of a run and
//! grows through [`TextElement::try_append`]. Every append is decided by the
//! pure [`TextElement::check_append`] before anything is written, so a
//! rejected event leaves the element untouched.

use std::collections::BTreeMap;

use crate::geometry::{BBox, Point};
use crate::hyperlink::Link;
use crate::state::GraphicsState;

/// Digit to superscript glyph table.
pub const SUPERSCRIPT_DIGITS: [(char, char); 10] = [
    ('0', '⁰'),
    ('1', '¹'),
    ('2', '²'),
    ('3', '³'),
    ('4', '⁴'),
    ('5', '⁵'),
    ('6', '⁶'),
    ('7', '⁷'),
    ('8', '⁸'),
    ('9', '⁹'),
];

/// Digit to subscript glyph table.
pub const SUBSCRIPT_DIGITS: [(char, char); 10] = [
    ('0', '₀'),
    ('1', '₁'),
    ('2', '₂'),
    ('3', '₃'),
    ('4', '₄'),
    ('5', '₅'),
    ('6', '₆'),
    ('7', '₇'),
    ('8', '₈'),
    ('9', '₉'),
];

fn lookup(table: &[(char, char)], c: char) -> Option<char> {
    table.iter().find(|(from, _)| *from == c).map(|(_, to)| *to)
}

/// Options for merging glyph events into text elements.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AssemblerOptions {
    /// Maximum baseline difference (exclusive) for two glyphs in one run. Default: 0.1.
    pub baseline_epsilon: f64,
    /// Allowed gap as a multiple of the distance unit. Default: 1.3.
    pub distance_ratio: f64,
    /// Fold small trailing digit tokens into super/subscript glyphs. Default: true.
    pub fold_scripts: bool,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            baseline_epsilon: 0.1,
            distance_ratio: 1.3,
            fold_scripts: true,
        }
    }
}

/// One glyph or text-run placement reported by the page collaborator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphEvent {
    pub text: String,
    /// Baseline origin of the first glyph.
    pub origin: Point,
    pub bbox: BBox,
    pub state: GraphicsState,
    /// Marked-content id the glyphs were painted under.
    #[cfg_attr(feature = "serde", serde(default))]
    pub mcid: Option<u32>,
    /// Page-level index of the first character.
    #[cfg_attr(feature = "serde", serde(default))]
    pub char_index: usize,
    /// Per-character placements reported by the collaborator, one per char of
    /// `text`. Empty when only the run box is known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub chars: Vec<CharGeometry>,
}

impl GlyphEvent {
    pub fn new(text: &str, origin: Point, bbox: BBox, state: GraphicsState) -> Self {
        Self {
            text: text.to_string(),
            origin,
            bbox,
            state,
            mcid: None,
            char_index: 0,
            chars: Vec::new(),
        }
    }

    pub fn with_mcid(mut self, mcid: u32) -> Self {
        self.mcid = Some(mcid);
        self
    }

    pub fn with_char_index(mut self, char_index: usize) -> Self {
        self.char_index = char_index;
        self
    }

    /// Attach measured per-character placements. Indices are renumbered
    /// from [`char_index`](Self::char_index) when the geometry is read.
    pub fn with_chars(mut self, chars: Vec<CharGeometry>) -> Self {
        self.chars = chars;
        self
    }

    /// Per-character geometry.
    ///
    /// Uses the reported placements when there is one per character, and
    /// otherwise divides the event box evenly between the characters.
    pub fn char_geometry(&self) -> Vec<CharGeometry> {
        let count = self.text.chars().count();
        if count == 0 {
            return Vec::new();
        }
        if self.chars.len() == count {
            return self
                .chars
                .iter()
                .zip(self.text.chars())
                .enumerate()
                .map(|(i, (c, ch))| CharGeometry {
                    ch,
                    index: self.char_index + i,
                    ..*c
                })
                .collect();
        }
        let step = self.bbox.width() / count as f64;
        self.text
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                let dx = step * i as f64;
                CharGeometry {
                    ch,
                    origin: Point::new(self.origin.x + dx, self.origin.y),
                    bbox: BBox::new(
                        self.bbox.left + dx,
                        self.bbox.bottom,
                        self.bbox.left + dx + step,
                        self.bbox.top,
                    ),
                    index: self.char_index + i,
                }
            })
            .collect()
    }
}

/// Placement of a single character inside an element.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharGeometry {
    pub ch: char,
    pub origin: Point,
    pub bbox: BBox,
    /// Page-level character index.
    pub index: usize,
}

/// Why an event could not extend the open element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejection {
    /// The event's baseline is not within epsilon of the element's.
    OffBaseline,
    /// The event was painted with a different graphics state.
    StateMismatch,
    /// The horizontal gap exceeds the allowed distance.
    TooFar,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Rejection::OffBaseline => "off baseline",
            Rejection::StateMismatch => "graphics state mismatch",
            Rejection::TooFar => "gap too wide",
        };
        f.write_str(reason)
    }
}

/// How an accepted event will change the element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The element is empty: the event replaces it wholesale.
    Open,
    /// Append the event text as-is.
    Extend,
    /// Append the event as super/subscript glyphs.
    Fold(String),
}

/// A run of text sharing one graphics state and baseline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextElement {
    text: String,
    bbox: BBox,
    baseline: Point,
    state: GraphicsState,
    marked_content: BTreeMap<u32, String>,
    glyphs: Vec<CharGeometry>,
    link: Option<Link>,
}

impl TextElement {
    /// Open a new element from the first event of a run.
    pub fn from_event(event: &GlyphEvent) -> Self {
        let mut marked_content = BTreeMap::new();
        if let Some(mcid) = event.mcid {
            marked_content.insert(mcid, event.text.clone());
        }
        Self {
            text: event.text.clone(),
            bbox: event.bbox,
            baseline: event.origin,
            state: event.state.clone(),
            marked_content,
            glyphs: event.char_geometry(),
            link: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    /// Origin of the first glyph.
    pub fn baseline(&self) -> Point {
        self.baseline
    }

    pub fn state(&self) -> &GraphicsState {
        &self.state
    }

    /// Text contributed under each marked-content id.
    pub fn marked_content(&self) -> &BTreeMap<u32, String> {
        &self.marked_content
    }

    pub fn glyphs(&self) -> &[CharGeometry] {
        &self.glyphs
    }

    pub fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }

    pub fn has_link(&self) -> bool {
        self.link.is_some()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Attach a hyperlink. Empty URLs are ignored.
    pub fn set_link(&mut self, url: &str, tooltip: Option<&str>) {
        if url.is_empty() {
            return;
        }
        self.link = Some(Link::new(url, tooltip.unwrap_or_default()));
    }

    /// Element text with its link rendered as markdown.
    ///
    /// `[text](url)` when the tooltip is empty or repeats the text,
    /// otherwise `text [tooltip](url)`.
    pub fn markdown_text(&self) -> String {
        match &self.link {
            None => self.text.clone(),
            Some(link) if link.tooltip.is_empty() || link.tooltip == self.text => {
                format!("[{}]({})", self.text, link.url)
            }
            Some(link) => format!("{} [{}]({})", self.text, link.tooltip, link.url),
        }
    }

    /// Whether the element was painted with a symbol font.
    pub fn is_wingding_font(&self) -> bool {
        self.state.text_state.is_wingding_font()
    }

    /// Bounding-box width divided by character count.
    pub fn average_char_width(&self) -> f64 {
        let count = self.char_count();
        if count == 0 {
            return 0.0;
        }
        self.bbox.width() / count as f64
    }

    /// Unit of horizontal distance: the declared space width, or the
    /// average character width when the declared one is degenerate.
    pub fn distance_unit(&self) -> f64 {
        let space = self.state.space_width() as f64;
        if space > 1.0 {
            space
        } else {
            self.average_char_width()
        }
    }

    /// Horizontal distance from the element's right edge to `x`.
    fn gap_to(&self, x: f64) -> f64 {
        (x - self.bbox.right).abs()
    }

    fn on_baseline(&self, y: f64, epsilon: f64) -> bool {
        (y - self.baseline.y).abs() < epsilon
    }

    /// Super/subscript rendering of `event`, if it qualifies for folding.
    fn fold_script(&self, event: &GlyphEvent) -> Option<String> {
        if event.text.trim().is_empty() {
            return None;
        }
        let foldable = event
            .text
            .chars()
            .all(|c| c.is_whitespace() || lookup(&SUPERSCRIPT_DIGITS, c).is_some());
        if !foldable {
            return None;
        }
        if self.gap_to(event.origin.x) >= self.state.space_width() as f64 / 2.0 {
            return None;
        }
        if event.state.font_size() > self.state.font_size() * 3.0 / 4.0 {
            return None;
        }

        let ours = self.bbox.mid_y();
        let theirs = event.bbox.mid_y();
        let table = if theirs > ours {
            &SUPERSCRIPT_DIGITS
        } else if theirs < ours {
            &SUBSCRIPT_DIGITS
        } else {
            return None;
        };
        Some(
            event
                .text
                .chars()
                .map(|c| lookup(table, c).unwrap_or(c))
                .collect(),
        )
    }

    /// Decide whether `event` may extend this element, without changing it.
    ///
    /// An empty element accepts any event.
    pub fn check_append(
        &self,
        event: &GlyphEvent,
        options: &AssemblerOptions,
    ) -> Result<Transition, Rejection> {
        if self.is_empty() {
            return Ok(Transition::Open);
        }
        if options.fold_scripts {
            if let Some(folded) = self.fold_script(event) {
                return Ok(Transition::Fold(folded));
            }
        }
        if !self.on_baseline(event.origin.y, options.baseline_epsilon) {
            return Err(Rejection::OffBaseline);
        }
        if event.state != self.state {
            return Err(Rejection::StateMismatch);
        }
        if self.gap_to(event.origin.x) > self.distance_unit() * options.distance_ratio {
            return Err(Rejection::TooFar);
        }
        Ok(Transition::Extend)
    }

    /// Apply a transition previously returned by [`check_append`](Self::check_append).
    pub fn apply(&mut self, event: &GlyphEvent, transition: Transition) {
        let text = match transition {
            Transition::Open => {
                *self = TextElement::from_event(event);
                return;
            }
            Transition::Extend => event.text.clone(),
            Transition::Fold(folded) => folded,
        };
        let mut glyphs = event.char_geometry();
        for (glyph, ch) in glyphs.iter_mut().zip(text.chars()) {
            glyph.ch = ch;
        }
        self.glyphs.extend(glyphs);
        self.bbox = self.bbox.union(&event.bbox);
        if let Some(mcid) = event.mcid {
            self.marked_content.entry(mcid).or_default().push_str(&text);
        }
        self.text.push_str(&text);
    }

    /// Append `event` if it continues this run. Returns `false` and leaves
    /// the element unchanged otherwise.
    pub fn try_append(&mut self, event: &GlyphEvent, options: &AssemblerOptions) -> bool {
        match self.check_append(event, options) {
            Ok(transition) => {
                self.apply(event, transition);
                true
            }
            Err(_) => false,
        }
    }

    /// Append a single character.
    ///
    /// Never folds scripts and always measures gaps in average character widths.
    pub fn try_append_char(
        &mut self,
        ch: char,
        origin: Point,
        bbox: BBox,
        state: &GraphicsState,
        options: &AssemblerOptions,
    ) -> bool {
        if !self.on_baseline(origin.y, options.baseline_epsilon) || *state != self.state {
            return false;
        }
        if self.gap_to(origin.x) > self.average_char_width() * options.distance_ratio {
            return false;
        }
        let index = self.glyphs.last().map_or(0, |g| g.index + 1);
        self.glyphs.push(CharGeometry {
            ch,
            origin,
            bbox,
            index,
        });
        self.text.push(ch);
        self.bbox = self.bbox.union(&bbox);
        true
    }
}

/// Whether a space-equivalent gap separates `left` from `right`.
///
/// Returns `true` when both are non-empty, their baselines agree within
/// `baseline_epsilon`, and the horizontal gap exceeds half of `left`'s
/// average character width. A `true` result means the two are *not*
/// directly adjacent.
pub fn is_space_between(left: &TextElement, right: &TextElement, baseline_epsilon: f64) -> bool {
    if left.is_empty() || right.is_empty() {
        return false;
    }
    if (left.baseline.y - right.baseline.y).abs() > baseline_epsilon {
        return false;
    }
    let gap = (right.baseline.x - left.bbox.right).abs();
    gap > left.average_char_width() / 2.0
}
