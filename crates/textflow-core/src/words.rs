//! Word segmentation of assembled text runs.
//!
//! A run is cut into [`WordBlock`]s wherever the horizontal advance between
//! consecutive visible characters exceeds `gap_ratio` space units. Words then
//! pick up the web link or annotation that covers them.

use crate::annotation::{Annotation, containing_annotation};
use crate::element::{CharGeometry, TextElement};
use crate::geometry::{BBox, Point};
use crate::hyperlink::{WebLink, web_link_at};
use crate::unicode_norm::UnicodeNorm;

/// Options for word segmentation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WordOptions {
    /// Gap, in space units, that separates two words. Default: 1.5.
    pub gap_ratio: f64,
    /// Normalization applied to word text. Default: none.
    pub unicode_norm: UnicodeNorm,
}

impl Default for WordOptions {
    fn default() -> Self {
        Self {
            gap_ratio: 1.5,
            unicode_norm: UnicodeNorm::None,
        }
    }
}

/// One text run with its per-character geometry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextRun {
    pub text: String,
    pub chars: Vec<CharGeometry>,
    /// Declared space width of the run's font.
    pub space_width: f64,
    pub bbox: BBox,
}

impl TextRun {
    pub fn from_element(element: &TextElement) -> Self {
        Self {
            text: element.text().to_string(),
            chars: element.glyphs().to_vec(),
            space_width: element.state().space_width() as f64,
            bbox: element.bbox(),
        }
    }

    /// Declared space width when usable, else bbox width per character.
    fn space_unit(&self) -> f64 {
        if self.space_width > 1.0 {
            return self.space_width;
        }
        let count = self.text.chars().count();
        if count == 0 {
            return 0.0;
        }
        self.bbox.width() / count as f64
    }
}

/// A word cut from a text run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordBlock {
    pub text: String,
    pub bbox: BBox,
    /// Origin of the first visible character.
    pub origin: Point,
    /// Page character index of the first visible character.
    pub start_char_index: usize,
    /// URL of the web link covering the word's first character.
    pub link: Option<String>,
    /// Index into the page annotation list of the first annotation containing the word.
    pub annotation: Option<usize>,
}

impl WordBlock {
    fn new(text: String, bbox: BBox, origin: Point, start_char_index: usize) -> Self {
        Self {
            text,
            bbox,
            origin,
            start_char_index,
            link: None,
            annotation: None,
        }
    }

    /// The word's link target: its web link, else the URI of its annotation.
    pub fn url<'a>(&'a self, annotations: &'a [Annotation]) -> Option<&'a str> {
        self.link.as_deref().or_else(|| {
            self.annotation
                .and_then(|i| annotations.get(i))
                .and_then(Annotation::uri)
        })
    }
}

/// Splits text runs into words.
pub struct WordSegmenter;

impl WordSegmenter {
    /// Segment `run` into words.
    ///
    /// Characters are ordered by origin. Whitespace characters do not count as
    /// the left side of a gap, so a run of blanks between two words measures
    /// from the last visible glyph. When no gap qualifies, or the space unit
    /// cannot be computed, the whole run is one word.
    pub fn segment(run: &TextRun, options: &WordOptions) -> Vec<WordBlock> {
        let unit = run.space_unit();
        if run.chars.is_empty() || unit <= 0.0 || !unit.is_finite() {
            return Self::whole_run(run, options);
        }

        let mut chars: Vec<&CharGeometry> = run.chars.iter().collect();
        chars.sort_by(|a, b| a.origin.x.total_cmp(&b.origin.x));

        let threshold = unit * options.gap_ratio;
        let mut groups: Vec<Vec<&CharGeometry>> = vec![Vec::new()];
        let mut prev_right: Option<f64> = None;
        for c in chars {
            if c.ch.is_whitespace() {
                if let Some(group) = groups.last_mut() {
                    group.push(c);
                }
                continue;
            }
            if let Some(right) = prev_right {
                if c.origin.x - right > threshold {
                    groups.push(Vec::new());
                }
            }
            if let Some(group) = groups.last_mut() {
                group.push(c);
            }
            prev_right = Some(c.bbox.right);
        }

        if groups.len() < 2 {
            return Self::whole_run(run, options);
        }
        groups
            .iter()
            .filter_map(|group| Self::make_word(group, options))
            .collect()
    }

    /// Segment `run` and attach link metadata to each word.
    pub fn segment_with_links(
        run: &TextRun,
        options: &WordOptions,
        web_links: &[WebLink],
        annotations: &[Annotation],
    ) -> Vec<WordBlock> {
        let mut words = Self::segment(run, options);
        attach_links(&mut words, web_links, annotations);
        words
    }

    fn whole_run(run: &TextRun, options: &WordOptions) -> Vec<WordBlock> {
        let text = run.text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        let first = run.chars.iter().find(|c| !c.ch.is_whitespace());
        let origin = first.map_or(Point::new(run.bbox.left, run.bbox.bottom), |c| c.origin);
        let start = first.map_or(0, |c| c.index);
        vec![WordBlock::new(
            options.unicode_norm.normalize(text),
            run.bbox,
            origin,
            start,
        )]
    }

    fn make_word(group: &[&CharGeometry], options: &WordOptions) -> Option<WordBlock> {
        let text: String = group.iter().map(|c| c.ch).collect();
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let mut visible = group.iter().filter(|c| !c.ch.is_whitespace());
        let first = visible.next()?;
        let bbox = visible.fold(first.bbox, |acc, c| acc.union(&c.bbox));
        Some(WordBlock::new(
            options.unicode_norm.normalize(text),
            bbox,
            first.origin,
            first.index,
        ))
    }
}

/// Attach the covering web link and the first containing annotation to each word.
pub fn attach_links(words: &mut [WordBlock], web_links: &[WebLink], annotations: &[Annotation]) {
    for word in words.iter_mut() {
        word.link = web_link_at(web_links, word.start_char_index).map(|l| l.url.clone());
        word.annotation = containing_annotation(annotations, &word.bbox);
    }
}

/// Carry word-level links back to their element.
///
/// The first word with a URL wins and its text becomes the link tooltip.
/// Elements that already carry a link are left alone.
pub fn merge_word_links(element: &mut TextElement, words: &[WordBlock], annotations: &[Annotation]) {
    if element.has_link() {
        return;
    }
    if let Some((word, url)) = words
        .iter()
        .find_map(|w| w.url(annotations).map(|url| (w, url)))
    {
        element.set_link(url, Some(&word.text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::GlyphEvent;
    use crate::state::{GraphicsState, TextState};

    /// Run of uniform `w`-wide glyphs; `' '` in `layout` advances without a glyph
    /// when `skip_blanks` is set, otherwise it is a whitespace glyph.
    fn make_run(layout: &str, w: f64, space_width: f64, skip_blanks: bool) -> TextRun {
        let mut chars = Vec::new();
        let mut text = String::new();
        for (i, ch) in layout.chars().enumerate() {
            let x = i as f64 * w;
            if ch == ' ' && skip_blanks {
                continue;
            }
            text.push(ch);
            chars.push(CharGeometry {
                ch,
                origin: Point::new(x, 100.0),
                bbox: BBox::new(x, 98.0, x + w, 108.0),
                index: i,
            });
        }
        let right = layout.chars().count() as f64 * w;
        TextRun {
            text,
            chars,
            space_width,
            bbox: BBox::new(0.0, 98.0, right, 108.0),
        }
    }

    fn texts(words: &[WordBlock]) -> Vec<&str> {
        words.iter().map(|w| w.text.as_str()).collect()
    }

    #[test]
    fn splits_at_wide_gap() {
        // "AB" then a 3w gap before "CD"
        let run = make_run("AB   CD", 5.0, 5.0, true);
        let words = WordSegmenter::segment(&run, &WordOptions::default());
        assert_eq!(texts(&words), vec!["AB", "CD"]);
        assert_eq!(words[0].bbox, BBox::new(0.0, 98.0, 10.0, 108.0));
        assert_eq!(words[1].bbox, BBox::new(25.0, 98.0, 35.0, 108.0));
        assert_eq!(words[1].origin, Point::new(25.0, 100.0));
        assert_eq!(words[1].start_char_index, 5);
    }

    /// One "ABCD" event, 40pt wide, painted as "AB" and "CD" with a 20pt kern.
    fn make_kerned_event() -> GlyphEvent {
        let state = GraphicsState::new(TextState::new("Helvetica", 10.0).with_space_width(2.5));
        GlyphEvent::new("ABCD", Point::new(0.0, 100.0), BBox::new(0.0, 98.0, 40.0, 108.0), state)
            .with_char_index(10)
    }

    #[test]
    fn measured_glyphs_split_kerned_run() {
        let glyph = |x: f64| CharGeometry {
            ch: ' ',
            origin: Point::new(x, 100.0),
            bbox: BBox::new(x, 98.0, x + 5.0, 108.0),
            index: 0,
        };
        let event =
            make_kerned_event().with_chars(vec![glyph(0.0), glyph(5.0), glyph(30.0), glyph(35.0)]);
        let run = TextRun::from_element(&TextElement::from_event(&event));
        let words = WordSegmenter::segment(&run, &WordOptions::default());
        assert_eq!(texts(&words), vec!["AB", "CD"]);
        assert_eq!(words[1].bbox, BBox::new(30.0, 98.0, 40.0, 108.0));
        assert_eq!(words[1].start_char_index, 12);
    }

    #[test]
    fn unmeasured_run_is_divided_evenly() {
        let run = TextRun::from_element(&TextElement::from_event(&make_kerned_event()));
        let words = WordSegmenter::segment(&run, &WordOptions::default());
        assert_eq!(texts(&words), vec!["ABCD"]);
    }

    #[test]
    fn whitespace_glyphs_do_not_bridge_a_gap() {
        let run = make_run("AB   CD", 5.0, 5.0, false);
        let words = WordSegmenter::segment(&run, &WordOptions::default());
        assert_eq!(texts(&words), vec!["AB", "CD"]);
    }

    #[test]
    fn narrow_gap_keeps_one_word() {
        let run = make_run("AB CD", 5.0, 5.0, true);
        let words = WordSegmenter::segment(&run, &WordOptions::default());
        assert_eq!(texts(&words), vec!["ABCD"]);
        assert_eq!(words[0].bbox, run.bbox);
    }

    #[test]
    fn degenerate_space_width_uses_average_width() {
        // unit = 35 / 4 glyphs
        let run = make_run("AB   CD", 5.0, 0.0, true);
        let words = WordSegmenter::segment(&run, &WordOptions::default());
        assert_eq!(texts(&words), vec!["AB", "CD"]);
    }

    #[test]
    fn empty_run_yields_no_words() {
        let run = TextRun {
            text: String::new(),
            chars: Vec::new(),
            space_width: 0.0,
            bbox: BBox::default(),
        };
        assert!(WordSegmenter::segment(&run, &WordOptions::default()).is_empty());
    }

    #[test]
    fn zero_width_run_is_one_word() {
        let run = TextRun {
            text: "abc".to_string(),
            chars: vec![CharGeometry {
                ch: 'a',
                origin: Point::new(5.0, 5.0),
                bbox: BBox::new(5.0, 5.0, 5.0, 5.0),
                index: 0,
            }],
            space_width: 0.0,
            bbox: BBox::new(5.0, 5.0, 5.0, 5.0),
        };
        let words = WordSegmenter::segment(&run, &WordOptions::default());
        assert_eq!(texts(&words), vec!["abc"]);
    }

    #[test]
    fn unordered_chars_are_sorted_first() {
        let mut run = make_run("AB   CD", 5.0, 5.0, true);
        run.chars.reverse();
        let words = WordSegmenter::segment(&run, &WordOptions::default());
        assert_eq!(texts(&words), vec!["AB", "CD"]);
    }

    #[test]
    fn normalizes_word_text() {
        let run = make_run("ﬁx   x²", 5.0, 5.0, true);
        let options = WordOptions {
            unicode_norm: UnicodeNorm::Nfkc,
            ..WordOptions::default()
        };
        let words = WordSegmenter::segment(&run, &options);
        assert_eq!(texts(&words), vec!["fix", "x2"]);
    }

    #[test]
    fn attaches_web_links_by_start_index() {
        let run = make_run("see   docs", 5.0, 5.0, true);
        let links = vec![WebLink::new(6, 4, "https://docs.example")];
        let words = WordSegmenter::segment_with_links(&run, &WordOptions::default(), &links, &[]);
        assert_eq!(words[0].link, None);
        assert_eq!(words[1].link.as_deref(), Some("https://docs.example"));
    }

    #[test]
    fn attaches_first_containing_annotation() {
        let run = make_run("see   docs", 5.0, 5.0, true);
        let annots = vec![
            Annotation::Text {
                bbox: BBox::new(0.0, 90.0, 4.0, 110.0),
                contents: "tiny".to_string(),
            },
            Annotation::Link {
                bbox: BBox::new(28.0, 90.0, 60.0, 110.0),
                uri: Some("https://a.example".to_string()),
            },
            Annotation::Link {
                bbox: BBox::new(0.0, 0.0, 600.0, 800.0),
                uri: Some("https://page.example".to_string()),
            },
        ];
        let words = WordSegmenter::segment_with_links(&run, &WordOptions::default(), &[], &annots);
        assert_eq!(words[0].annotation, Some(2));
        assert_eq!(words[1].annotation, Some(1));
        assert_eq!(words[1].url(&annots), Some("https://a.example"));
    }

    #[test]
    fn merges_first_word_link_into_element() {
        let state = GraphicsState::new(TextState::new("Helvetica", 10.0).with_space_width(5.0));
        let ev = GlyphEvent::new(
            "read the guide",
            Point::new(0.0, 100.0),
            BBox::new(0.0, 98.0, 70.0, 108.0),
            state,
        );
        let mut element = crate::element::TextElement::from_event(&ev);
        let mut words = vec![
            WordBlock::new("read".into(), BBox::default(), Point::default(), 0),
            WordBlock::new("guide".into(), BBox::default(), Point::default(), 9),
        ];
        words[1].link = Some("https://guide.example".to_string());
        merge_word_links(&mut element, &words, &[]);
        assert_eq!(
            element.markdown_text(),
            "read the guide [guide](https://guide.example)"
        );

        // an existing link is kept
        words[0].link = Some("https://other.example".to_string());
        merge_word_links(&mut element, &words, &[]);
        assert_eq!(element.link().map(|l| l.url.as_str()), Some("https://guide.example"));
    }
}
