//! Graphics and text state snapshots.
//!
//! The page collaborator builds one [`GraphicsState`] per painted glyph.
//! States are plain values: the run assembler only ever compares them, so
//! equality is exact and bitwise on every float that takes part in it.

use crate::geometry::Matrix;

/// Text rendering mode (PDF `Tr` operator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextRenderMode {
    #[default]
    Fill,
    Stroke,
    FillStroke,
    Invisible,
    FillClip,
    StrokeClip,
    FillStrokeClip,
    Clip,
    /// The collaborator could not report a mode.
    Unknown,
}

impl TextRenderMode {
    /// Map a raw `Tr` operand. Anything outside `0..=7` is [`Unknown`](Self::Unknown).
    pub fn from_raw(mode: i32) -> Self {
        match mode {
            0 => TextRenderMode::Fill,
            1 => TextRenderMode::Stroke,
            2 => TextRenderMode::FillStroke,
            3 => TextRenderMode::Invisible,
            4 => TextRenderMode::FillClip,
            5 => TextRenderMode::StrokeClip,
            6 => TextRenderMode::FillStrokeClip,
            7 => TextRenderMode::Clip,
            _ => TextRenderMode::Unknown,
        }
    }

    /// Whether glyphs painted in this mode leave visible ink.
    pub fn is_visible(&self) -> bool {
        !matches!(self, TextRenderMode::Invisible | TextRenderMode::Clip)
    }
}

/// Font and text-layout attributes active when a glyph was painted.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TextState {
    pub font_family: String,
    pub font_weight: i32,
    pub italic_angle: f32,
    pub char_spacing: f32,
    pub word_spacing: f32,
    /// Horizontal scaling in percent (`Tz`), 100 = unscaled.
    pub horizontal_scaling: f32,
    pub leading: f32,
    pub font_size: f32,
    pub rise: f32,
    pub knockout: bool,
    pub render_mode: TextRenderMode,
    /// Width of a representative space-like glyph in user space.
    ///
    /// Derived by the collaborator, so it does not take part in equality.
    pub space_width: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font_family: String::new(),
            font_weight: 400,
            italic_angle: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scaling: 100.0,
            leading: 0.0,
            font_size: 0.0,
            rise: 0.0,
            knockout: false,
            render_mode: TextRenderMode::Fill,
            space_width: 0.0,
        }
    }
}

impl TextState {
    /// Convenience constructor for the common family + size pair.
    pub fn new(font_family: &str, font_size: f32) -> Self {
        Self {
            font_family: font_family.to_string(),
            font_size,
            ..Self::default()
        }
    }

    pub fn with_space_width(mut self, space_width: f32) -> Self {
        self.space_width = space_width;
        self
    }

    /// Whether the font is one of the symbol faces used for bullets.
    pub fn is_wingding_font(&self) -> bool {
        let family = self.font_family.to_ascii_lowercase();
        family.contains("wingding") || family.contains("webding")
    }
}

impl PartialEq for TextState {
    fn eq(&self, other: &Self) -> bool {
        self.font_family == other.font_family
            && self.font_weight == other.font_weight
            && same_bits(self.italic_angle, other.italic_angle)
            && same_bits(self.char_spacing, other.char_spacing)
            && same_bits(self.word_spacing, other.word_spacing)
            && same_bits(self.horizontal_scaling, other.horizontal_scaling)
            && same_bits(self.leading, other.leading)
            && same_bits(self.font_size, other.font_size)
            && same_bits(self.rise, other.rise)
            && self.knockout == other.knockout
            && self.render_mode == other.render_mode
    }
}

impl Eq for TextState {}

/// A fill or stroke color.
///
/// `components` holds up to four channel values in the source's own range
/// (0-255 for RGBA colors built by [`ColorState::from_rgba`]).
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ColorState {
    pub components: Vec<f32>,
    pub pattern_name: Option<String>,
    pub color_space: Option<String>,
    /// Packed `R << 24 | G << 16 | B << 8 | A`.
    pub int_value: u32,
}

impl ColorState {
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            components: vec![r as f32, g as f32, b as f32, a as f32],
            pattern_name: None,
            color_space: Some("RGBA".to_string()),
            int_value: (r as u32) << 24 | (g as u32) << 16 | (b as u32) << 8 | a as u32,
        }
    }

    /// Opaque RGB shorthand.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba(r, g, b, 255)
    }

    /// The `(r, g, b)` channels when this is a four-component color.
    pub fn rgb_channels(&self) -> Option<(u8, u8, u8)> {
        match self.components.as_slice() {
            [r, g, b, _] => Some((channel(*r), channel(*g), channel(*b))),
            _ => None,
        }
    }
}

fn channel(v: f32) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

impl PartialEq for ColorState {
    fn eq(&self, other: &Self) -> bool {
        self.components.len() == other.components.len()
            && self
                .components
                .iter()
                .zip(&other.components)
                .all(|(a, b)| same_bits(*a, *b))
            && eq_ignore_case(&self.pattern_name, &other.pattern_name)
            && eq_ignore_case(&self.color_space, &other.color_space)
            && self.int_value == other.int_value
    }
}

impl Eq for ColorState {}

fn eq_ignore_case(a: &Option<String>, b: &Option<String>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

/// Complete paint state captured for one glyph.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphicsState {
    pub text_state: TextState,
    /// `None` means no fill color was reported, which differs from a color
    /// with zero components.
    pub non_stroking_color: Option<ColorState>,
    pub stroking_color: Option<ColorState>,
    pub matrix: Matrix,
    pub line_width: f32,
    pub line_cap: i32,
    pub line_join: i32,
    pub miter_limit: f32,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            text_state: TextState::default(),
            non_stroking_color: None,
            stroking_color: None,
            matrix: Matrix::identity(),
            line_width: 1.0,
            line_cap: 0,
            line_join: 0,
            miter_limit: 10.0,
        }
    }
}

impl GraphicsState {
    pub fn new(text_state: TextState) -> Self {
        Self {
            text_state,
            ..Self::default()
        }
    }

    pub fn with_fill(mut self, color: ColorState) -> Self {
        self.non_stroking_color = Some(color);
        self
    }

    pub fn with_stroke(mut self, color: ColorState) -> Self {
        self.stroking_color = Some(color);
        self
    }

    pub fn with_matrix(mut self, matrix: Matrix) -> Self {
        self.matrix = matrix;
        self
    }

    pub fn font_size(&self) -> f32 {
        self.text_state.font_size
    }

    pub fn space_width(&self) -> f32 {
        self.text_state.space_width
    }
}

impl PartialEq for GraphicsState {
    fn eq(&self, other: &Self) -> bool {
        self.text_state == other.text_state
            && self.non_stroking_color == other.non_stroking_color
            && self.stroking_color == other.stroking_color
            && self.matrix.same_linear_part(&other.matrix)
            && same_bits(self.line_width, other.line_width)
            && self.line_cap == other.line_cap
            && self.line_join == other.line_join
            && same_bits(self.miter_limit, other.miter_limit)
    }
}

impl Eq for GraphicsState {}

fn same_bits(a: f32, b: f32) -> bool {
    a.to_bits() == b.to_bits()
}
