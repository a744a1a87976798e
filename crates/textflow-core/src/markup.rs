//! Inline HTML rendering of assembled text.
//!
//! Elements become `<span>`s styled from their fill color, wrapped in `<a>`
//! when linked. A page renders one `<p>` per line, list items inside
//! `<ul>`/`<ol>`, and column groups as `<table>`s.

use crate::element::{TextElement, is_space_between};
use crate::layout::LineLayout;
use crate::list_marker::list_marker;
use crate::state::{ColorState, GraphicsState};

/// Channels above this value on all of r, g and b render as black.
const NEAR_WHITE: u8 = 222;

/// CSS declarations for the element's paint state.
///
/// Only the fill color is mapped. Near-white fills become black so text stays
/// readable on a white background.
pub fn state_to_css(state: &GraphicsState) -> String {
    state
        .non_stroking_color
        .as_ref()
        .and_then(css_color)
        .map(|color| format!("color: {color};"))
        .unwrap_or_default()
}

fn css_color(color: &ColorState) -> Option<String> {
    let (mut r, mut g, mut b) = color.rgb_channels()?;
    if r > NEAR_WHITE && g > NEAR_WHITE && b > NEAR_WHITE {
        (r, g, b) = (0, 0, 0);
    }
    Some(format!("rgb({r},{g},{b})"))
}

/// Render one element as a styled span, or `None` when it has no mappable style.
///
/// `alt_text` replaces the element text when given.
pub fn element_html(element: &TextElement, alt_text: Option<&str>) -> Option<String> {
    let css = state_to_css(element.state());
    if css.trim().is_empty() {
        return None;
    }
    let text = escape_html(alt_text.unwrap_or(element.text()));
    let span = format!("<span style=\"{css}\">{text}</span>");
    Some(match element.link() {
        Some(link) => format!("<a href=\"{}\">{span}</a>", escape_html(&link.url)),
        None => span,
    })
}

/// Element HTML, falling back to escaped plain text.
fn element_piece(element: &TextElement) -> String {
    element_html(element, None).unwrap_or_else(|| escape_html(element.text()))
}

#[derive(Debug, Clone, PartialEq)]
enum HtmlElement {
    Paragraph(String),
    ListItem { ordered: bool, text: String },
    Table(String),
}

/// Renders a page's text as HTML.
pub struct HtmlRenderer;

impl HtmlRenderer {
    /// Render the page's lines in reading order.
    ///
    /// `baseline_epsilon` decides where spaces go between neighbours.
    pub fn render(elements: &[TextElement], layout: &LineLayout, baseline_epsilon: f64) -> String {
        let mut blocks = Vec::new();
        let mut i = 0;
        while i < layout.lines.len() {
            if let Some(group) = layout.groups.iter().find(|g| g.start == i) {
                let rows = &layout.lines[group.start..=group.end];
                blocks.push(HtmlElement::Table(table_html(elements, rows)));
                i = group.end + 1;
                continue;
            }
            let line = &layout.lines[i];
            let html = line_html(elements, line.elements(), baseline_epsilon);
            let plain = line.text(elements, baseline_epsilon);
            blocks.push(match list_marker(&plain) {
                Some(marker) => HtmlElement::ListItem {
                    ordered: marker.ordered,
                    text: html,
                },
                None => HtmlElement::Paragraph(html),
            });
            i += 1;
        }
        render_elements(&blocks)
    }
}

fn line_html(elements: &[TextElement], members: &[usize], baseline_epsilon: f64) -> String {
    let mut out = String::new();
    let mut prev: Option<&TextElement> = None;
    for &index in members {
        let el = &elements[index];
        if let Some(p) = prev {
            if is_space_between(p, el, baseline_epsilon) {
                out.push(' ');
            }
        }
        out.push_str(&element_piece(el));
        prev = Some(el);
    }
    out
}

fn table_html(elements: &[TextElement], rows: &[crate::layout::TextLine]) -> String {
    let mut html = String::from("<table>\n");
    for row in rows {
        html.push_str("<tr>");
        for &index in row.elements() {
            html.push_str(&format!("<td>{}</td>", element_piece(&elements[index])));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>");
    html
}

/// Escape special HTML characters.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn render_elements(elements: &[HtmlElement]) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut i = 0;

    while i < elements.len() {
        match &elements[i] {
            HtmlElement::Paragraph(text) => {
                parts.push(format!("<p>{text}</p>"));
                i += 1;
            }
            HtmlElement::Table(html) => {
                parts.push(html.clone());
                i += 1;
            }
            HtmlElement::ListItem { ordered, .. } => {
                let is_ordered = *ordered;
                let tag = if is_ordered { "ol" } else { "ul" };
                let mut items = Vec::new();
                while let Some(HtmlElement::ListItem { ordered, text }) = elements.get(i) {
                    if *ordered != is_ordered {
                        break;
                    }
                    items.push(format!("<li>{text}</li>"));
                    i += 1;
                }
                parts.push(format!("<{tag}>\n{}\n</{tag}>", items.join("\n")));
            }
        }
    }

    parts.join("\n")
}
