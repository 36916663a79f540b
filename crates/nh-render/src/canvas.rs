//! Immediate-mode SVG canvas. Coordinates in points, origin top-left.

use std::fmt::Write as FmtWrite;

use crate::color::Color;
use crate::primitives::{LineStyle, Style, TextAnchor, TextBaseline, TextStyle};

/// An SVG element stored for deferred rendering.
#[derive(Debug, Clone)]
enum SvgElement {
    Rect { x: f64, y: f64, w: f64, h: f64, style: Style },
    Line { x1: f64, y1: f64, x2: f64, y2: f64, style: LineStyle },
    Polyline { points: Vec<(f64, f64)>, style: LineStyle },
    Text { x: f64, y: f64, content: String, style: TextStyle, rotate: Option<f64> },
    Raw(String),
}

/// Deferred-render SVG canvas.
///
/// Text uses the generic `sans-serif` family and a per-character width
/// heuristic for layout; no font data is embedded in the output.
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    elements: Vec<SvgElement>,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, elements: Vec::new() }
    }

    // --- Drawing primitives ---

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &Style) {
        self.elements.push(SvgElement::Rect { x, y, w, h, style: style.clone() });
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &LineStyle) {
        self.elements.push(SvgElement::Line { x1, y1, x2, y2, style: style.clone() });
    }

    pub fn polyline(&mut self, points: &[(f64, f64)], style: &LineStyle) {
        self.elements.push(SvgElement::Polyline { points: points.to_vec(), style: style.clone() });
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle) {
        self.elements.push(SvgElement::Text {
            x,
            y,
            content: content.to_string(),
            style: style.clone(),
            rotate: None,
        });
    }

    /// Text rotated counter-clockwise by `degrees` about its anchor.
    pub fn text_rotated(&mut self, x: f64, y: f64, content: &str, style: &TextStyle, degrees: f64) {
        self.elements.push(SvgElement::Text {
            x,
            y,
            content: content.to_string(),
            style: style.clone(),
            rotate: Some(degrees),
        });
    }

    /// Frame around a rectangular area.
    pub fn frame(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, width: f64) {
        self.rect(x, y, w, h, &Style::stroked(color, width));
    }

    /// Estimated text width in points. Character-count heuristic; good
    /// enough for margin layout.
    pub fn estimate_text_width(&self, content: &str, size: f64) -> f64 {
        content.chars().count() as f64 * size * 0.55
    }

    // --- SVG output ---

    pub fn finish_svg(&self) -> String {
        let mut out = String::with_capacity(16 * 1024);
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        )
        .unwrap();

        // White background
        writeln!(out, r#"<rect width="{}" height="{}" fill="white" />"#, self.width, self.height)
            .unwrap();

        for elem in &self.elements {
            render_element(&mut out, elem);
        }
        out.push_str("</svg>\n");
        out
    }
}

fn render_element(out: &mut String, elem: &SvgElement) {
    match elem {
        SvgElement::Rect { x, y, w, h, style } => {
            write!(out, r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}""#)
                .unwrap();
            write_style_attrs(out, style);
            out.push_str(" />\n");
        }
        SvgElement::Line { x1, y1, x2, y2, style } => {
            write!(out, r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}""#)
                .unwrap();
            write_line_attrs(out, style);
            out.push_str(" />\n");
        }
        SvgElement::Polyline { points, style } => {
            out.push_str(r#"<polyline points=""#);
            for (i, (x, y)) in points.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write!(out, "{x:.2},{y:.2}").unwrap();
            }
            out.push('"');
            out.push_str(r#" fill="none""#);
            write_line_attrs(out, style);
            out.push_str(" />\n");
        }
        SvgElement::Text { x, y, content, style, rotate } => {
            write!(out, r#"<text x="{x:.2}" y="{y:.2}""#).unwrap();
            write!(
                out,
                r#" font-family="sans-serif" font-size="{:.1}" fill="{}""#,
                style.size,
                style.color.to_svg_fill()
            )
            .unwrap();
            match style.anchor {
                TextAnchor::Start => {}
                TextAnchor::Middle => out.push_str(r#" text-anchor="middle""#),
                TextAnchor::End => out.push_str(r#" text-anchor="end""#),
            }
            match style.baseline {
                TextBaseline::Alphabetic => {}
                TextBaseline::Central => out.push_str(r#" dominant-baseline="central""#),
                TextBaseline::Hanging => out.push_str(r#" dominant-baseline="hanging""#),
            }
            if let Some(deg) = rotate {
                write!(out, r#" transform="rotate({:.1} {x:.2} {y:.2})""#, -deg)
                    .unwrap();
            }
            out.push('>');
            out.push_str(&escape_xml(content));
            out.push_str("</text>\n");
        }
        SvgElement::Raw(s) => {
            out.push_str(s);
            out.push('\n');
        }
    }
}

fn write_style_attrs(out: &mut String, style: &Style) {
    if let Some(fill) = &style.fill {
        write!(out, r#" fill="{}""#, fill.to_svg_fill()).unwrap();
    } else {
        out.push_str(r#" fill="none""#);
    }
    if let Some(stroke) = &style.stroke {
        write!(out, r#" stroke="{}" stroke-width="{:.2}""#, stroke.to_svg_fill(), style.stroke_width)
            .unwrap();
    }
}

fn write_line_attrs(out: &mut String, style: &LineStyle) {
    write!(out, r#" stroke="{}" stroke-width="{:.2}""#, style.color.to_svg_fill(), style.width)
        .unwrap();
    if let Some(dash) = &style.dash {
        write!(out, r#" stroke-dasharray="{dash}""#).unwrap();
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
