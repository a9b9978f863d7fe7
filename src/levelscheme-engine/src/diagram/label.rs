// Copyright 2026 The Levelscheme Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use crate::diagram::common::{Point, deg_to_rad, escape_xml_attr, escape_xml_text, format_number};
use crate::diagram::constants::{ASCENT, CHAR_WIDTH, SUPERSCRIPT_SCALE, TEXT_BOX_PAD};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

impl TextAnchor {
    fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalAlign {
    /// The anchor point is on the text baseline.
    Baseline,
    /// The anchor point is on the bottom edge of the (rotated) text box.
    Bottom,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub superscript: bool,
}

impl TextRun {
    pub fn plain(text: &str) -> Self {
        TextRun {
            text: text.to_owned(),
            superscript: false,
        }
    }

    pub fn superscript(text: &str) -> Self {
        TextRun {
            text: text.to_owned(),
            superscript: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Points.
    pub font_size: f64,
    pub anchor: TextAnchor,
    pub valign: VerticalAlign,
    /// Counter-clockwise, degrees.
    pub rotation: f64,
    /// Fill of an opaque box behind the text.
    pub background: Option<String>,
}

impl TextStyle {
    pub fn new(font_size: f64) -> Self {
        TextStyle {
            font_size,
            anchor: TextAnchor::Middle,
            valign: VerticalAlign::Baseline,
            rotation: 0.0,
            background: None,
        }
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn valign(mut self, valign: VerticalAlign) -> Self {
        self.valign = valign;
        self
    }

    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn background(mut self, color: &str) -> Self {
        self.background = Some(color.to_owned());
        self
    }
}

/// Estimated unrotated width and height of the runs, in pixels.
pub fn text_extent(runs: &[TextRun], font_px: f64) -> (f64, f64) {
    let width = runs
        .iter()
        .map(|run| {
            let size = if run.superscript {
                font_px * SUPERSCRIPT_SCALE
            } else {
                font_px
            };
            run.text.chars().count() as f64 * CHAR_WIDTH * size
        })
        .sum();
    (width, font_px)
}

/// Axis-aligned size of a `width` x `height` box rotated by `degrees`.
pub fn rotated_extent(width: f64, height: f64, degrees: f64) -> (f64, f64) {
    let (sin, cos) = deg_to_rad(degrees).sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    (width * cos + height * sin, width * sin + height * cos)
}

fn render_runs(svg: &mut String, runs: &[TextRun], font_px: f64) {
    for run in runs {
        if run.superscript {
            svg.push_str(&format!(
                "<tspan baseline-shift=\"super\" style=\"font-size:{}px\">",
                format_number(font_px * SUPERSCRIPT_SCALE)
            ));
            svg.push_str(&escape_xml_text(&run.text));
            svg.push_str("</tspan>");
        } else {
            svg.push_str(&escape_xml_text(&run.text));
        }
    }
}

fn render_box(svg: &mut String, left: f64, top: f64, width: f64, height: f64, fill: &str) {
    svg.push_str(&format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"></rect>",
        format_number(left),
        format_number(top),
        format_number(width),
        format_number(height),
        escape_xml_attr(fill)
    ));
}

/// Renders text anchored at `at`, in pixel coordinates.
pub fn render_text(at: Point, runs: &[TextRun], style: &TextStyle, font_px: f64) -> String {
    let (width, height) = text_extent(runs, font_px);
    let pad = TEXT_BOX_PAD * font_px;

    let mut svg = String::new();
    match style.valign {
        VerticalAlign::Baseline => {
            if style.rotation != 0.0 {
                svg.push_str(&format!(
                    "<g transform=\"rotate({},{},{})\">",
                    format_number(-style.rotation),
                    format_number(at.x),
                    format_number(at.y)
                ));
            } else {
                svg.push_str("<g>");
            }
            if let Some(fill) = &style.background {
                let left = match style.anchor {
                    TextAnchor::Start => at.x,
                    TextAnchor::Middle => at.x - width / 2.0,
                };
                let top = at.y - ASCENT * font_px;
                render_box(
                    &mut svg,
                    left - pad,
                    top - pad,
                    width + 2.0 * pad,
                    height + 2.0 * pad,
                    fill,
                );
            }
            svg.push_str(&format!(
                "<text x=\"{}\" y=\"{}\" style=\"font-size:{}px;text-anchor:{}\">",
                format_number(at.x),
                format_number(at.y),
                format_number(font_px),
                style.anchor.as_str()
            ));
        }
        VerticalAlign::Bottom => {
            // Align the rotated bounding box, then draw the text centered in it.
            let (bbox_width, bbox_height) = rotated_extent(width, height, style.rotation);
            let cx = match style.anchor {
                TextAnchor::Start => at.x + bbox_width / 2.0,
                TextAnchor::Middle => at.x,
            };
            let cy = at.y - bbox_height / 2.0;
            svg.push_str(&format!(
                "<g transform=\"translate({},{}) rotate({})\">",
                format_number(cx),
                format_number(cy),
                format_number(-style.rotation)
            ));
            if let Some(fill) = &style.background {
                render_box(
                    &mut svg,
                    -width / 2.0 - pad,
                    -height / 2.0 - pad,
                    width + 2.0 * pad,
                    height + 2.0 * pad,
                    fill,
                );
            }
            svg.push_str(&format!(
                "<text x=\"0\" y=\"0\" dominant-baseline=\"central\" style=\"font-size:{}px;text-anchor:middle\">",
                format_number(font_px)
            ));
        }
    }
    render_runs(&mut svg, runs, font_px);
    svg.push_str("</text></g>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_extent() {
        let (w, h) = text_extent(&[TextRun::plain("805.8")], 10.0);
        assert!((w - 30.0).abs() < 1e-9);
        assert_eq!(10.0, h);

        let (w, _) = text_extent(&[TextRun::plain("3/2"), TextRun::superscript("+")], 10.0);
        assert!((w - (18.0 + 4.2)).abs() < 1e-9);
    }

    #[test]
    fn test_rotated_extent() {
        let (w, h) = rotated_extent(30.0, 10.0, 0.0);
        assert!((w - 30.0).abs() < 1e-9);
        assert!((h - 10.0).abs() < 1e-9);

        let (w, h) = rotated_extent(30.0, 10.0, 90.0);
        assert!((w - 10.0).abs() < 1e-9);
        assert!((h - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_render_text_baseline() {
        let style = TextStyle::new(10.0);
        let svg = render_text(Point::new(100.0, 200.0), &[TextRun::plain("805.8")], &style, 13.9);
        assert!(svg.starts_with("<g><text"));
        assert!(svg.ends_with("</text></g>"));
        assert!(svg.contains("x=\"100\" y=\"200\""));
        assert!(svg.contains("text-anchor:middle"));
        assert!(svg.contains(">805.8</text>"));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn test_render_text_superscript() {
        let style = TextStyle::new(10.0).anchor(TextAnchor::Start);
        let runs = [TextRun::superscript("63"), TextRun::plain("Ni")];
        let svg = render_text(Point::new(0.0, 0.0), &runs, &style, 20.0);
        assert!(svg.contains("text-anchor:start"));
        assert!(svg.contains("<tspan baseline-shift=\"super\" style=\"font-size:14px\">63</tspan>Ni"));
    }

    #[test]
    fn test_render_text_rotated_box() {
        let style = TextStyle::new(8.0)
            .valign(VerticalAlign::Bottom)
            .rotation(60.0)
            .background("white");
        let svg = render_text(Point::new(100.0, 200.0), &[TextRun::plain("805.8")], &style, 10.0);
        assert!(svg.contains("rotate(-60)"));
        assert!(svg.contains("translate(100,"));
        assert!(svg.contains("dominant-baseline=\"central\""));
        assert!(svg.contains("fill=\"white\""));
        // box precedes text so the text is drawn on top of it
        assert!(svg.find("<rect").unwrap() < svg.find("<text").unwrap());
    }

    #[test]
    fn test_render_text_bottom_sits_above_anchor() {
        let style = TextStyle::new(8.0).valign(VerticalAlign::Bottom);
        let svg = render_text(Point::new(50.0, 100.0), &[TextRun::plain("1")], &style, 10.0);
        // unrotated: centre is half the height above the anchor
        assert!(svg.contains("translate(50,95)"));
    }

    #[test]
    fn test_render_text_escaping() {
        let style = TextStyle::new(10.0);
        let svg = render_text(Point::new(0.0, 0.0), &[TextRun::plain("a & b")], &style, 10.0);
        assert!(svg.contains(">a &amp; b</text>"));
    }
}
