// Copyright 2026 The Levelscheme Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The render context.
//!
//! A `Canvas` maps plot coordinates (x right, y up) into the pixel space of
//! one figure and collects SVG fragments. Fragments are grouped in stacking
//! layers; within a layer later calls draw on top.

use crate::diagram::common::{Point, escape_xml_attr, format_number};
use crate::diagram::constants::{BACKGROUND, DASH_OFFSET, FONT_FAMILY, PT_PER_INCH};
use crate::diagram::label::{TextRun, TextStyle, render_text};
use crate::layout::config::SchemeConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Patch = 0,
    Line = 1,
    Text = 2,
}

const Z_MAX: usize = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Points.
    pub width: f64,
    pub color: String,
    /// On/off lengths in points, scaled by the stroke width.
    pub dashes: Option<Vec<f64>>,
}

impl Stroke {
    pub fn solid(width: f64, color: &str) -> Self {
        Stroke {
            width,
            color: color.to_owned(),
            dashes: None,
        }
    }

    pub fn dashed(mut self, pattern: &[f64]) -> Self {
        self.dashes = Some(pattern.to_vec());
        self
    }
}

pub struct Canvas {
    width: f64,
    height: f64,
    px_per_pt: f64,
    axes_left: f64,
    axes_right: f64,
    axes_top: f64,
    axes_bottom: f64,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    layers: Vec<Vec<String>>,
}

impl Canvas {
    pub fn new(cfg: &SchemeConfig) -> Self {
        let width = cfg.figure_width * cfg.dpi;
        let height = cfg.figure_width * cfg.scaling_height_factor * cfg.dpi;
        Canvas {
            width,
            height,
            px_per_pt: cfg.dpi / PT_PER_INCH,
            axes_left: cfg.margin_left * width,
            axes_right: cfg.margin_right * width,
            axes_top: (1.0 - cfg.margin_top) * height,
            axes_bottom: (1.0 - cfg.margin_bottom) * height,
            x_min: 0.0,
            x_max: cfg.scheme_width,
            y_min: cfg.y_min,
            y_max: cfg.scheme_height,
            layers: vec![Vec::new(); Z_MAX],
        }
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn pt_to_px(&self, pt: f64) -> f64 {
        pt * self.px_per_pt
    }

    pub fn to_px(&self, p: Point) -> Point {
        let x = self.axes_left
            + (p.x - self.x_min) / (self.x_max - self.x_min) * (self.axes_right - self.axes_left);
        let y = self.axes_bottom
            - (p.y - self.y_min) / (self.y_max - self.y_min) * (self.axes_bottom - self.axes_top);
        Point::new(x, y)
    }

    /// Converts a figure fraction (from the bottom left) into pixels.
    pub fn figure_to_px(&self, fx: f64, fy: f64) -> Point {
        Point::new(fx * self.width, (1.0 - fy) * self.height)
    }

    fn push(&mut self, layer: Layer, fragment: String) {
        self.layers[layer as usize].push(fragment);
    }

    fn stroke_attrs(&self, stroke: &Stroke) -> String {
        let mut attrs = format!(
            " stroke=\"{}\" stroke-width=\"{}\"",
            escape_xml_attr(&stroke.color),
            format_number(self.pt_to_px(stroke.width))
        );
        if let Some(dashes) = &stroke.dashes {
            let scale = self.pt_to_px(stroke.width);
            let pattern: Vec<String> = dashes.iter().map(|d| format_number(d * scale)).collect();
            attrs.push_str(&format!(
                " stroke-dasharray=\"{}\" stroke-dashoffset=\"{}\"",
                pattern.join(","),
                format_number(DASH_OFFSET * scale)
            ));
        }
        attrs
    }

    pub fn line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        let a = self.to_px(from);
        let b = self.to_px(to);
        let fragment = format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{} stroke-linecap=\"square\"></line>",
            format_number(a.x),
            format_number(a.y),
            format_number(b.x),
            format_number(b.y),
            self.stroke_attrs(stroke)
        );
        self.push(Layer::Line, fragment);
    }

    pub fn polygon(&mut self, points: &[Point], fill: &str, stroke: &Stroke) {
        let points: Vec<String> = points
            .iter()
            .map(|&p| {
                let p = self.to_px(p);
                format!("{},{}", format_number(p.x), format_number(p.y))
            })
            .collect();
        let fragment = format!(
            "<polygon points=\"{}\" fill=\"{}\"{} stroke-linejoin=\"miter\"></polygon>",
            points.join(" "),
            escape_xml_attr(fill),
            self.stroke_attrs(stroke)
        );
        self.push(Layer::Patch, fragment);
    }

    /// Draws text anchored at a plot coordinate.
    pub fn text(&mut self, at: Point, runs: &[TextRun], style: &TextStyle) {
        let at = self.to_px(at);
        let fragment = render_text(at, runs, style, self.pt_to_px(style.font_size));
        self.push(Layer::Text, fragment);
    }

    /// Draws text anchored at a figure fraction.
    pub fn figure_text(&mut self, fx: f64, fy: f64, runs: &[TextRun], style: &TextStyle) {
        let at = self.figure_to_px(fx, fy);
        let fragment = render_text(at, runs, style, self.pt_to_px(style.font_size));
        self.push(Layer::Text, fragment);
    }

    /// Consumes the canvas and returns the SVG document.
    pub fn finish(self) -> String {
        let width = format_number(self.width);
        let height = format_number(self.height);

        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" class=\"levelscheme-canvas\">"
        ));
        svg.push_str("<style>\n");
        svg.push_str(&format!(
            ".levelscheme-canvas text {{\n  fill: #000000;\n  font-family: {FONT_FAMILY};\n  white-space: pre;\n}}\n"
        ));
        svg.push_str("</style>\n");
        svg.push_str(&format!(
            "<rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"{BACKGROUND}\"></rect>"
        ));
        svg.push_str("<g>");
        for layer in &self.layers {
            for fragment in layer {
                svg.push_str(fragment);
            }
        }
        svg.push_str("</g>");
        svg.push_str("</svg>");
        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(&SchemeConfig::default())
    }

    #[test]
    fn test_canvas_size() {
        let canvas = canvas();
        let (w, h) = canvas.size();
        assert!((w - 1200.0).abs() < 1e-9);
        assert!((h - 720.0).abs() < 1e-9);
    }

    #[test]
    fn test_to_px_corners() {
        let canvas = canvas();

        let p = canvas.to_px(Point::new(0.0, -10.0));
        assert!((p.x - 12.0).abs() < 1e-9);
        assert!((p.y - 0.89 * 720.0).abs() < 1e-9);

        let p = canvas.to_px(Point::new(1000.0, 7000.0));
        assert!((p.x - 1188.0).abs() < 1e-9);
        assert!((p.y - 0.12 * 720.0).abs() < 1e-9);
    }

    #[test]
    fn test_y_up() {
        let canvas = canvas();
        let low = canvas.to_px(Point::new(0.0, 0.0));
        let high = canvas.to_px(Point::new(0.0, 4055.0));
        assert!(high.y < low.y);
    }

    #[test]
    fn test_figure_to_px() {
        let canvas = canvas();
        let p = canvas.figure_to_px(0.5, 0.25);
        assert!((p.x - 600.0).abs() < 1e-9);
        assert!((p.y - 540.0).abs() < 1e-9);
    }

    #[test]
    fn test_layers_stack_patches_below_lines_below_text() {
        let mut canvas = canvas();
        let style = TextStyle::new(10.0);
        canvas.text(Point::new(500.0, 500.0), &[TextRun::plain("label")], &style);
        canvas.line(
            Point::new(50.0, 0.0),
            Point::new(950.0, 0.0),
            &Stroke::solid(0.5, "black"),
        );
        canvas.polygon(
            &[
                Point::new(0.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(2.0, 0.0),
            ],
            "black",
            &Stroke::solid(1.0, "black"),
        );

        let svg = canvas.finish();
        let polygon = svg.find("<polygon").unwrap();
        let line = svg.find("<line").unwrap();
        let text = svg.find("<text").unwrap();
        assert!(polygon < line);
        assert!(line < text);
    }

    #[test]
    fn test_later_calls_on_top_within_layer() {
        let mut canvas = canvas();
        canvas.line(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            &Stroke::solid(1.0, "blue"),
        );
        canvas.line(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            &Stroke::solid(1.0, "red"),
        );
        let svg = canvas.finish();
        assert!(svg.find("stroke=\"blue\"").unwrap() < svg.find("stroke=\"red\"").unwrap());
    }

    #[test]
    fn test_dashed_stroke() {
        let mut canvas = canvas();
        let stroke = Stroke::solid(1.0, "black").dashed(&[10.0, 10.0]);
        canvas.line(Point::new(0.0, 0.0), Point::new(1.0, 0.0), &stroke);
        let svg = canvas.finish();
        assert!(svg.contains("stroke-dasharray=\"13.889,13.889\""));
        assert!(svg.contains("stroke-dashoffset=\"1.389\""));
    }

    #[test]
    fn test_finish_document() {
        let svg = canvas().finish();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1200\" height=\"720\""));
        assert!(svg.ends_with("</g></svg>"));
        assert!(svg.contains("fill=\"white\""));
    }
}
