// Copyright 2026 The Levelscheme Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use crate::datamodel::{Level, Parity};
use crate::diagram::canvas::{Canvas, Stroke};
use crate::diagram::common::Point;
use crate::diagram::constants::ANNOTATION_COLOR;
use crate::diagram::label::{TextRun, TextStyle};
use crate::layout::config::SchemeConfig;
use crate::layout::{PlacedLevel, SchemeGeometry};

fn parity_glyph(parity: Parity) -> &'static str {
    match parity {
        Parity::Positive => "+",
        Parity::Negative => "\u{2212}",
    }
}

/// Spin followed by the parity as a superscript, or nothing when the level
/// has no parity.
pub fn spin_parity_runs(level: &Level) -> Option<Vec<TextRun>> {
    level.spin_parity_label().map(|label| {
        vec![
            TextRun::plain(&label.spin),
            TextRun::superscript(parity_glyph(label.parity)),
        ]
    })
}

pub fn draw_level_line(canvas: &mut Canvas, level: &Level, geometry: &SchemeGeometry) {
    canvas.line(
        Point::new(geometry.level_line_start, level.energy),
        Point::new(geometry.level_line_end, level.energy),
        &Stroke::solid(level.stroke_width(), &level.color),
    );
}

pub fn draw_spin_annotation(
    canvas: &mut Canvas,
    level: &Level,
    placed: &PlacedLevel,
    geometry: &SchemeGeometry,
    cfg: &SchemeConfig,
) {
    let stroke = Stroke::solid(level.line_width, ANNOTATION_COLOR);
    let y = placed.annotation_y;
    canvas.line(
        Point::new(geometry.spin_start, y),
        Point::new(geometry.spin_end, y),
        &stroke,
    );
    canvas.line(
        Point::new(geometry.spin_end, y),
        Point::new(geometry.level_line_start, level.energy),
        &stroke,
    );

    if let Some(runs) = spin_parity_runs(level) {
        canvas.text(
            Point::new(geometry.spin_text_x, y + geometry.label_offset),
            &runs,
            &TextStyle::new(cfg.font_size),
        );
    }
}

pub fn draw_energy_annotation(
    canvas: &mut Canvas,
    level: &Level,
    placed: &PlacedLevel,
    geometry: &SchemeGeometry,
    cfg: &SchemeConfig,
) {
    let stroke = Stroke::solid(level.line_width, ANNOTATION_COLOR);
    let y = placed.annotation_y;
    canvas.line(
        Point::new(geometry.energy_start, y),
        Point::new(geometry.energy_end, y),
        &stroke,
    );
    canvas.line(
        Point::new(geometry.level_line_end, level.energy),
        Point::new(geometry.energy_start, y),
        &stroke,
    );
    canvas.text(
        Point::new(geometry.energy_text_x, y + geometry.label_offset),
        &[TextRun::plain(&level.key())],
        &TextStyle::new(cfg.font_size),
    );
}

pub fn draw_level(
    canvas: &mut Canvas,
    level: &Level,
    placed: &PlacedLevel,
    geometry: &SchemeGeometry,
    cfg: &SchemeConfig,
) {
    draw_level_line(canvas, level, geometry);
    draw_spin_annotation(canvas, level, placed, geometry, cfg);
    draw_energy_annotation(canvas, level, placed, geometry, cfg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datamodel::{LevelSet, Parity};

    fn setup(level: Level) -> (LevelSet, PlacedLevel) {
        let mut levels = LevelSet::new();
        let energy = level.energy;
        let id = levels.insert(level);
        let placed = PlacedLevel {
            id,
            energy,
            annotation_y: energy + 200.0,
        };
        (levels, placed)
    }

    fn draw(level: Level) -> String {
        let cfg = SchemeConfig::default();
        let geometry = SchemeGeometry::new(&cfg);
        let (levels, placed) = setup(level);
        let mut canvas = Canvas::new(&cfg);
        draw_level(&mut canvas, levels.by_id(placed.id).unwrap(), &placed, &geometry, &cfg);
        canvas.finish()
    }

    #[test]
    fn test_spin_parity_runs() {
        let runs = spin_parity_runs(&Level::new(0.0, "3/2", Some(Parity::Negative))).unwrap();
        assert_eq!(2, runs.len());
        assert_eq!("3/2", runs[0].text);
        assert!(!runs[0].superscript);
        assert_eq!("\u{2212}", runs[1].text);
        assert!(runs[1].superscript);

        assert!(spin_parity_runs(&Level::new(0.0, "3/2", None)).is_none());
    }

    #[test]
    fn test_draw_level() {
        let svg = draw(Level::new(805.8, "3/2", Some(Parity::Positive)));
        // level line, two stubs and two diagonals
        assert_eq!(5, svg.matches("<line").count());
        assert!(svg.contains(">805.8</text>"));
        assert!(svg.contains(">3/2<tspan baseline-shift=\"super\""));
        assert!(svg.contains(">+</tspan>"));
    }

    #[test]
    fn test_draw_level_without_parity_has_no_spin_text() {
        let svg = draw(Level::new(805.8, "3/2", None));
        assert_eq!(5, svg.matches("<line").count());
        assert_eq!(1, svg.matches("<text").count());
        assert!(!svg.contains("3/2"));
    }

    #[test]
    fn test_draw_highlighted_level() {
        let mut level = Level::new(805.8, "3/2", Some(Parity::Positive));
        level.highlight(4.0, "red");
        let svg = draw(level);
        // only the level line takes the highlight
        assert_eq!(1, svg.matches("stroke=\"red\"").count());
        assert!(svg.contains("stroke=\"red\" stroke-width=\"5.556\""));
        // annotations keep the base width
        assert_eq!(4, svg.matches("stroke=\"black\" stroke-width=\"0.694\"").count());
    }
}
