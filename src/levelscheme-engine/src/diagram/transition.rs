// Copyright 2026 The Levelscheme Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use crate::datamodel::{LineStyle, Transition};
use crate::diagram::arrowhead::arrow_polygon;
use crate::diagram::canvas::{Canvas, Stroke};
use crate::diagram::common::Point;
use crate::diagram::constants::{ARROW_EDGE_WIDTH, BACKGROUND, DASH_PATTERN};
use crate::diagram::label::{TextRun, TextStyle, VerticalAlign};
use crate::layout::config::SchemeConfig;
use crate::layout::{PlacedTransition, SchemeGeometry};

pub fn draw_transition(
    canvas: &mut Canvas,
    transition: &Transition,
    placed: &PlacedTransition,
    geometry: &SchemeGeometry,
    cfg: &SchemeConfig,
) {
    let outline = arrow_polygon(
        placed.x,
        placed.from_y,
        placed.from_y - placed.to_y,
        transition.line_width,
        geometry.arrow_head_width,
        geometry.arrow_head_length,
    );

    let mut edge = Stroke::solid(ARROW_EDGE_WIDTH, &transition.color);
    if transition.line_style == LineStyle::Dashed {
        edge = edge.dashed(&DASH_PATTERN);
    }
    canvas.polygon(&outline, &transition.color, &edge);

    let style = TextStyle::new(cfg.transition_font_size)
        .valign(VerticalAlign::Bottom)
        .rotation(cfg.transition_label_rotation)
        .background(BACKGROUND);
    canvas.text(
        Point::new(placed.x, placed.from_y + geometry.label_offset),
        &[TextRun::plain(&transition.key())],
        &style,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datamodel::TransitionSet;

    fn draw(transition: Transition) -> String {
        let cfg = SchemeConfig::default();
        let geometry = SchemeGeometry::new(&cfg);
        let mut transitions = TransitionSet::new();
        let from = transition.from_level;
        let gamma = transition.gamma_energy;
        let id = transitions.insert(transition);
        let placed = PlacedTransition {
            id,
            x: geometry.first_arrow_x,
            from_y: from,
            to_y: from - gamma,
        };

        let mut canvas = Canvas::new(&cfg);
        draw_transition(&mut canvas, transitions.by_id(id).unwrap(), &placed, &geometry, &cfg);
        canvas.finish()
    }

    #[test]
    fn test_draw_transition() {
        let svg = draw(Transition::new(805.8, 805.8, 0.0));
        assert_eq!(1, svg.matches("<polygon").count());
        assert!(svg.contains("fill=\"black\" stroke=\"black\" stroke-width=\"1.389\""));
        assert!(!svg.contains("stroke-dasharray"));
        assert!(svg.contains(">805.8</text>"));
        assert!(svg.contains("rotate(-60)"));
    }

    #[test]
    fn test_draw_dashed_colored_transition() {
        let mut t = Transition::new(3249.2, 4055.0, 805.8);
        t.color = "blue".to_string();
        t.line_style = LineStyle::Dashed;
        let svg = draw(t);
        assert!(svg.contains("fill=\"blue\" stroke=\"blue\""));
        assert!(svg.contains("stroke-dasharray=\"13.889,13.889\""));
    }

    #[test]
    fn test_label_box_above_arrow_polygon() {
        let svg = draw(Transition::new(805.8, 805.8, 0.0));
        // label text and its box are stacked over the arrow
        let polygon = svg.find("<polygon").unwrap();
        let rect = svg.rfind("<rect").unwrap();
        assert!(polygon < rect);
    }
}
