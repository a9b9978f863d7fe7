// Copyright 2026 The Levelscheme Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use crate::common::Result;
use crate::datamodel::SchemeData;
use crate::diagram::canvas::Canvas;
use crate::diagram::level::draw_level;
use crate::diagram::nucleus::{Nucleus, draw_nucleus};
use crate::diagram::transition::draw_transition;
use crate::layout::SchemeLayout;
use crate::layout::config::SchemeConfig;

/// Draws a laid-out scheme: levels in iteration order, then transitions in
/// draw order, then the nucleus name.
pub fn render_svg(
    scheme: &SchemeData,
    layout: &SchemeLayout,
    cfg: &SchemeConfig,
    nucleus: Option<&Nucleus>,
) -> Result<String> {
    cfg.validate()?;

    let mut canvas = Canvas::new(cfg);
    let geometry = &layout.geometry;

    for placed in &layout.levels {
        let Some(level) = scheme.levels.by_id(placed.id) else {
            return crate::render_err!(
                DoesNotExist,
                format!("level {} is not in the scheme", placed.id.index())
            );
        };
        draw_level(&mut canvas, level, placed, geometry, cfg);
    }

    for placed in &layout.transitions {
        let Some(transition) = scheme.transitions.by_id(placed.id) else {
            return crate::render_err!(
                DoesNotExist,
                format!("transition {} is not in the scheme", placed.id.index())
            );
        };
        draw_transition(&mut canvas, transition, placed, geometry, cfg);
    }

    if let Some(nucleus) = nucleus {
        draw_nucleus(&mut canvas, nucleus, cfg);
    }

    tracing::debug!(
        levels = layout.levels.len(),
        transitions = layout.transitions.len(),
        "rendered scheme"
    );

    Ok(canvas.finish())
}
