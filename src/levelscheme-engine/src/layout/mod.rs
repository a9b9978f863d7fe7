// Copyright 2026 The Levelscheme Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Plot coordinates for annotations and transition arrows.
//!
//! Both placements are greedy and single pass: annotation baselines are
//! pushed upward in whole box heights until they clear the previous
//! annotation, and arrows fan out right to left at a fixed spacing.

pub mod config;

use std::cmp::Ordering;

use crate::common::{Result, energy_key};
use crate::datamodel::{
    LevelId, LevelSet, Transition, TransitionId, TransitionSet, dangling_references,
};

use self::config::SchemeConfig;

/// Upper bound on box-height steps for one annotation.
pub const MAX_ANNOTATION_STEPS: u64 = 1_000_000;

/// Fixed horizontal partition of the scheme, in plot units.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemeGeometry {
    pub spin_start: f64,
    pub spin_end: f64,
    pub spin_text_x: f64,
    pub energy_start: f64,
    pub energy_end: f64,
    pub energy_text_x: f64,
    pub level_line_start: f64,
    pub level_line_end: f64,
    pub level_line_width: f64,
    pub first_arrow_x: f64,
    pub transition_spacing: f64,
    pub arrow_head_width: f64,
    pub arrow_head_length: f64,
    /// Vertical gap between a baseline and the text drawn above it.
    pub label_offset: f64,
}

impl SchemeGeometry {
    pub fn new(cfg: &SchemeConfig) -> Self {
        let w = cfg.scheme_width;

        let spin_width = w * cfg.spin_annotation_width_factor;
        let energy_width = w * cfg.energy_annotation_width_factor;
        let level_line_start = w * (1.0 - cfg.level_line_width_factor) / 2.0;
        let level_line_end = w * (1.0 - (1.0 - cfg.level_line_width_factor) / 2.0);
        let level_line_width = level_line_end - level_line_start;

        SchemeGeometry {
            spin_start: 0.0,
            spin_end: spin_width,
            spin_text_x: spin_width / 2.0,
            energy_start: w * (1.0 - cfg.energy_annotation_width_factor),
            energy_end: w,
            energy_text_x: w - energy_width / 2.0,
            level_line_start,
            level_line_end,
            level_line_width,
            first_arrow_x: level_line_end - cfg.first_arrow_inset_factor * w,
            transition_spacing: level_line_width * cfg.transitions_spacing_factor,
            arrow_head_width: level_line_width * cfg.arrow_head_width_factor,
            arrow_head_length: level_line_width * cfg.arrow_head_length_factor,
            label_offset: cfg.label_offset_factor * cfg.scheme_height,
        }
    }
}

/// Assigns annotation baselines so that consecutive annotation boxes never
/// overlap.
#[derive(Clone, Debug)]
pub struct AnnotationCursor {
    box_height: f64,
    last: f64,
}

impl AnnotationCursor {
    pub fn new(box_height: f64) -> Self {
        AnnotationCursor {
            box_height,
            last: 0.0,
        }
    }

    /// Bottom edge that the next baseline must reach.
    pub fn last(&self) -> f64 {
        self.last
    }

    pub fn place(&mut self, energy: f64) -> Result<f64> {
        if !energy.is_finite() {
            return crate::layout_err!(NonFiniteEnergy, format!("level energy {energy}"));
        }

        let mut baseline = energy;
        let mut steps = 0u64;
        while baseline < self.last {
            if steps == MAX_ANNOTATION_STEPS {
                return crate::layout_err!(
                    AnnotationOverflow,
                    format!(
                        "level {} needs more than {MAX_ANNOTATION_STEPS} annotation boxes",
                        energy_key(energy)
                    )
                );
            }
            baseline += self.box_height;
            steps += 1;
        }

        if steps > 0 {
            tracing::debug!(
                energy,
                baseline,
                steps,
                "shifted annotation above previous box"
            );
        }

        self.last = baseline + self.box_height;
        Ok(baseline)
    }
}

/// Hands out arrow x positions right to left.
#[derive(Clone, Debug)]
pub struct ArrowCursor {
    x: f64,
    spacing: f64,
}

impl ArrowCursor {
    pub fn new(start: f64, spacing: f64) -> Self {
        ArrowCursor { x: start, spacing }
    }

    pub fn next_x(&mut self) -> f64 {
        let x = self.x;
        self.x -= self.spacing;
        x
    }
}

// `+ 0.0` folds -0.0 into 0.0 so total_cmp treats them as equal.
fn cmp_energy(a: f64, b: f64) -> Ordering {
    (a + 0.0).total_cmp(&(b + 0.0))
}

fn cmp_draw_order(a: &Transition, b: &Transition) -> Ordering {
    cmp_energy(a.from_level, b.from_level).then_with(|| cmp_energy(b.to_level, a.to_level))
}

/// Transitions sorted by source energy ascending, then destination energy
/// descending. Ties keep insertion order.
pub fn transition_order(transitions: &TransitionSet) -> Vec<TransitionId> {
    let mut entries: Vec<_> = transitions.entries().collect();
    entries.sort_by(|(_, a), (_, b)| cmp_draw_order(a, b));
    entries.into_iter().map(|(id, _)| id).collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLevel {
    pub id: LevelId,
    pub energy: f64,
    pub annotation_y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedTransition {
    pub id: TransitionId,
    pub x: f64,
    pub from_y: f64,
    pub to_y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SchemeLayout {
    pub geometry: SchemeGeometry,
    /// In level iteration order.
    pub levels: Vec<PlacedLevel>,
    /// In draw order.
    pub transitions: Vec<PlacedTransition>,
}

pub fn layout_scheme(
    levels: &LevelSet,
    transitions: &TransitionSet,
    cfg: &SchemeConfig,
) -> Result<SchemeLayout> {
    cfg.validate()?;
    let geometry = SchemeGeometry::new(cfg);

    let mut cursor = AnnotationCursor::new(cfg.annotation_box_height);
    let mut placed_levels = Vec::with_capacity(levels.len());
    for (id, level) in levels.entries() {
        let annotation_y = cursor.place(level.energy)?;
        placed_levels.push(PlacedLevel {
            id,
            energy: level.energy,
            annotation_y,
        });
    }

    for t in transitions.iter() {
        if !(t.gamma_energy.is_finite() && t.from_level.is_finite() && t.to_level.is_finite()) {
            return crate::layout_err!(
                NonFiniteEnergy,
                format!(
                    "transition {} ({} -> {})",
                    t.gamma_energy, t.from_level, t.to_level
                )
            );
        }
    }

    for dangling in dangling_references(levels, transitions) {
        let Some(t) = transitions.by_id(dangling.transition) else {
            continue;
        };
        tracing::warn!(
            transition = %t.key(),
            from = t.from_level,
            to = t.to_level,
            missing_from = dangling.missing_from,
            missing_to = dangling.missing_to,
            "transition references a level that is not in the scheme"
        );
    }

    let mut arrows = ArrowCursor::new(geometry.first_arrow_x, geometry.transition_spacing);
    let placed_transitions = transition_order(transitions)
        .into_iter()
        .filter_map(|id| transitions.by_id(id).map(|t| (id, t)))
        .map(|(id, t)| {
            let x = arrows.next_x();
            tracing::debug!(transition = %t.key(), x, "placed arrow");
            PlacedTransition {
                id,
                x,
                from_y: t.from_level,
                to_y: t.from_level - t.gamma_energy,
            }
        })
        .collect();

    Ok(SchemeLayout {
        geometry,
        levels: placed_levels,
        transitions: placed_transitions,
    })
}
