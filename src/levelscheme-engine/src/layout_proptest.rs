// Copyright 2026 The Levelscheme Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Property-based tests for annotation and arrow placement.

use proptest::prelude::*;

use crate::datamodel::{Level, LevelSet, Transition, TransitionSet};
use crate::layout::config::SchemeConfig;
use crate::layout::{AnnotationCursor, layout_scheme};

const BOX: f64 = 200.0;

fn spaced_energies_strategy() -> impl Strategy<Value = Vec<f64>> {
    (
        0.0f64..1000.0,
        prop::collection::vec(BOX + 0.5..2000.0f64, 0..12),
    )
        .prop_map(|(start, gaps)| {
            let mut energies = vec![start];
            for gap in gaps {
                let last = energies[energies.len() - 1];
                energies.push(last + gap);
            }
            energies
        })
}

fn level_set(energies: &[f64]) -> LevelSet {
    energies.iter().map(|&e| Level::new(e, "0", None)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn spaced_levels_keep_their_energy(energies in spaced_energies_strategy()) {
        let mut cursor = AnnotationCursor::new(BOX);
        for &e in &energies {
            prop_assert_eq!(e, cursor.place(e).unwrap());
        }
    }

    #[test]
    fn baselines_never_overlap(energies in prop::collection::vec(0.0f64..7000.0, 1..40)) {
        let mut cursor = AnnotationCursor::new(BOX);
        let mut previous: Option<f64> = None;
        for &e in &energies {
            let baseline = cursor.place(e).unwrap();

            let shift = baseline - e;
            prop_assert!(shift >= 0.0);
            let steps = (shift / BOX).round();
            prop_assert!((shift - steps * BOX).abs() < 1e-6);

            if let Some(prev) = previous {
                prop_assert!(baseline - prev >= BOX - 1e-6);
            }
            previous = Some(baseline);
        }
    }

    #[test]
    fn coincident_levels_stack_one_box_apart(energy in 0.0f64..7000.0, count in 2usize..10) {
        let mut cursor = AnnotationCursor::new(BOX);
        let baselines: Vec<f64> = (0..count).map(|_| cursor.place(energy).unwrap()).collect();
        for pair in baselines.windows(2) {
            prop_assert!((pair[1] - pair[0] - BOX).abs() < 1e-6);
        }
    }

    #[test]
    fn common_source_arrows_step_by_spacing(
        destinations in prop::collection::btree_set(0u32..4000, 1..20)
    ) {
        let source = 5000.0;
        let transitions: TransitionSet = destinations
            .iter()
            .map(|&to| Transition::new(source - f64::from(to), source, f64::from(to)))
            .collect();
        let levels = level_set(&[0.0]);
        let layout = layout_scheme(&levels, &transitions, &SchemeConfig::default()).unwrap();
        let spacing = layout.geometry.transition_spacing;

        let placed = &layout.transitions;
        prop_assert_eq!(destinations.len(), placed.len());
        for pair in placed.windows(2) {
            prop_assert!(pair[0].x > pair[1].x);
            prop_assert!((pair[0].x - pair[1].x - spacing).abs() < 1e-9);
            prop_assert!(pair[0].to_y > pair[1].to_y);
        }
    }

    #[test]
    fn layout_is_deterministic(
        energies in prop::collection::vec(0.0f64..7000.0, 1..20),
        pairs in prop::collection::vec((0.0f64..7000.0, 0.0f64..7000.0), 0..20),
    ) {
        let levels = level_set(&energies);
        let transitions: TransitionSet = pairs
            .iter()
            .map(|&(from, to)| Transition::new(from - to, from, to))
            .collect();
        let cfg = SchemeConfig::default();
        let a = layout_scheme(&levels, &transitions, &cfg).unwrap();
        let b = layout_scheme(&levels, &transitions, &cfg).unwrap();
        prop_assert_eq!(a, b);
    }
}
