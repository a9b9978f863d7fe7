// Copyright 2026 The Levelscheme Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Per-element highlighting, addressed by energy key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::common::Result;
use crate::datamodel::{
    DEFAULT_HIGHLIGHT_COLOR, DEFAULT_HIGHLIGHT_LINE_WIDTH, LineStyle, SchemeData,
};

/// Highlighting for one level. Its presence highlights the level; unset
/// fields take the default highlight width and color.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelStyle {
    pub line_width: Option<f64>,
    pub color: Option<String>,
}

/// Overrides for one transition. Unset fields keep the loaded value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitionStyle {
    pub color: Option<String>,
    pub line_width: Option<f64>,
    pub line_style: Option<LineStyle>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleSheet {
    pub levels: BTreeMap<String, LevelStyle>,
    pub transitions: BTreeMap<String, TransitionStyle>,
}

impl StyleSheet {
    /// Applies every entry. A key naming no level or transition is an error;
    /// entries before it in key order have already been applied.
    pub fn apply(&self, scheme: &mut SchemeData) -> Result<()> {
        for (key, style) in &self.levels {
            let Some(level) = scheme.levels.get_mut(key) else {
                return crate::style_err!(DoesNotExist, format!("level '{key}'"));
            };
            level.highlight(
                style.line_width.unwrap_or(DEFAULT_HIGHLIGHT_LINE_WIDTH),
                style.color.as_deref().unwrap_or(DEFAULT_HIGHLIGHT_COLOR),
            );
        }

        for (key, style) in &self.transitions {
            let Some(transition) = scheme.transitions.get_mut(key) else {
                return crate::style_err!(DoesNotExist, format!("transition '{key}'"));
            };
            if let Some(color) = &style.color {
                transition.color = color.clone();
            }
            if let Some(line_width) = style.line_width {
                transition.line_width = line_width;
            }
            if let Some(line_style) = style.line_style {
                transition.line_style = line_style;
            }
        }

        Ok(())
    }
}
