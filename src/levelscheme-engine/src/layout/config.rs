// Copyright 2026 The Levelscheme Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use serde::{Deserialize, Serialize};

use crate::common::Result;

/// Figure and scheme constants.
///
/// Plot x runs over `[0, scheme_width]` and plot y over
/// `[y_min, scheme_height]`, in keV. Font sizes are in points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemeConfig {
    // Figure
    /// Figure width in inches.
    pub figure_width: f64,
    /// Figure height as a fraction of its width.
    pub scaling_height_factor: f64,
    pub dpi: f64,
    /// Axes box as fractions of the figure, measured from the bottom left.
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_top: f64,

    // Plot extent
    pub scheme_width: f64,
    pub scheme_height: f64,
    pub y_min: f64,

    // Text
    pub font_size: f64,
    pub transition_font_size: f64,
    pub nucleus_font_size: f64,
    /// Vertical gap between a baseline and its label, as a fraction of
    /// `scheme_height`.
    pub label_offset_factor: f64,
    /// Counter-clockwise rotation of transition labels, in degrees.
    pub transition_label_rotation: f64,

    // Horizontal partition of the scheme
    pub spin_annotation_width_factor: f64,
    pub energy_annotation_width_factor: f64,
    pub level_line_width_factor: f64,

    // Transitions
    /// Spacing between neighbouring arrows as a fraction of the level line.
    pub transitions_spacing_factor: f64,
    /// Distance of the first arrow from the level line end, as a fraction of
    /// `scheme_width`.
    pub first_arrow_inset_factor: f64,
    pub arrow_head_width_factor: f64,
    pub arrow_head_length_factor: f64,

    /// Height reserved for one level annotation, in keV.
    pub annotation_box_height: f64,
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            figure_width: 12.0,
            scaling_height_factor: 0.6,
            dpi: 100.0,
            margin_left: 0.01,
            margin_right: 0.99,
            margin_bottom: 0.11,
            margin_top: 0.88,
            scheme_width: 1000.0,
            scheme_height: 7000.0,
            y_min: -10.0,
            font_size: 10.0,
            transition_font_size: 8.0,
            nucleus_font_size: 20.0,
            label_offset_factor: 0.01,
            transition_label_rotation: 60.0,
            spin_annotation_width_factor: 0.04,
            energy_annotation_width_factor: 0.04,
            level_line_width_factor: 0.9,
            transitions_spacing_factor: 0.021,
            first_arrow_inset_factor: 0.01,
            arrow_head_width_factor: 0.005,
            arrow_head_length_factor: 0.1,
            annotation_box_height: 200.0,
        }
    }
}

impl SchemeConfig {
    fn fields(&self) -> [(&'static str, f64); 23] {
        [
            ("figure_width", self.figure_width),
            ("scaling_height_factor", self.scaling_height_factor),
            ("dpi", self.dpi),
            ("margin_left", self.margin_left),
            ("margin_right", self.margin_right),
            ("margin_bottom", self.margin_bottom),
            ("margin_top", self.margin_top),
            ("scheme_width", self.scheme_width),
            ("scheme_height", self.scheme_height),
            ("y_min", self.y_min),
            ("font_size", self.font_size),
            ("transition_font_size", self.transition_font_size),
            ("nucleus_font_size", self.nucleus_font_size),
            ("label_offset_factor", self.label_offset_factor),
            ("transition_label_rotation", self.transition_label_rotation),
            ("spin_annotation_width_factor", self.spin_annotation_width_factor),
            (
                "energy_annotation_width_factor",
                self.energy_annotation_width_factor,
            ),
            ("level_line_width_factor", self.level_line_width_factor),
            ("transitions_spacing_factor", self.transitions_spacing_factor),
            ("first_arrow_inset_factor", self.first_arrow_inset_factor),
            ("arrow_head_width_factor", self.arrow_head_width_factor),
            ("arrow_head_length_factor", self.arrow_head_length_factor),
            ("annotation_box_height", self.annotation_box_height),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.fields() {
            if !value.is_finite() {
                return crate::layout_err!(BadConfig, format!("{name} must be finite"));
            }
        }

        let positive = [
            ("figure_width", self.figure_width),
            ("scaling_height_factor", self.scaling_height_factor),
            ("dpi", self.dpi),
            ("scheme_width", self.scheme_width),
            ("font_size", self.font_size),
            ("transition_font_size", self.transition_font_size),
            ("nucleus_font_size", self.nucleus_font_size),
            ("level_line_width_factor", self.level_line_width_factor),
            ("transitions_spacing_factor", self.transitions_spacing_factor),
            ("annotation_box_height", self.annotation_box_height),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return crate::layout_err!(BadConfig, format!("{name} must be positive"));
            }
        }

        if self.scheme_height <= self.y_min {
            return crate::layout_err!(
                BadConfig,
                "scheme_height must be above y_min".to_owned()
            );
        }
        if !(0.0..1.0).contains(&self.margin_left)
            || self.margin_right <= self.margin_left
            || self.margin_right > 1.0
        {
            return crate::layout_err!(
                BadConfig,
                "horizontal margins must satisfy 0 <= left < right <= 1".to_owned()
            );
        }
        if !(0.0..1.0).contains(&self.margin_bottom)
            || self.margin_top <= self.margin_bottom
            || self.margin_top > 1.0
        {
            return crate::layout_err!(
                BadConfig,
                "vertical margins must satisfy 0 <= bottom < top <= 1".to_owned()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorCode;

    #[test]
    fn test_default_config() {
        let config = SchemeConfig::default();

        assert!((config.scheme_width - 1000.0).abs() < f64::EPSILON);
        assert!((config.scheme_height - 7000.0).abs() < f64::EPSILON);
        assert!((config.annotation_box_height - 200.0).abs() < f64::EPSILON);
        assert!((config.transitions_spacing_factor - 0.021).abs() < f64::EPSILON);
        assert!((config.level_line_width_factor - 0.9).abs() < f64::EPSILON);

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: SchemeConfig =
            serde_json::from_str(r#"{"scheme_height": 9000, "font_size": 12}"#).unwrap();
        assert_eq!(9000.0, config.scheme_height);
        assert_eq!(12.0, config.font_size);
        assert_eq!(1000.0, config.scheme_width);
    }

    #[test]
    fn test_validate_rejects_zero_box_height() {
        let config = SchemeConfig {
            annotation_box_height: 0.0,
            ..SchemeConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(ErrorCode::BadConfig, err.code);
        assert!(err.get_details().unwrap().contains("annotation_box_height"));
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let config = SchemeConfig {
            dpi: f64::NAN,
            ..SchemeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_margins() {
        let config = SchemeConfig {
            margin_left: 0.6,
            margin_right: 0.4,
            ..SchemeConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SchemeConfig {
            y_min: 8000.0,
            ..SchemeConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
