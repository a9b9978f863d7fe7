// Copyright 2026 The Levelscheme Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

pub const PT_PER_INCH: f64 = 72.0;

/// Arrow outline width, points.
pub const ARROW_EDGE_WIDTH: f64 = 1.0;
/// On/off dash lengths for dashed arrows, points.
pub const DASH_PATTERN: [f64; 2] = [10.0, 10.0];
pub const DASH_OFFSET: f64 = 1.0;

// Text metrics as fractions of the font size. Glyph widths are estimated
// since no font is loaded at render time.
pub const CHAR_WIDTH: f64 = 0.6;
pub const ASCENT: f64 = 0.8;
pub const SUPERSCRIPT_SCALE: f64 = 0.7;
/// Padding around boxed labels.
pub const TEXT_BOX_PAD: f64 = 0.3;

/// Nucleus name anchor, figure fractions from the bottom left.
pub const NUCLEUS_X: f64 = 0.48;
pub const NUCLEUS_Y: f64 = 0.05;

pub const BACKGROUND: &str = "white";
pub const ANNOTATION_COLOR: &str = "black";
pub const FONT_FAMILY: &str = "\"DejaVu Sans\", \"Bitstream Vera Sans\", \"Arial\", sans-serif";
