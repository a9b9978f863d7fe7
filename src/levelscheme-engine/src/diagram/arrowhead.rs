// Copyright 2026 The Levelscheme Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use crate::diagram::common::Point;

/// Outline of a vertical arrow starting at (`x`, `y`) and pointing down by
/// `length`, in plot coordinates.
///
/// The head is part of the length. A head longer than the arrow is clamped
/// so the tip still lands at `y - length`.
pub fn arrow_polygon(
    x: f64,
    y: f64,
    length: f64,
    width: f64,
    head_width: f64,
    head_length: f64,
) -> Vec<Point> {
    let head_length = head_length.min(length.abs());
    // Arrows drawn upward (negative length) flip the head.
    let dir = if length < 0.0 { -1.0 } else { 1.0 };
    let tip_y = y - length;
    let neck_y = tip_y + dir * head_length;

    let hw = width / 2.0;
    let hhw = head_width / 2.0;
    vec![
        Point::new(x - hw, y),
        Point::new(x - hw, neck_y),
        Point::new(x - hhw, neck_y),
        Point::new(x, tip_y),
        Point::new(x + hhw, neck_y),
        Point::new(x + hw, neck_y),
        Point::new(x + hw, y),
    ]
}
