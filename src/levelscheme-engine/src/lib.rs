// Copyright 2026 The Levelscheme Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

#![forbid(unsafe_code)]

pub mod common;
pub mod datamodel;
pub mod diagram;
pub mod layout;
pub mod loader;
pub mod style;

#[cfg(test)]
mod layout_proptest;

pub use self::common::{Error, ErrorCode, ErrorKind, Result, energy_key};
pub use self::datamodel::{
    Level, LevelId, LevelSet, LineStyle, Parity, SchemeData, Transition, TransitionId,
    TransitionSet,
};
pub use self::diagram::{Nucleus, render_svg};
#[cfg(feature = "png_render")]
pub use self::diagram::{PngRenderOpts, render_png};
pub use self::layout::config::SchemeConfig;
pub use self::layout::{SchemeLayout, layout_scheme};
pub use self::loader::{LoadOptions, load_scheme};
pub use self::style::StyleSheet;

/// Lays out and draws a scheme, returning the SVG document.
pub fn render_scheme(
    scheme: &SchemeData,
    cfg: &SchemeConfig,
    nucleus: Option<&Nucleus>,
) -> Result<String> {
    let layout = layout_scheme(&scheme.levels, &scheme.transitions, cfg)?;
    render_svg(scheme, &layout, cfg, nucleus)
}
