// Copyright 2026 The Levelscheme Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

mod arrowhead;
pub mod canvas;
pub mod common;
pub mod constants;
pub mod label;
mod level;
mod nucleus;
mod render;
#[cfg(feature = "png_render")]
mod render_png;
mod transition;

pub use nucleus::Nucleus;
pub use render::render_svg;
#[cfg(feature = "png_render")]
pub use render_png::{PngRenderOpts, render_png};
