// Copyright 2026 The Levelscheme Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! SVG-to-PNG rendering using resvg.
//!
//! Text is shaped with whatever fonts the system provides; the family
//! requested by the SVG falls back to the first sans-serif face found.

use resvg::tiny_skia;
use resvg::usvg;

use crate::common::Result;

/// Options controlling PNG rendering output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PngRenderOpts {
    /// Target width in pixels. The height follows the SVG's aspect ratio.
    /// If neither `width` nor `height` is set, the SVG's intrinsic size is
    /// used at 1:1 scale.
    pub width: Option<u32>,
    /// Target height in pixels. When both are set, `width` takes precedence.
    pub height: Option<u32>,
}

/// Rasterizes an SVG document to PNG bytes on a white background.
pub fn render_png(svg: &str, opts: &PngRenderOpts) -> Result<Vec<u8>> {
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();

    let usvg_opts = usvg::Options {
        font_family: "DejaVu Sans".to_string(),
        fontdb: std::sync::Arc::new(fontdb),
        ..usvg::Options::default()
    };

    let tree = match usvg::Tree::from_str(svg, &usvg_opts) {
        Ok(tree) => tree,
        Err(err) => return crate::render_err!(SvgParse, format!("failed to parse SVG: {err}")),
    };

    let svg_size = tree.size();
    let svg_w = svg_size.width();
    let svg_h = svg_size.height();

    let (px_w, px_h) = match (opts.width, opts.height) {
        (Some(w), _) => {
            let scale = w as f32 / svg_w;
            (w, (svg_h * scale).ceil() as u32)
        }
        (None, Some(h)) => {
            let scale = h as f32 / svg_h;
            ((svg_w * scale).ceil() as u32, h)
        }
        (None, None) => (svg_w.ceil() as u32, svg_h.ceil() as u32),
    };

    if px_w == 0 || px_h == 0 {
        return crate::render_err!(PngEncode, "computed image dimensions are zero".to_string());
    }

    let Some(mut pixmap) = tiny_skia::Pixmap::new(px_w, px_h) else {
        return crate::render_err!(
            PngEncode,
            format!("failed to allocate {px_w}x{px_h} pixmap")
        );
    };
    pixmap.fill(tiny_skia::Color::WHITE);

    let transform = tiny_skia::Transform::from_scale(px_w as f32 / svg_w, px_h as f32 / svg_h);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    tracing::debug!(width = px_w, height = px_h, "rasterized scheme");

    match pixmap.encode_png() {
        Ok(png) => Ok(png),
        Err(err) => crate::render_err!(PngEncode, format!("failed to encode PNG: {err}")),
    }
}
