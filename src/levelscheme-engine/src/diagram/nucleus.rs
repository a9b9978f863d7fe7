// Copyright 2026 The Levelscheme Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;
use std::str::FromStr;

use crate::common::Error;
use crate::diagram::canvas::Canvas;
use crate::diagram::constants::{NUCLEUS_X, NUCLEUS_Y};
use crate::diagram::label::{TextAnchor, TextRun, TextStyle};
use crate::layout::config::SchemeConfig;

/// Name of the nucleus a scheme belongs to, such as `63Ni`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nucleus {
    pub mass_number: Option<u32>,
    pub symbol: String,
}

impl FromStr for Nucleus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (digits, symbol) = s.split_at(split);

        if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_alphabetic()) {
            return crate::render_err!(BadNucleus, format!("'{s}' is not a nucleus name"));
        }
        let mass_number = if digits.is_empty() {
            None
        } else {
            match digits.parse::<u32>() {
                Ok(n) => Some(n),
                Err(err) => {
                    return crate::render_err!(BadNucleus, format!("'{s}': {err}"));
                }
            }
        };

        Ok(Nucleus {
            mass_number,
            symbol: symbol.to_owned(),
        })
    }
}

impl fmt::Display for Nucleus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.mass_number {
            Some(a) => write!(f, "{}{}", a, self.symbol),
            None => f.write_str(&self.symbol),
        }
    }
}

pub fn draw_nucleus(canvas: &mut Canvas, nucleus: &Nucleus, cfg: &SchemeConfig) {
    let mut runs = Vec::with_capacity(2);
    if let Some(a) = nucleus.mass_number {
        runs.push(TextRun::superscript(&a.to_string()));
    }
    runs.push(TextRun::plain(&nucleus.symbol));

    let style = TextStyle::new(cfg.nucleus_font_size).anchor(TextAnchor::Start);
    canvas.figure_text(NUCLEUS_X, NUCLEUS_Y, &runs, &style);
}
