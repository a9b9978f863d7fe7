// Copyright 2026 The Levelscheme Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use levelscheme_engine::{SchemeConfig, StyleSheet};

/// Contents of a `--settings` JSON file. Every section is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub layout: SchemeConfig,
    pub style: StyleSheet,
    pub nucleus: Option<String>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Settings> {
        let file = File::open(path)
            .with_context(|| format!("failed to open settings {}", path.display()))?;
        let settings: Settings = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse settings {}", path.display()))?;
        settings
            .layout
            .validate()
            .with_context(|| format!("invalid layout in {}", path.display()))?;
        Ok(settings)
    }
}
