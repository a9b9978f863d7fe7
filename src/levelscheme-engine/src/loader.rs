// Copyright 2026 The Levelscheme Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! CSV loading of level and transition tables.
//!
//! Level tables carry the columns `lvl_energy,spin,parity`; transition tables
//! carry `g_energy,g_energy_err,from_lvl,to_lvl,I,dI`. Each row becomes one
//! record keyed by the text form of its characteristic energy, in row order.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::common::{Error, Result};
use crate::datamodel::{Level, LevelSet, Parity, SchemeData, Transition, TransitionSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions { delimiter: b',' }
    }
}

#[derive(Debug, Deserialize)]
struct LevelRow {
    lvl_energy: f64,
    #[serde(default)]
    spin: String,
    #[serde(default)]
    parity: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TransitionRow {
    g_energy: f64,
    #[serde(default)]
    g_energy_err: Option<f64>,
    from_lvl: f64,
    to_lvl: f64,
    #[serde(rename = "I", default)]
    intensity: Option<f64>,
    #[serde(rename = "dI", default)]
    intensity_err: Option<f64>,
}

impl From<LevelRow> for Level {
    fn from(row: LevelRow) -> Self {
        let parity = match row.parity.as_deref() {
            None | Some("") => None,
            Some(text) => {
                let parity = Parity::parse(text);
                if parity.is_none() {
                    tracing::warn!(
                        energy = row.lvl_energy,
                        parity = text,
                        "unrecognized parity, level drawn without spin/parity label"
                    );
                }
                parity
            }
        };
        Level::new(row.lvl_energy, &row.spin, parity)
    }
}

impl From<TransitionRow> for Transition {
    fn from(row: TransitionRow) -> Self {
        Transition::new(row.g_energy, row.from_lvl, row.to_lvl)
            .with_gamma_energy_err(row.g_energy_err)
            .with_intensity(row.intensity, row.intensity_err)
    }
}

fn csv_reader<R: Read>(reader: R, opts: &LoadOptions) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(opts.delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

pub fn read_levels<R: Read>(reader: R, opts: &LoadOptions) -> Result<LevelSet> {
    let mut rdr = csv_reader(reader, opts);
    let mut levels = LevelSet::new();
    for result in rdr.deserialize::<LevelRow>() {
        levels.insert(Level::from(result?));
    }
    tracing::debug!(count = levels.len(), "loaded levels");
    Ok(levels)
}

pub fn read_transitions<R: Read>(reader: R, opts: &LoadOptions) -> Result<TransitionSet> {
    let mut rdr = csv_reader(reader, opts);
    let mut transitions = TransitionSet::new();
    for result in rdr.deserialize::<TransitionRow>() {
        transitions.insert(Transition::from(result?));
    }
    tracing::debug!(count = transitions.len(), "loaded transitions");
    Ok(transitions)
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|err| with_path(Error::from(err), path))?;
    Ok(BufReader::new(file))
}

fn with_path(mut err: Error, path: &Path) -> Error {
    let details = err.details.take().unwrap_or_default();
    err.details = Some(format!("{}: {}", path.display(), details));
    err
}

pub fn open_levels(path: &Path, opts: &LoadOptions) -> Result<LevelSet> {
    read_levels(open(path)?, opts).map_err(|err| with_path(err, path))
}

pub fn open_transitions(path: &Path, opts: &LoadOptions) -> Result<TransitionSet> {
    read_transitions(open(path)?, opts).map_err(|err| with_path(err, path))
}

/// Loads both tables of a scheme.
pub fn load_scheme(
    levels_path: &Path,
    transitions_path: &Path,
    opts: &LoadOptions,
) -> Result<SchemeData> {
    Ok(SchemeData {
        levels: open_levels(levels_path, opts)?,
        transitions: open_transitions(transitions_path, opts)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{ErrorCode, ErrorKind};

    const LEVELS: &str = "lvl_energy,spin,parity\n0.0,1/2,-\n805.8,3/2,-\n4055.0,5/2,+\n";
    const TRANSITIONS: &str = "g_energy,g_energy_err,from_lvl,to_lvl,I,dI\n\
                               805.8,0.1,805.8,0.0,100,5\n\
                               3249.2,,4055.0,805.8,,\n";

    #[test]
    fn test_read_levels() {
        let levels = read_levels(LEVELS.as_bytes(), &LoadOptions::default()).unwrap();
        assert_eq!(vec!["0.0", "805.8", "4055.0"], levels.keys());

        let level = levels.get("805.8").unwrap();
        assert_eq!("3/2", level.spin);
        assert_eq!(Some(Parity::Negative), level.parity);
        assert!(!level.highlighted);
    }

    #[test]
    fn test_read_levels_missing_parity() {
        let src = "lvl_energy,spin,parity\n0.0,0,\n10.0,1,(+)\n";
        let levels = read_levels(src.as_bytes(), &LoadOptions::default()).unwrap();
        assert_eq!(2, levels.len());
        assert_eq!(None, levels.get("0.0").unwrap().parity);
        assert_eq!(None, levels.get("10.0").unwrap().parity);
    }

    #[test]
    fn test_read_transitions() {
        let transitions =
            read_transitions(TRANSITIONS.as_bytes(), &LoadOptions::default()).unwrap();
        assert_eq!(vec!["805.8", "3249.2"], transitions.keys());

        let t = transitions.get("805.8").unwrap();
        assert_eq!(805.8, t.from_level);
        assert_eq!(0.0, t.to_level);
        assert_eq!(Some(0.1), t.gamma_energy_err);
        assert_eq!(Some(100.0), t.intensity);
        assert_eq!(Some(5.0), t.intensity_err);

        let t = transitions.get("3249.2").unwrap();
        assert_eq!(None, t.gamma_energy_err);
        assert_eq!(None, t.intensity);
        assert_eq!(None, t.intensity_err);
    }

    #[test]
    fn test_read_tab_delimited() {
        let src = "lvl_energy\tspin\tparity\n0.0\t1/2\t-\n";
        let opts = LoadOptions { delimiter: b'\t' };
        let levels = read_levels(src.as_bytes(), &opts).unwrap();
        assert_eq!(vec!["0.0"], levels.keys());
    }

    #[test]
    fn test_read_levels_malformed_row() {
        let src = "lvl_energy,spin,parity\nnot-a-number,1/2,-\n";
        let err = read_levels(src.as_bytes(), &LoadOptions::default()).unwrap_err();
        assert_eq!(ErrorKind::Import, err.kind);
        assert_eq!(ErrorCode::CsvParse, err.code);
    }

    #[test]
    fn test_open_missing_file() {
        let path = Path::new("/nonexistent/levels.csv");
        let err = open_levels(path, &LoadOptions::default()).unwrap_err();
        assert_eq!(ErrorCode::Io, err.code);
        assert!(err.get_details().unwrap().contains("levels.csv"));
    }

    #[test]
    fn test_load_scheme_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let levels_path = dir.path().join("levels.csv");
        let transitions_path = dir.path().join("transitions.csv");
        std::fs::write(&levels_path, LEVELS).unwrap();
        std::fs::write(&transitions_path, TRANSITIONS).unwrap();

        let scheme =
            load_scheme(&levels_path, &transitions_path, &LoadOptions::default()).unwrap();
        assert_eq!(3, scheme.levels.len());
        assert_eq!(2, scheme.transitions.len());
    }
}
