// Copyright 2026 The Levelscheme Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use float_cmp::approx_eq;
use serde::{Deserialize, Serialize};

use crate::common::energy_key;

pub const DEFAULT_LEVEL_LINE_WIDTH: f64 = 0.5;
pub const DEFAULT_HIGHLIGHT_LINE_WIDTH: f64 = 4.0;
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "red";
pub const DEFAULT_TRANSITION_LINE_WIDTH: f64 = 0.001;
pub const DEFAULT_COLOR: &str = "black";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Parity {
    Positive,
    Negative,
}

impl Parity {
    /// Parses `+` or `-`; anything else has no parity.
    pub fn parse(s: &str) -> Option<Parity> {
        match s.trim() {
            "+" => Some(Parity::Positive),
            "-" => Some(Parity::Negative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Parity::Positive => "+",
            Parity::Negative => "-",
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

/// Spin and parity as the two parts of a level's annotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpinParity {
    pub spin: String,
    pub parity: Parity,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    pub energy: f64,
    pub spin: String,
    pub parity: Option<Parity>,
    pub line_width: f64,
    pub color: String,
    pub highlighted: bool,
    pub highlight_line_width: f64,
}

impl Level {
    pub fn new(energy: f64, spin: &str, parity: Option<Parity>) -> Self {
        Level {
            energy,
            spin: spin.to_owned(),
            parity,
            line_width: DEFAULT_LEVEL_LINE_WIDTH,
            color: DEFAULT_COLOR.to_owned(),
            highlighted: false,
            highlight_line_width: DEFAULT_HIGHLIGHT_LINE_WIDTH,
        }
    }

    /// Marks the level highlighted. Only the color, highlight width and
    /// flag change; energy, spin and parity are untouched.
    pub fn highlight(&mut self, line_width: f64, color: &str) {
        self.color = color.to_owned();
        self.highlight_line_width = line_width;
        self.highlighted = true;
    }

    pub fn stroke_width(&self) -> f64 {
        if self.highlighted {
            self.highlight_line_width
        } else {
            self.line_width
        }
    }

    /// `None` when the level has no parity, in which case nothing is drawn.
    pub fn spin_parity_label(&self) -> Option<SpinParity> {
        self.parity.map(|parity| SpinParity {
            spin: self.spin.clone(),
            parity,
        })
    }

    pub fn key(&self) -> String {
        energy_key(self.energy)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub gamma_energy: f64,
    pub gamma_energy_err: Option<f64>,
    pub from_level: f64,
    pub to_level: f64,
    pub intensity: Option<f64>,
    pub intensity_err: Option<f64>,
    pub line_width: f64,
    pub color: String,
    pub line_style: LineStyle,
}

impl Transition {
    pub fn new(gamma_energy: f64, from_level: f64, to_level: f64) -> Self {
        Transition {
            gamma_energy,
            gamma_energy_err: None,
            from_level,
            to_level,
            intensity: None,
            intensity_err: None,
            line_width: DEFAULT_TRANSITION_LINE_WIDTH,
            color: DEFAULT_COLOR.to_owned(),
            line_style: LineStyle::Solid,
        }
    }

    pub fn with_intensity(mut self, intensity: Option<f64>, intensity_err: Option<f64>) -> Self {
        self.intensity = intensity;
        self.intensity_err = intensity_err;
        self
    }

    pub fn with_gamma_energy_err(mut self, err: Option<f64>) -> Self {
        self.gamma_energy_err = err;
        self
    }

    pub fn key(&self) -> String {
        energy_key(self.gamma_energy)
    }
}

/// A record that is identified by a characteristic energy.
pub trait Keyed {
    fn energy(&self) -> f64;
}

impl Keyed for Level {
    fn energy(&self) -> f64 {
        self.energy
    }
}

impl Keyed for Transition {
    fn energy(&self) -> f64 {
        self.gamma_energy
    }
}

/// Stable index of a record inside an [`EnergyMap`].
///
/// Ids are handed out in insertion order starting at 0 and survive a record
/// being replaced under the same key.
pub struct Id<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    fn new(index: usize) -> Self {
        Id {
            index,
            _marker: PhantomData,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Id({})", self.index)
    }
}

pub type LevelId = Id<Level>;
pub type TransitionId = Id<Transition>;

/// Insertion-ordered records keyed by the text form of their energy.
#[derive(Clone, Debug)]
pub struct EnergyMap<T> {
    records: Vec<T>,
    index: HashMap<String, usize>,
}

pub type LevelSet = EnergyMap<Level>;
pub type TransitionSet = EnergyMap<Transition>;

impl<T: Keyed> EnergyMap<T> {
    pub fn new() -> Self {
        EnergyMap {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Inserts a record under its energy key. A record already stored under
    /// the same key is replaced in place and keeps its id.
    pub fn insert(&mut self, record: T) -> Id<T> {
        let key = energy_key(record.energy());
        if let Some(&i) = self.index.get(&key) {
            tracing::warn!(key = %key, "duplicate energy key, replacing earlier record");
            self.records[i] = record;
            return Id::new(i);
        }

        let i = self.records.len();
        self.records.push(record);
        self.index.insert(key, i);
        Id::new(i)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&i| &self.records[i])
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        match self.index.get(key) {
            Some(&i) => Some(&mut self.records[i]),
            None => None,
        }
    }

    /// `None` when the id was handed out by a different map.
    pub fn by_id(&self, id: Id<T>) -> Option<&T> {
        self.records.get(id.index)
    }

    /// Finds a record whose energy equals `energy` to within a few ULPs.
    pub fn find_energy(&self, energy: f64) -> Option<Id<T>> {
        self.records
            .iter()
            .position(|r| approx_eq!(f64, r.energy(), energy, ulps = 4))
            .map(Id::new)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = Id<T>> {
        (0..self.records.len()).map(Id::new)
    }

    pub fn entries(&self) -> impl Iterator<Item = (Id<T>, &T)> {
        self.records.iter().enumerate().map(|(i, r)| (Id::new(i), r))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.records.iter().map(|r| energy_key(r.energy())).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Keyed> Default for EnergyMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> FromIterator<T> for EnergyMap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut map = EnergyMap::new();
        for record in iter {
            map.insert(record);
        }
        map
    }
}

/// The level and transition tables of one scheme.
#[derive(Clone, Debug, Default)]
pub struct SchemeData {
    pub levels: LevelSet,
    pub transitions: TransitionSet,
}

/// A transition whose source or destination energy matches no level.
#[derive(Clone, Debug, PartialEq)]
pub struct DanglingReference {
    pub transition: TransitionId,
    pub missing_from: bool,
    pub missing_to: bool,
}

pub fn dangling_references(
    levels: &LevelSet,
    transitions: &TransitionSet,
) -> Vec<DanglingReference> {
    transitions
        .entries()
        .filter_map(|(id, t)| {
            let missing_from = levels.find_energy(t.from_level).is_none();
            let missing_to = levels.find_energy(t.to_level).is_none();
            if missing_from || missing_to {
                Some(DanglingReference {
                    transition: id,
                    missing_from,
                    missing_to,
                })
            } else {
                None
            }
        })
        .collect()
}
