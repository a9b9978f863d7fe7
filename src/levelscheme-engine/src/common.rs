// Copyright 2026 The Levelscheme Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;
use std::{error, result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Io,
    CsvParse,
    DoesNotExist, // the named level or transition doesn't exist
    BadConfig,
    NonFiniteEnergy,
    AnnotationOverflow,
    BadNucleus,
    SvgParse,
    PngEncode,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ErrorCode::*;
        let name = match self {
            Io => "io",
            CsvParse => "csv_parse",
            DoesNotExist => "does_not_exist",
            BadConfig => "bad_config",
            NonFiniteEnergy => "non_finite_energy",
            AnnotationOverflow => "annotation_overflow",
            BadNucleus => "bad_nucleus",
            SvgParse => "svg_parse",
            PngEncode => "png_encode",
        };

        write!(f, "{name}")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Import,
    Style,
    Layout,
    Render,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub details: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, code: ErrorCode, details: Option<String>) -> Self {
        Error {
            kind,
            code,
            details,
        }
    }

    pub fn get_details(&self) -> Option<String> {
        self.details.clone()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self.kind {
            ErrorKind::Import => "ImportError",
            ErrorKind::Style => "StyleError",
            ErrorKind::Layout => "LayoutError",
            ErrorKind::Render => "RenderError",
        };
        match self.details {
            Some(ref details) => write!(f, "{}{{{}: {}}}", kind, self.code, details),
            None => write!(f, "{}{{{}}}", kind, self.code),
        }
    }
}

impl error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::new(ErrorKind::Import, ErrorCode::Io, Some(err.to_string()))
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        let code = if err.is_io_error() {
            ErrorCode::Io
        } else {
            ErrorCode::CsvParse
        };
        Error::new(ErrorKind::Import, code, Some(err.to_string()))
    }
}

pub type Result<T> = result::Result<T, Error>;

#[macro_export]
macro_rules! style_err(
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(
            ErrorKind::Style,
            ErrorCode::$code,
            Some($str),
        ))
    }}
);

#[macro_export]
macro_rules! layout_err {
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(
            ErrorKind::Layout,
            ErrorCode::$code,
            Some($str),
        ))
    }};
    ($code:tt) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Layout, ErrorCode::$code, None))
    }};
}

#[macro_export]
macro_rules! render_err(
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(
            ErrorKind::Render,
            ErrorCode::$code,
            Some($str),
        ))
    }}
);

/// The text form of an energy used as a lookup key and as label text.
///
/// Shortest round-trip decimal, always with a fractional part: `0.0`,
/// `805.8`, `4055.0`.
pub fn energy_key(energy: f64) -> String {
    // Debug formatting keeps the trailing `.0` that Display drops.
    let key = format!("{energy:?}");
    if key == "-0.0" { "0.0".to_string() } else { key }
}

#[test]
fn test_energy_key() {
    assert_eq!("0.0", energy_key(0.0));
    assert_eq!("0.0", energy_key(-0.0));
    assert_eq!("805.8", energy_key(805.8));
    assert_eq!("4055.0", energy_key(4055.0));
    assert_eq!("2379.2", energy_key(2379.2));
    assert_eq!("-12.5", energy_key(-12.5));
    assert_eq!("0.1", energy_key(0.1));
}

#[test]
fn test_error_display() {
    let err = Error::new(
        ErrorKind::Style,
        ErrorCode::DoesNotExist,
        Some("level '1.0'".to_string()),
    );
    assert_eq!("StyleError{does_not_exist: level '1.0'}", err.to_string());

    let err = Error::new(ErrorKind::Layout, ErrorCode::BadConfig, None);
    assert_eq!("LayoutError{bad_config}", err.to_string());
}

#[test]
fn test_error_macros() {
    let r: Result<()> = layout_err!(NonFiniteEnergy);
    let err = r.unwrap_err();
    assert_eq!(ErrorKind::Layout, err.kind);
    assert_eq!(ErrorCode::NonFiniteEnergy, err.code);
    assert_eq!(None, err.get_details());

    let r: Result<()> = render_err!(DoesNotExist, "level 3".to_owned());
    let err = r.unwrap_err();
    assert_eq!(ErrorKind::Render, err.kind);
    assert_eq!(Some("level 3".to_string()), err.get_details());
}
