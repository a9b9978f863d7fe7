// Copyright 2026 The Levelscheme Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

mod settings;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use levelscheme_engine::{
    LoadOptions, Nucleus, PngRenderOpts, load_scheme, render_png, render_scheme,
};

use crate::settings::Settings;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Png,
}

#[derive(Debug, Parser)]
#[command(name = "levelscheme", version)]
#[command(about = "Draw a nuclear level scheme from level and transition tables")]
struct Args {
    /// CSV table with columns lvl_energy,spin,parity
    #[arg(long)]
    levels: PathBuf,

    /// CSV table with columns g_energy,g_energy_err,from_lvl,to_lvl,I,dI
    #[arg(long)]
    transitions: PathBuf,

    /// JSON file with layout, style and nucleus sections
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Nucleus name drawn under the scheme, e.g. 63Ni
    #[arg(long)]
    nucleus: Option<String>,

    /// Field delimiter of both tables
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Output file; SVG goes to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Open the rendered figure in the default system viewer
    #[arg(long)]
    show: bool,

    /// Output format, inferred from the output extension when omitted
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// PNG width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// PNG height in pixels, ignored when --width is given
    #[arg(long)]
    height: Option<u32>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn output_format(explicit: Option<OutputFormat>, output: Option<&Path>) -> OutputFormat {
    if let Some(format) = explicit {
        return format;
    }
    match output.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => OutputFormat::Png,
        _ => OutputFormat::Svg,
    }
}

/// Writes the figure to a kept temporary file; it is not removed on exit.
fn write_preview(bytes: &[u8], format: OutputFormat) -> Result<PathBuf> {
    let suffix = match format {
        OutputFormat::Svg => ".svg",
        OutputFormat::Png => ".png",
    };
    let mut file = tempfile::Builder::new()
        .prefix("levelscheme-")
        .suffix(suffix)
        .tempfile()
        .context("failed to create preview file")?;
    file.write_all(bytes).context("failed to write preview file")?;
    let (_, path) = file.keep().context("failed to keep preview file")?;
    Ok(path)
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args) -> Result<()> {
    let format = output_format(args.format, args.output.as_deref());
    if format == OutputFormat::Png && args.output.is_none() && !args.show {
        bail!("PNG output requires --output or --show");
    }
    if !args.delimiter.is_ascii() {
        bail!("delimiter {:?} is not a single ASCII character", args.delimiter);
    }

    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let opts = LoadOptions {
        delimiter: args.delimiter as u8,
    };
    let mut scheme =
        load_scheme(&args.levels, &args.transitions, &opts).context("failed to load scheme")?;
    tracing::info!(
        levels = scheme.levels.len(),
        transitions = scheme.transitions.len(),
        "loaded scheme"
    );

    settings
        .style
        .apply(&mut scheme)
        .context("failed to apply style")?;

    let nucleus = args
        .nucleus
        .as_deref()
        .or(settings.nucleus.as_deref())
        .map(str::parse::<Nucleus>)
        .transpose()
        .context("invalid nucleus")?;

    let svg = render_scheme(&scheme, &settings.layout, nucleus.as_ref())
        .context("failed to render scheme")?;

    let bytes = match format {
        OutputFormat::Svg => svg.into_bytes(),
        OutputFormat::Png => {
            let opts = PngRenderOpts {
                width: args.width,
                height: args.height,
            };
            render_png(&svg, &opts).context("failed to rasterize scheme")?
        }
    };

    if let Some(path) = &args.output {
        std::fs::write(path, &bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote scheme");
    }

    if args.show {
        let path = write_preview(&bytes, format)?;
        tracing::info!(path = %path.display(), "opening scheme in viewer");
        opener::open(&path).with_context(|| format!("failed to open {}", path.display()))?;
    } else if args.output.is_none() {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(&bytes)
            .and_then(|()| stdout.flush())
            .context("failed to write to stdout")?;
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
