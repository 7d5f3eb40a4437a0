//! pairview - Terminal Pair Alignment Viewer
//!
//! ## Usage
//!
//! ```bash
//! pairview VLSPADKTNIKASWEKIGSHG VLTPEDKTNVKAAWGKVGAHA
//! pairview --fasta pair.fasta          # first two records
//! pairview --fasta pair.fasta --print  # write colored rows to stdout
//! ```
//!
//! ## Navigation
//!
//! - `j/k`: next/previous chunk
//! - `L`: toggle legend
//! - `/motif`, `n`, `N`: search
//! - `:q`: Quit
//! - `:h`: Help

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pairview::chunking::cells_to_px;
use pairview::config::Config;
use pairview::controller::run_app;
use pairview::fasta::read_pair_file;
use pairview::logging;
use pairview::model::{SequencePair, Session};
use pairview::print::write_session;
use pairview::ui::glyphs;

/// pairview - Compare two aligned protein sequences in the terminal
///
/// The first sequence is colored by residue class; the second is colored
/// only where it differs from the first. Without --print, opens an
/// interactive viewer that re-flows the rows when the terminal is resized.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// First sequence (residues ARNDCEQGHILKMFPSTWYV and -, any case)
    #[arg(required_unless_present = "fasta", requires = "second")]
    first: Option<String>,

    /// Second sequence, same length as the first
    second: Option<String>,

    /// Read both sequences from a FASTA file (first two records)
    #[arg(short = 'i', long = "fasta", conflicts_with_all = ["first", "second"])]
    fasta: Option<PathBuf>,

    /// Configuration file (default: ./pairview.toml if present)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Container width in pixels (overrides terminal measurement)
    #[arg(short = 'w', long = "width")]
    width: Option<f64>,

    /// Write all rows to stdout and exit instead of opening the viewer
    #[arg(short = 'p', long = "print")]
    print: bool,

    /// Plain-text output for --print
    #[arg(long = "no-color")]
    no_color: bool,

    /// Use Unicode glyphs
    #[arg(long = "fancy")]
    fancy: bool,

    /// Log to a file in the temp directory (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Loads the pair from the FASTA file or the positional arguments.
fn load_pair(args: &Args) -> Result<SequencePair> {
    if let Some(path) = &args.fasta {
        return read_pair_file(path)
            .with_context(|| format!("Failed to read sequences from {}", path.display()));
    }

    match (&args.first, &args.second) {
        (Some(first), Some(second)) => Ok(SequencePair::from_raw(first, second)?),
        _ => anyhow::bail!("Provide two sequences or --fasta <file>"),
    }
}

/// Container width for --print: flag, config, then the terminal.
fn print_width(args: &Args, config: &Config) -> f64 {
    if let Some(px) = args.width.or(config.layout.width_px) {
        return px;
    }
    match crossterm::terminal::size() {
        Ok((columns, _)) => cells_to_px(columns, config.layout.cell_width_px),
        Err(err) => {
            log::debug!("terminal size unavailable ({}), using tier fallback", err);
            0.0
        }
    }
}

fn run_print_mode(pair: SequencePair, args: &Args, config: &Config) -> Result<()> {
    let mut session = Session::new(pair);
    session.resize(print_width(args, config));

    let glyphs = glyphs::select(config.display.fancy_glyphs);
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_session(&mut handle, &session, &glyphs, !args.no_color)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_path) = logging::init(args.verbose)? {
        eprintln!("Logging to {}", log_path.display());
    }

    if let Some(width) = args.width {
        if !width.is_finite() || width < 0.0 {
            anyhow::bail!("Width must be a non-negative number of pixels (got {})", width);
        }
    }

    let mut config = Config::load(args.config.as_deref())?;
    if args.fancy {
        config.display.fancy_glyphs = true;
    }

    let pair = load_pair(&args)?;
    log::info!(
        "loaded {} / {} ({} residues)",
        pair.first().id,
        pair.second().id,
        pair.len()
    );

    if args.print {
        run_print_mode(pair, &args, &config)
    } else {
        run_app(pair, &config, args.width)
    }
}
