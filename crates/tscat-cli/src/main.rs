//! tscat CLI entry point.
//!
//! Provides command-line tools for working with Qt Linguist `.ts` catalogs:
//! - `tscat check` - Validate and lint catalogs
//! - `tscat coverage` - Report translation progress
//! - `tscat lookup` - Print one translation
//! - `tscat fmt` - Rewrite catalogs in canonical form
//! - `tscat merge` - Update a catalog from an extracted template

mod commands;
mod config;
mod output;

use std::io;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    CheckArgs, CoverageArgs, FmtArgs, LookupArgs, MergeArgs, run_check, run_coverage, run_fmt,
    run_lookup, run_merge,
};
use tracing_subscriber::EnvFilter;

/// Qt Linguist translation catalog tools.
#[derive(Debug, Parser)]
#[command(name = "tscat")]
#[command(about = "Qt Linguist translation catalog tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse and lint .ts files
    Check(CheckArgs),
    /// Report translation progress per catalog
    Coverage(CoverageArgs),
    /// Look up a single translation
    Lookup(LookupArgs),
    /// Rewrite .ts files in canonical form
    Fmt(FmtArgs),
    /// Update a catalog from a freshly extracted template
    Merge(MergeArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over the default level; `--verbose`
/// raises the default from `warn` to `debug`.
fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_logging(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Check(args) => run_check(args),
        Commands::Coverage(args) => run_coverage(args),
        Commands::Lookup(args) => run_lookup(args),
        Commands::Fmt(args) => run_fmt(args),
        Commands::Merge(args) => run_merge(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{e:?}");
            exit(exitcode::SOFTWARE);
        }
    }
}
