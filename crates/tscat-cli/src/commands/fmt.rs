//! Implementation of the `tscat fmt` command.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use miette::{IntoDiagnostic, Result, WrapErr};
use owo_colors::{OwoColorize, Stream};
use tscat::write_catalog;

use super::load_catalog;

/// Arguments for the fmt command.
#[derive(Debug, Args)]
pub struct FmtArgs {
    /// Files to rewrite (.ts)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Report files that would change without writing them
    #[arg(long)]
    pub check: bool,

    /// Drop obsolete and vanished messages
    #[arg(long)]
    pub purge_obsolete: bool,

    /// Drop line numbers from locations
    #[arg(long)]
    pub no_lines: bool,
}

/// Run the fmt command.
pub fn run_fmt(args: FmtArgs) -> Result<i32> {
    let mut changed = 0;

    for path in &args.files {
        let original = fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        let mut output = load_catalog(path)?;
        for warning in &output.warnings {
            tracing::warn!(path = %path.display(), "{warning}");
        }

        if args.purge_obsolete {
            output.catalog.purge_obsolete();
        }
        if args.no_lines {
            output.catalog.strip_line_numbers();
        }

        let formatted = write_catalog(&output.catalog).into_diagnostic()?;
        if formatted == original {
            continue;
        }
        changed += 1;

        if args.check {
            println!(
                "{} {}",
                "would reformat".if_supports_color(Stream::Stdout, |text| text.yellow()),
                path.display()
            );
        } else {
            fs::write(path, formatted)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            tracing::debug!(path = %path.display(), "reformatted");
        }
    }

    if args.check && changed > 0 {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
