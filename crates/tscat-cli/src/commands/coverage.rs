//! Coverage command implementation.

use std::path::PathBuf;

use clap::Args;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tscat::CatalogStats;
use tscat::lookup::language_from_path;

use super::load_catalog;
use crate::output::table::{CatalogCoverage, format_coverage_table};

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Catalogs to report on (.ts)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Exit with non-zero code if any catalog is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson<'a> {
    file: &'a str,
    language: Option<&'a str>,
    #[serde(flatten)]
    stats: CatalogStats,
    completion: f64,
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let mut coverage_data: Vec<CatalogCoverage> = Vec::new();

    for path in &args.files {
        let output = load_catalog(path)?;
        let language = output
            .catalog
            .language()
            .filter(|language| !language.is_empty())
            .map(str::to_string)
            .or_else(|| language_from_path(path));

        coverage_data.push(CatalogCoverage {
            file: path.display().to_string(),
            language,
            stats: output.catalog.stats(),
        });
    }

    let any_incomplete = coverage_data.iter().any(|c| !c.stats.is_complete());

    if args.json {
        let json_data: Vec<CoverageJson<'_>> = coverage_data
            .iter()
            .map(|c| CoverageJson {
                file: &c.file,
                language: c.language.as_deref(),
                stats: c.stats,
                completion: c.stats.completion(),
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{json_output}");
    } else {
        println!("{}", format_coverage_table(&coverage_data));
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
