//! Implementation of the `tscat lookup` command.

use std::path::PathBuf;

use clap::Args;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tscat::lookup::{format_args, language_from_path};
use tscat::{CatalogSet, LookupError, LookupPolicy};

use super::load_catalog;

/// Arguments for the lookup command.
#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Catalog to search (.ts)
    pub file: PathBuf,

    /// Context name, e.g. MainWindow
    #[arg(long, short)]
    pub context: String,

    /// Source text
    #[arg(long, short)]
    pub source: String,

    /// Disambiguation comment
    #[arg(long, default_value = "")]
    pub comment: String,

    /// Count for numerus messages; selects the plural form and fills %n
    #[arg(short = 'n', long = "count", allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Arguments for %1, %2, ... (repeatable)
    #[arg(short = 'a', long = "arg")]
    pub args: Vec<String>,

    /// Ignore translations marked unfinished
    #[arg(long)]
    pub finished_only: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for lookup results.
#[derive(Serialize)]
pub struct LookupResult {
    pub language: String,
    pub result: String,
}

/// Run the lookup command.
pub fn run_lookup(args: LookupArgs) -> Result<i32> {
    let (language, translated) = resolve(&args)?;

    match translated {
        Ok(result) => {
            if args.json {
                let output = LookupResult { language, result };
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                println!("{result}");
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                eprintln!("Lookup error: {e}");
            }
            Ok(exitcode::DATAERR)
        }
    }
}

/// Load the catalog and look the message up, with `--arg` values filled in.
/// Returns the catalog language alongside the lookup outcome.
fn resolve(args: &LookupArgs) -> Result<(String, Result<String, LookupError>)> {
    let output = load_catalog(&args.file)?;
    let language = output
        .catalog
        .language()
        .filter(|language| !language.is_empty())
        .map(str::to_string)
        .or_else(|| language_from_path(&args.file))
        .unwrap_or_default();

    let policy = LookupPolicy::builder()
        .include_unfinished(!args.finished_only)
        .build();
    let mut set = CatalogSet::builder().policy(policy).build();
    set.insert(language.clone(), output.catalog);

    let translated = match args.count {
        Some(n) => set.translate_plural(&language, &args.context, &args.source, &args.comment, n),
        None => set
            .translate_disambiguated(&language, &args.context, &args.source, &args.comment)
            .map(str::to_string),
    };
    let result = translated.map(|text| format_args(&text, &args.args));
    Ok((language, result))
}
