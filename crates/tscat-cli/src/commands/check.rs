//! Implementation of the `tscat check` command.

use std::path::{Path, PathBuf};

use clap::Args;
use miette::{IntoDiagnostic, Result};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tscat::{LintConfig, lint_catalog};

use super::load_catalog;
use crate::config::load_config;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Files to check (.ts)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Lint configuration file (defaults to .tscat.json)
    #[arg(long, env = "TSCAT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// JSON output for one checked file.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    warnings: Vec<WarningJson>,
}

#[derive(Debug, Serialize)]
struct WarningJson {
    /// Lint rule name, absent for load warnings.
    #[serde(skip_serializing_if = "Option::is_none")]
    rule: Option<String>,
    message: String,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let config = load_config(args.config.as_deref(), &args.files).into_diagnostic()?;

    let reports: Vec<FileReport> = args
        .files
        .iter()
        .map(|path| check_file(path, &config, args.json))
        .collect();

    let failed = reports.iter().filter(|report| report.error.is_some()).count();
    let warned: usize = reports.iter().map(|report| report.warnings.len()).sum();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports).into_diagnostic()?);
    } else {
        for report in &reports {
            for warning in &report.warnings {
                let label = match &warning.rule {
                    Some(rule) => format!("warning[{rule}]"),
                    None => "warning".to_string(),
                };
                println!(
                    "{}: {}: {}",
                    report.file,
                    label.if_supports_color(Stream::Stdout, |text| text.yellow()),
                    warning.message
                );
            }
        }
        let summary = format!(
            "{} file(s) checked, {} error(s), {} warning(s)",
            reports.len(),
            failed,
            warned
        );
        if failed == 0 && warned == 0 {
            println!("{}", summary.if_supports_color(Stream::Stdout, |text| text.green()));
        } else {
            println!("{summary}");
        }
    }

    if failed > 0 || (args.strict && warned > 0) {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

/// Parse and lint one file. Parse errors are printed as diagnostics unless
/// JSON output was requested, in which case they end up in the report.
fn check_file(path: &Path, config: &LintConfig, json: bool) -> FileReport {
    let file = path.display().to_string();
    let output = match load_catalog(path) {
        Ok(output) => output,
        Err(report) => {
            if !json {
                eprintln!("{report:?}");
            }
            return FileReport {
                file,
                error: Some(report.to_string()),
                warnings: Vec::new(),
            };
        }
    };

    let load_warnings = output.warnings.iter().map(|warning| WarningJson {
        rule: None,
        message: warning.to_string(),
    });
    let lint_warnings = lint_catalog(&output.catalog, config)
        .into_iter()
        .map(|warning| WarningJson {
            rule: Some(warning.rule().to_string()),
            message: warning.to_string(),
        });

    FileReport {
        file,
        error: None,
        warnings: load_warnings.chain(lint_warnings).collect(),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::commands::fixtures;

    const EMPTY_FINISHED: &str = r#"<TS version="2.1" language="de">
<context>
    <name>MainWindow</name>
    <message>
        <source>Close</source>
        <translation></translation>
    </message>
</context>
</TS>
"#;

    fn args(files: Vec<PathBuf>, strict: bool) -> CheckArgs {
        CheckArgs {
            files,
            json: true,
            strict,
            config: None,
        }
    }

    #[test]
    fn clean_catalog_passes_strict() {
        let dir = TempDir::new().unwrap();
        let file = fixtures::write(&dir, "app_de.ts", fixtures::DE);
        assert_eq!(run_check(args(vec![file], true)).unwrap(), exitcode::OK);
    }

    #[test]
    fn warnings_fail_only_in_strict_mode() {
        let dir = TempDir::new().unwrap();
        let file = fixtures::write(&dir, "app_de.ts", EMPTY_FINISHED);

        let report = check_file(&file, &LintConfig::default(), true);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].rule.as_deref(), Some("empty-translation"));

        assert_eq!(run_check(args(vec![file.clone()], false)).unwrap(), exitcode::OK);
        assert_eq!(run_check(args(vec![file], true)).unwrap(), exitcode::DATAERR);
    }

    #[test]
    fn parse_error_fails() {
        let dir = TempDir::new().unwrap();
        let good = fixtures::write(&dir, "app_de.ts", fixtures::DE);
        let bad = fixtures::write(&dir, "app_fr.ts", "<TS><context></TS>");

        let report = check_file(&bad, &LintConfig::default(), true);
        assert!(report.error.is_some());
        assert_eq!(run_check(args(vec![good, bad], false)).unwrap(), exitcode::DATAERR);
    }

    #[test]
    fn disabled_rule_is_not_reported() {
        let dir = TempDir::new().unwrap();
        let file = fixtures::write(&dir, "app_de.ts", EMPTY_FINISHED);
        let config = fixtures::write(&dir, "lint.json", r#"{"disabled": ["empty-translation"]}"#);

        let mut check = args(vec![file], true);
        check.config = Some(config);
        assert_eq!(run_check(check).unwrap(), exitcode::OK);
    }
}
