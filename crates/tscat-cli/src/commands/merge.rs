//! Implementation of the `tscat merge` command.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use miette::{IntoDiagnostic, Result, WrapErr};
use tscat::write_catalog;

use super::load_catalog;

/// Arguments for the merge command.
#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Freshly extracted catalog with the current source strings
    #[arg(long, short)]
    pub template: PathBuf,

    /// Translated catalog to update (.ts)
    pub file: PathBuf,

    /// Where to write the result. Defaults to updating FILE in place.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Drop retired messages instead of keeping them as vanished
    #[arg(long)]
    pub purge_obsolete: bool,

    /// Print the merge report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the merge command.
pub fn run_merge(args: MergeArgs) -> Result<i32> {
    let template = load_catalog(&args.template)?;
    let mut target = load_catalog(&args.file)?;

    let report = target.catalog.merge_template(&template.catalog);
    if args.purge_obsolete {
        target.catalog.purge_obsolete();
    }

    let destination = args.output.as_ref().unwrap_or(&args.file);
    let formatted = write_catalog(&target.catalog).into_diagnostic()?;
    fs::write(destination, formatted)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write {}", destination.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
    } else {
        println!(
            "Updated {}: {} kept, {} added, {} revived, {} retired",
            destination.display(),
            report.kept,
            report.added,
            report.revived,
            report.retired
        );
    }
    Ok(exitcode::OK)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::TempDir;
    use tscat::{Catalog, TranslationStatus, read_catalog};

    use super::*;
    use crate::commands::fixtures;

    const TEMPLATE: &str = r#"<TS version="2.1">
<context>
    <name>MainWindow</name>
    <message>
        <source>Open</source>
        <translation type="unfinished"></translation>
    </message>
    <message>
        <source>Save</source>
        <translation type="unfinished"></translation>
    </message>
</context>
</TS>
"#;

    const TARGET: &str = r#"<TS version="2.1" language="de">
<context>
    <name>MainWindow</name>
    <message>
        <source>Open</source>
        <translation>Öffnen</translation>
    </message>
    <message>
        <source>Quit</source>
        <translation>Beenden</translation>
    </message>
</context>
</TS>
"#;

    fn args(dir: &TempDir) -> MergeArgs {
        MergeArgs {
            template: fixtures::write(dir, "app.ts", TEMPLATE),
            file: fixtures::write(dir, "app_de.ts", TARGET),
            output: None,
            purge_obsolete: false,
            json: false,
        }
    }

    fn read(path: &Path) -> Catalog {
        read_catalog(&fs::read_to_string(path).unwrap()).unwrap().catalog
    }

    #[test]
    fn output_leaves_input_untouched() {
        let dir = TempDir::new().unwrap();
        let mut merge = args(&dir);
        let input = merge.file.clone();
        let output = dir.path().join("merged_de.ts");
        merge.output = Some(output.clone());

        assert_eq!(run_merge(merge).unwrap(), exitcode::OK);
        assert_eq!(fs::read_to_string(&input).unwrap(), TARGET);

        let merged = read(&output);
        assert_eq!(merged.translate("MainWindow", "Open"), Some("Öffnen"));
        let save = merged.message("MainWindow", "Save", "").unwrap();
        assert_eq!(save.status(), TranslationStatus::Unfinished);
        let quit = merged.message("MainWindow", "Quit", "").unwrap();
        assert_eq!(quit.status(), TranslationStatus::Vanished);
    }

    #[test]
    fn purge_drops_retired_messages() {
        let dir = TempDir::new().unwrap();
        let mut merge = args(&dir);
        let file = merge.file.clone();
        merge.purge_obsolete = true;

        assert_eq!(run_merge(merge).unwrap(), exitcode::OK);
        let merged = read(&file);
        assert!(merged.message("MainWindow", "Quit", "").is_none());
        assert_eq!(merged.message_count(), 2);
    }
}
