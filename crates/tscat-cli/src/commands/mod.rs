//! CLI command implementations.

mod check;
mod coverage;
mod fmt;
mod lookup;
mod merge;

use std::fs::read_to_string;
use std::path::Path;

use miette::{IntoDiagnostic, Result, WrapErr};
use tscat::{ParseOutput, read_catalog};

use crate::output::TsDiagnostic;

pub use check::{CheckArgs, run_check};
pub use coverage::{CoverageArgs, run_coverage};
pub use fmt::{FmtArgs, run_fmt};
pub use lookup::{LookupArgs, run_lookup};
pub use merge::{MergeArgs, run_merge};

/// Read and parse a catalog, turning parse errors into source diagnostics.
fn load_catalog(path: &Path) -> Result<ParseOutput> {
    let content = read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    read_catalog(&content)
        .map_err(|e| TsDiagnostic::from_parse_error(path, &content, &e).into())
}

#[cfg(test)]
mod fixtures {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::TempDir;

    /// A small German catalog in lupdate's own layout.
    pub const DE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="de">
<context>
    <name>MainWindow</name>
    <message>
        <location filename="../src/MainWindow.cpp" line="12"/>
        <source>Open</source>
        <translation>Öffnen</translation>
    </message>
    <message>
        <source>Saved %1 to %2</source>
        <translation>%1 nach %2 gespeichert</translation>
    </message>
    <message numerus="yes">
        <source>%n file(s)</source>
        <translation>
            <numerusform>%n Datei</numerusform>
            <numerusform>%n Dateien</numerusform>
        </translation>
    </message>
    <message>
        <source>Print</source>
        <translation type="unfinished">Drucken</translation>
    </message>
    <message>
        <source>Quit</source>
        <translation type="vanished">Beenden</translation>
    </message>
</context>
</TS>
"#;

    pub fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }
}
