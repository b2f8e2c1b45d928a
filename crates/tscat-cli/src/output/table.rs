//! Table formatting utilities for CLI output.

use comfy_table::{CellAlignment, ContentArrangement, Table, presets};
use tscat::CatalogStats;

/// Progress of one catalog file.
pub struct CatalogCoverage {
    /// File name as given on the command line.
    pub file: String,
    /// Catalog language, if declared or derivable from the file name.
    pub language: Option<String>,
    pub stats: CatalogStats,
}

/// Format coverage data as a table.
pub fn format_coverage_table(coverage: &[CatalogCoverage]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "File",
        "Language",
        "Translated",
        "Unfinished",
        "Retired",
        "Completion",
    ]);

    for entry in coverage {
        let stats = &entry.stats;
        table.add_row(vec![
            entry.file.clone(),
            entry.language.clone().unwrap_or_else(|| "-".to_string()),
            format!("{}/{}", stats.translated, stats.active()),
            stats.unfinished.to_string(),
            (stats.obsolete + stats.vanished).to_string(),
            format!("{:.1}%", stats.completion()),
        ]);
    }

    for index in 2..6 {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table
}
