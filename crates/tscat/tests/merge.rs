//! Tests for updating catalogs from extracted templates.

use tscat::{
    Catalog, Location, MergeReport, Message, Translation, TranslationBody, TranslationStatus,
    read_catalog, write_catalog,
};

const RU: &str = include_str!("fixtures/scantailor_ru.ts");
const LEGACY: &str = include_str!("fixtures/legacy.ts");
const TEMPLATE: &str = include_str!("fixtures/template.ts");

fn merged() -> (Catalog, MergeReport) {
    let mut catalog = read_catalog(RU).unwrap().catalog;
    let template = read_catalog(TEMPLATE).unwrap().catalog;
    let report = catalog.merge_template(&template);
    (catalog, report)
}

// =========================================================================
// Report
// =========================================================================

#[test]
fn report_counts() {
    let (_, report) = merged();
    assert_eq!(
        report,
        MergeReport {
            kept: 6,
            added: 1,
            revived: 1,
            retired: 2,
        }
    );
}

// =========================================================================
// Message Updates
// =========================================================================

#[test]
fn kept_messages_keep_translation_and_take_locations() {
    let (catalog, _) = merged();
    let message = catalog.message("MainWindow", "Error", "").unwrap();

    assert_eq!(message.translation, Translation::finished("Ошибка"));
    assert_eq!(
        message.locations,
        vec![Location::new("../src/app/MainWindow.cpp", 1101)]
    );
}

#[test]
fn developer_comment_is_refreshed() {
    let (catalog, _) = merged();
    let message = catalog.message("FixDpiDialog", "Need Fixing", "").unwrap();
    assert_eq!(
        message.extra_comment.as_deref(),
        Some("DPI stands for dots per inch (pixels per inch on screen)")
    );
    assert_eq!(
        message.translator_comment.as_deref(),
        Some("Checked against the 0.9 release")
    );
}

#[test]
fn numerus_translation_survives_template_forms() {
    let (catalog, _) = merged();
    let message = catalog
        .message("MainWindow", "%n page(s) selected", "")
        .unwrap();
    assert_eq!(message.status(), TranslationStatus::Finished);
    assert_eq!(message.translation.forms().len(), 3);
}

#[test]
fn new_messages_are_added_unfinished() {
    let (catalog, _) = merged();
    let message = catalog.message("MainWindow", "Export pages", "").unwrap();
    assert_eq!(message.translation, Translation::unfinished(""));
    assert_eq!(message.locations.len(), 1);

    let sources: Vec<&str> = catalog.context("MainWindow").unwrap().sources().collect();
    assert_eq!(sources.last(), Some(&"Export pages"));
}

#[test]
fn obsolete_message_is_revived_as_unfinished() {
    let (catalog, _) = merged();
    let message = catalog
        .message("MainWindow", "Stop batch processing", "")
        .unwrap();
    assert_eq!(
        message.translation,
        Translation::unfinished("Остановить пакетную обработку")
    );
}

#[test]
fn missing_messages_vanish() {
    let (catalog, _) = merged();
    let dialog = catalog
        .message("MainWindow", "Save Project As", "dialog title")
        .unwrap();
    assert_eq!(dialog.status(), TranslationStatus::Vanished);
    assert_eq!(dialog.translation.text(), Some("Сохранение проекта"));

    let pages = catalog.message("FixDpiDialog", "%1 (page %2)", "").unwrap();
    assert_eq!(pages.status(), TranslationStatus::Vanished);
    assert!(pages.locations.is_empty());

    let removed = catalog
        .message("MainWindow", "Remove from project...", "")
        .unwrap();
    assert_eq!(removed.status(), TranslationStatus::Vanished);
}

#[test]
fn legacy_catalogs_use_obsolete() {
    let mut catalog = read_catalog(LEGACY).unwrap().catalog;
    let mut template = Catalog::new();
    template.insert(
        "OutOfMemoryDialog",
        Message::builder().source("Out of memory").build(),
    );

    let report = catalog.merge_template(&template);
    assert_eq!(report.retired, 1);
    assert_eq!(
        catalog
            .message("OutOfMemoryDialog", "Bell\u{7}character", "")
            .unwrap()
            .status(),
        TranslationStatus::Obsolete
    );
}

#[test]
fn numerus_flag_change_reshapes_translation() {
    let mut catalog = Catalog::with_language("ru");
    catalog.insert(
        "MainWindow",
        Message::builder()
            .source("%n file(s)")
            .translation(Translation::finished("%n файл(ов)"))
            .build(),
    );
    let mut template = Catalog::new();
    template.insert(
        "MainWindow",
        Message::builder().source("%n file(s)").numerus(true).build(),
    );

    catalog.merge_template(&template);
    let message = catalog.message("MainWindow", "%n file(s)", "").unwrap();
    assert!(message.numerus);
    assert_eq!(
        message.translation,
        Translation::numerus(
            TranslationStatus::Unfinished,
            vec!["%n файл(ов)".to_string()]
        )
    );
}

#[test]
fn new_numerus_messages_get_one_form_per_category() {
    let mut catalog = Catalog::with_language("pl");
    let mut template = Catalog::new();
    template.insert(
        "MainWindow",
        Message::builder().source("%n file(s)").numerus(true).build(),
    );

    catalog.merge_template(&template);
    let message = catalog.message("MainWindow", "%n file(s)", "").unwrap();
    assert_eq!(
        message.translation.body,
        TranslationBody::Numerus(vec![String::new(); 3])
    );
}

#[test]
fn merging_twice_changes_nothing() {
    let (mut catalog, _) = merged();
    let template = read_catalog(TEMPLATE).unwrap().catalog;
    let before = write_catalog(&catalog).unwrap();

    let report = catalog.merge_template(&template);
    assert_eq!(report.added + report.revived + report.retired, 0);
    assert_eq!(write_catalog(&catalog).unwrap(), before);
}
