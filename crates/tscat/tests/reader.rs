//! Tests for reading TS documents.

use tscat::{
    LoadWarning, Location, ParseError, TranslationBody, TranslationStatus, Utf8, read_catalog,
};

const RU: &str = include_str!("fixtures/scantailor_ru.ts");
const LEGACY: &str = include_str!("fixtures/legacy.ts");
const MALFORMED: &str = include_str!("fixtures/malformed.ts");

fn wrap(body: &str) -> String {
    format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n<TS version=\"2.1\" language=\"de\">\n{body}\n</TS>\n")
}

// =========================================================================
// Header
// =========================================================================

#[test]
fn header_attributes() {
    let output = read_catalog(RU).unwrap();
    let catalog = &output.catalog;
    assert_eq!(catalog.version(), Some("2.1"));
    assert_eq!(catalog.language(), Some("ru"));
    assert_eq!(catalog.source_language(), Some("en"));
    assert!(!catalog.is_legacy_format());
    assert!(output.warnings.is_empty());
}

#[test]
fn legacy_header_and_codec() {
    let output = read_catalog(LEGACY).unwrap();
    let catalog = &output.catalog;
    assert_eq!(catalog.version(), Some("1.1"));
    assert_eq!(catalog.language(), None);
    assert_eq!(catalog.default_codec(), Some("UTF-8"));
    assert!(catalog.is_legacy_format());

    let context = catalog.context("OutOfMemoryDialog").unwrap();
    assert_eq!(context.encoding(), Some("UTF-8"));
    assert_eq!(context.comment(), Some("Shown when an allocation fails"));
}

// =========================================================================
// Messages
// =========================================================================

#[test]
fn contexts_and_messages_keep_document_order() {
    let catalog = read_catalog(RU).unwrap().catalog;
    let names: Vec<&str> = catalog.contexts().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["MainWindow", "FixDpiDialog"]);

    let sources: Vec<&str> = catalog.context("MainWindow").unwrap().sources().collect();
    assert_eq!(sources[0], "Error");
    assert_eq!(sources[1], "Error saving the project file!");
    assert_eq!(catalog.message_count(), 10);
}

#[test]
fn translation_status_from_type_attribute() {
    let catalog = read_catalog(RU).unwrap().catalog;
    let status = |source: &str| catalog.message("MainWindow", source, "").unwrap().status();

    assert_eq!(status("Error"), TranslationStatus::Finished);
    assert_eq!(status("Unnamed"), TranslationStatus::Unfinished);
    assert_eq!(status("Remove from project..."), TranslationStatus::Vanished);
    assert_eq!(status("Stop batch processing"), TranslationStatus::Obsolete);
}

#[test]
fn disambiguation_comment_is_part_of_the_key() {
    let catalog = read_catalog(RU).unwrap().catalog;
    let menu = catalog
        .message("MainWindow", "Save Project As", "menu entry")
        .unwrap();
    let dialog = catalog
        .message("MainWindow", "Save Project As", "dialog title")
        .unwrap();

    assert_eq!(menu.translation.text(), Some("Сохранить проект как"));
    assert_eq!(dialog.translation.text(), Some("Сохранение проекта"));
    assert!(catalog.message("MainWindow", "Save Project As", "").is_none());
    assert_ne!(menu.id_in("MainWindow"), dialog.id_in("MainWindow"));
}

#[test]
fn numerus_forms() {
    let catalog = read_catalog(RU).unwrap().catalog;
    let message = catalog
        .message("MainWindow", "%n page(s) selected", "")
        .unwrap();

    assert!(message.numerus);
    assert_eq!(
        message.translation.body,
        TranslationBody::Numerus(vec![
            "Выбрана %n страница".to_string(),
            "Выбрано %n страницы".to_string(),
            "Выбрано %n страниц".to_string(),
        ])
    );
    assert_eq!(message.translation.text(), None);
}

#[test]
fn comments_and_locations() {
    let catalog = read_catalog(RU).unwrap().catalog;
    let message = catalog.message("FixDpiDialog", "Need Fixing", "").unwrap();

    assert_eq!(message.extra_comment.as_deref(), Some("DPI stands for dots per inch"));
    assert_eq!(
        message.translator_comment.as_deref(),
        Some("Checked against the 0.9 release")
    );
    assert_eq!(
        message.locations,
        vec![Location {
            filename: Some("../src/app/FixDpiDialog.cpp".to_string()),
            line: Some("+41".to_string()),
        }]
    );
    assert!(message.locations[0].is_relative());
    assert_eq!(message.locations[0].line_number(), Some(41));
}

#[test]
fn byte_elements_decode_to_control_characters() {
    let catalog = read_catalog(LEGACY).unwrap().catalog;
    let message = catalog
        .message("OutOfMemoryDialog", "Bell\u{7}character", "")
        .unwrap();
    assert_eq!(message.translation.text(), Some("Zvonek\u{7}znak"));
}

#[test]
fn whitespace_only_text_is_kept() {
    let input = wrap(
        r#"<context>
    <name>C</name>
    <message>
        <source> </source>
        <translation> </translation>
    </message>
    <message>
        <source>Beep</source>
        <translation> <byte value="x1b"/>x</translation>
    </message>
</context>"#,
    );
    let output = read_catalog(&input).unwrap();
    assert!(output.warnings.is_empty());
    assert_eq!(output.catalog.translate("C", " "), Some(" "));
    assert_eq!(output.catalog.translate("C", ""), None);
    assert_eq!(output.catalog.translate("C", "Beep"), Some(" \u{1b}x"));
}

#[test]
fn text_starting_with_a_byte_element() {
    let input = wrap(
        r#"<context>
    <name>C</name>
    <message>
        <source><byte value="x1b"/>[0m reset</source>
        <translation><byte value="7"/></translation>
    </message>
</context>"#,
    );
    let catalog = read_catalog(&input).unwrap().catalog;
    assert_eq!(catalog.translate("C", "\u{1b}[0m reset"), Some("\u{7}"));
}

#[test]
fn utf8_attribute() {
    let catalog = read_catalog(LEGACY).unwrap().catalog;
    let message = catalog
        .message("OutOfMemoryDialog", "Out of memory", "")
        .unwrap();
    assert_eq!(message.utf8, Some(Utf8::True));
}

#[test]
fn length_variants() {
    let input = wrap(
        r#"<context>
    <name>MainWindow</name>
    <message>
        <source>Processing</source>
        <translation variants="yes">
            <lengthvariant>Verarbeitung läuft</lengthvariant>
            <lengthvariant>Verarb.</lengthvariant>
        </translation>
    </message>
</context>"#,
    );
    let catalog = read_catalog(&input).unwrap().catalog;
    let message = catalog.message("MainWindow", "Processing", "").unwrap();
    assert_eq!(message.translation.forms(), vec!["Verarbeitung läuft", "Verarb."]);
    assert_eq!(catalog.translate("MainWindow", "Processing"), Some("Verarbeitung läuft"));
}

// =========================================================================
// Load Warnings
// =========================================================================

#[test]
fn message_without_source_is_skipped() {
    let input = wrap(
        r#"<context>
    <name>MainWindow</name>
    <message>
        <translation>Fehler</translation>
    </message>
    <message>
        <source>Error</source>
        <translation>Fehler</translation>
    </message>
</context>"#,
    );
    let output = read_catalog(&input).unwrap();
    assert_eq!(output.catalog.message_count(), 1);
    assert_eq!(
        output.warnings,
        vec![LoadWarning::MissingSource {
            context: "MainWindow".to_string(),
            index: 0,
        }]
    );
}

#[test]
fn message_without_translation_is_skipped() {
    let input = wrap(
        r#"<context>
    <name>MainWindow</name>
    <message>
        <source>Error</source>
    </message>
</context>"#,
    );
    let output = read_catalog(&input).unwrap();
    assert_eq!(output.catalog.message_count(), 0);
    assert_eq!(
        output.warnings,
        vec![LoadWarning::MissingTranslation {
            context: "MainWindow".to_string(),
            source_text: "Error".to_string(),
        }]
    );
}

#[test]
fn context_without_name_is_skipped() {
    let input = wrap(
        r#"<context>
    <message>
        <source>Error</source>
        <translation>Fehler</translation>
    </message>
</context>"#,
    );
    let output = read_catalog(&input).unwrap();
    assert!(output.catalog.contexts().is_empty());
    assert_eq!(output.warnings, vec![LoadWarning::ContextWithoutName { index: 0 }]);
}

#[test]
fn duplicate_message_keeps_later_entry_in_place() {
    let input = wrap(
        r#"<context>
    <name>MainWindow</name>
    <message>
        <source>Error</source>
        <translation>Fehler</translation>
    </message>
    <message>
        <source>Warning</source>
        <translation>Warnung</translation>
    </message>
    <message>
        <source>Error</source>
        <translation>Problem</translation>
    </message>
</context>"#,
    );
    let output = read_catalog(&input).unwrap();
    let context = output.catalog.context("MainWindow").unwrap();

    assert_eq!(context.sources().collect::<Vec<_>>(), vec!["Error", "Warning"]);
    assert_eq!(output.catalog.translate("MainWindow", "Error"), Some("Problem"));
    assert_eq!(
        output.warnings,
        vec![LoadWarning::DuplicateMessage {
            context: "MainWindow".to_string(),
            source_text: "Error".to_string(),
        }]
    );
}

#[test]
fn duplicate_contexts_are_merged() {
    let input = wrap(
        r#"<context>
    <name>MainWindow</name>
    <message>
        <source>Error</source>
        <translation>Fehler</translation>
    </message>
</context>
<context>
    <name>FixDpiDialog</name>
    <message>
        <source>Need Fixing</source>
        <translation>Korrektur nötig</translation>
    </message>
</context>
<context>
    <name>MainWindow</name>
    <message>
        <source>Warning</source>
        <translation>Warnung</translation>
    </message>
</context>"#,
    );
    let output = read_catalog(&input).unwrap();
    assert_eq!(output.catalog.contexts().len(), 2);
    assert_eq!(output.catalog.context("MainWindow").unwrap().len(), 2);
    assert_eq!(
        output.warnings,
        vec![LoadWarning::DuplicateContext {
            context: "MainWindow".to_string(),
        }]
    );
}

#[test]
fn dependencies_and_userdata_are_kept() {
    let input = wrap(
        r#"<dependencies>
    <dependency catalog="qtbase_de"/>
    <dependency catalog="qtmultimedia_de"/>
</dependencies>
<context>
    <name>MainWindow</name>
    <message>
        <source>Error</source>
        <translation>Fehler</translation>
        <userdata>kept by some editors</userdata>
    </message>
</context>"#,
    );
    let output = read_catalog(&input).unwrap();
    assert!(output.warnings.is_empty());
    assert_eq!(output.catalog.dependencies(), ["qtbase_de", "qtmultimedia_de"]);
    let message = output.catalog.message("MainWindow", "Error", "").unwrap();
    assert_eq!(message.userdata.as_deref(), Some("kept by some editors"));
}

#[test]
fn unknown_elements_are_skipped() {
    let input = wrap(
        r#"<glossary/>
<context>
    <name>MainWindow</name>
    <message>
        <source>Error</source>
        <screenshot>main.png</screenshot>
        <translation>Fehler</translation>
    </message>
</context>"#,
    );
    let output = read_catalog(&input).unwrap();
    assert_eq!(output.catalog.translate("MainWindow", "Error"), Some("Fehler"));
    assert_eq!(
        output.warnings,
        vec![
            LoadWarning::UnknownElement {
                parent: "TS".to_string(),
                element: "glossary".to_string(),
            },
            LoadWarning::UnknownElement {
                parent: "message".to_string(),
                element: "screenshot".to_string(),
            },
        ]
    );
}

#[test]
fn extra_elements_are_preserved() {
    let input = wrap(
        r#"<context>
    <name>MainWindow</name>
    <message>
        <source>Error</source>
        <translation>Fehler</translation>
        <extra-po-flags>c-format</extra-po-flags>
    </message>
</context>"#,
    );
    let output = read_catalog(&input).unwrap();
    let message = output.catalog.message("MainWindow", "Error", "").unwrap();
    assert_eq!(message.extras.len(), 1);
    assert_eq!(message.extras[0].name, "extra-po-flags");
    assert_eq!(message.extras[0].content, "c-format");
    assert!(output.warnings.is_empty());
}

// =========================================================================
// Fatal Errors
// =========================================================================

#[test]
fn malformed_xml_reports_position() {
    let err = read_catalog(MALFORMED).unwrap_err();
    let ParseError::Xml { line, column, .. } = &err else {
        panic!("expected XML error, got {err:?}");
    };
    assert!(*line > 1);
    assert!(*column >= 1);
    assert_eq!(err.position(), Some((*line, *column)));
}

#[test]
fn wrong_root_element() {
    let err = read_catalog("<?xml version=\"1.0\"?><xliff version=\"1.2\"/>").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedRoot { found } if found == "xliff"));
}

#[test]
fn unknown_translation_type() {
    let input = wrap(
        r#"<context>
    <name>MainWindow</name>
    <message>
        <source>Error</source>
        <translation type="bogus">Fehler</translation>
    </message>
</context>"#,
    );
    let err = read_catalog(&input).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid value 'bogus' for attribute 'type' on <translation>"
    );
}

#[test]
fn unknown_utf8_value() {
    let input = wrap(
        r#"<context>
    <name>MainWindow</name>
    <message utf8="maybe">
        <source>Error</source>
        <translation>Fehler</translation>
    </message>
</context>"#,
    );
    assert!(matches!(
        read_catalog(&input),
        Err(ParseError::InvalidAttribute { attribute, .. }) if attribute == "utf8"
    ));
}
