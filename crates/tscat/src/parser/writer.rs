//! TS document writer.
//!
//! Builds an `xmltree` element tree in the element and attribute order Qt's
//! tools use, then emits it four-space indented. Indentation is inserted as
//! text between structural elements only; text elements are written exactly
//! as their content, so a leading `<byte>` never picks up whitespace.

use std::mem;

use xml::writer::EmitterConfig;
use xmltree::{Element, XMLNode};

use super::error::WriteError;
use crate::catalog::{Catalog, Context, Extra, Message, Translation, TranslationBody};

const HEADER: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n";

const INDENT: &str = "    ";

/// Serialize a catalog as a TS document.
///
/// # Example
///
/// ```
/// use tscat::{Catalog, Message, Translation, read_catalog, write_catalog};
///
/// let mut catalog = Catalog::with_language("ru");
/// catalog.insert(
///     "MainWindow",
///     Message::builder().source("Error").translation(Translation::finished("Ошибка")).build(),
/// );
///
/// let text = write_catalog(&catalog).unwrap();
/// assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n"));
///
/// let reread = read_catalog(&text).unwrap();
/// assert_eq!(reread.catalog, catalog);
/// ```
pub fn write_catalog(catalog: &Catalog) -> Result<String, WriteError> {
    let mut root = catalog_element(catalog);
    indent(&mut root, 0);
    let config = EmitterConfig::new()
        .perform_indent(false)
        .write_document_declaration(false);

    let mut out = HEADER.as_bytes().to_vec();
    root.write_with_config(&mut out, config)?;
    out.push(b'\n');
    Ok(String::from_utf8(out)?)
}

/// Small builder over `xmltree::Element` for declarative tree construction.
struct ElementBuilder(Element);

impl ElementBuilder {
    fn new(tag: &str) -> Self {
        Self(Element::new(tag))
    }

    fn build(self) -> Element {
        self.0
    }

    fn attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.0.attributes.insert(key.to_string(), value.into());
        self
    }

    fn attr_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.attr(key, value),
            None => self,
        }
    }

    fn child(mut self, child: Element) -> Self {
        self.0.children.push(XMLNode::Element(child));
        self
    }

    fn child_opt(self, child: Option<Element>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.0
            .children
            .extend(children.into_iter().map(XMLNode::Element));
        self
    }

    fn text_child(self, tag: &str, text: &str) -> Self {
        self.child(ElementBuilder::new(tag).text(text).build())
    }

    fn text_child_opt(self, tag: &str, text: Option<&str>) -> Self {
        match text {
            Some(text) => self.text_child(tag, text),
            None => self,
        }
    }

    /// Append text, writing characters XML cannot carry as `<byte>` elements.
    fn text(mut self, text: &str) -> Self {
        let mut run = String::new();
        for c in text.chars() {
            if is_xml_safe(c) {
                run.push(c);
                continue;
            }
            if !run.is_empty() {
                self.0.children.push(XMLNode::Text(mem::take(&mut run)));
            }
            let byte = ElementBuilder::new("byte")
                .attr("value", format!("x{:x}", u32::from(c)))
                .build();
            self.0.children.push(XMLNode::Element(byte));
        }
        if !run.is_empty() {
            self.0.children.push(XMLNode::Text(run));
        }
        self
    }
}

/// XML 1.0 forbids control characters below U+0020 except tab, LF and CR.
fn is_xml_safe(c: char) -> bool {
    u32::from(c) >= 0x20 || matches!(c, '\t' | '\n' | '\r')
}

/// Interleave newline-and-indent text between the children of structural
/// elements, recursing into structural children.
fn indent(element: &mut Element, depth: usize) {
    if !is_structural(element) || element.children.is_empty() {
        return;
    }
    let inner = format!("\n{}", INDENT.repeat(depth + 1));
    let children = mem::take(&mut element.children);
    for mut child in children {
        if let XMLNode::Element(nested) = &mut child {
            indent(nested, depth + 1);
        }
        element.children.push(XMLNode::Text(inner.clone()));
        element.children.push(child);
    }
    element
        .children
        .push(XMLNode::Text(format!("\n{}", INDENT.repeat(depth))));
}

/// Elements that hold only other elements. A `<translation>` is structural
/// when it holds numerus forms or length variants; a `<numerusform>` never is.
fn is_structural(element: &Element) -> bool {
    match element.name.as_str() {
        "TS" | "dependencies" | "context" | "message" => true,
        "translation" => element.children.iter().any(|node| {
            matches!(node, XMLNode::Element(child)
                if child.name == "numerusform" || child.name == "lengthvariant")
        }),
        _ => false,
    }
}

fn catalog_element(catalog: &Catalog) -> Element {
    ElementBuilder::new("TS")
        .attr_opt("version", catalog.version())
        .attr_opt("language", catalog.language())
        .attr_opt("sourcelanguage", catalog.source_language())
        .text_child_opt("defaultcodec", catalog.default_codec())
        .child_opt(dependencies_element(catalog.dependencies()))
        .children(catalog.extras().iter().map(extra_element))
        .children(catalog.contexts().iter().map(context_element))
        .build()
}

fn dependencies_element(dependencies: &[String]) -> Option<Element> {
    if dependencies.is_empty() {
        return None;
    }
    let element = ElementBuilder::new("dependencies")
        .children(dependencies.iter().map(|catalog| {
            ElementBuilder::new("dependency")
                .attr("catalog", catalog.as_str())
                .build()
        }))
        .build();
    Some(element)
}

fn context_element(context: &Context) -> Element {
    ElementBuilder::new("context")
        .attr_opt("encoding", context.encoding())
        .text_child("name", context.name())
        .text_child_opt("comment", context.comment())
        .children(context.messages().iter().map(message_element))
        .build()
}

fn message_element(message: &Message) -> Element {
    let mut builder = ElementBuilder::new("message").attr_opt("id", message.id.as_deref());
    if message.numerus {
        builder = builder.attr("numerus", "yes");
    }
    if let Some(utf8) = message.utf8 {
        builder = builder.attr("utf8", utf8.to_string());
    }

    builder
        .children(message.locations.iter().map(|location| {
            ElementBuilder::new("location")
                .attr_opt("filename", location.filename.as_deref())
                .attr_opt("line", location.line.as_deref())
                .build()
        }))
        .text_child("source", &message.source)
        .text_child_opt("oldsource", message.old_source.as_deref())
        .text_child_opt("comment", message.comment.as_deref())
        .text_child_opt("oldcomment", message.old_comment.as_deref())
        .text_child_opt("extracomment", message.extra_comment.as_deref())
        .text_child_opt("translatorcomment", message.translator_comment.as_deref())
        .child(translation_element(&message.translation))
        .text_child_opt("userdata", message.userdata.as_deref())
        .children(message.extras.iter().map(extra_element))
        .build()
}

fn translation_element(translation: &Translation) -> Element {
    let builder =
        ElementBuilder::new("translation").attr_opt("type", translation.status.as_attribute());
    match &translation.body {
        TranslationBody::Text(text) => builder.text(text),
        TranslationBody::Numerus(forms) => builder.children(
            forms
                .iter()
                .map(|form| ElementBuilder::new("numerusform").text(form).build()),
        ),
        TranslationBody::LengthVariants(variants) => builder.attr("variants", "yes").children(
            variants
                .iter()
                .map(|variant| ElementBuilder::new("lengthvariant").text(variant).build()),
        ),
    }
    .build()
}

fn extra_element(extra: &Extra) -> Element {
    ElementBuilder::new(&extra.name).text(&extra.content).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_characters_become_byte_elements() {
        let element = ElementBuilder::new("source").text("a\u{1b}b").build();
        assert_eq!(element.children.len(), 3);
        let XMLNode::Element(byte) = &element.children[1] else {
            panic!("expected <byte>");
        };
        assert_eq!(byte.name, "byte");
        assert_eq!(byte.attributes.get("value").map(String::as_str), Some("x1b"));
    }

    #[test]
    fn text_elements_are_not_indented() {
        let mut message = ElementBuilder::new("message")
            .child(ElementBuilder::new("source").text("\u{1b}x").build())
            .build();
        indent(&mut message, 2);

        let XMLNode::Element(source) = &message.children[1] else {
            panic!("expected <source>");
        };
        assert!(matches!(&source.children[0], XMLNode::Element(byte) if byte.name == "byte"));
        assert_eq!(source.children[1], XMLNode::Text("x".to_string()));
        assert_eq!(message.children[0], XMLNode::Text("\n            ".to_string()));
        assert_eq!(message.children[2], XMLNode::Text("\n        ".to_string()));
    }

    #[test]
    fn numerus_translation_is_structural() {
        let translation = ElementBuilder::new("translation")
            .child(ElementBuilder::new("numerusform").text("one").build())
            .build();
        assert!(is_structural(&translation));

        let plain = ElementBuilder::new("translation").text("\u{7}").build();
        assert!(!is_structural(&plain));
    }

    #[test]
    fn tabs_and_newlines_stay_text() {
        let element = ElementBuilder::new("source").text("a\tb\nc").build();
        assert_eq!(element.children, vec![XMLNode::Text("a\tb\nc".to_string())]);
    }
}
