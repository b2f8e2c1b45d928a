//! TS document reader.
//!
//! `xml-rs` events are folded into an `xmltree` element tree. Whitespace-only
//! runs are kept as text, so a `<source> </source>` reads back as `" "`.

use xml::reader::{EventReader, ParserConfig, XmlEvent};
use xmltree::{Element, XMLNode};

use super::error::{LoadWarning, ParseError};
use crate::catalog::{Catalog, Extra, Location, Message, Translation, TranslationBody, Utf8};
use crate::types::TranslationStatus;

/// A parsed catalog and the warnings produced while reading it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub catalog: Catalog,
    pub warnings: Vec<LoadWarning>,
}

/// Parse a TS document.
///
/// Malformed XML, a root element other than `<TS>`, and unknown attribute
/// values are fatal. Structural gaps (a message without `<source>` or
/// `<translation>`, a context without `<name>`) skip the entry and produce a
/// [`LoadWarning`]; duplicate keys keep the later message.
pub fn read_catalog(input: &str) -> Result<ParseOutput, ParseError> {
    let root = parse_document(input)?;
    if root.name != "TS" {
        return Err(ParseError::UnexpectedRoot { found: root.name });
    }

    let mut catalog = Catalog::new();
    catalog.set_version(attribute(&root, "version"));
    catalog.set_language(attribute(&root, "language"));
    catalog.set_source_language(attribute(&root, "sourcelanguage"));

    let mut warnings = Vec::new();
    let mut context_index = 0;
    for child in child_elements(&root) {
        match child.name.as_str() {
            "context" => {
                read_context(child, context_index, &mut catalog, &mut warnings)?;
                context_index += 1;
            }
            "defaultcodec" => catalog.set_default_codec(Some(text_content(child)?)),
            "dependencies" => read_dependencies(child, &mut catalog, &mut warnings),
            name if name.starts_with("extra-") => catalog.push_extra(read_extra(child)?),
            name => warnings.push(LoadWarning::UnknownElement {
                parent: "TS".to_string(),
                element: name.to_string(),
            }),
        }
    }

    Ok(ParseOutput { catalog, warnings })
}

/// Build the element tree, keeping every character run between tags.
///
/// Comments and processing instructions are dropped; CDATA becomes text.
fn parse_document(input: &str) -> Result<Element, ParseError> {
    let config = ParserConfig::new()
        .whitespace_to_characters(true)
        .cdata_to_characters(true)
        .ignore_comments(true);
    let mut reader = EventReader::new_with_config(input.as_bytes(), config);
    let mut open: Vec<Element> = Vec::new();

    loop {
        match reader.next()? {
            XmlEvent::StartElement {
                name, attributes, ..
            } => {
                let mut element = Element::new(&name.local_name);
                for attribute in attributes {
                    element
                        .attributes
                        .insert(attribute.name.local_name, attribute.value);
                }
                open.push(element);
            }
            XmlEvent::EndElement { .. } => match (open.pop(), open.last_mut()) {
                (Some(element), Some(parent)) => parent.children.push(XMLNode::Element(element)),
                (Some(element), None) => return Ok(element),
                (None, _) => {}
            },
            XmlEvent::Characters(text) => {
                // Text outside the root element is not part of the tree.
                if let Some(parent) = open.last_mut() {
                    parent.children.push(XMLNode::Text(text));
                }
            }
            XmlEvent::EndDocument => return Err(ParseError::missing_root()),
            XmlEvent::StartDocument { .. }
            | XmlEvent::ProcessingInstruction { .. }
            | XmlEvent::CData(_)
            | XmlEvent::Comment(_)
            | XmlEvent::Whitespace(_) => {}
        }
    }
}

fn read_dependencies(
    element: &Element,
    catalog: &mut Catalog,
    warnings: &mut Vec<LoadWarning>,
) {
    for child in child_elements(element) {
        match (child.name.as_str(), attribute(child, "catalog")) {
            ("dependency", Some(name)) => catalog.push_dependency(name),
            ("dependency", None) => {}
            (other, _) => warnings.push(LoadWarning::UnknownElement {
                parent: "dependencies".to_string(),
                element: other.to_string(),
            }),
        }
    }
}

fn read_context(
    element: &Element,
    index: usize,
    catalog: &mut Catalog,
    warnings: &mut Vec<LoadWarning>,
) -> Result<(), ParseError> {
    let Some(name_element) = element.get_child("name") else {
        warnings.push(LoadWarning::ContextWithoutName { index });
        return Ok(());
    };
    let name = text_content(name_element)?;

    if catalog.context(&name).is_some() {
        warnings.push(LoadWarning::DuplicateContext {
            context: name.clone(),
        });
    }

    let mut comment = None;
    let mut messages = Vec::new();
    let mut message_index = 0;
    for child in child_elements(element) {
        match child.name.as_str() {
            "name" => {}
            "comment" => comment = Some(text_content(child)?),
            "message" => {
                if let Some(message) = read_message(child, &name, message_index, warnings)? {
                    messages.push(message);
                }
                message_index += 1;
            }
            other => warnings.push(LoadWarning::UnknownElement {
                parent: "context".to_string(),
                element: other.to_string(),
            }),
        }
    }

    let context = catalog.context_or_insert(&name);
    if let Some(encoding) = attribute(element, "encoding") {
        context.set_encoding(Some(encoding));
    }
    if comment.is_some() {
        context.set_comment(comment);
    }
    for message in messages {
        let source_text = message.source.clone();
        if context.insert(message).is_some() {
            warnings.push(LoadWarning::DuplicateMessage {
                context: name.clone(),
                source_text,
            });
        }
    }
    Ok(())
}

fn read_message(
    element: &Element,
    context: &str,
    index: usize,
    warnings: &mut Vec<LoadWarning>,
) -> Result<Option<Message>, ParseError> {
    let numerus = match element.attributes.get("numerus").map(String::as_str) {
        None | Some("no" | "false") => false,
        Some("yes" | "true") => true,
        Some(other) => return Err(ParseError::invalid_attribute("message", "numerus", other)),
    };
    let utf8 = element
        .attributes
        .get("utf8")
        .map(|value| {
            value
                .parse::<Utf8>()
                .map_err(|value| ParseError::invalid_attribute("message", "utf8", &value))
        })
        .transpose()?;

    let mut message = Message {
        id: attribute(element, "id"),
        numerus,
        utf8,
        ..Message::default()
    };
    let mut source = None;
    let mut translation = None;

    for child in child_elements(element) {
        match child.name.as_str() {
            "location" => message.locations.push(Location {
                filename: attribute(child, "filename"),
                line: attribute(child, "line"),
            }),
            "source" => source = Some(text_content(child)?),
            "oldsource" => message.old_source = Some(text_content(child)?),
            "comment" => message.comment = Some(text_content(child)?),
            "oldcomment" => message.old_comment = Some(text_content(child)?),
            "extracomment" => message.extra_comment = Some(text_content(child)?),
            "translatorcomment" => message.translator_comment = Some(text_content(child)?),
            "translation" => translation = Some(read_translation(child)?),
            "userdata" => message.userdata = Some(text_content(child)?),
            name if name.starts_with("extra-") => message.extras.push(read_extra(child)?),
            other => warnings.push(LoadWarning::UnknownElement {
                parent: "message".to_string(),
                element: other.to_string(),
            }),
        }
    }

    let Some(source) = source else {
        warnings.push(LoadWarning::MissingSource {
            context: context.to_string(),
            index,
        });
        return Ok(None);
    };
    let Some(translation) = translation else {
        warnings.push(LoadWarning::MissingTranslation {
            context: context.to_string(),
            source_text: source,
        });
        return Ok(None);
    };

    message.source = source;
    message.translation = translation;
    Ok(Some(message))
}

fn read_translation(element: &Element) -> Result<Translation, ParseError> {
    let status_attribute = element.attributes.get("type").map(String::as_str);
    let status = TranslationStatus::from_attribute(status_attribute)
        .map_err(|err| ParseError::invalid_attribute("translation", "type", &err.0))?;

    let forms = collect_children(element, "numerusform");
    let body = if !forms.is_empty() {
        TranslationBody::Numerus(
            forms
                .into_iter()
                .map(variant_text)
                .collect::<Result<_, _>>()?,
        )
    } else {
        let variants = collect_children(element, "lengthvariant");
        if variants.is_empty() {
            TranslationBody::Text(text_content(element)?)
        } else {
            TranslationBody::LengthVariants(
                variants
                    .into_iter()
                    .map(text_content)
                    .collect::<Result<_, _>>()?,
            )
        }
    };

    Ok(Translation { status, body })
}

/// Text of a `<numerusform>`, which may itself hold length variants. Only the
/// first (longest) variant is kept.
fn variant_text(element: &Element) -> Result<String, ParseError> {
    match collect_children(element, "lengthvariant").first() {
        Some(first) => {
            tracing::debug!("numerus form with length variants; keeping the first");
            text_content(first)
        }
        None => text_content(element),
    }
}

fn read_extra(element: &Element) -> Result<Extra, ParseError> {
    Ok(Extra {
        name: element.name.clone(),
        content: text_content(element)?,
    })
}

/// The text of an element, decoding `<byte value="..."/>` children.
fn text_content(element: &Element) -> Result<String, ParseError> {
    let mut text = String::new();
    for node in &element.children {
        match node {
            XMLNode::Text(chunk) | XMLNode::CData(chunk) => text.push_str(chunk),
            XMLNode::Element(child) if child.name == "byte" => {
                if let Some(c) = decode_byte(child)? {
                    text.push(c);
                }
            }
            XMLNode::Element(child) => {
                return Err(ParseError::UnexpectedElement {
                    parent: element.name.clone(),
                    found: child.name.clone(),
                });
            }
            XMLNode::Comment(_) | XMLNode::ProcessingInstruction(..) => {}
        }
    }
    Ok(text)
}

/// Decode a `<byte>` value: decimal (`27`) or hexadecimal (`x1b`, `0x1b`).
/// A zero value encodes nothing.
fn decode_byte(element: &Element) -> Result<Option<char>, ParseError> {
    let value = element
        .attributes
        .get("value")
        .map(String::as_str)
        .unwrap_or_default();
    let invalid = || ParseError::invalid_attribute("byte", "value", value);

    let code = if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix('x')) {
        u32::from_str_radix(hex, 16)
    } else {
        value.parse::<u32>()
    }
    .map_err(|_| invalid())?;

    if code == 0 {
        return Ok(None);
    }
    char::from_u32(code).map(Some).ok_or_else(invalid)
}

fn attribute(element: &Element, name: &str) -> Option<String> {
    element.attributes.get(name).cloned()
}

fn child_elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(|node| match node {
        XMLNode::Element(child) => Some(child),
        _ => None,
    })
}

fn collect_children<'a>(element: &'a Element, name: &str) -> Vec<&'a Element> {
    child_elements(element)
        .filter(|child| child.name == name)
        .collect()
}
