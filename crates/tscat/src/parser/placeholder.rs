//! Placeholder parser using winnow.
//!
//! Recognizes the markers `QString::arg` and Qt's numerus translation
//! substitute:
//! - `%1` .. `%99`, with an optional `L` for locale-aware formatting (`%L2`)
//! - `%n` / `%Ln` for the count of a numerus message
//!
//! Anything else, including a lone `%` or `%0`, is literal text. Parsing
//! never fails.

use std::collections::BTreeMap;

use winnow::combinator::{alt, opt, preceded, repeat};
use winnow::prelude::*;
use winnow::token::{one_of, take_till};

use super::ast::{Placeholder, Segment};

/// Split message text into literals and placeholders.
///
/// # Example
///
/// ```
/// use tscat::parser::{Placeholder, Segment, parse_message_text};
///
/// let segments = parse_message_text("Loading %L1 of %2...");
/// assert_eq!(
///     segments,
///     vec![
///         Segment::Literal("Loading ".to_string()),
///         Segment::Placeholder(Placeholder::Arg { number: 1, localized: true }),
///         Segment::Literal(" of ".to_string()),
///         Segment::Placeholder(Placeholder::Arg { number: 2, localized: false }),
///         Segment::Literal("...".to_string()),
///     ]
/// );
/// ```
pub fn parse_message_text(text: &str) -> Vec<Segment> {
    let mut remaining = text;
    match segments(&mut remaining) {
        Ok(segments) if remaining.is_empty() => merge_literals(segments),
        // Unreachable in practice: every character is accepted as a literal.
        _ => vec![Segment::Literal(text.to_string())],
    }
}

/// Every placeholder in `text`, in order of appearance.
pub fn parse_placeholders(text: &str) -> Vec<Placeholder> {
    parse_message_text(text)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Placeholder(placeholder) => Some(placeholder),
            Segment::Literal(_) => None,
        })
        .collect()
}

/// How often each positional marker occurs, keyed by marker number.
///
/// The localized flag is ignored and `%n` is not counted, so the result can
/// be compared between a source string and its translation regardless of
/// argument order.
///
/// ```
/// use tscat::parser::arg_counts;
///
/// assert_eq!(arg_counts("%2 / %1"), arg_counts("%1 из %L2"));
/// assert_ne!(arg_counts("%1 %1"), arg_counts("%1"));
/// ```
pub fn arg_counts(text: &str) -> BTreeMap<u8, usize> {
    let mut counts = BTreeMap::new();
    for placeholder in parse_placeholders(text) {
        if let Placeholder::Arg { number, .. } = placeholder {
            *counts.entry(number).or_insert(0) += 1;
        }
    }
    counts
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

fn segments(input: &mut &str) -> ModalResult<Vec<Segment>> {
    repeat(0.., segment).parse_next(input)
}

/// Parse a single segment (placeholder or literal run).
fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((placeholder.map(Segment::Placeholder), literal)).parse_next(input)
}

/// Parse a run of text up to the next `%`, or a `%` that starts no marker.
fn literal(input: &mut &str) -> ModalResult<Segment> {
    alt((take_till(1.., '%'), "%"))
        .map(|s: &str| Segment::Literal(s.to_string()))
        .parse_next(input)
}

/// Parse `%` [`L`] (`n` | number).
fn placeholder(input: &mut &str) -> ModalResult<Placeholder> {
    preceded('%', (opt('L'), alt(('n'.value(None), arg_number.map(Some)))))
        .map(|(localized, number)| {
            let localized = localized.is_some();
            match number {
                Some(number) => Placeholder::Arg { number, localized },
                None => Placeholder::Count { localized },
            }
        })
        .parse_next(input)
}

/// Parse a marker number from 1 to 99 without a leading zero.
fn arg_number(input: &mut &str) -> ModalResult<u8> {
    (one_of('1'..='9'), opt(one_of('0'..='9')))
        .map(|(tens, units): (char, Option<char>)| {
            let first = digit_value(tens);
            match units {
                Some(units) => first * 10 + digit_value(units),
                None => first,
            }
        })
        .parse_next(input)
}

fn digit_value(c: char) -> u8 {
    c.to_digit(10).map_or(0, |d| d as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lone_percent_is_literal() {
        assert_eq!(
            parse_message_text("100% done"),
            vec![Segment::Literal("100% done".to_string())]
        );
    }

    #[test]
    fn zero_is_not_a_marker() {
        assert!(parse_placeholders("%0 and %01").is_empty());
    }

    #[test]
    fn two_digit_markers() {
        assert_eq!(
            parse_placeholders("%12%3"),
            vec![
                Placeholder::Arg { number: 12, localized: false },
                Placeholder::Arg { number: 3, localized: false },
            ]
        );
    }

    #[test]
    fn count_markers() {
        assert_eq!(
            parse_placeholders("%n page(s), %Ln total"),
            vec![
                Placeholder::Count { localized: false },
                Placeholder::Count { localized: true },
            ]
        );
    }

    #[test]
    fn trailing_percent() {
        assert_eq!(
            parse_message_text("50%"),
            vec![Segment::Literal("50%".to_string())]
        );
    }
}
