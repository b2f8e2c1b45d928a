use crate::parser::{Placeholder, Segment, parse_message_text};

/// Substitute positional arguments into a translation.
///
/// `%1` (or `%L1`) is replaced by `args[0]`, `%2` by `args[1]`, and so on.
/// Markers without a matching argument, and the `%n` count marker, are left
/// as they are. Markers may appear in any order: translations often move
/// arguments around.
///
/// # Example
///
/// ```
/// use tscat::lookup::format_args;
///
/// let text = "Не удалось загрузить файл %2 (%1)";
/// assert_eq!(
///     format_args(text, &["EOF", "scan.tif"]),
///     "Не удалось загрузить файл scan.tif (EOF)",
/// );
/// ```
pub fn format_args<S: AsRef<str>>(text: &str, args: &[S]) -> String {
    render(text, |placeholder| match placeholder {
        Placeholder::Arg { number, .. } => args
            .get(usize::from(number) - 1)
            .map(|arg| arg.as_ref().to_string()),
        Placeholder::Count { .. } => None,
    })
}

/// Substitute the numerus count into every `%n` / `%Ln` marker.
///
/// ```
/// use tscat::lookup::format_count;
///
/// assert_eq!(format_count("%n страницы", 3), "3 страницы");
/// ```
pub fn format_count(text: &str, n: i64) -> String {
    render(text, |placeholder| match placeholder {
        Placeholder::Count { .. } => Some(n.to_string()),
        Placeholder::Arg { .. } => None,
    })
}

fn render(text: &str, mut value_for: impl FnMut(Placeholder) -> Option<String>) -> String {
    let mut result = String::with_capacity(text.len());
    for segment in parse_message_text(text) {
        match segment {
            Segment::Literal(literal) => result.push_str(&literal),
            Segment::Placeholder(placeholder) => match value_for(placeholder) {
                Some(value) => result.push_str(&value),
                None => result.push_str(&placeholder.to_string()),
            },
        }
    }
    result
}
