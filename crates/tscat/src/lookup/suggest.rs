use strsim::levenshtein;

/// Compute typo suggestions using Levenshtein distance.
///
/// - distance <= 1 for names of at most 3 characters
/// - distance <= 2 for longer names
/// - at most 3 suggestions, closest first
///
/// # Example
///
/// ```
/// use tscat::compute_suggestions;
///
/// let contexts = ["MainWindow", "FixDpiDialog", "OutOfMemoryDialog"];
/// assert_eq!(compute_suggestions("MainWidow", contexts), vec!["MainWindow"]);
/// ```
pub fn compute_suggestions<'a>(name: &str, available: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let max_distance = if name.chars().count() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, String)> = available
        .into_iter()
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            if dist <= max_distance && dist > 0 {
                Some((dist, candidate.to_string()))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions.dedup_by(|a, b| a.1 == b.1);
    suggestions.into_iter().take(3).map(|(_, s)| s).collect()
}
