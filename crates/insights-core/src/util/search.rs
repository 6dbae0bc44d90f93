//! Case-insensitive fuzzy search over labeled items.

/// Scores how well `needle` matches `haystack`. Higher is better; `None`
/// means no match. Exact beats prefix beats substring, and earlier
/// substring positions score higher.
pub fn match_score(haystack: &str, needle: &str) -> Option<i64> {
    if needle.is_empty() {
        return Some(0);
    }
    let haystack = haystack.to_lowercase();
    let needle = needle.to_lowercase();

    if haystack == needle {
        return Some(1000);
    }
    if haystack.starts_with(&needle) {
        return Some(800);
    }
    haystack
        .find(&needle)
        .map(|position| 600 - position as i64)
}

/// Returns references to the matching items, best match first.
///
/// Ties keep the input order (stable sort).
pub fn fuzzy_search<'a, T, F>(items: &'a [T], query: &str, key: F) -> Vec<&'a T>
where
    F: Fn(&T) -> &str,
{
    let mut scored: Vec<(i64, &T)> = items
        .iter()
        .filter_map(|item| match_score(key(item), query).map(|score| (score, item)))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, item)| item).collect()
}
