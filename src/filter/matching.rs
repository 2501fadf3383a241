//! Case-insensitive bidirectional substring matching.
//!
//! List entries and source data are typed at different granularity ("bank" vs.
//! "Bank Hapoalim Ltd"), so a match in either direction counts.

/// Returns `true` if `text` contains `entry` or `entry` contains `text`
/// (case-insensitive).
///
/// A blank side never matches: an empty company must not match every entry.
pub fn matches_either_way(text: &str, entry: &str) -> bool {
    let text = text.trim().to_lowercase();
    let entry = entry.trim().to_lowercase();
    matches_either_way_normalized(&text, &entry)
}

/// [`matches_either_way`] for inputs already trimmed and lowercased.
#[inline]
pub fn matches_either_way_normalized(text: &str, entry: &str) -> bool {
    if text.is_empty() || entry.is_empty() {
        return false;
    }
    text.contains(entry) || entry.contains(text)
}

/// First entry in `entries` that matches `text` in either direction.
///
/// `entries` must already be normalized with [`normalize_entries`].
pub fn find_match<'a>(text: &str, entries: &'a [String]) -> Option<&'a str> {
    let text = text.trim().to_lowercase();
    entries
        .iter()
        .find(|entry| matches_either_way_normalized(&text, entry))
        .map(String::as_str)
}

/// Trims, lowercases and drops blank entries, preserving order.
pub fn normalize_entries<I, S>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|e| e.as_ref().trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}
