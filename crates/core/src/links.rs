//! URL helpers for detail pages and collection references.

/// Length of a Notion id written without dashes.
const COMPACT_ID_LEN: usize = 32;

/// Detail page URL for a title: `<base>/<external_id>`.
///
/// ```
/// use reelsync_core::links::detail_url;
///
/// assert_eq!(
///     detail_url("https://www.imdb.com/title/", "tt1375666"),
///     "https://www.imdb.com/title/tt1375666"
/// );
/// ```
pub fn detail_url(base: &str, external_id: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), external_id)
}

/// Extract the database id from a collection URL or a bare id.
///
/// Accepts share links such as
/// `https://www.notion.so/Watchlist-09f8cae7e34149c28a7662ae07f4f599?v=...`,
/// compact 32-hex ids and dashed UUIDs. Returns the compact lower-case form.
pub fn parse_database_id(reference: &str) -> Option<String> {
    let without_query = reference
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');
    let last_segment = without_query.rsplit('/').next().unwrap_or_default();
    let compact: Vec<char> = last_segment.chars().filter(|c| *c != '-').collect();

    // Slugs may contain non-ASCII letters, so count chars rather than bytes.
    let start = compact.len().checked_sub(COMPACT_ID_LEN)?;
    let candidate = &compact[start..];
    candidate
        .iter()
        .all(|c| c.is_ascii_hexdigit())
        .then(|| candidate.iter().map(|c| c.to_ascii_lowercase()).collect())
}
