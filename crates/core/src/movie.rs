//! Film / TV metadata as it is written back into the collection.

use serde::{Deserialize, Serialize};

/// Separator the film database uses between a plot paragraph and its
/// author credit, e.g. `"A thief who steals...::Warner Bros."`.
const PLOT_AUTHOR_SEPARATOR: &str = "::";

/// Kind of title, in the vocabulary used by the collection's `Type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MovieKind {
    Movie,
    Series,
    MiniSeries,
}

impl MovieKind {
    /// Map a kind string as reported by the film database.
    ///
    /// Only `movie`, `tv series` and `tv mini series` are recognised;
    /// anything else (episodes, video games, shorts...) yields `None`.
    ///
    /// ```
    /// use reelsync_core::movie::MovieKind;
    ///
    /// assert_eq!(MovieKind::from_service_kind("tv series"), Some(MovieKind::Series));
    /// assert_eq!(MovieKind::from_service_kind("episode"), None);
    /// ```
    pub fn from_service_kind(kind: &str) -> Option<Self> {
        match kind {
            "movie" => Some(Self::Movie),
            "tv series" => Some(Self::Series),
            "tv mini series" => Some(Self::MiniSeries),
            _ => None,
        }
    }

    /// Label written into the collection.
    pub fn label(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
            Self::MiniSeries => "mini-series",
        }
    }
}

/// Normalized metadata for one title.
///
/// Built transiently per lookup; the collection is the only place it is
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// `None` when the service reported a kind outside [`MovieKind`].
    pub kind: Option<MovieKind>,
    /// Identifier in the film database, e.g. `tt1375666`.
    pub external_id: String,
    /// Canonical title; may differ from what the user typed.
    pub title: String,
    /// Plot paragraphs, most relevant first.
    pub plot: Vec<String>,
    pub rating: Option<f64>,
    /// Genre names in service order, without duplicates.
    pub genres: Vec<String>,
}

impl MovieRecord {
    /// Text of the first plot paragraph with any author credit removed.
    ///
    /// Returns `None` when there is no plot or the paragraph is blank.
    pub fn plot_summary(&self) -> Option<&str> {
        let first = self.plot.first()?;
        let summary = first
            .split(PLOT_AUTHOR_SEPARATOR)
            .next()
            .unwrap_or_default()
            .trim();
        (!summary.is_empty()).then_some(summary)
    }
}

/// Remove duplicate genre names while keeping the first occurrence order.
pub fn dedup_genres<I, S>(genres: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for genre in genres {
        let genre = genre.into();
        if !genre.is_empty() && !out.contains(&genre) {
            out.push(genre);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_plot(plot: Vec<&str>) -> MovieRecord {
        MovieRecord {
            kind: Some(MovieKind::Movie),
            external_id: "tt1375666".into(),
            title: "Inception".into(),
            plot: plot.into_iter().map(String::from).collect(),
            rating: Some(8.8),
            genres: vec!["Action".into()],
        }
    }

    #[test]
    fn known_kinds_are_mapped() {
        assert_eq!(MovieKind::from_service_kind("movie"), Some(MovieKind::Movie));
        assert_eq!(
            MovieKind::from_service_kind("tv series"),
            Some(MovieKind::Series)
        );
        assert_eq!(
            MovieKind::from_service_kind("tv mini series"),
            Some(MovieKind::MiniSeries)
        );
    }

    #[test]
    fn unknown_kinds_pass_through_as_none() {
        assert_eq!(MovieKind::from_service_kind("video game"), None);
        assert_eq!(MovieKind::from_service_kind("Movie"), None);
        assert_eq!(MovieKind::from_service_kind(""), None);
    }

    #[test]
    fn labels() {
        assert_eq!(MovieKind::Movie.label(), "movie");
        assert_eq!(MovieKind::Series.label(), "series");
        assert_eq!(MovieKind::MiniSeries.label(), "mini-series");
    }

    #[test]
    fn plot_summary_strips_author_credit() {
        let record = record_with_plot(vec![
            "A thief who steals corporate secrets.::Warner Bros.",
            "Second paragraph",
        ]);
        assert_eq!(
            record.plot_summary(),
            Some("A thief who steals corporate secrets.")
        );
    }

    #[test]
    fn plot_summary_without_separator_is_whole_paragraph() {
        let record = record_with_plot(vec!["Dreams within dreams."]);
        assert_eq!(record.plot_summary(), Some("Dreams within dreams."));
    }

    #[test]
    fn plot_summary_empty_plot() {
        assert_eq!(record_with_plot(vec![]).plot_summary(), None);
        assert_eq!(record_with_plot(vec!["::anonymous"]).plot_summary(), None);
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let genres = dedup_genres(["Action", "Sci-Fi", "Action", "", "Thriller"]);
        assert_eq!(genres, vec!["Action", "Sci-Fi", "Thriller"]);
    }
}
