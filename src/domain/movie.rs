//! Movie domain model.
//!
//! [`Movie`] mirrors one entry of the catalog's search results and
//! [`MoviePage`] one page of them. Both are plain data; the catalog decoder
//! builds them and the session controller only moves them around.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summary of a single catalog movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Release date as sent by the catalog (`YYYY-MM-DD`, may be empty).
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
}

impl Movie {
    /// Parses the release date, if the catalog sent a well-formed one.
    #[must_use]
    pub fn release(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.release_date, "%Y-%m-%d").ok()
    }

    /// Returns the release year for list display, e.g. `"2008"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cinefind::domain::Movie;
    ///
    /// let movie = Movie {
    ///     id: 155,
    ///     title: "The Dark Knight".to_string(),
    ///     overview: String::new(),
    ///     poster_path: None,
    ///     backdrop_path: None,
    ///     release_date: "2008-07-16".to_string(),
    ///     vote_average: 8.5,
    /// };
    /// assert_eq!(movie.release_year().as_deref(), Some("2008"));
    /// ```
    #[must_use]
    pub fn release_year(&self) -> Option<String> {
        self.release().map(|date| date.format("%Y").to_string())
    }

    /// Long-form release date for the detail overlay, e.g. `"16 July 2008"`.
    ///
    /// Falls back to the raw catalog string when it does not parse, and to
    /// `"Unknown"` when it is empty.
    #[must_use]
    pub fn formatted_release_date(&self) -> String {
        match self.release() {
            Some(date) => date.format("%-d %B %Y").to_string(),
            None if self.release_date.is_empty() => "Unknown".to_string(),
            None => self.release_date.clone(),
        }
    }

    /// Rating label in the catalog's ten-point scale, e.g. `"8.5/10"`.
    #[must_use]
    pub fn rating_label(&self) -> String {
        format!("{:.1}/10", self.vote_average)
    }

    /// Full URL of the backdrop image, if the movie has one.
    #[must_use]
    pub fn backdrop_url(&self, image_base_url: &str) -> Option<String> {
        self.backdrop_path
            .as_deref()
            .map(|path| image_url(image_base_url, "original", path))
    }

    /// Full URL of the poster image, if the movie has one.
    #[must_use]
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| image_url(image_base_url, "w500", path))
    }
}

fn image_url(base: &str, size: &str, path: &str) -> String {
    format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        size,
        path.trim_start_matches('/')
    )
}

/// One page of search results together with the size of the result space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub total_pages: u32,
}

impl MoviePage {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn sample_movie(id: u64, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        overview: format!("Overview of {title}"),
        poster_path: Some(format!("/poster-{id}.jpg")),
        backdrop_path: Some(format!("/backdrop-{id}.jpg")),
        release_date: "2005-06-10".to_string(),
        vote_average: 7.7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_release_date_for_overlay() {
        let movie = sample_movie(272, "Batman Begins");
        assert_eq!(movie.formatted_release_date(), "10 June 2005");
        assert_eq!(movie.release_year().as_deref(), Some("2005"));
    }

    #[test]
    fn missing_or_odd_release_dates_fall_back() {
        let mut movie = sample_movie(1, "Untitled");
        movie.release_date = String::new();
        assert_eq!(movie.formatted_release_date(), "Unknown");
        assert_eq!(movie.release_year(), None);

        movie.release_date = "2024".to_string();
        assert_eq!(movie.formatted_release_date(), "2024");
    }

    #[test]
    fn builds_image_urls_without_double_slashes() {
        let movie = sample_movie(272, "Batman Begins");
        assert_eq!(
            movie.backdrop_url("https://image.tmdb.org/t/p/").as_deref(),
            Some("https://image.tmdb.org/t/p/original/backdrop-272.jpg")
        );
        assert_eq!(
            movie.poster_url("https://image.tmdb.org/t/p").as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster-272.jpg")
        );
    }

    #[test]
    fn rating_label_uses_one_decimal() {
        let mut movie = sample_movie(1, "x");
        movie.vote_average = 6.0;
        assert_eq!(movie.rating_label(), "6.0/10");
    }
}
