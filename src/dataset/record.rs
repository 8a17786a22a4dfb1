//! Typed movie rows

use serde::Serialize;

/// One cleaned row of the movie table.
///
/// `year` and `rating` are always present once a row has made it into a
/// [`Dataset`](super::Dataset). Gross and budget stay optional: a missing
/// value is absent in per-row projections and contributes nothing to sums.
/// Director, country and genre are `None` when the source cell was empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecord {
    pub title: String,
    pub year: i32,
    pub director: Option<String>,
    pub rating: f64,
    pub main_genre: Option<String>,
    pub country: Option<String>,
    pub total_gross: Option<f64>,
    pub total_budget: Option<f64>,
}

impl MovieRecord {
    pub fn new(
        title: impl Into<String>,
        year: i32,
        director: impl Into<String>,
        rating: f64,
        main_genre: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            year,
            director: non_empty(director.into()),
            rating,
            main_genre: non_empty(main_genre.into()),
            country: non_empty(country.into()),
            total_gross: None,
            total_budget: None,
        }
    }

    pub fn with_gross(mut self, gross: f64) -> Self {
        self.total_gross = Some(gross);
        self
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.total_budget = Some(budget);
        self
    }

    pub fn director(&self) -> Option<&str> {
        self.director.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn main_genre(&self) -> Option<&str> {
        self.main_genre.as_deref()
    }

    /// Per-row view used in top-director movie lists
    pub fn projection(&self) -> MovieProjection {
        MovieProjection {
            title: self.title.clone(),
            total_gross: self.total_gross,
            total_budget: self.total_budget,
            rating: self.rating,
        }
    }
}

/// Title, gross, budget and rating of a single movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieProjection {
    pub title: String,
    pub total_gross: Option<f64>,
    pub total_budget: Option<f64>,
    pub rating: f64,
}

/// Empty or whitespace-only text counts as a missing value
pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_fields_are_absent() {
        let record = MovieRecord::new("Untitled", 2001, " ", 6.5, "", "France");
        assert_eq!(record.director(), None);
        assert_eq!(record.main_genre(), None);
        assert_eq!(record.country(), Some("France"));
    }

    #[test]
    fn test_projection_keeps_missing_gross_absent() {
        let record = MovieRecord::new("Heat", 1995, "Michael Mann", 8.3, "Crime", "USA")
            .with_budget(60_000_000.0);
        let projection = record.projection();
        assert_eq!(projection.title, "Heat");
        assert_eq!(projection.total_gross, None);
        assert_eq!(projection.total_budget, Some(60_000_000.0));
        assert_eq!(projection.rating, 8.3);
    }
}
