//! Filter stage - narrows the dataset by genre, year range and country

use crate::dataset::{Dataset, MovieRecord};
use serde::Serialize;

/// Query filter parameters. Absent (or empty) text parameters do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterParams {
    pub genre: Option<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub country: Option<String>,
}

impl FilterParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_start_year(mut self, year: i32) -> Self {
        self.start_year = Some(year);
        self
    }

    pub fn with_end_year(mut self, year: i32) -> Self {
        self.end_year = Some(year);
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Genre to match, if one was given
    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref().filter(|g| !g.is_empty())
    }

    /// Country to match, if one was given
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref().filter(|c| !c.is_empty())
    }
}

/// Return the rows of `dataset` that pass every given filter, in dataset order.
///
/// - genre: case-insensitive exact match on the main genre
/// - years: inclusive on both ends, defaulting to the dataset bounds; an
///   inverted range yields no rows
/// - country: case-sensitive exact match
///
/// Rows are borrowed, never copied or modified.
pub fn filter<'a>(dataset: &'a Dataset, params: &FilterParams) -> Vec<&'a MovieRecord> {
    let genre = params.genre().map(str::to_lowercase);
    let country = params.country();
    let start = params
        .start_year
        .or(dataset.year_min())
        .unwrap_or(i32::MIN);
    let end = params.end_year.or(dataset.year_max()).unwrap_or(i32::MAX);

    dataset
        .records()
        .iter()
        .filter(|r| (start..=end).contains(&r.year))
        .filter(|r| match &genre {
            Some(g) => r.main_genre().is_some_and(|mg| mg.to_lowercase() == *g),
            None => true,
        })
        .filter(|r| match country {
            Some(c) => r.country() == Some(c),
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            MovieRecord::new("Alien", 1979, "Ridley Scott", 8.5, "Horror", "UK"),
            MovieRecord::new("Gladiator", 2000, "Ridley Scott", 8.5, "Action", "USA"),
            MovieRecord::new("Amelie", 2001, "Jean-Pierre Jeunet", 8.3, "Comedy", "France"),
            MovieRecord::new("Delicatessen", 1991, "Jean-Pierre Jeunet", 7.6, "comedy", "France"),
            MovieRecord::new("Comedy Special", 1995, "Someone", 5.0, "Comedy-Drama", "USA"),
            MovieRecord::new("Nameless", 1990, "Someone", 5.0, "", ""),
        ])
    }

    fn titles(rows: &[&MovieRecord]) -> Vec<String> {
        rows.iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn test_no_params_returns_everything() {
        let dataset = sample();
        let rows = filter(&dataset, &FilterParams::new());
        assert_eq!(rows.len(), dataset.len());
    }

    #[test]
    fn test_genre_is_case_insensitive_exact_match() {
        let dataset = sample();
        let rows = filter(&dataset, &FilterParams::new().with_genre("COMEDY"));
        assert_eq!(titles(&rows), vec!["Amelie", "Delicatessen"]);
    }

    #[test]
    fn test_empty_genre_does_not_filter() {
        let dataset = sample();
        let rows = filter(&dataset, &FilterParams::new().with_genre(""));
        assert_eq!(rows.len(), dataset.len());
    }

    #[test]
    fn test_year_range_is_inclusive() {
        let dataset = sample();
        let params = FilterParams::new().with_start_year(1991).with_end_year(2000);
        let rows = filter(&dataset, &params);
        assert_eq!(titles(&rows), vec!["Gladiator", "Delicatessen", "Comedy Special"]);
    }

    #[test]
    fn test_open_ended_year_defaults_to_dataset_bounds() {
        let dataset = sample();
        let rows = filter(&dataset, &FilterParams::new().with_start_year(2000));
        assert_eq!(titles(&rows), vec!["Gladiator", "Amelie"]);

        let rows = filter(&dataset, &FilterParams::new().with_end_year(1979));
        assert_eq!(titles(&rows), vec!["Alien"]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let dataset = sample();
        let params = FilterParams::new().with_start_year(2001).with_end_year(1979);
        assert!(filter(&dataset, &params).is_empty());
    }

    #[test]
    fn test_country_is_case_sensitive() {
        let dataset = sample();
        let rows = filter(&dataset, &FilterParams::new().with_country("France"));
        assert_eq!(rows.len(), 2);
        assert!(filter(&dataset, &FilterParams::new().with_country("france")).is_empty());
    }

    #[test]
    fn test_rows_are_borrowed_from_dataset() {
        let dataset = sample();
        let rows = filter(&dataset, &FilterParams::new().with_country("UK"));
        assert!(std::ptr::eq(rows[0], &dataset.records()[0]));
    }
}
