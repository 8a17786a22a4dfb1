//! Engine - entry point for the dashboard's three queries

use crate::dataset::Dataset;
use crate::error::{AtlasError, Result};
use crate::query::{
    filter, rank_directors_with_limits, summarize, CountrySummary, DirectorAggregate,
    FilterParams, TopDirectorEntry, DEFAULT_DIRECTOR_LIMIT, DEFAULT_TOP_MOVIE_LIMIT,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Per-engine query limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Directors listed in a country detail
    pub director_limit: usize,
    /// Movies listed per top director
    pub top_movie_limit: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            director_limit: DEFAULT_DIRECTOR_LIMIT,
            top_movie_limit: DEFAULT_TOP_MOVIE_LIMIT,
        }
    }
}

impl QueryOptions {
    pub fn with_director_limit(mut self, limit: usize) -> Self {
        self.director_limit = limit;
        self
    }

    pub fn with_top_movie_limit(mut self, limit: usize) -> Self {
        self.top_movie_limit = limit;
        self
    }
}

/// Values for the dashboard's genre picker and year slider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterMeta {
    pub genres: Vec<String>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
}

/// Director breakdown for one country, echoing the request parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryDetail {
    pub country: String,
    pub genre: Option<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub directors: Vec<DirectorAggregate>,
    pub top_directors: Vec<TopDirectorEntry>,
}

/// Query engine over one immutable dataset.
///
/// Cloning is cheap and clones share the dataset; every method takes `&self`
/// and builds its own intermediate views, so an engine can serve concurrent
/// callers without locking.
#[derive(Debug, Clone)]
pub struct AtlasEngine {
    dataset: Arc<Dataset>,
    options: QueryOptions,
}

impl AtlasEngine {
    pub fn new(dataset: Dataset) -> Self {
        Self::from_shared(Arc::new(dataset))
    }

    pub fn from_shared(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            options: QueryOptions::default(),
        }
    }

    pub fn with_options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn options(&self) -> QueryOptions {
        self.options
    }

    pub fn filter_meta(&self) -> FilterMeta {
        FilterMeta {
            genres: self.dataset.genres().to_vec(),
            year_min: self.dataset.year_min(),
            year_max: self.dataset.year_max(),
        }
    }

    /// Per-country rating summary for the heatmap.
    ///
    /// Genre and year range narrow the rows; a country in `params`, if any,
    /// narrows them further.
    pub fn country_summary(&self, params: &FilterParams) -> CountrySummary {
        let start = Instant::now();
        let rows = filter(&self.dataset, params);
        let summary = summarize(&rows);
        debug!(
            ?params,
            rows = rows.len(),
            countries = summary.countries.len(),
            elapsed = ?start.elapsed(),
            "country summary"
        );
        summary
    }

    /// Director ranking for the country named in `params`.
    ///
    /// Fails with [`AtlasError::MissingParameter`] when no country is given.
    pub fn country_detail(&self, params: &FilterParams) -> Result<CountryDetail> {
        let country = params
            .country()
            .ok_or(AtlasError::MissingParameter("country"))?;

        let start = Instant::now();
        let rows = filter(&self.dataset, params);
        let ranking = rank_directors_with_limits(
            &rows,
            self.options.director_limit,
            self.options.top_movie_limit,
        );
        debug!(
            ?params,
            rows = rows.len(),
            directors = ranking.directors.len(),
            top_directors = ranking.top_directors.len(),
            elapsed = ?start.elapsed(),
            "country detail"
        );

        Ok(CountryDetail {
            country: country.to_string(),
            genre: params.genre.clone(),
            start_year: params.start_year,
            end_year: params.end_year,
            directors: ranking.directors,
            top_directors: ranking.top_directors,
        })
    }
}
