//! Movie Atlas
//!
//! Filtering and aggregation engine behind a movie world-map dashboard:
//! per-country average ratings for the heatmap, and per-country director
//! rankings with the top directors' highest-grossing movies.
//!
//! A [`Dataset`] is built once, never mutated, and shared by reference;
//! every query recomputes its result from it.

pub mod dataset;
pub mod error;
pub mod execution;
pub mod query;
pub mod sample;

// Re-export main types
pub use dataset::{Dataset, LoadReport, MovieProjection, MovieRecord};
pub use error::{AtlasError, Result};
pub use execution::{AtlasEngine, CountryDetail, FilterMeta, QueryOptions};
pub use query::{
    filter, rank_directors, summarize, CountryAggregate, CountrySummary, DirectorAggregate,
    DirectorRanking, FilterParams, TopDirectorEntry,
};
