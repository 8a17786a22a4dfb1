//! Query stages: filter, country summary, director ranking

mod filter;
mod ranking;
mod round;
mod summary;

pub use filter::{filter, FilterParams};
pub use ranking::{
    rank_directors, rank_directors_with_limits, DirectorAggregate, DirectorRanking,
    TopDirectorEntry, DEFAULT_DIRECTOR_LIMIT, DEFAULT_TOP_MOVIE_LIMIT,
};
pub use round::{round_half_up, round_rating, RATING_DECIMALS};
pub use summary::{summarize, CountryAggregate, CountrySummary};
