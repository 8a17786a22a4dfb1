//! Country summary aggregation for the rating heatmap

use super::round::{round_decimal, round_rating, to_decimal, to_f64, RATING_DECIMALS};
use crate::dataset::MovieRecord;
use hashbrown::{HashMap, HashSet};
use rust_decimal::Decimal;
use serde::Serialize;

/// Per-country statistics over the filtered rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryAggregate {
    pub country: String,
    /// Mean rating, rounded to two decimals
    pub average_rating: f64,
    pub movie_count: usize,
    pub director_count: usize,
}

/// Heatmap payload: one aggregate per country plus the color scale bounds.
///
/// An empty input gives `None` bounds and no countries, which is a valid
/// "no data" result rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySummary {
    pub min_avg_rating: Option<f64>,
    pub max_avg_rating: Option<f64>,
    pub countries: Vec<CountryAggregate>,
}

impl CountrySummary {
    pub fn empty() -> Self {
        Self {
            min_avg_rating: None,
            max_avg_rating: None,
            countries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn get(&self, country: &str) -> Option<&CountryAggregate> {
        self.countries.iter().find(|c| c.country == country)
    }
}

struct CountryAccumulator<'a> {
    rating_sum: f64,
    /// Exact sum of the decimal ratings, `None` once it leaves Decimal's range
    exact_sum: Option<Decimal>,
    count: usize,
    directors: HashSet<&'a str>,
}

impl<'a> CountryAccumulator<'a> {
    fn new() -> Self {
        Self {
            rating_sum: 0.0,
            exact_sum: Some(Decimal::ZERO),
            count: 0,
            directors: HashSet::new(),
        }
    }

    fn push(&mut self, rating: f64, director: Option<&'a str>) {
        self.rating_sum += rating;
        self.exact_sum = self
            .exact_sum
            .and_then(|sum| sum.checked_add(to_decimal(rating)?));
        self.count += 1;
        if let Some(director) = director {
            self.directors.insert(director);
        }
    }

    /// Unrounded mean and its display value
    fn mean(&self) -> (f64, f64) {
        let exact = self
            .exact_sum
            .and_then(|sum| sum.checked_div(Decimal::from(self.count)))
            .and_then(|mean| {
                let rounded = round_decimal(mean, RATING_DECIMALS);
                Some((to_f64(mean)?, to_f64(rounded)?))
            });
        exact.unwrap_or_else(|| {
            let mean = self.rating_sum / self.count as f64;
            (mean, round_rating(mean))
        })
    }
}

/// Group rows by country and reduce each group.
///
/// Rows without a country are not grouped. Directors are counted once per
/// country; rows without a director add to the movie count only. Means are
/// taken over the decimal ratings so a midpoint mean rounds up. The scale
/// bounds are the smallest and largest unrounded country means. Countries
/// are returned in ascending name order.
pub fn summarize(rows: &[&MovieRecord]) -> CountrySummary {
    let mut groups: HashMap<&str, CountryAccumulator<'_>> = HashMap::new();

    for row in rows {
        let Some(country) = row.country() else {
            continue;
        };
        groups
            .entry(country)
            .or_insert_with(CountryAccumulator::new)
            .push(row.rating, row.director());
    }

    if groups.is_empty() {
        return CountrySummary::empty();
    }

    let mut means = Vec::with_capacity(groups.len());
    let mut countries: Vec<CountryAggregate> = groups
        .into_iter()
        .map(|(country, acc)| {
            let (mean, average_rating) = acc.mean();
            means.push(mean);
            CountryAggregate {
                country: country.to_string(),
                average_rating,
                movie_count: acc.count,
                director_count: acc.directors.len(),
            }
        })
        .collect();
    countries.sort_by(|a, b| a.country.cmp(&b.country));

    let min_avg_rating = means.iter().copied().min_by(f64::total_cmp);
    let max_avg_rating = means.iter().copied().max_by(f64::total_cmp);

    CountrySummary {
        min_avg_rating,
        max_avg_rating,
        countries,
    }
}
