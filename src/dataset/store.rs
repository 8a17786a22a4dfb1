//! Dataset store - the immutable, cleaned movie table and its metadata

use super::record::{non_empty, MovieRecord};
use super::schema::{self, missing_columns};
use crate::error::{AtlasError, Result};
use arrow::array::{Array, ArrayRef, AsArray, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Schema};
use arrow::record_batch::RecordBatch;
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Row accounting from dataset construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
}

/// Cleaned movie table, built once and never mutated.
///
/// Queries borrow it and build their own filtered views, so a single
/// instance can be shared across threads without synchronization.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<MovieRecord>,
    year_bounds: Option<(i32, i32)>,
    genres: Vec<String>,
    report: LoadReport,
}

impl Dataset {
    /// Build from rows that are already typed.
    ///
    /// Rows with a non-finite rating are dropped under the same cleaning
    /// policy used for raw sources.
    pub fn from_records(records: Vec<MovieRecord>) -> Self {
        let rows_read = records.len();
        let records: Vec<MovieRecord> = records
            .into_iter()
            .filter(|r| r.rating.is_finite())
            .collect();
        Self::build(records, rows_read)
    }

    /// Build from raw columnar batches.
    ///
    /// Fails with [`AtlasError::Schema`] when a required column is absent and
    /// with [`AtlasError::Type`] when the source has rows but none of them
    /// survive numeric coercion of `Year` and `Rating`.
    pub fn try_from_batches(schema: &Schema, batches: &[RecordBatch]) -> Result<Self> {
        let missing = missing_columns(schema);
        if !missing.is_empty() {
            return Err(AtlasError::Schema(missing.join(", ")));
        }

        let mut records = Vec::new();
        let mut rows_read = 0usize;
        for batch in batches {
            rows_read += batch.num_rows();
            coerce_batch(batch, &mut records)?;
        }

        if rows_read > 0 && records.is_empty() {
            return Err(AtlasError::Type(format!(
                "none of {} rows have a numeric {} and {}",
                rows_read,
                schema::YEAR,
                schema::RATING
            )));
        }

        Ok(Self::build(records, rows_read))
    }

    fn build(records: Vec<MovieRecord>, rows_read: usize) -> Self {
        let year_bounds = records.iter().fold(None, |bounds, r| match bounds {
            None => Some((r.year, r.year)),
            Some((lo, hi)) => Some((r.year.min(lo), r.year.max(hi))),
        });

        let genres: Vec<String> = records
            .iter()
            .filter_map(|r| r.main_genre.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let report = LoadReport {
            rows_read,
            rows_kept: records.len(),
            rows_dropped: rows_read - records.len(),
        };

        if report.rows_dropped > 0 {
            warn!(
                dropped = report.rows_dropped,
                "dropped rows without a numeric year and rating"
            );
        }
        info!(
            rows = report.rows_kept,
            genres = genres.len(),
            year_min = ?year_bounds.map(|b| b.0),
            year_max = ?year_bounds.map(|b| b.1),
            "dataset loaded"
        );

        Self {
            records,
            year_bounds,
            genres,
            report,
        }
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Smallest year across all kept rows, `None` for an empty dataset
    pub fn year_min(&self) -> Option<i32> {
        self.year_bounds.map(|(lo, _)| lo)
    }

    /// Largest year across all kept rows, `None` for an empty dataset
    pub fn year_max(&self) -> Option<i32> {
        self.year_bounds.map(|(_, hi)| hi)
    }

    /// Distinct main genres, case preserved, sorted ascending
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn report(&self) -> LoadReport {
        self.report
    }

    /// Distinct countries, sorted ascending
    pub fn countries(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|r| r.country.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Cleaning policy: a row is kept only when both `Year` and `Rating` coerce
/// to finite numbers and the year is a whole number in `i32` range. Anything
/// else is dropped silently; the count shows up in [`LoadReport`].
fn coerce_year_and_rating(year: Option<f64>, rating: Option<f64>) -> Option<(i32, f64)> {
    let year = year?;
    let rating = rating?;
    if year.fract() != 0.0 || year < i32::MIN as f64 || year > i32::MAX as f64 {
        return None;
    }
    Some((year as i32, rating))
}

fn coerce_batch(batch: &RecordBatch, out: &mut Vec<MovieRecord>) -> Result<()> {
    let titles = text_column(batch, schema::TITLE)?;
    let directors = text_column(batch, schema::DIRECTOR)?;
    let genres = text_column(batch, schema::MAIN_GENRE)?;
    let countries = text_column(batch, schema::COUNTRY)?;
    let years = numeric_column(batch, schema::YEAR)?;
    let ratings = numeric_column(batch, schema::RATING)?;
    let grosses = numeric_column(batch, schema::TOTAL_GROSS)?;
    let budgets = numeric_column(batch, schema::TOTAL_BUDGET)?;

    let titles = titles.as_string::<i32>();
    let directors = directors.as_string::<i32>();
    let genres = genres.as_string::<i32>();
    let countries = countries.as_string::<i32>();
    let years = years.as_primitive::<Float64Type>();
    let ratings = ratings.as_primitive::<Float64Type>();
    let grosses = grosses.as_primitive::<Float64Type>();
    let budgets = budgets.as_primitive::<Float64Type>();

    for row in 0..batch.num_rows() {
        let Some((year, rating)) =
            coerce_year_and_rating(number_at(years, row), number_at(ratings, row))
        else {
            continue;
        };

        out.push(MovieRecord {
            title: text_at(titles, row).unwrap_or_default(),
            year,
            director: text_at(directors, row),
            rating,
            main_genre: text_at(genres, row),
            country: text_at(countries, row),
            total_gross: number_at(grosses, row),
            total_budget: number_at(budgets, row),
        });
    }

    Ok(())
}

fn column<'a>(batch: &'a RecordBatch, name: &'static str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .ok_or_else(|| AtlasError::Schema(name.to_string()))
}

fn text_column(batch: &RecordBatch, name: &'static str) -> Result<ArrayRef> {
    Ok(cast(column(batch, name)?, &DataType::Utf8)?)
}

/// Safe cast: values that do not parse become null
fn numeric_column(batch: &RecordBatch, name: &'static str) -> Result<ArrayRef> {
    Ok(cast(column(batch, name)?, &DataType::Float64)?)
}

fn text_at(array: &StringArray, row: usize) -> Option<String> {
    if array.is_null(row) {
        return None;
    }
    non_empty(array.value(row).to_string())
}

fn number_at(array: &Float64Array, row: usize) -> Option<f64> {
    if array.is_null(row) {
        return None;
    }
    Some(array.value(row)).filter(|v| v.is_finite())
}
