//! Output formatting for query results
//!
//! Supports two output formats:
//! - Table: one pretty-printed ASCII table per result section (default)
//! - JSON: the result serialized as a single pretty JSON document

use arrow::array::{ArrayRef, Float64Array, Int32Array, StringArray, UInt64Array};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use movie_atlas::execution::{CountryDetail, FilterMeta};
use movie_atlas::query::CountrySummary;
use movie_atlas::Result;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Arc;

/// Output format for query results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed ASCII tables
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// A query result that can be shown as titled tables
pub trait Tabular: Serialize {
    fn sections(&self) -> Result<Vec<(String, RecordBatch)>>;
}

/// Formatter for outputting query results
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format a result and write to stdout
    pub fn print<T: Tabular>(&self, result: &T) -> Result<()> {
        let mut stdout = io::stdout().lock();
        self.write(&mut stdout, result)
    }

    pub fn write<W: Write, T: Tabular>(&self, writer: &mut W, result: &T) -> Result<()> {
        match self.format {
            OutputFormat::Table => {
                for (title, batch) in result.sections()? {
                    writeln!(writer, "{title}")?;
                    if batch.num_rows() == 0 {
                        writeln!(writer, "(no rows)")?;
                    } else {
                        let table = arrow::util::pretty::pretty_format_batches(&[batch])?;
                        writeln!(writer, "{table}")?;
                    }
                    writeln!(writer)?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *writer, result)?;
                writeln!(writer)?;
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn format_to_string<T: Tabular>(&self, result: &T) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(&mut buffer, result)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl Tabular for FilterMeta {
    fn sections(&self) -> Result<Vec<(String, RecordBatch)>> {
        let range = batch(vec![
            ("year_min", Arc::new(Int32Array::from(vec![self.year_min])) as ArrayRef),
            ("year_max", Arc::new(Int32Array::from(vec![self.year_max])) as ArrayRef),
        ])?;
        let genres = batch(vec![(
            "genre",
            Arc::new(StringArray::from_iter_values(&self.genres)) as ArrayRef,
        )])?;
        Ok(vec![
            ("Years".to_string(), range),
            (format!("Genres ({})", self.genres.len()), genres),
        ])
    }
}

impl Tabular for CountrySummary {
    fn sections(&self) -> Result<Vec<(String, RecordBatch)>> {
        let countries = &self.countries;
        let table = batch(vec![
            (
                "country",
                Arc::new(StringArray::from_iter_values(
                    countries.iter().map(|c| &c.country),
                )) as ArrayRef,
            ),
            (
                "avg_rating",
                Arc::new(Float64Array::from_iter_values(
                    countries.iter().map(|c| c.average_rating),
                )) as ArrayRef,
            ),
            (
                "movie_count",
                Arc::new(UInt64Array::from_iter_values(
                    countries.iter().map(|c| c.movie_count as u64),
                )) as ArrayRef,
            ),
            (
                "director_count",
                Arc::new(UInt64Array::from_iter_values(
                    countries.iter().map(|c| c.director_count as u64),
                )) as ArrayRef,
            ),
        ])?;
        let title = match (self.min_avg_rating, self.max_avg_rating) {
            (Some(min), Some(max)) => format!("Countries (avg rating {min:.2} - {max:.2})"),
            _ => "Countries".to_string(),
        };
        Ok(vec![(title, table)])
    }
}

impl Tabular for CountryDetail {
    fn sections(&self) -> Result<Vec<(String, RecordBatch)>> {
        let directors = batch(vec![
            (
                "director",
                Arc::new(StringArray::from_iter_values(
                    self.directors.iter().map(|d| &d.director),
                )) as ArrayRef,
            ),
            (
                "movie_count",
                Arc::new(UInt64Array::from_iter_values(
                    self.directors.iter().map(|d| d.movie_count as u64),
                )) as ArrayRef,
            ),
            (
                "total_gross",
                Arc::new(Float64Array::from_iter_values(
                    self.directors.iter().map(|d| d.total_gross),
                )) as ArrayRef,
            ),
        ])?;

        let mut sections = vec![(format!("Directors in {}", self.country), directors)];

        for top in &self.top_directors {
            let movies = batch(vec![
                (
                    "title",
                    Arc::new(StringArray::from_iter_values(
                        top.movies.iter().map(|m| &m.title),
                    )) as ArrayRef,
                ),
                (
                    "total_gross",
                    Arc::new(Float64Array::from(
                        top.movies.iter().map(|m| m.total_gross).collect::<Vec<_>>(),
                    )) as ArrayRef,
                ),
                (
                    "total_budget",
                    Arc::new(Float64Array::from(
                        top.movies.iter().map(|m| m.total_budget).collect::<Vec<_>>(),
                    )) as ArrayRef,
                ),
                (
                    "rating",
                    Arc::new(Float64Array::from_iter_values(
                        top.movies.iter().map(|m| m.rating),
                    )) as ArrayRef,
                ),
            ])?;
            sections.push((
                format!("Top director: {} ({} movies)", top.director, top.movie_count),
                movies,
            ));
        }

        Ok(sections)
    }
}

/// Build a batch of nullable columns from named arrays
fn batch(columns: Vec<(&str, ArrayRef)>) -> Result<RecordBatch> {
    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
        .collect();
    let arrays: Vec<ArrayRef> = columns.into_iter().map(|(_, array)| array).collect();
    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_atlas::dataset::{Dataset, MovieRecord};
    use movie_atlas::execution::AtlasEngine;
    use movie_atlas::query::FilterParams;

    fn create_test_engine() -> AtlasEngine {
        AtlasEngine::new(Dataset::from_records(vec![
            MovieRecord::new("Alien", 1979, "Ridley Scott", 8.5, "Horror", "UK")
                .with_gross(80_900_000.0),
            MovieRecord::new("Legend", 1985, "Ridley Scott", 6.5, "Fantasy", "UK"),
            MovieRecord::new("Brazil", 1985, "Terry Gilliam", 7.9, "Comedy", "UK"),
            MovieRecord::new("Amelie", 2001, "Jean-Pierre Jeunet", 8.3, "Comedy", "France"),
        ]))
    }

    #[test]
    fn test_summary_table_output() {
        let summary = create_test_engine().country_summary(&FilterParams::new());
        let output = OutputFormatter::new(OutputFormat::Table)
            .format_to_string(&summary)
            .unwrap();

        assert!(output.contains("Countries (avg rating 7.63 - 8.30)"));
        assert!(output.contains("+"));
        assert!(output.contains("avg_rating"));
        assert!(output.contains("France"));
    }

    #[test]
    fn test_summary_json_output() {
        let summary = create_test_engine().country_summary(&FilterParams::new());
        let output = OutputFormatter::new(OutputFormat::Json)
            .format_to_string(&summary)
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["max_avg_rating"], 8.3);
        assert_eq!(value["countries"][0]["country"], "France");
        assert_eq!(value["countries"][1]["average_rating"], 7.63);
        let min = value["min_avg_rating"].as_f64().unwrap();
        assert!((min - 22.9 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_summary_json_has_nulls() {
        let summary = CountrySummary::empty();
        let output = OutputFormatter::new(OutputFormat::Json)
            .format_to_string(&summary)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value["min_avg_rating"].is_null());
        assert!(value["max_avg_rating"].is_null());
        assert_eq!(value["countries"], serde_json::json!([]));
    }

    #[test]
    fn test_detail_table_lists_top_director_movies() {
        let detail = create_test_engine()
            .country_detail(&FilterParams::new().with_country("UK"))
            .unwrap();
        let output = OutputFormatter::new(OutputFormat::Table)
            .format_to_string(&detail)
            .unwrap();

        assert!(output.contains("Directors in UK"));
        assert!(output.contains("Top director: Ridley Scott (2 movies)"));
        assert!(output.contains("Alien"));
        assert!(output.contains("Legend"));
    }

    #[test]
    fn test_detail_json_keeps_missing_gross_null() {
        let detail = create_test_engine()
            .country_detail(&FilterParams::new().with_country("UK"))
            .unwrap();
        let output = OutputFormatter::new(OutputFormat::Json)
            .format_to_string(&detail)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        let movies = &value["top_directors"][0]["movies"];
        assert_eq!(movies[0]["title"], "Alien");
        assert!(movies[1]["total_gross"].is_null());
        assert!(value["genre"].is_null());
    }

    #[test]
    fn test_empty_section_is_marked() {
        let detail = create_test_engine()
            .country_detail(&FilterParams::new().with_country("Peru"))
            .unwrap();
        let output = OutputFormatter::new(OutputFormat::Table)
            .format_to_string(&detail)
            .unwrap();
        assert!(output.contains("(no rows)"));
    }

    #[test]
    fn test_filter_meta_table() {
        let meta = create_test_engine().filter_meta();
        let output = OutputFormatter::new(OutputFormat::Table)
            .format_to_string(&meta)
            .unwrap();
        assert!(output.contains("Genres (3)"));
        assert!(output.contains("1979"));
        assert!(output.contains("Fantasy"));
    }
}
