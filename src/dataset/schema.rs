//! Source column names and the raw Arrow schema of the movie table

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use std::sync::Arc;

pub const TITLE: &str = "Movie_Title";
pub const YEAR: &str = "Year";
pub const DIRECTOR: &str = "Director";
pub const RATING: &str = "Rating";
pub const MAIN_GENRE: &str = "main_genre";
pub const COUNTRY: &str = "Country";
pub const TOTAL_GROSS: &str = "Total_Gross";
pub const TOTAL_BUDGET: &str = "Total_Budget";

/// Columns that must be present in any source, in source order
pub const REQUIRED_COLUMNS: [&str; 8] = [
    TITLE,
    YEAR,
    DIRECTOR,
    RATING,
    MAIN_GENRE,
    COUNTRY,
    TOTAL_GROSS,
    TOTAL_BUDGET,
];

/// Schema of the raw source: every column is nullable text until coerced
pub fn raw_movie_schema() -> SchemaRef {
    text_schema(REQUIRED_COLUMNS.iter().copied())
}

/// Build an all-`Utf8` nullable schema for the given column names
pub fn text_schema<'a>(names: impl IntoIterator<Item = &'a str>) -> SchemaRef {
    let fields: Vec<Field> = names
        .into_iter()
        .map(|name| Field::new(name, DataType::Utf8, true))
        .collect();
    Arc::new(Schema::new(fields))
}

/// Required columns not present in `schema`
pub fn missing_columns(schema: &Schema) -> Vec<&'static str> {
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| schema.index_of(name).is_err())
        .collect()
}
