//! Synthetic movie table generator

use crate::dataset::schema::raw_movie_schema;
use crate::error::Result;
use arrow::array::StringBuilder;
use arrow::csv::WriterBuilder;
use arrow::record_batch::RecordBatch;
use rand::prelude::*;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

const COUNTRIES: [&str; 12] = [
    "USA", "UK", "France", "Germany", "Italy", "Spain", "Japan", "South Korea", "India",
    "Brazil", "Mexico", "Canada",
];

const GENRES: [&str; 8] = [
    "Action", "Comedy", "Drama", "Horror", "Thriller", "Animation", "Romance", "Sci-Fi",
];

const FIRST_NAMES: [&str; 10] = [
    "Ana", "Bruno", "Chen", "Dario", "Elif", "Farah", "Goran", "Hiro", "Ines", "Jonas",
];

const LAST_NAMES: [&str; 8] = [
    "Almeida", "Berger", "Costa", "Duval", "Eriksen", "Fujita", "Garcia", "Hughes",
];

/// Directors are drawn per country from a pool of this size
const DIRECTORS_PER_COUNTRY: usize = 20;

/// Generates movie rows in the raw text schema, including the blemishes a
/// real export has: blank gross/budget cells and a few unusable years and
/// ratings.
pub struct MovieGenerator {
    rows: usize,
    rng: StdRng,
}

impl MovieGenerator {
    pub fn new(rows: usize) -> Self {
        Self::with_seed(rows, 42)
    }

    pub fn with_seed(rows: usize, seed: u64) -> Self {
        Self {
            rows,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn generate(&mut self) -> Result<RecordBatch> {
        let mut title = StringBuilder::new();
        let mut year = StringBuilder::new();
        let mut director = StringBuilder::new();
        let mut rating = StringBuilder::new();
        let mut genre = StringBuilder::new();
        let mut country = StringBuilder::new();
        let mut gross = StringBuilder::new();
        let mut budget = StringBuilder::new();

        for i in 0..self.rows {
            let country_idx = self.rng.gen_range(0..COUNTRIES.len());
            let director_idx = self.rng.gen_range(0..DIRECTORS_PER_COUNTRY);

            title.append_value(format!("Movie {}", i + 1));
            director.append_value(director_name(country_idx, director_idx));
            genre.append_value(GENRES[self.rng.gen_range(0..GENRES.len())]);
            country.append_value(COUNTRIES[country_idx]);

            if self.rng.gen_bool(0.01) {
                year.append_value("unknown");
            } else {
                year.append_value(self.rng.gen_range(1960..=2023).to_string());
            }

            if self.rng.gen_bool(0.01) {
                rating.append_null();
            } else {
                let r: f64 = self.rng.gen_range(1.0..10.0);
                rating.append_value(format!("{r:.1}"));
            }

            let budget_value: f64 = self.rng.gen_range(1.0e5..2.0e8);
            if self.rng.gen_bool(0.2) {
                gross.append_null();
            } else {
                let multiple: f64 = self.rng.gen_range(0.1..5.0);
                gross.append_value(format!("{:.0}", budget_value * multiple));
            }
            if self.rng.gen_bool(0.3) {
                budget.append_null();
            } else {
                budget.append_value(format!("{budget_value:.0}"));
            }
        }

        let batch = RecordBatch::try_new(
            raw_movie_schema(),
            vec![
                Arc::new(title.finish()),
                Arc::new(year.finish()),
                Arc::new(director.finish()),
                Arc::new(rating.finish()),
                Arc::new(genre.finish()),
                Arc::new(country.finish()),
                Arc::new(gross.finish()),
                Arc::new(budget.finish()),
            ],
        )?;
        Ok(batch)
    }

    /// Generate the table and write it as CSV with a header row
    pub fn write_csv(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let batch = self.generate()?;
        let file = File::create(path)?;
        let mut writer = WriterBuilder::new().with_header(true).build(file);
        writer.write(&batch)?;

        info!(rows = batch.num_rows(), path = %path.display(), "wrote sample movies");
        Ok(())
    }
}

fn director_name(country_idx: usize, director_idx: usize) -> String {
    let n = country_idx * DIRECTORS_PER_COUNTRY + director_idx;
    let first = FIRST_NAMES[n % FIRST_NAMES.len()];
    let last = LAST_NAMES[(n / FIRST_NAMES.len()) % LAST_NAMES.len()];
    // Pools repeat every 80 names; the suffix keeps directors distinct
    let generation = n / (FIRST_NAMES.len() * LAST_NAMES.len()) + 1;
    format!("{first} {last} {generation}")
}
