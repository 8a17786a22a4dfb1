//! CSV ingestion into Arrow batches

use super::schema::text_schema;
use super::store::Dataset;
use crate::error::Result;
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use std::fs::File;
use std::io::Seek;
use std::path::Path;
use tracing::debug;

const BATCH_SIZE: usize = 8192;

/// Read a CSV file with a header row. Every column is read as nullable text;
/// numeric coercion happens when the dataset is built.
pub fn read_csv_batches(path: impl AsRef<Path>) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let path = path.as_ref();
    let mut file = File::open(path)?;

    let format = Format::default().with_header(true);
    let (inferred, _) = format.infer_schema(&mut file, Some(0))?;
    file.rewind()?;

    let schema = text_schema(inferred.fields().iter().map(|f| f.name().as_str()));
    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_batch_size(BATCH_SIZE)
        .build(file)?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    debug!(
        path = %path.display(),
        columns = schema.fields().len(),
        batches = batches.len(),
        "read csv"
    );
    Ok((schema, batches))
}

impl Dataset {
    /// Load and clean a movie table from a CSV file
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let (schema, batches) = read_csv_batches(path)?;
        Self::try_from_batches(&schema, &batches)
    }
}
