//! Dataset store: typed rows, source schema, ingestion and cleaning

mod csv;
mod record;
pub mod schema;
mod store;

pub use csv::read_csv_batches;
pub use record::{MovieProjection, MovieRecord};
pub use store::{Dataset, LoadReport};
