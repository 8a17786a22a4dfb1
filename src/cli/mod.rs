//! CLI support for the `movie_atlas` binary
//!
//! Provides:
//! - Output format options (table, JSON)
//! - Table rendering of query results through Arrow's pretty printer

mod output;

pub use output::{OutputFormat, OutputFormatter};
