//! Sample data for demos, benchmarks and tests

mod generator;

pub use generator::*;
