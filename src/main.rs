//! Movie Atlas CLI

mod cli;

use clap::{Args, Parser, Subcommand};
use cli::{OutputFormat, OutputFormatter};
use movie_atlas::dataset::Dataset;
use movie_atlas::execution::{AtlasEngine, QueryOptions};
use movie_atlas::query::{FilterParams, DEFAULT_DIRECTOR_LIMIT, DEFAULT_TOP_MOVIE_LIMIT};
use movie_atlas::sample::MovieGenerator;
use movie_atlas::{AtlasError, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "movie_atlas")]
#[command(about = "Filter and aggregate a movie table by country and director")]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct FilterArgs {
    /// Main genre, case-insensitive exact match
    #[arg(short, long)]
    genre: Option<String>,

    /// First year to include (defaults to the earliest year in the data)
    #[arg(long)]
    start_year: Option<i32>,

    /// Last year to include (defaults to the latest year in the data)
    #[arg(long)]
    end_year: Option<i32>,
}

impl FilterArgs {
    fn params(&self) -> FilterParams {
        FilterParams {
            genre: self.genre.clone(),
            start_year: self.start_year,
            end_year: self.end_year,
            country: None,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the genres and year range available for filtering
    Filters {
        /// Path to the movie CSV file
        #[arg(short, long)]
        data: PathBuf,
    },

    /// Average rating, movie count and director count per country
    Summary {
        /// Path to the movie CSV file
        #[arg(short, long)]
        data: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Director ranking and top directors for one country
    Detail {
        /// Path to the movie CSV file
        #[arg(short, long)]
        data: PathBuf,

        /// Country name as spelled in the data (required)
        #[arg(short, long)]
        country: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,

        /// Number of directors to list
        #[arg(long, default_value_t = DEFAULT_DIRECTOR_LIMIT)]
        director_limit: usize,

        /// Number of movies listed per top director
        #[arg(long, default_value_t = DEFAULT_TOP_MOVIE_LIMIT)]
        top_movies: usize,
    },

    /// Write a synthetic movie CSV file
    Generate {
        /// Number of rows
        #[arg(short, long, default_value = "1000")]
        rows: usize,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Run the summary and every country detail query in parallel
    Benchmark {
        /// Path to the movie CSV file (synthetic data when omitted)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Rows of synthetic data
        #[arg(short, long, default_value = "100000")]
        rows: usize,

        /// Number of iterations
        #[arg(short, long, default_value = "1")]
        iterations: usize,
    },
}

fn main() {
    // Set up logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        let code = if e.is_bad_request() { 2 } else { 1 };
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let formatter = OutputFormatter::new(cli.format);

    match cli.command {
        Commands::Filters { data } => {
            let engine = load_engine(&data)?;
            formatter.print(&engine.filter_meta())
        }

        Commands::Summary { data, filter } => {
            let engine = load_engine(&data)?;
            formatter.print(&engine.country_summary(&filter.params()))
        }

        Commands::Detail {
            data,
            country,
            filter,
            director_limit,
            top_movies,
        } => {
            // Reject before paying for the load
            let country = country
                .filter(|c| !c.is_empty())
                .ok_or(AtlasError::MissingParameter("country"))?;

            let options = QueryOptions::default()
                .with_director_limit(director_limit)
                .with_top_movie_limit(top_movies);
            let engine = load_engine(&data)?.with_options(options);

            let mut params = filter.params();
            params.country = Some(country);
            formatter.print(&engine.country_detail(&params)?)
        }

        Commands::Generate { rows, output, seed } => {
            let start = Instant::now();
            MovieGenerator::with_seed(rows, seed).write_csv(&output)?;
            println!(
                "Generated {} rows in {:?} -> {}",
                rows,
                start.elapsed(),
                output.display()
            );
            Ok(())
        }

        Commands::Benchmark {
            data,
            rows,
            iterations,
        } => benchmark(data.as_deref(), rows, iterations),
    }
}

fn load_engine(path: &Path) -> Result<AtlasEngine> {
    let dataset = Dataset::from_csv_path(path)?;
    Ok(AtlasEngine::new(dataset))
}

fn benchmark(data: Option<&Path>, rows: usize, iterations: usize) -> Result<()> {
    let start = Instant::now();
    let dataset = match data {
        Some(path) => Dataset::from_csv_path(path)?,
        None => {
            let batch = MovieGenerator::new(rows).generate()?;
            let schema = batch.schema();
            Dataset::try_from_batches(&schema, &[batch])?
        }
    };
    let engine = AtlasEngine::new(dataset);
    let countries = engine.dataset().countries();

    println!(
        "Loaded {} movies across {} countries in {:?}",
        engine.dataset().len(),
        countries.len(),
        start.elapsed()
    );
    println!("Running with {} threads\n", rayon::current_num_threads());

    let mut total_time = Duration::ZERO;

    for iter in 0..iterations.max(1) {
        if iterations > 1 {
            println!("=== Iteration {} ===", iter + 1);
        }

        let summary_start = Instant::now();
        let summary = engine.country_summary(&FilterParams::new());
        let summary_time = summary_start.elapsed();

        let detail_start = Instant::now();
        let details = countries
            .par_iter()
            .map(|country| engine.country_detail(&FilterParams::new().with_country(country)))
            .collect::<Result<Vec<_>>>()?;
        let detail_time = detail_start.elapsed();

        let top_directors: usize = details.iter().map(|d| d.top_directors.len()).sum();
        println!(
            "summary: {:>4} countries in {:>8.3}ms",
            summary.countries.len(),
            summary_time.as_secs_f64() * 1000.0
        );
        println!(
            "detail:  {:>4} countries in {:>8.3}ms ({} top directors)",
            details.len(),
            detail_time.as_secs_f64() * 1000.0,
            top_directors
        );

        total_time += summary_time + detail_time;
    }

    println!("\n=== Summary ===");
    println!("Total query time: {:?}", total_time);
    println!(
        "Average iteration: {:?}",
        average_iteration(total_time, iterations)
    );
    Ok(())
}

fn average_iteration(total: Duration, iterations: usize) -> Duration {
    total.div_f64(iterations.max(1) as f64)
}
