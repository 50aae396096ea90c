use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::{parser, MovieCatalog, MovieId, ParsedRatings};
use pipeline::config::{DEFAULT_MIN_SCORE, DEFAULT_MIN_SUPPORT};
use pipeline::{JobReport, RecommendationList, SimilarityJob, SimilarityThresholds};
use rand::Rng;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// movie-sims - Item-based movie similarity
#[derive(Parser)]
#[command(name = "movie-sims")]
#[command(
    about = "Find similar movies from user ratings using cosine similarity",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute similar movies from rating files
    Run {
        /// Rating files (`userId movieId rating timestamp` per line).
        /// Reads stdin when empty or `-`.
        inputs: Vec<PathBuf>,

        /// Pipe-delimited movie catalog (e.g. MovieLens u.item)
        #[arg(long)]
        items: PathBuf,

        /// A pair needs strictly more co-raters than this
        #[arg(long, default_value_t = DEFAULT_MIN_SUPPORT)]
        min_support: u32,

        /// A pair needs a cosine score strictly above this
        #[arg(long, default_value_t = DEFAULT_MIN_SCORE)]
        min_score: f64,

        /// Write records here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output record format
        #[arg(long, value_enum, default_value_t = OutputFormat::Line)]
        format: OutputFormat,

        /// Evaluate every step on the current thread
        #[arg(long)]
        sequential: bool,
    },

    /// Run the job on synthetic ratings to test performance
    Benchmark {
        /// Number of synthetic users
        #[arg(long, default_value = "1000")]
        users: usize,

        /// Number of synthetic movies
        #[arg(long, default_value = "300")]
        movies: u32,

        /// Distinct movies rated by each user
        #[arg(long, default_value = "40")]
        ratings_per_user: usize,

        /// Number of timed runs
        #[arg(long, default_value = "3")]
        runs: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// `"movie"<TAB>["name[score][count]", ...]`
    Line,
    /// One JSON object per movie
    Json,
}

fn main() -> Result<()> {
    // Initialize tracing; logs go to stderr so stdout only carries records
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            inputs,
            items,
            min_support,
            min_score,
            output,
            format,
            sequential,
        } => {
            let thresholds = SimilarityThresholds::default()
                .with_min_support(min_support)
                .with_min_score(min_score);
            handle_run(&inputs, &items, thresholds, output.as_deref(), format, sequential)?
        }
        Commands::Benchmark {
            users,
            movies,
            ratings_per_user,
            runs,
        } => handle_benchmark(users, movies, ratings_per_user, runs)?,
    }

    Ok(())
}

/// Handle the 'run' command
fn handle_run(
    inputs: &[PathBuf],
    items: &Path,
    thresholds: SimilarityThresholds,
    output: Option<&Path>,
    format: OutputFormat,
    sequential: bool,
) -> Result<()> {
    // The catalog is built once, before the job starts, and never changes
    let catalog = Arc::new(
        MovieCatalog::load_from_file(items)
            .with_context(|| format!("Failed to load movie catalog from {}", items.display()))?,
    );

    let parsed = read_ratings(inputs)?;

    let job = SimilarityJob::new(catalog)
        .with_thresholds(thresholds)
        .with_parallel(!sequential);
    let result = job.run_parsed(parsed)?;

    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    write_recommendations(BufWriter::new(writer), &result.recommendations, format)?;

    print_report(&result.report);
    Ok(())
}

/// Read and parse every input; no inputs means stdin
fn read_ratings(inputs: &[PathBuf]) -> Result<ParsedRatings> {
    let stdin = [PathBuf::from("-")];
    let inputs = if inputs.is_empty() { &stdin[..] } else { inputs };

    let mut all = ParsedRatings::default();
    for path in inputs {
        let (lines, name) = if path == Path::new("-") {
            let lines = parser::read_lines_latin1_from(io::stdin().lock())
                .context("Failed to read ratings from stdin")?;
            (lines, "stdin".to_string())
        } else {
            let lines = parser::read_lines_latin1(path)
                .with_context(|| format!("Failed to read ratings from {}", path.display()))?;
            (lines, path.display().to_string())
        };
        all.merge(parser::parse_ratings(&lines, &name));
    }
    Ok(all)
}

/// Serialize the final records, one per line
fn write_recommendations<W: Write>(
    mut writer: W,
    recommendations: &[RecommendationList],
    format: OutputFormat,
) -> Result<()> {
    for list in recommendations {
        match format {
            OutputFormat::Line => {
                let entries: Vec<String> = list.similar.iter().map(|e| e.to_string()).collect();
                writeln!(
                    writer,
                    "{}\t{}",
                    serde_json::to_string(&list.movie)?,
                    serde_json::to_string(&entries)?
                )?;
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut writer, list)?;
                writeln!(writer)?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

/// Print the run summary to stderr
fn print_report(report: &JobReport) {
    eprintln!("{}", "Run summary:".bold().blue());
    eprintln!("{}Lines read: {}", "• ".green(), report.lines_read);
    eprintln!("{}Users: {}", "• ".green(), report.users);
    eprintln!("{}Directed samples: {}", "• ".green(), report.directed_samples);
    eprintln!(
        "{}Movie pairs: {} ({} kept, {} filtered)",
        "• ".green(),
        report.movie_pairs,
        report.pairs_kept,
        report.pairs_filtered
    );
    eprintln!("{}Movies with recommendations: {}", "• ".green(), report.source_movies);

    let malformed = format!("{}Malformed records: {}", "• ".cyan(), report.malformed_records);
    let misses = format!("{}Catalog lookup misses: {}", "• ".cyan(), report.lookup_misses);
    if report.has_drops() {
        eprintln!("{}", malformed.yellow());
        eprintln!("{}", misses.yellow());
    } else {
        eprintln!("{}", malformed);
        eprintln!("{}", misses);
    }
    if report.self_pairs_skipped > 0 {
        eprintln!("{}Repeated-movie pairs skipped: {}", "• ".cyan(), report.self_pairs_skipped);
    }
}

/// Handle the 'benchmark' command
fn handle_benchmark(users: usize, movies: u32, ratings_per_user: usize, runs: usize) -> Result<()> {
    let per_user = ratings_per_user.min(movies as usize);
    let catalog: MovieCatalog = (1..=movies)
        .map(|id| (id, format!("Movie {}", id)))
        .collect();

    // Generate `per_user` distinct movies with random ratings for every user
    let mut rng = rand::rng();
    let mut lines = Vec::with_capacity(users * per_user);
    for user in 1..=users {
        for idx in rand::seq::index::sample(&mut rng, movies as usize, per_user) {
            let movie_id = idx as MovieId + 1;
            let rating = rng.random_range(1..=5);
            lines.push(format!("{} {} {} 0", user, movie_id, rating));
        }
    }
    println!(
        "Generated {} ratings ({} users x {} movies each)",
        lines.len(),
        users,
        per_user
    );

    let job = SimilarityJob::new(Arc::new(catalog));
    let mut timings: Vec<Duration> = Vec::with_capacity(runs);
    let mut last_report = None;
    for run in 1..=runs {
        let start = Instant::now();
        let output = job.run(&lines)?;
        let elapsed = start.elapsed();
        println!("Run {}: {:?}", run, elapsed);
        timings.push(elapsed);
        last_report = Some(output.report);
    }

    if timings.is_empty() {
        return Ok(());
    }
    let total: Duration = timings.iter().sum();
    let avg = total / timings.len() as u32;

    println!("{}", "Benchmark results:".bold().blue());
    println!("Average run time: {:?}", avg);
    println!(
        "Throughput: {:.0} ratings/second",
        lines.len() as f64 / avg.as_secs_f64()
    );
    if let Some(report) = last_report {
        print_report(&report);
    }
    Ok(())
}
