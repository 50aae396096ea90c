//! # Similarity Job
//!
//! Chains the three grouping steps that turn rating lines into
//! recommendation lists:
//!
//! 1. parse lines, group by user, build each user's history
//! 2. expand histories into directed pair samples, group by pair, score
//! 3. resolve names, group by source movie, collect the final lists
//!
//! Every group boundary goes through the job's `Shuffle`. Map and reduce
//! functions run per record / per key, on the rayon pool unless the job
//! is configured as sequential.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use data_loader::{parse_ratings, MovieCatalog, MovieId, ParsedRatings, UserId};
use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::config::SimilarityThresholds;
use crate::report::JobReport;
use crate::shuffle::LocalShuffle;
use crate::stages::{
    aggregate_user_history, generate_pairs, group_results, NameResolver, ResolvedEntry,
    SimilarityScorer,
};
use crate::traits::Shuffle;
use crate::types::{RecommendationList, SimilarityResult, UserHistory};

/// Result of one run: the output records plus the run's counters
#[derive(Debug, Clone)]
pub struct JobOutput {
    pub recommendations: Vec<RecommendationList>,
    pub report: JobReport,
}

/// The movie-similarity job.
///
/// ## Usage
/// ```ignore
/// let catalog = Arc::new(MovieCatalog::load_from_file(Path::new("u.item"))?);
/// let job = SimilarityJob::new(catalog)
///     .with_thresholds(SimilarityThresholds::default().with_min_support(20));
///
/// let output = job.run(&lines)?;
/// ```
#[derive(Debug, Clone)]
pub struct SimilarityJob<S: Shuffle = LocalShuffle> {
    resolver: NameResolver,
    scorer: SimilarityScorer,
    shuffle: S,
    parallel: bool,
}

impl SimilarityJob<LocalShuffle> {
    /// Create a job resolving names against `catalog`, with default
    /// thresholds and an in-process shuffle.
    pub fn new(catalog: Arc<MovieCatalog>) -> Self {
        Self {
            resolver: NameResolver::new(catalog),
            scorer: SimilarityScorer::default(),
            shuffle: LocalShuffle,
            parallel: true,
        }
    }
}

impl<S: Shuffle> SimilarityJob<S> {
    /// Configure the quality filter (builder pattern)
    pub fn with_thresholds(mut self, thresholds: SimilarityThresholds) -> Self {
        self.scorer = SimilarityScorer::new(thresholds);
        self
    }

    /// Swap the grouping implementation
    pub fn with_shuffle<T: Shuffle>(self, shuffle: T) -> SimilarityJob<T> {
        SimilarityJob {
            resolver: self.resolver,
            scorer: self.scorer,
            shuffle,
            parallel: self.parallel,
        }
    }

    /// Run map/reduce functions on the rayon pool (default: true)
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn thresholds(&self) -> SimilarityThresholds {
        self.scorer.thresholds()
    }

    /// Run the job over raw rating lines.
    pub fn run(&self, lines: &[String]) -> Result<JobOutput> {
        self.run_parsed(parse_ratings(lines, "ratings"))
    }

    /// Run the job over lines that were already parsed (possibly from
    /// several files).
    pub fn run_parsed(&self, parsed: ParsedRatings) -> Result<JobOutput> {
        let start = Instant::now();
        let mut report = JobReport::default();
        info!("Running similarity job with {}", self.shuffle.name());

        let histories = self.user_histories(parsed, &mut report)?;
        let similarities = self.similar_pairs(histories, &mut report)?;
        let recommendations = self.recommendation_lists(similarities, &mut report)?;

        report.log();
        info!("Similarity job took {:?}", start.elapsed());

        Ok(JobOutput {
            recommendations,
            report,
        })
    }

    /// Step 1: ratings grouped by user into histories.
    #[instrument(skip_all)]
    fn user_histories(
        &self,
        parsed: ParsedRatings,
        report: &mut JobReport,
    ) -> Result<Vec<UserHistory>> {
        report.blank_lines = parsed.blank_lines;
        report.malformed_records = parsed.malformed.len();
        report.lines_read = parsed.ratings.len() + parsed.malformed.len() + parsed.blank_lines;

        for error in &parsed.malformed {
            debug!("Dropping malformed rating: {}", error);
        }

        let records: Vec<(UserId, (MovieId, f64))> = parsed
            .ratings
            .into_iter()
            .map(|r| (r.user_id, (r.movie_id, r.rating)))
            .collect();
        debug!("Step 1 mapped {} ratings", records.len());

        let groups = self.shuffle.group_by_key(records)?;
        let histories = self.map_all(groups, |(user_id, ratings)| {
            aggregate_user_history(user_id, ratings)
        });

        report.users = histories.len();
        info!("Built {} user histories", histories.len());
        Ok(histories)
    }

    /// Step 2: directed pair samples grouped by pair, scored and filtered.
    #[instrument(skip_all)]
    fn similar_pairs(
        &self,
        histories: Vec<UserHistory>,
        report: &mut JobReport,
    ) -> Result<Vec<SimilarityResult>> {
        let expanded = self.map_all(histories, |history| generate_pairs(&history));

        let mut samples = Vec::with_capacity(expanded.iter().map(|p| p.samples.len()).sum());
        for pairs in expanded {
            report.self_pairs_skipped += pairs.self_pairs_skipped;
            samples.extend(pairs.samples);
        }
        report.directed_samples = samples.len();
        debug!("Step 2 mapped {} directed samples", samples.len());

        let groups = self.shuffle.group_by_key(samples)?;
        report.movie_pairs = groups.len();

        let scorer = self.scorer;
        let kept: Vec<SimilarityResult> = self
            .map_all(groups, |(pair, samples)| scorer.score(pair, &samples))
            .into_iter()
            .flatten()
            .collect();

        report.pairs_kept = kept.len();
        report.pairs_filtered = report.movie_pairs - kept.len();
        info!(
            "Scored {} movie pairs, {} passed the quality filter",
            report.movie_pairs, report.pairs_kept
        );
        Ok(kept)
    }

    /// Step 3: names resolved, entries grouped by source movie.
    #[instrument(skip_all)]
    fn recommendation_lists(
        &self,
        similarities: Vec<SimilarityResult>,
        report: &mut JobReport,
    ) -> Result<Vec<RecommendationList>> {
        let resolved = self.map_all(similarities, |result| {
            self.resolver.resolve(&result).map_err(|miss| (result.pair, miss))
        });

        let mut records = Vec::with_capacity(resolved.len());
        for outcome in resolved {
            match outcome {
                Ok(ResolvedEntry { source, entry }) => records.push((source, entry)),
                Err((pair, miss)) => {
                    report.lookup_misses += 1;
                    debug!("Dropping pair {}: {}", pair, miss);
                }
            }
        }

        let groups = self.shuffle.group_by_key(records)?;
        let lists = self.map_all(groups, |(movie, entries)| group_results(movie, entries));

        report.source_movies = lists.len();
        info!("Grouped recommendations for {} movies", lists.len());
        Ok(lists)
    }

    fn map_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Send + Sync,
    {
        if self.parallel {
            items.into_par_iter().map(f).collect()
        } else {
            items.into_iter().map(f).collect()
        }
    }
}
