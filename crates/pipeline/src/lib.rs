//! Item-to-item similarity pipeline over user ratings.
//!
//! This crate provides:
//! - The stages of the job: user histories, pair generation, cosine
//!   scoring with a quality filter, name resolution, result grouping
//! - The `Shuffle` trait for the group-by-key boundaries between steps,
//!   with an in-memory `LocalShuffle`
//! - `SimilarityJob`, which chains the three grouping steps and reports
//!   what it dropped along the way
//!
//! ## Architecture
//! Each arrow is a group-by-key boundary:
//! 1. ratings -> (by user) -> `UserHistory`
//! 2. histories -> directed pair samples -> (by movie pair) -> `SimilarityResult`
//! 3. results -> resolved names -> (by source movie) -> `RecommendationList`
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{SimilarityJob, SimilarityThresholds};
//!
//! let job = SimilarityJob::new(catalog.clone())
//!     .with_thresholds(SimilarityThresholds::default());
//!
//! let output = job.run(&lines)?;
//! for list in &output.recommendations {
//!     println!("{}: {} similar movies", list.movie, list.similar.len());
//! }
//! ```

pub mod config;
pub mod error;
pub mod job;
pub mod report;
pub mod shuffle;
pub mod stages;
pub mod traits;
pub mod types;

// Re-export main types
pub use config::SimilarityThresholds;
pub use error::LookupMiss;
pub use job::{JobOutput, SimilarityJob};
pub use report::JobReport;
pub use shuffle::LocalShuffle;
pub use traits::Shuffle;
pub use types::{
    MoviePairKey, RatingPairSample, RecommendationEntry, RecommendationList, SimilarityResult,
    UserHistory,
};
