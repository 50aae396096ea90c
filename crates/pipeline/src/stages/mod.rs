//! The reduction stages of the similarity job, in pipeline order.
//!
//! Each stage is a pure function of one key's values. None of them keeps
//! state between keys, so the job is free to evaluate keys in parallel.

pub mod user_history;
pub mod pairs;
pub mod similarity;
pub mod resolver;
pub mod grouper;

// Re-export for convenience
pub use grouper::group_results;
pub use pairs::{generate_pairs, PairSamples};
pub use resolver::{NameResolver, ResolvedEntry};
pub use similarity::{cosine_similarity, SimilarityScorer};
pub use user_history::aggregate_user_history;
