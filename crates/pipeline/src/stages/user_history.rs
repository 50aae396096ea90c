//! Step 1 reducer: collect a user's ratings into one history.

use crate::types::UserHistory;
use data_loader::{MovieId, UserId};

/// Build the history for one user from every `(movie, rating)` grouped
/// under that user.
///
/// Nothing is filtered or deduplicated; the order of `ratings` is kept.
pub fn aggregate_user_history(user_id: UserId, ratings: Vec<(MovieId, f64)>) -> UserHistory {
    UserHistory { user_id, ratings }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_every_rating() {
        let history = aggregate_user_history(
            "u1".to_string(),
            vec![(1, 5.0), (2, 3.0), (1, 4.0)],
        );

        assert_eq!(history.user_id, "u1");
        assert_eq!(history.ratings, vec![(1, 5.0), (2, 3.0), (1, 4.0)]);
    }
}
