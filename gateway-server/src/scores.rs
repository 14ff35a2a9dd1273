use moka::future::Cache as MokaCache;

/// Per-user analytics scores.
///
/// Updates to one subject are atomic, so concurrent increments are never lost.
/// The store has no capacity bound: a score is never evicted once recorded.
#[derive(Clone)]
pub struct ScoreStore {
    scores: MokaCache<String, u64>,
}

impl Default for ScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore {
    pub fn new() -> Self {
        Self {
            scores: MokaCache::builder().build(),
        }
    }

    /// Current score of the subject, zero when it has none yet
    pub async fn get(&self, subject: &str) -> u64 {
        self.scores.get(subject).await.unwrap_or(0)
    }

    /// Increments the subject's score and returns the new value
    pub async fn increment(&self, subject: &str) -> u64 {
        self.scores
            .entry_by_ref(subject)
            .and_upsert_with(|current| async move {
                current.map(|entry| entry.into_value() + 1).unwrap_or(1)
            })
            .await
            .into_value()
    }
}
