use crate::core::ranking::Ranker;
use crate::models::{Job, RankedJob};
use crate::services::store::{JobStore, Storage, StoreError, UserStore};
use std::sync::Arc;
use thiserror::Error;

/// Size of a `next_jobs` batch when none is configured
pub const DEFAULT_BATCH_SIZE: usize = 5;

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Loads a user and every job, then hands them to the ranking engine
///
/// Read-only: users and jobs are never modified here.
#[derive(Clone)]
pub struct Recommender {
    store: Arc<dyn Storage>,
    ranker: Arc<Ranker>,
    batch_size: usize,
}

impl Recommender {
    pub fn new(store: Arc<dyn Storage>, ranker: Arc<Ranker>, batch_size: usize) -> Self {
        Self {
            store,
            ranker,
            batch_size,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Every job with its score, best first
    pub async fn ranked(&self, user_id: &str) -> Result<Vec<RankedJob>, RecommendError> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| RecommendError::UserNotFound(user_id.to_string()))?;

        let jobs = self.store.list_jobs().await?;
        let total = jobs.len();

        let ranked = self.ranker.rank(&user, jobs).await;

        tracing::info!(
            "Ranked {} jobs for user {} (top score: {:?})",
            total,
            user_id,
            ranked.first().map(|r| r.score)
        );

        Ok(ranked)
    }

    /// Every job in ranked order, scores stripped
    pub async fn ranked_jobs(&self, user_id: &str) -> Result<Vec<Job>, RecommendError> {
        let ranked = self.ranked(user_id).await?;
        Ok(ranked.into_iter().map(|r| r.job).collect())
    }

    /// The first `batch_size` jobs of [`ranked_jobs`](Self::ranked_jobs)
    pub async fn next_jobs(&self, user_id: &str) -> Result<Vec<Job>, RecommendError> {
        let ranked = self.ranked(user_id).await?;
        Ok(ranked
            .into_iter()
            .take(self.batch_size)
            .map(|r| r.job)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::distance::DistanceTable;
    use crate::models::{Coordinates, Education, JobRole, JobSeekerProfile, ScoringPoints, User, UserKind};
    use crate::services::memory::InMemoryStore;
    use chrono::Utc;

    fn seeker() -> User {
        User {
            id: "seeker".to_string(),
            name: "Seeker".to_string(),
            email: "seeker@example.com".to_string(),
            created_at: Utc::now(),
            kind: UserKind::JobSeeker(JobSeekerProfile {
                education: Some(Education::Master),
                experience_years: Some(1.0),
                location: Some(Coordinates::new(45.5, -73.6)),
                swiped_jobs_id: vec!["j0".to_string()],
            }),
        }
    }

    fn jobs(count: usize) -> Vec<Job> {
        (0..count)
            .map(|i| Job {
                id: format!("j{}", i),
                role: JobRole::QaEngineer,
                pay: (i as f64) * 5_000.0,
                location: Some(if i % 2 == 0 { "near" } else { "far" }.to_string()),
                description: String::new(),
                tags: vec![],
            })
            .collect()
    }

    fn recommender(job_count: usize) -> Recommender {
        let store = Arc::new(InMemoryStore::with_documents(vec![seeker()], jobs(job_count)));
        let lookup = DistanceTable::new().with("near", 1_000.0).with("far", 50_000.0);
        let ranker = Arc::new(Ranker::new(Arc::new(lookup), ScoringPoints::default()));
        Recommender::new(store, ranker, DEFAULT_BATCH_SIZE)
    }

    #[tokio::test]
    async fn test_next_jobs_is_prefix_of_ranked_jobs() {
        let recommender = recommender(9);

        let all = recommender.ranked_jobs("seeker").await.unwrap();
        let next = recommender.next_jobs("seeker").await.unwrap();

        assert_eq!(all.len(), 9);
        assert_eq!(next.len(), 5);
        assert_eq!(next.as_slice(), &all[..5]);
    }

    #[tokio::test]
    async fn test_next_jobs_with_few_jobs() {
        let recommender = recommender(3);
        assert_eq!(recommender.next_jobs("seeker").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let recommender = recommender(3);

        let result = recommender.ranked_jobs("nobody").await;
        assert!(matches!(result, Err(RecommendError::UserNotFound(id)) if id == "nobody"));
    }

    #[tokio::test]
    async fn test_swiped_job_is_not_dropped() {
        let recommender = recommender(4);
        let ranked = recommender.ranked("seeker").await.unwrap();

        assert_eq!(ranked.len(), 4);
        // j0 is near but already swiped: 20 instead of 35
        let swiped = ranked.iter().find(|r| r.job.id == "j0").unwrap();
        assert_eq!(swiped.score, 20);
        assert_eq!(ranked[0].job.id, "j2");
    }
}
