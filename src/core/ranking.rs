use crate::core::distance::{DistanceError, DistanceLookup};
use crate::core::rules::{score_job, RankingCriteria};
use crate::models::{Coordinates, Job, RankedJob, ScoringPoints, User};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);
const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 16;

/// Job ranking engine
///
/// # Pipeline
/// 1. Extract the user's ranking criteria
/// 2. Look up the distance to every job with a location, at most
///    `max_concurrent_lookups` in flight at once
/// 3. Score every job with the additive rules
/// 4. Stable sort by score, highest first
pub struct Ranker {
    lookup: Arc<dyn DistanceLookup>,
    points: ScoringPoints,
    lookup_timeout: Duration,
    max_concurrent_lookups: usize,
}

impl Ranker {
    pub fn new(lookup: Arc<dyn DistanceLookup>, points: ScoringPoints) -> Self {
        Self {
            lookup,
            points,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            max_concurrent_lookups: DEFAULT_MAX_CONCURRENT_LOOKUPS,
        }
    }

    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Cap on lookups in flight for one ranking pass; zero is treated as one
    pub fn with_max_concurrent_lookups(mut self, limit: usize) -> Self {
        self.max_concurrent_lookups = limit.max(1);
        self
    }

    pub fn points(&self) -> &ScoringPoints {
        &self.points
    }

    /// Rank `jobs` for `user`
    ///
    /// Never fails: a distance that cannot be obtained in time simply earns
    /// no distance points.
    pub async fn rank(&self, user: &User, jobs: Vec<Job>) -> Vec<RankedJob> {
        let criteria = RankingCriteria::from_user(user);
        let distances = self.lookup_distances(criteria.location, &jobs).await;

        debug!(
            "Ranking {} jobs for user {} ({} distances resolved)",
            jobs.len(),
            user.id,
            distances.iter().filter(|d| d.is_some()).count()
        );

        rank_with_distances(&criteria, jobs, &distances, &self.points)
    }

    /// One lookup per job, in job order; `None` where no distance applies
    async fn lookup_distances(&self, origin: Option<Coordinates>, jobs: &[Job]) -> Vec<Option<f64>> {
        let Some(origin) = origin else {
            return vec![None; jobs.len()];
        };

        let lookups = jobs.iter().map(|job| async move {
            let destination = job.location()?;
            let lookup = self.lookup.distance_meters(origin, destination);

            match tokio::time::timeout(self.lookup_timeout, lookup).await {
                Ok(Ok(meters)) if meters.is_finite() => Some(meters),
                Ok(Ok(meters)) => {
                    warn!("Ignoring non-finite distance {} for job {}", meters, job.id);
                    None
                }
                Ok(Err(DistanceError::Unresolvable(reason))) => {
                    debug!("No distance for job {}: {}", job.id, reason);
                    None
                }
                Ok(Err(e)) => {
                    warn!("Distance lookup failed for job {}: {}", job.id, e);
                    None
                }
                Err(_) => {
                    warn!(
                        "Distance lookup for job {} timed out after {:?}",
                        job.id, self.lookup_timeout
                    );
                    None
                }
            }
        });

        // buffered keeps results in job order
        stream::iter(lookups)
            .buffered(self.max_concurrent_lookups)
            .collect()
            .await
    }
}

/// Score and order jobs given precomputed distances
///
/// `distances[i]` belongs to `jobs[i]`; missing entries count as unknown.
/// Equal scores keep their input order.
pub fn rank_with_distances(
    criteria: &RankingCriteria<'_>,
    jobs: Vec<Job>,
    distances: &[Option<f64>],
    points: &ScoringPoints,
) -> Vec<RankedJob> {
    let mut ranked: Vec<RankedJob> = jobs
        .into_iter()
        .enumerate()
        .map(|(i, job)| {
            let distance = distances.get(i).copied().flatten();
            let score = score_job(criteria, &job, distance, points);
            RankedJob { job, score }
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    ranked
}
