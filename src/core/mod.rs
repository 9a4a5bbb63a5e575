// Core algorithm exports
pub mod distance;
pub mod ranking;
pub mod recommend;
pub mod rules;

pub use distance::{haversine_meters, DistanceError, DistanceLookup, DistanceTable, HaversineLookup};
pub use ranking::{rank_with_distances, Ranker};
pub use recommend::{RecommendError, Recommender};
pub use rules::{score_job, RankingCriteria};
