//! Hirely - job ranking and recommendation service for the Hirely job-swiping app
//!
//! Stores users and jobs, ranks every job for a job seeker with a small set of
//! additive rules, and proxies travel-time and chat-assistant requests.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{haversine_meters, rank_with_distances, Ranker, Recommender};
pub use crate::models::{Coordinates, Job, RankedJob, ScoringPoints, User};
