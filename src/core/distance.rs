use crate::models::Coordinates;
use async_trait::async_trait;
use geo::{HaversineDistance, Point};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DistanceError {
    #[error("Destination cannot be resolved: {0}")]
    Unresolvable(String),

    #[error("Distance provider failed: {0}")]
    Upstream(String),
}

/// Source of origin-to-destination distances used by the ranking engine
///
/// Destinations are job locations: free-form strings or the `"lat,lng"`
/// encoding. Implementations must not be assumed geographically accurate.
#[async_trait]
pub trait DistanceLookup: Send + Sync {
    async fn distance_meters(
        &self,
        origin: Coordinates,
        destination: &str,
    ) -> Result<f64, DistanceError>;
}

/// Great-circle distance between two points in meters
#[inline]
pub fn haversine_meters(from: Coordinates, to: Coordinates) -> f64 {
    // geo points are (x = longitude, y = latitude)
    Point::new(from.lng, from.lat).haversine_distance(&Point::new(to.lng, to.lat))
}

/// Straight-line lookup for destinations stored as coordinates
///
/// Free-form destinations ("Remote", "San Francisco, CA") are unresolvable
/// and therefore earn no distance points.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineLookup;

#[async_trait]
impl DistanceLookup for HaversineLookup {
    async fn distance_meters(
        &self,
        origin: Coordinates,
        destination: &str,
    ) -> Result<f64, DistanceError> {
        let target: Coordinates = destination
            .parse()
            .map_err(|e| DistanceError::Unresolvable(format!("{}", e)))?;

        Ok(haversine_meters(origin, target))
    }
}

/// Lookup answering from a fixed destination table, regardless of origin
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    distances: HashMap<String, f64>,
}

impl DistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, destination: impl Into<String>, meters: f64) -> Self {
        self.distances.insert(destination.into(), meters);
        self
    }
}

#[async_trait]
impl DistanceLookup for DistanceTable {
    async fn distance_meters(
        &self,
        _origin: Coordinates,
        destination: &str,
    ) -> Result<f64, DistanceError> {
        self.distances
            .get(destination)
            .copied()
            .ok_or_else(|| DistanceError::Unresolvable(destination.to_string()))
    }
}
