use crate::core::distance::{DistanceError, DistanceLookup};
use crate::models::{Coordinates, TravelMode};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling the mapping provider
#[derive(Debug, Error)]
pub enum MapsError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unable to find the route")]
    RouteNotFound,

    #[error("Invalid response structure")]
    InvalidResponse,
}

impl From<MapsError> for DistanceError {
    fn from(err: MapsError) -> Self {
        match err {
            MapsError::RouteNotFound => DistanceError::Unresolvable("no route".to_string()),
            other => DistanceError::Upstream(other.to_string()),
        }
    }
}

/// Distance-matrix API client
///
/// Answers travel-time queries for the UI and can double as the ranking
/// engine's distance lookup.
pub struct MapsClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl MapsClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, MapsError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    /// Fetch the single origin/destination element of a distance-matrix query
    async fn fetch_element(
        &self,
        origin: Coordinates,
        destination: &str,
        mode: TravelMode,
    ) -> Result<Value, MapsError> {
        let origin = origin.to_string();
        let url = format!(
            "{}/distancematrix/json?origins={}&destinations={}&mode={}&key={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&origin),
            urlencoding::encode(destination),
            mode.as_str(),
            urlencoding::encode(&self.api_key)
        );

        tracing::debug!(
            "Distance matrix request: {} -> {} ({})",
            origin,
            destination,
            mode.as_str()
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(MapsError::ApiError(format!(
                "Distance matrix request failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        // Top-level status covers key and quota problems
        if let Some(status) = json.get("status").and_then(Value::as_str) {
            if status != "OK" {
                let detail = json
                    .get("error_message")
                    .and_then(Value::as_str)
                    .unwrap_or("no details");
                return Err(MapsError::ApiError(format!("{}: {}", status, detail)));
            }
        }

        let element = json
            .pointer("/rows/0/elements/0")
            .ok_or(MapsError::InvalidResponse)?;

        if element.get("status").and_then(Value::as_str) != Some("OK") {
            return Err(MapsError::RouteNotFound);
        }

        Ok(element.clone())
    }

    /// Human-readable travel duration, e.g. "1 hour 5 mins"
    pub async fn travel_time(
        &self,
        origin: Coordinates,
        destination: &str,
        mode: TravelMode,
    ) -> Result<String, MapsError> {
        let element = self.fetch_element(origin, destination, mode).await?;

        element
            .pointer("/duration/text")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(MapsError::InvalidResponse)
    }

    /// Route distance in meters
    pub async fn route_distance(
        &self,
        origin: Coordinates,
        destination: &str,
        mode: TravelMode,
    ) -> Result<f64, MapsError> {
        let element = self.fetch_element(origin, destination, mode).await?;

        element
            .pointer("/distance/value")
            .and_then(Value::as_f64)
            .ok_or(MapsError::InvalidResponse)
    }
}

#[async_trait]
impl DistanceLookup for MapsClient {
    async fn distance_meters(
        &self,
        origin: Coordinates,
        destination: &str,
    ) -> Result<f64, DistanceError> {
        Ok(self
            .route_distance(origin, destination, TravelMode::Driving)
            .await?)
    }
}
