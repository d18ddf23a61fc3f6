//! OpenCage Geocode Client
//!
//! Implements GeocodeProvider against the OpenCage Data HTTP API.
//!
//! See: https://opencagedata.com/api

use crate::domain::entities::GeocodeResult;
use crate::domain::ports::GeocodeProvider;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Instant;

/// Response envelope from the OpenCage geocoding endpoint.
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<ProviderResult>,
}

#[derive(Debug, Deserialize)]
struct ProviderResult {
    geometry: Geometry,
    formatted: String,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    lat: f64,
    lng: f64,
}

/// OpenCage-backed geocode provider.
///
/// Issues exactly one GET per call, asking for a single result with
/// annotations disabled, and measures the wall-clock round trip. Any
/// failure (transport error, non-200 status, undecodable body, empty
/// result list) collapses into None; there is no retry.
pub struct OpenCageClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl OpenCageClient {
    /// Create a new client against the given endpoint.
    ///
    /// The endpoint is configurable so tests can point at a stub server.
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }

    async fn fetch(&self, query: &str) -> Option<GeocodeResult> {
        let started = Instant::now();

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("key", self.api_key.as_str()),
                ("limit", "1"),
                ("no_annotations", "1"),
            ])
            .send()
            .await
            .ok()?;

        // Three-decimal precision, measured once the response headers are in.
        let elapsed = (started.elapsed().as_secs_f64() * 1000.0).round() / 1000.0;

        if response.status() != reqwest::StatusCode::OK {
            tracing::warn!("geocode request failed with status {}", response.status());
            return None;
        }

        let body: GeocodeResponse = response.json().await.ok()?;
        let first = body.results.into_iter().next()?;

        Some(GeocodeResult::new(
            first.geometry.lat,
            first.geometry.lng,
            first.formatted,
            elapsed,
        ))
    }
}

#[async_trait]
impl GeocodeProvider for OpenCageClient {
    async fn geocode(&self, query: &str) -> Option<GeocodeResult> {
        self.fetch(query).await
    }
}
