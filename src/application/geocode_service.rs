//! Geocode Service - Main application use case
//!
//! Orchestrates a single user-triggered geocoding action: validating the
//! input for the active mode, shaping the provider query, and classifying
//! the outcome. This is the primary interface for the inbound adapter.

use crate::domain::entities::GeocodeResult;
use crate::domain::ports::GeocodeProvider;
use std::sync::Arc;

/// Outcome of one geocoding action.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
    /// The provider returned a result; it becomes the session's latest
    Found(GeocodeResult),
    /// The provider had nothing for this query (or the request failed);
    /// the previously displayed result stays in place
    NotFound,
    /// Forward input was empty after trimming; no request was issued
    EmptyQuery,
}

/// Geocode service - main application use case.
///
/// The service is handed the *cached* provider so repeated identical
/// queries within the cache TTL never pay a second network round trip.
pub struct GeocodeService {
    geocoder: Arc<dyn GeocodeProvider>,
}

impl GeocodeService {
    /// Create a new geocode service.
    pub fn new(geocoder: Arc<dyn GeocodeProvider>) -> Self {
        Self { geocoder }
    }

    /// Forward geocoding: free-text address to coordinates.
    ///
    /// The address is trimmed before dispatch; a blank address is rejected
    /// without touching the provider.
    pub async fn forward(&self, address: &str) -> GeocodeOutcome {
        let query = address.trim();
        if query.is_empty() {
            tracing::debug!("rejected empty forward query");
            return GeocodeOutcome::EmptyQuery;
        }

        self.dispatch(query).await
    }

    /// Reverse geocoding: coordinate pair to address.
    ///
    /// The pair is submitted to the provider as "{lat},{lng}".
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> GeocodeOutcome {
        let query = format!("{},{}", latitude, longitude);
        self.dispatch(&query).await
    }

    async fn dispatch(&self, query: &str) -> GeocodeOutcome {
        match self.geocoder.geocode(query).await {
            Some(result) => {
                tracing::debug!(
                    "resolved {:?} -> ({}, {}) in {}s",
                    query,
                    result.latitude,
                    result.longitude,
                    result.elapsed_seconds
                );
                GeocodeOutcome::Found(result)
            }
            None => {
                tracing::debug!("no result for {:?}", query);
                GeocodeOutcome::NotFound
            }
        }
    }
}
