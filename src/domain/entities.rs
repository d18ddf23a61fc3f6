//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of the geopin domain.
//! They have no external dependencies and contain only business logic.

use crate::domain::value_objects::GeocodeMode;
use serde::Serialize;

/// A normalized geocoding outcome.
///
/// Produced exclusively by the geocode provider adapter and never mutated
/// afterwards. An absent result (failed request, empty result set) is
/// represented as `None` at the call site, not as a sentinel value here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodeResult {
    /// Latitude of the first (best) match
    pub latitude: f64,
    /// Longitude of the first (best) match
    pub longitude: f64,
    /// Human-readable label for the match, as returned by the provider
    pub formatted_address: String,
    /// Wall-clock time the provider round trip took, in seconds
    /// (three-decimal precision)
    pub elapsed_seconds: f64,
}

impl GeocodeResult {
    pub fn new(
        latitude: f64,
        longitude: f64,
        formatted_address: String,
        elapsed_seconds: f64,
    ) -> Self {
        Self {
            latitude,
            longitude,
            formatted_address,
            elapsed_seconds,
        }
    }
}

/// Per-visitor interaction state.
///
/// Exactly one `SessionState` exists per active browser session. It is
/// created with defaults on the first request, mutated only by the web
/// handlers, and reclaimed by the session store once the visitor goes idle.
///
/// `last_result` always holds the most recent *successful* query outcome;
/// a failed query leaves it untouched so the page keeps showing the
/// previous result alongside a warning.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Most recent successful geocoding result, if any
    pub last_result: Option<GeocodeResult>,
    /// Mode the visitor last used (persists across mode switches)
    pub mode: GeocodeMode,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}
