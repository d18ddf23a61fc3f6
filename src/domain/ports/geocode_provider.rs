//! Geocode Provider Port
//!
//! Defines the interface for resolving a query to a geocoding result.

use crate::domain::entities::GeocodeResult;
use async_trait::async_trait;

/// Provider of forward and reverse geocoding.
///
/// This is an outbound port that abstracts the geocoding backend.
/// The query is either free text ("Berlin, Germany") or a "lat,lng"
/// coordinate pair; the provider treats both uniformly.
///
/// Returns the normalized best match, or None if the query could not be
/// resolved. Callers cannot distinguish "not found" from a transport
/// failure; both are non-fatal and simply yield no result.
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// Resolve a single query.
    async fn geocode(&self, query: &str) -> Option<GeocodeResult>;
}
