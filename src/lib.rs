//! geopin Library
//!
//! This module exposes the geopin components for use in integration tests
//! and as a library.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use adapters::inbound::{AppState, SessionStore, WebServer};
pub use adapters::outbound::{CachedGeocoder, OpenCageClient};
pub use application::{GeocodeOutcome, GeocodeService};
pub use config::load_config;
pub use domain::basemap::{BasemapCatalog, BasemapDefinition, BasemapLayers, TileLayerSpec};
pub use domain::entities::{GeocodeResult, SessionState};
pub use domain::ports::GeocodeProvider;
pub use domain::services::{MapComposer, MapView};
pub use domain::value_objects::{GeocodeMode, MarkerColor};
