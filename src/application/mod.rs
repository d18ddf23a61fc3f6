mod geocode_service;

pub use geocode_service::{GeocodeOutcome, GeocodeService};
