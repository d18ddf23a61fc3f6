mod cached_geocoder;
mod opencage_client;

pub use cached_geocoder::CachedGeocoder;
pub use opencage_client::OpenCageClient;
