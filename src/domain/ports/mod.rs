mod geocode_provider;

pub use geocode_provider::GeocodeProvider;
