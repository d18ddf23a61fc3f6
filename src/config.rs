use serde::Deserialize;

/// Fallback API key baked in for out-of-the-box demos; any real deployment
/// sets OPENCAGE_API_KEY.
const DEFAULT_API_KEY: &str = "a3ba867cf14f49019607a169b604a98f";

/// Default OpenCage geocoding endpoint.
const DEFAULT_GEOCODER_URL: &str = "https://api.opencagedata.com/geocode/v1/json";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // Web server settings
    pub listen_addr: String,
    pub debug: bool,

    // Geocoding provider settings
    pub geocoder_url: String,
    pub api_key: String,

    // Result cache settings
    pub cache_ttl_secs: u64,
    pub cache_gc_interval_secs: u64,

    // Session settings
    pub session_ttl_secs: u64,
    pub session_gc_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            debug: false,
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            cache_ttl_secs: 3600,
            cache_gc_interval_secs: 300,
            session_ttl_secs: 1800,
            session_gc_interval_secs: 60,
        }
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    let listen_addr =
        std::env::var("GEOPIN_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let debug = std::env::var("DEBUG").is_ok();

    let geocoder_url =
        std::env::var("GEOPIN_GEOCODER_URL").unwrap_or_else(|_| DEFAULT_GEOCODER_URL.to_string());

    let api_key = std::env::var("OPENCAGE_API_KEY").unwrap_or_else(|_| DEFAULT_API_KEY.to_string());

    let cache_ttl_secs = std::env::var("GEOPIN_CACHE_TTL_SECS")
        .unwrap_or_else(|_| "3600".to_string())
        .parse()
        .unwrap_or(3600);

    let cache_gc_interval_secs = std::env::var("GEOPIN_CACHE_GC_INTERVAL_SECS")
        .unwrap_or_else(|_| "300".to_string())
        .parse()
        .unwrap_or(300);

    let session_ttl_secs = std::env::var("GEOPIN_SESSION_TTL_SECS")
        .unwrap_or_else(|_| "1800".to_string())
        .parse()
        .unwrap_or(1800);

    let session_gc_interval_secs = std::env::var("GEOPIN_SESSION_GC_INTERVAL_SECS")
        .unwrap_or_else(|_| "60".to_string())
        .parse()
        .unwrap_or(60);

    Ok(Config {
        listen_addr,
        debug,
        geocoder_url,
        api_key,
        cache_ttl_secs,
        cache_gc_interval_secs,
        session_ttl_secs,
        session_gc_interval_secs,
    })
}
