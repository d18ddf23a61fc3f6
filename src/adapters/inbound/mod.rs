mod session;
mod web_server;

pub use session::SessionStore;
pub use web_server::{AppState, WebServer};

// Re-export for external use (e.g., integration tests)
#[allow(unused_imports)]
pub use web_server::{ApiQuery, GeocodeForm, HealthResponse, WebError};
