//! Web Server
//!
//! HTTP front-end for interactive geocoding: serves the page, handles the
//! geocode form, and exposes a small JSON API plus a health endpoint.

use crate::adapters::inbound::session::SessionStore;
use crate::application::{GeocodeOutcome, GeocodeService};
use crate::domain::basemap::BasemapCatalog;
use crate::domain::entities::{GeocodeResult, SessionState};
use crate::domain::services::MapComposer;
use crate::domain::value_objects::GeocodeMode;
use askama::Template;
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Name of the session cookie.
const SESSION_COOKIE: &str = "sid";

/// Failures while producing a page.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("failed to render page: {0}")]
    Render(#[from] askama::Error),
    #[error("failed to encode map spec: {0}")]
    MapSpec(#[from] serde_json::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Geocode form as submitted by the page.
///
/// Only the active mode's fields are present; a plain mode or basemap
/// switch arrives without the `action` value of the submit button.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeForm {
    pub mode: String,
    pub basemap: String,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
}

/// Query string for the JSON endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiQuery {
    pub q: String,
}

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub active_sessions: usize,
}

/// Web server state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<GeocodeService>,
    pub catalog: Arc<BasemapCatalog>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(
        service: Arc<GeocodeService>,
        catalog: Arc<BasemapCatalog>,
        sessions: SessionStore,
    ) -> Self {
        Self {
            service,
            catalog,
            sessions,
        }
    }
}

/// Web server for the interactive geocoding page.
pub struct WebServer {
    listen_addr: String,
    state: AppState,
}

impl WebServer {
    pub fn new(listen_addr: String, state: AppState) -> Self {
        Self { listen_addr, state }
    }

    /// Build the router; separated out so tests can drive it in-process.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(index_handler))
            .route("/geocode", post(geocode_handler))
            .route("/api/geocode", get(api_geocode_handler))
            .route("/health", get(health_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Run the web server.
    pub async fn run(&self) -> anyhow::Result<()> {
        let app = Self::router(self.state.clone());

        let listener = TcpListener::bind(&self.listen_addr).await?;
        tracing::info!("geopin listening on {}", self.listen_addr);

        axum::serve(listener, app).await?;
        Ok(())
    }
}

// Page template

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    modes: Vec<ModeOption>,
    basemaps: Vec<BasemapOption>,
    forward: bool,
    warning: Option<String>,
    result: Option<GeocodeResult>,
    map_json: Option<String>,
}

struct ModeOption {
    value: &'static str,
    label: &'static str,
    checked: bool,
}

struct BasemapOption {
    name: &'static str,
    selected: bool,
}

fn render_page(
    state: &AppState,
    session: &SessionState,
    basemap: &str,
    warning: Option<String>,
) -> Result<Html<String>, WebError> {
    let modes = [GeocodeMode::Forward, GeocodeMode::Reverse]
        .into_iter()
        .map(|m| ModeOption {
            value: m.as_str(),
            label: m.label(),
            checked: m == session.mode,
        })
        .collect();

    let basemaps = state
        .catalog
        .names()
        .into_iter()
        .map(|name| BasemapOption {
            name,
            selected: name == basemap,
        })
        .collect();

    let map_json = match &session.last_result {
        Some(result) => MapComposer::compose(
            &state.catalog,
            result.latitude,
            result.longitude,
            &result.formatted_address,
            session.mode.marker_color(),
            basemap,
        )
        .map(|view| serde_json::to_string(&view))
        .transpose()?,
        None => None,
    };

    let page = IndexTemplate {
        modes,
        basemaps,
        forward: session.mode == GeocodeMode::Forward,
        warning,
        result: session.last_result.clone(),
        map_json,
    };

    Ok(Html(page.render()?))
}

// Session cookie plumbing

fn session_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            Uuid::parse_str(value).ok()
        } else {
            None
        }
    })
}

/// Resolve the visitor's session id, minting one for first-timers.
fn resolve_session(headers: &HeaderMap) -> (Uuid, bool) {
    match session_from_headers(headers) {
        Some(id) => (id, false),
        None => (Uuid::new_v4(), true),
    }
}

fn with_session_cookie(page: Html<String>, id: Uuid, new_session: bool) -> Response {
    let mut response = page.into_response();
    if new_session {
        let cookie = format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax");
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    response
}

// Handler functions

async fn index_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let (sid, new_session) = resolve_session(&headers);
    let session = state.sessions.load(sid);

    let page = render_page(&state, &session, state.catalog.default_name(), None)?;
    Ok(with_session_cookie(page, sid, new_session))
}

async fn geocode_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<GeocodeForm>,
) -> Result<Response, WebError> {
    let (sid, new_session) = resolve_session(&headers);
    let mut session = state.sessions.load(sid);

    session.mode = GeocodeMode::from_str(&form.mode);

    // Mode and basemap switches re-render without touching the provider;
    // only the submit button carries action=geocode.
    let mut warning = None;
    if form.action.as_deref() == Some("geocode") {
        let outcome = match session.mode {
            GeocodeMode::Forward => {
                state
                    .service
                    .forward(form.address.as_deref().unwrap_or(""))
                    .await
            }
            GeocodeMode::Reverse => {
                let latitude = parse_coordinate(form.latitude.as_deref());
                let longitude = parse_coordinate(form.longitude.as_deref());
                state.service.reverse(latitude, longitude).await
            }
        };

        match outcome {
            GeocodeOutcome::Found(result) => session.last_result = Some(result),
            GeocodeOutcome::NotFound => {
                warning = Some("No result found for that query.".to_string());
            }
            GeocodeOutcome::EmptyQuery => {
                warning = Some("Please enter a valid address.".to_string());
            }
        }
    }

    state.sessions.save(sid, session.clone());

    let basemap = if state.catalog.get(&form.basemap).is_some() {
        form.basemap.as_str()
    } else {
        state.catalog.default_name()
    };

    let page = render_page(&state, &session, basemap, warning)?;
    Ok(with_session_cookie(page, sid, new_session))
}

async fn api_geocode_handler(
    State(state): State<AppState>,
    Query(params): Query<ApiQuery>,
) -> impl IntoResponse {
    match state.service.forward(&params.q).await {
        GeocodeOutcome::Found(result) => (
            StatusCode::OK,
            Json(serde_json::to_value(result).unwrap_or_default()),
        ),
        GeocodeOutcome::NotFound => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": "no result for query"
            })),
        ),
        GeocodeOutcome::EmptyQuery => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "query must not be empty"
            })),
        ),
    }
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        active_sessions: state.sessions.len(),
    };
    Json(response)
}

/// Numeric field parsing for the reverse form; blank or unparsable input
/// falls back to the 0.0 default the page starts with.
fn parse_coordinate(raw: Option<&str>) -> f64 {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::GeocodeProvider;
    use async_trait::async_trait;
    use std::time::Duration;

    struct FixedProvider(Option<GeocodeResult>);

    #[async_trait]
    impl GeocodeProvider for FixedProvider {
        async fn geocode(&self, _query: &str) -> Option<GeocodeResult> {
            self.0.clone()
        }
    }

    fn state_with(result: Option<GeocodeResult>) -> AppState {
        let provider: Arc<dyn GeocodeProvider> = Arc::new(FixedProvider(result));
        AppState::new(
            Arc::new(GeocodeService::new(provider)),
            Arc::new(BasemapCatalog::new()),
            SessionStore::new(Duration::from_secs(1800)),
        )
    }

    fn sample_result() -> GeocodeResult {
        GeocodeResult::new(40.7128, -74.0060, "New York, NY, USA".to_string(), 0.2)
    }

    // ===== Session Cookie Tests =====

    #[test]
    fn test_session_from_headers_missing() {
        let headers = HeaderMap::new();
        assert!(session_from_headers(&headers).is_none());
    }

    #[test]
    fn test_session_from_headers_valid() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("sid={id}")).unwrap(),
        );

        assert_eq!(session_from_headers(&headers), Some(id));
    }

    #[test]
    fn test_session_from_headers_among_other_cookies() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; sid={id}; lang=en")).unwrap(),
        );

        assert_eq!(session_from_headers(&headers), Some(id));
    }

    #[test]
    fn test_session_from_headers_garbage_value() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("sid=not-a-uuid"));

        assert!(session_from_headers(&headers).is_none());
    }

    #[test]
    fn test_resolve_session_mints_new_id() {
        let headers = HeaderMap::new();
        let (id, new_session) = resolve_session(&headers);

        assert!(new_session);
        assert!(!id.is_nil());
    }

    // ===== Coordinate Parsing Tests =====

    #[test]
    fn test_parse_coordinate_valid() {
        assert_eq!(parse_coordinate(Some("51.5074")), 51.5074);
        assert_eq!(parse_coordinate(Some("-0.1278")), -0.1278);
    }

    #[test]
    fn test_parse_coordinate_defaults_to_zero() {
        assert_eq!(parse_coordinate(None), 0.0);
        assert_eq!(parse_coordinate(Some("")), 0.0);
        assert_eq!(parse_coordinate(Some("north")), 0.0);
    }

    #[test]
    fn test_parse_coordinate_trims() {
        assert_eq!(parse_coordinate(Some(" 12.5 ")), 12.5);
    }

    // ===== Page Rendering Tests =====

    #[test]
    fn test_render_page_without_result() {
        let state = state_with(None);
        let session = SessionState::new();

        let page = render_page(&state, &session, "OpenStreetMap", None)
            .unwrap()
            .0;

        assert!(page.contains("Forward (Address → Coordinates)"));
        assert!(page.contains("OpenStreetMap"));
        assert!(!page.contains("Response Time"));
    }

    #[test]
    fn test_render_page_with_result_shows_panel_and_map() {
        let state = state_with(None);
        let mut session = SessionState::new();
        session.last_result = Some(sample_result());

        let page = render_page(&state, &session, "OpenStreetMap", None)
            .unwrap()
            .0;

        assert!(page.contains("New York, NY, USA"));
        assert!(page.contains("Response Time"));
        assert!(page.contains("tile_layers"));
        assert!(page.contains("\"color\":\"blue\""));
    }

    #[test]
    fn test_render_page_reverse_mode_uses_red_marker() {
        let state = state_with(None);
        let mut session = SessionState::new();
        session.mode = GeocodeMode::Reverse;
        session.last_result = Some(sample_result());

        let page = render_page(&state, &session, "OpenStreetMap", None)
            .unwrap()
            .0;

        assert!(page.contains("\"color\":\"red\""));
    }

    #[test]
    fn test_render_page_warning_banner() {
        let state = state_with(None);
        let session = SessionState::new();

        let page = render_page(
            &state,
            &session,
            "OpenStreetMap",
            Some("Please enter a valid address.".to_string()),
        )
        .unwrap()
        .0;

        assert!(page.contains("Please enter a valid address."));
    }

    #[test]
    fn test_render_page_lists_all_basemaps() {
        let state = state_with(None);
        let session = SessionState::new();

        let page = render_page(&state, &session, "Stamen Toner", None).unwrap().0;

        for name in state.catalog.names() {
            assert!(page.contains(name), "missing basemap option {name}");
        }
        assert!(page.contains("value=\"Stamen Toner\" selected"));
    }
}
