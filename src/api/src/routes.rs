//! API route handlers.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::scraper::parsers::{PlantDetail, PlantResult};
use crate::scraper::{CalscapeClient, ScrapeError};
use crate::types::{ErrorResponse, HealthResponse, SearchParams};

const MANIFEST_TEMPLATE: &str = include_str!("../static/ai-plugin.json");
const OPENAPI_TEMPLATE: &str = include_str!("../static/openapi.yaml");
const HOSTNAME_PLACEHOLDER: &str = "PLUGIN_HOSTNAME";

/// Application state shared across handlers.
pub struct AppState {
    pub client: CalscapeClient,
    pub config: AppConfig,
}

/// Error type for API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl From<ScrapeError> for ApiError {
    fn from(err: ScrapeError) -> Self {
        let status = match &err {
            ScrapeError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            ScrapeError::Http(_)
            | ScrapeError::HttpStatus { .. }
            | ScrapeError::Redirect(_)
            | ScrapeError::MalformedRow { .. } => StatusCode::BAD_GATEWAY,
            ScrapeError::Selector(_) | ScrapeError::InvalidBaseUrl(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.status.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Build the API router (without middleware layers).
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/search", post(search))
        .route("/detail/:slug", get(detail))
        .route("/.well-known/ai-plugin.json", get(plugin_manifest))
        .route("/openapi.yaml", get(openapi_spec))
        .route("/logo.png", get(logo))
        .with_state(state)
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Plant search endpoint. The body is forwarded upstream untouched.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
    form: Bytes,
) -> Result<Json<Vec<PlantResult>>, ApiError> {
    let limit = params.limit.unwrap_or(state.config.search.default_limit);

    let results = state.client.search(form, limit).await.map_err(|e| {
        log_failure("Search", &e);
        ApiError::from(e)
    })?;

    tracing::debug!("Search returned {} results", results.len());
    Ok(Json(results))
}

/// Plant detail endpoint.
pub async fn detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<PlantDetail>, ApiError> {
    let detail = state.client.fetch_detail(&slug).await.map_err(|e| {
        log_failure(&format!("Detail lookup for {}", slug), &e);
        ApiError::from(e)
    })?;

    Ok(Json(detail))
}

fn log_failure(operation: &str, err: &ScrapeError) {
    if err.is_transport() {
        tracing::warn!("{} failed, upstream unavailable: {}", operation, err);
    } else {
        tracing::warn!("{} failed: {}", operation, err);
    }
}

/// Plugin manifest with the public hostname filled in.
pub async fn plugin_manifest(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let text = render_template(MANIFEST_TEMPLATE, &state.config, &headers);
    ([(header::CONTENT_TYPE, "text/json")], text).into_response()
}

/// OpenAPI document with the public hostname filled in.
pub async fn openapi_spec(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let text = render_template(OPENAPI_TEMPLATE, &state.config, &headers);
    ([(header::CONTENT_TYPE, "text/yaml")], text).into_response()
}

/// Plugin logo, read from disk.
pub async fn logo(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let path = &state.config.plugin.logo_path;
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, "image/png")], bytes).into_response()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ApiError::not_found(format!("Logo not found: {}", path)))
        }
        Err(e) => Err(ApiError::internal(format!("Failed to read logo: {}", e))),
    }
}

/// Replace the hostname placeholder with `{protocol}://{host}`.
///
/// The host comes from the request's Host header, falling back to the bind address.
fn render_template(template: &str, config: &AppConfig, headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}:{}", config.server.host, config.server.port));

    template.replace(
        HOSTNAME_PLACEHOLDER,
        &format!("{}://{}", config.plugin.protocol(), host),
    )
}
