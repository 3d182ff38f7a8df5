//! Axum front end: one `POST /api/<name>` route per calculator, a couple of
//! read-only helpers, and the static frontend for every other path.

use std::path::Path;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::core::tds::{DEFAULT_CATEGORY, TDS_CATEGORIES};
use crate::core::{Calculation, Calculators};
use crate::domain::model::ErrorBody;
use crate::utils::error::CalcError;

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub calculators: Calculators,
}

impl AppState {
    pub fn new(calculators: Calculators) -> Self {
        Self { calculators }
    }
}

type SharedState = Arc<AppState>;
type Payload = Result<Json<Value>, JsonRejection>;

/// A failed request: the error plus the body the client sent, if it parsed.
#[derive(Debug)]
pub struct ApiError {
    pub error: CalcError,
    pub received: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorBody::new(&self.error, self.received))).into_response()
    }
}

fn run<C: Calculation>(calculator: &C, payload: Payload) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::warn!(
                calculator = calculator.name(),
                "rejected malformed body: {}",
                rejection.body_text()
            );
            return ApiError {
                error: CalcError::invalid_input(format!(
                    "Invalid JSON body: {}",
                    rejection.body_text()
                )),
                received: None,
            }
            .into_response();
        }
    };

    match calculator.evaluate_json(body.clone()) {
        Ok(result) => {
            tracing::debug!(calculator = calculator.name(), "calculation succeeded");
            Json(result).into_response()
        }
        Err(error) => {
            tracing::warn!(
                calculator = calculator.name(),
                code = error.code(),
                "rejected input: {}",
                error
            );
            ApiError {
                error,
                received: Some(body),
            }
            .into_response()
        }
    }
}

async fn basic(State(state): State<SharedState>, payload: Payload) -> Response {
    run(&state.calculators.basic, payload)
}

async fn gst(State(state): State<SharedState>, payload: Payload) -> Response {
    run(&state.calculators.gst, payload)
}

async fn tds(State(state): State<SharedState>, payload: Payload) -> Response {
    run(&state.calculators.tds, payload)
}

async fn height(State(state): State<SharedState>, payload: Payload) -> Response {
    run(&state.calculators.height, payload)
}

async fn length(State(state): State<SharedState>, payload: Payload) -> Response {
    run(&state.calculators.length, payload)
}

async fn weight(State(state): State<SharedState>, payload: Payload) -> Response {
    run(&state.calculators.weight, payload)
}

async fn temperature(State(state): State<SharedState>, payload: Payload) -> Response {
    run(&state.calculators.temperature, payload)
}

async fn age(State(state): State<SharedState>, payload: Payload) -> Response {
    run(&state.calculators.age, payload)
}

async fn emi(State(state): State<SharedState>, payload: Payload) -> Response {
    run(&state.calculators.emi, payload)
}

async fn percentage(State(state): State<SharedState>, payload: Payload) -> Response {
    run(&state.calculators.percentage, payload)
}

async fn area(State(state): State<SharedState>, payload: Payload) -> Response {
    run(&state.calculators.area, payload)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn tds_categories() -> Json<Value> {
    Json(json!({
        "default": DEFAULT_CATEGORY,
        "categories": &TDS_CATEGORIES[..],
    }))
}

async fn api_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not found", "code": "NotFound" })),
    )
        .into_response()
}

async fn api_method_not_allowed(method: Method, uri: Uri) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({
            "error": format!("Method {} is not allowed on {}", method, uri.path()),
            "code": "MethodNotAllowed",
        })),
    )
        .into_response()
}

/// Only the API routes; handy for tests that do not need the frontend.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/tds/categories", get(tds_categories))
        .route("/api/basic", post(basic))
        .route("/api/gst", post(gst))
        .route("/api/tds", post(tds))
        .route("/api/height", post(height))
        .route("/api/length", post(length))
        .route("/api/weight", post(weight))
        .route("/api/temperature", post(temperature))
        .route("/api/age", post(age))
        .route("/api/emi", post(emi))
        .route("/api/percentage", post(percentage))
        .route("/api/area", post(area))
        .route("/api", any(api_not_found))
        .route("/api/{*rest}", any(api_not_found))
        .method_not_allowed_fallback(api_method_not_allowed)
        .with_state(Arc::new(state))
}

/// API routes plus the static frontend; unknown paths get `index.html`.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    let frontend =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    api_router(state)
        .fallback_service(frontend)
        .layer(TraceLayer::new_for_http())
}

pub fn router_from_settings(settings: &Settings) -> Router {
    build_router(AppState::new(settings.calculators()), &settings.static_dir)
}
