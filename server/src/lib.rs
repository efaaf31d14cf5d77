use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::{HeaderMap, StatusCode}, routing::{get, post}, Json, Router};
use movie_core::{read_records, BuildReport, IndexError, MovieRecord, SharedIndex};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fs::File;
use std::io::BufReader;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

type ApiResult<T> = std::result::Result<Json<T>, (StatusCode, Json<Value>)>;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub index: SharedIndex,
    pub admin_token: Option<String>,
}

/// Build the app from an optional JSONL records file. Without one the index starts
/// unbuilt and must be loaded through `POST /index/records`.
pub fn build_app(records_path: Option<String>) -> Result<Router> {
    let index = SharedIndex::new();
    if let Some(path) = records_path {
        let records = read_records(BufReader::new(File::open(&path)?))?;
        let report = index.rebuild(records);
        tracing::info!(path, movies = report.movies, keywords = report.keywords, "index loaded");
    }
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    Ok(router(AppState { index, admin_token }))
}

pub fn router(app_state: AppState) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/movie/:movie_id", get(movie_handler))
        .route("/index/records", post(replace_records))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn index_error(e: IndexError) -> (StatusCode, Json<Value>) {
    match e {
        IndexError::NotBuilt => (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": e.to_string() }))),
    }
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> ApiResult<SearchResponse> {
    let start = std::time::Instant::now();
    let results = state.index.search(&params.q).map_err(index_error)?;
    let elapsed = start.elapsed();
    Ok(Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits: results.len(), results }))
}

pub async fn movie_handler(State(state): State<AppState>, Path(movie_id): Path<usize>) -> ApiResult<Value> {
    let index = state.index.snapshot().map_err(index_error)?;
    match index.title(movie_id) {
        Some(title) => Ok(Json(json!({ "movie_id": movie_id, "title": title }))),
        None => Err((StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))),
    }
}

/// Build a fresh index from the posted records and swap it in.
async fn replace_records(State(state): State<AppState>, headers: HeaderMap, Json(records): Json<Vec<MovieRecord>>) -> ApiResult<BuildReport> {
    authorize(&state, &headers)?;
    let report = state.index.rebuild(records);
    Ok(Json(report))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> std::result::Result<(), (StatusCode, Json<Value>)> {
    let unauthorized = |msg: &str| (StatusCode::UNAUTHORIZED, Json(json!({ "error": msg })));
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err(unauthorized("ADMIN_TOKEN not set")),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err(unauthorized("invalid admin token"))
    }
}
