use crate::infra::AppState;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json};
use serde_json::json;
use std::path::{Component, Path as FsPath, PathBuf};
use std::sync::Arc;
use stranger_stories::workflows::stories::{story_router, StoryRepository, StoryService};

pub(crate) fn with_story_routes<R>(service: Arc<StoryService<R>>) -> axum::Router
where
    R: StoryRepository + 'static,
{
    story_router(service)
        .route("/", get(index_page))
        .route("/admin", get(admin_page))
        .route("/static/*path", get(static_asset))
        .route("/health", get(healthcheck))
        .route("/api/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn index_page(Extension(state): Extension<AppState>) -> Response {
    serve_file(&state.public_dir, FsPath::new("index.html")).await
}

pub(crate) async fn admin_page(Extension(state): Extension<AppState>) -> Response {
    serve_file(&state.public_dir, FsPath::new("admin.html")).await
}

pub(crate) async fn static_asset(
    Extension(state): Extension<AppState>,
    Path(path): Path<String>,
) -> Response {
    serve_file(&state.public_dir, FsPath::new(&path)).await
}

/// Only plain relative paths are resolved; anything reaching outside `root` is a 404.
fn resolve_asset(root: &FsPath, relative: &FsPath) -> Option<PathBuf> {
    let mut resolved = root.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(resolved)
}

async fn serve_file(root: &FsPath, relative: &FsPath) -> Response {
    let not_found = || (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response();

    let Some(path) = resolve_asset(root, relative) else {
        return not_found();
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.essence_str().to_string())],
                bytes,
            )
                .into_response()
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => not_found(),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "failed to read static asset");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "failed to read asset" })),
            )
                .into_response()
        }
    }
}
