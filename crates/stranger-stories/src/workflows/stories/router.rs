use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AdminStoryView, Category, PublicStoryView, StoryId, StorySubmission};
use super::intake::IntakeViolation;
use super::repository::StoryRepository;
use super::service::{StoryService, StoryServiceError};

/// Query parameters accepted by the public listing.
#[derive(Debug, Default, Deserialize)]
pub struct StoryListParams {
    #[serde(default)]
    pub category: Option<String>,
}

/// Router builder exposing submission, public read, and moderation endpoints.
pub fn story_router<R>(service: Arc<StoryService<R>>) -> Router
where
    R: StoryRepository + 'static,
{
    Router::new()
        .route(
            "/api/stories",
            get(list_handler::<R>).post(submit_handler::<R>),
        )
        .route("/api/stories/random", get(random_handler::<R>))
        .route("/api/stories/:story_id", get(story_handler::<R>))
        .route("/api/admin/stories", get(admin_list_handler::<R>))
        .route(
            "/api/admin/stories/:story_id/approve",
            patch(approve_handler::<R>),
        )
        .route(
            "/api/admin/stories/:story_id",
            axum::routing::delete(delete_handler::<R>),
        )
        .with_state(service)
}

fn error_response<R>(service: &StoryService<R>, error: StoryServiceError) -> Response
where
    R: StoryRepository + 'static,
{
    match error {
        StoryServiceError::Rejected(reason) => {
            let payload = json!({
                "error": service.pipeline().message_for(reason),
                "reason": reason.code(),
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        StoryServiceError::Intake(IntakeViolation::InvalidCategory(_)) => {
            let payload = json!({ "error": "Invalid category" });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        StoryServiceError::Intake(violation) => {
            let payload = json!({ "error": violation.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        StoryServiceError::NotFound | StoryServiceError::NothingPublished => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        StoryServiceError::Repository(_) => {
            tracing::error!(%error, "story repository failure");
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

/// Extractor failures answer with the same `{ "error": ... }` body as service errors.
fn rejection_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn parse_category(raw: Option<String>) -> Result<Option<Category>, StoryServiceError> {
    match raw.filter(|value| !value.is_empty()) {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|err| StoryServiceError::Intake(IntakeViolation::InvalidCategory(err))),
        None => Ok(None),
    }
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<StoryService<R>>>,
    payload: Result<Json<StorySubmission>, JsonRejection>,
) -> Response
where
    R: StoryRepository + 'static,
{
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection.status(), rejection.body_text()),
    };

    match service.submit(submission) {
        Ok(record) => {
            let payload = json!({
                "id": record.id,
                "message": "Story submitted for review",
            });
            (StatusCode::ACCEPTED, Json(payload)).into_response()
        }
        Err(error) => error_response(&service, error),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<StoryService<R>>>,
    Query(params): Query<StoryListParams>,
) -> Response
where
    R: StoryRepository + 'static,
{
    let result = parse_category(params.category).and_then(|category| service.published(category));
    match result {
        Ok(records) => {
            let views: Vec<PublicStoryView> =
                records.iter().map(|record| record.public_view()).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(error) => error_response(&service, error),
    }
}

pub(crate) async fn random_handler<R>(State(service): State<Arc<StoryService<R>>>) -> Response
where
    R: StoryRepository + 'static,
{
    match service.random_published() {
        Ok(record) => (StatusCode::OK, Json(record.public_view())).into_response(),
        Err(error) => error_response(&service, error),
    }
}

pub(crate) async fn story_handler<R>(
    State(service): State<Arc<StoryService<R>>>,
    story_id: Result<Path<u64>, PathRejection>,
) -> Response
where
    R: StoryRepository + 'static,
{
    let Path(story_id) = match story_id {
        Ok(story_id) => story_id,
        Err(rejection) => return rejection_response(rejection.status(), rejection.body_text()),
    };

    match service.published_story(StoryId(story_id)) {
        Ok(record) => (StatusCode::OK, Json(record.public_view())).into_response(),
        Err(error) => error_response(&service, error),
    }
}

pub(crate) async fn admin_list_handler<R>(State(service): State<Arc<StoryService<R>>>) -> Response
where
    R: StoryRepository + 'static,
{
    match service.all_for_review() {
        Ok(records) => {
            let views: Vec<AdminStoryView> =
                records.iter().map(|record| record.admin_view()).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(error) => error_response(&service, error),
    }
}

pub(crate) async fn approve_handler<R>(
    State(service): State<Arc<StoryService<R>>>,
    story_id: Result<Path<u64>, PathRejection>,
) -> Response
where
    R: StoryRepository + 'static,
{
    let Path(story_id) = match story_id {
        Ok(story_id) => story_id,
        Err(rejection) => return rejection_response(rejection.status(), rejection.body_text()),
    };

    match service.approve(StoryId(story_id)) {
        Ok(_) => (StatusCode::OK, Json(json!({ "message": "Story approved" }))).into_response(),
        Err(error) => error_response(&service, error),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<StoryService<R>>>,
    story_id: Result<Path<u64>, PathRejection>,
) -> Response
where
    R: StoryRepository + 'static,
{
    let Path(story_id) = match story_id {
        Ok(story_id) => story_id,
        Err(rejection) => return rejection_response(rejection.status(), rejection.body_text()),
    };

    match service.remove(StoryId(story_id)) {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "Story deleted" }))).into_response(),
        Err(error) => error_response(&service, error),
    }
}
