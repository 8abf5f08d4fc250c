use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::workflows::stories::acceptance::{
    AcceptanceConfig, AcceptancePipeline, ProfanityFilter,
};
use crate::workflows::stories::domain::{
    StoryId, StoryRecord, StorySubmission, SubmissionCandidate,
};
use crate::workflows::stories::repository::{RepositoryError, StoryQuery, StoryRepository};
use crate::workflows::stories::{story_router, StoryService};

pub(super) const LEGITIMATE_STORY: &str =
    "Today I learned something important about my family and our past.";

pub(super) fn word_list() -> ProfanityFilter {
    ProfanityFilter::from_words(["darn", "blasted", "heck off"]).expect("word list builds")
}

pub(super) fn pipeline_with(config: AcceptanceConfig) -> AcceptancePipeline {
    AcceptancePipeline::new(Arc::new(word_list()), config).expect("thresholds valid")
}

pub(super) fn pipeline() -> AcceptancePipeline {
    pipeline_with(AcceptanceConfig::default())
}

pub(super) fn submission() -> StorySubmission {
    StorySubmission {
        title: Some("The attic letters".to_string()),
        author_name: Some("A stranger".to_string()),
        author_email: Some("stranger@example.org".to_string()),
        story_text: LEGITIMATE_STORY.to_string(),
        category: "Wisdom".to_string(),
    }
}

pub(super) fn submission_with_text(text: &str) -> StorySubmission {
    StorySubmission {
        story_text: text.to_string(),
        ..submission()
    }
}

pub(super) fn build_service() -> (StoryService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = StoryService::new(repository.clone(), Arc::new(pipeline()));
    (service, repository)
}

pub(super) fn router_with_service(service: StoryService<MemoryRepository>) -> axum::Router {
    story_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    sequence: Arc<AtomicU64>,
    pub(super) records: Arc<Mutex<HashMap<StoryId, StoryRecord>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl StoryRepository for MemoryRepository {
    fn insert(
        &self,
        candidate: SubmissionCandidate,
        approved: bool,
    ) -> Result<StoryRecord, RepositoryError> {
        let id = StoryId(self.sequence.fetch_add(1, Ordering::Relaxed) + 1);
        let now = Utc::now();
        let record = StoryRecord {
            id,
            title: candidate.title,
            author_name: candidate.author_name,
            author_email: candidate.author_email,
            story_text: candidate.story_text,
            category: candidate.category,
            approved,
            created_at: now,
            updated_at: now,
        };
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .insert(id, record.clone());
        Ok(record)
    }

    fn fetch(&self, id: StoryId) -> Result<Option<StoryRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn list(&self, query: StoryQuery) -> Result<Vec<StoryRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| query.matches(record))
            .cloned()
            .collect())
    }

    fn approve(&self, id: StoryId) -> Result<StoryRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        record.approved = true;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    fn delete(&self, id: StoryId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(&id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

pub(super) struct UnavailableRepository;

impl StoryRepository for UnavailableRepository {
    fn insert(
        &self,
        _candidate: SubmissionCandidate,
        _approved: bool,
    ) -> Result<StoryRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: StoryId) -> Result<Option<StoryRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _query: StoryQuery) -> Result<Vec<StoryRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn approve(&self, _id: StoryId) -> Result<StoryRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: StoryId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
