use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use stranger_stories::workflows::stories::{
    RepositoryError, StoryId, StoryQuery, StoryRecord, StoryRepository, SubmissionCandidate,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) public_dir: Arc<PathBuf>,
}

/// Process-local story storage; contents are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryStoryRepository {
    sequence: Arc<AtomicU64>,
    records: Arc<Mutex<HashMap<StoryId, StoryRecord>>>,
}

impl InMemoryStoryRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<StoryId, StoryRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("story store mutex poisoned".to_string()))
    }
}

impl StoryRepository for InMemoryStoryRepository {
    fn insert(
        &self,
        candidate: SubmissionCandidate,
        approved: bool,
    ) -> Result<StoryRecord, RepositoryError> {
        let mut guard = self.lock()?;
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
        guard.insert(id, record.clone());
        Ok(record)
    }

    fn fetch(&self, id: StoryId) -> Result<Option<StoryRecord>, RepositoryError> {
        Ok(self.lock()?.get(&id).cloned())
    }

    fn list(&self, query: StoryQuery) -> Result<Vec<StoryRecord>, RepositoryError> {
        Ok(self
            .lock()?
            .values()
            .filter(|record| query.matches(record))
            .cloned()
            .collect())
    }

    fn approve(&self, id: StoryId) -> Result<StoryRecord, RepositoryError> {
        let mut guard = self.lock()?;
        let record = guard.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        record.approved = true;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    fn delete(&self, id: StoryId) -> Result<(), RepositoryError> {
        self.lock()?
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}
