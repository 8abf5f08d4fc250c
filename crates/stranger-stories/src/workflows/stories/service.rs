use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{debug, info};

use super::acceptance::{AcceptancePipeline, AcceptanceVerdict, RejectionReason};
use super::domain::{Category, StoryId, StoryRecord, StorySubmission};
use super::intake::{IntakeGuard, IntakeViolation};
use super::repository::{sort_newest_first, RepositoryError, StoryQuery, StoryRepository};

/// Service composing intake validation, the acceptance gate, and storage.
pub struct StoryService<R> {
    guard: IntakeGuard,
    pipeline: Arc<AcceptancePipeline>,
    repository: Arc<R>,
}

impl<R> StoryService<R>
where
    R: StoryRepository + 'static,
{
    pub fn new(repository: Arc<R>, pipeline: Arc<AcceptancePipeline>) -> Self {
        Self::with_guard(IntakeGuard::default(), repository, pipeline)
    }

    pub fn with_guard(
        guard: IntakeGuard,
        repository: Arc<R>,
        pipeline: Arc<AcceptancePipeline>,
    ) -> Self {
        Self {
            guard,
            pipeline,
            repository,
        }
    }

    pub fn pipeline(&self) -> &AcceptancePipeline {
        &self.pipeline
    }

    /// Validate, screen, and queue a new story for moderation.
    pub fn submit(&self, submission: StorySubmission) -> Result<StoryRecord, StoryServiceError> {
        let candidate = self.guard.candidate_from_submission(submission)?;

        if let AcceptanceVerdict::Rejected { reason } = self.pipeline.evaluate(&candidate.story_text)
        {
            debug!(reason = reason.code(), category = %candidate.category, "submission rejected");
            return Err(StoryServiceError::Rejected(reason));
        }

        let record = self.repository.insert(candidate, false)?;
        info!(story_id = %record.id, category = %record.category, "story queued for moderation");
        Ok(record)
    }

    /// Approved stories, newest first, optionally narrowed to one category.
    pub fn published(
        &self,
        category: Option<Category>,
    ) -> Result<Vec<StoryRecord>, StoryServiceError> {
        let mut records = self
            .repository
            .list(StoryQuery::approved().in_category(category))?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    pub fn published_story(&self, id: StoryId) -> Result<StoryRecord, StoryServiceError> {
        self.repository
            .fetch(id)?
            .filter(|record| record.approved)
            .ok_or(StoryServiceError::NotFound)
    }

    /// Uniform choice over the approved set at call time.
    pub fn random_published(&self) -> Result<StoryRecord, StoryServiceError> {
        let records = self.repository.list(StoryQuery::approved())?;
        records
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(StoryServiceError::NothingPublished)
    }

    /// Every story, pending and approved, newest first.
    pub fn all_for_review(&self) -> Result<Vec<StoryRecord>, StoryServiceError> {
        let mut records = self.repository.list(StoryQuery::default())?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    pub fn approve(&self, id: StoryId) -> Result<StoryRecord, StoryServiceError> {
        let record = self.repository.approve(id)?;
        info!(story_id = %id, "story approved");
        Ok(record)
    }

    pub fn remove(&self, id: StoryId) -> Result<(), StoryServiceError> {
        self.repository.delete(id)?;
        info!(story_id = %id, "story deleted");
        Ok(())
    }
}

/// Error raised by the story service.
#[derive(Debug, thiserror::Error)]
pub enum StoryServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error("submission rejected: {}", .0.code())]
    Rejected(RejectionReason),
    #[error("Story not found")]
    NotFound,
    #[error("No approved stories yet")]
    NothingPublished,
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for StoryServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Repository(other),
        }
    }
}
