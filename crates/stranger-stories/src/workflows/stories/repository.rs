use super::domain::{Category, StoryId, StoryRecord, SubmissionCandidate};

/// Filter applied to story listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoryQuery {
    pub approved: Option<bool>,
    pub category: Option<Category>,
}

impl StoryQuery {
    pub fn approved() -> Self {
        Self {
            approved: Some(true),
            category: None,
        }
    }

    pub fn in_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn matches(&self, record: &StoryRecord) -> bool {
        self.approved.map_or(true, |approved| record.approved == approved)
            && self.category.map_or(true, |category| record.category == category)
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Implementations assign the identifier and both timestamps on insert, and return
/// listings newest first.
pub trait StoryRepository: Send + Sync {
    fn insert(
        &self,
        candidate: SubmissionCandidate,
        approved: bool,
    ) -> Result<StoryRecord, RepositoryError>;
    fn fetch(&self, id: StoryId) -> Result<Option<StoryRecord>, RepositoryError>;
    fn list(&self, query: StoryQuery) -> Result<Vec<StoryRecord>, RepositoryError>;
    fn approve(&self, id: StoryId) -> Result<StoryRecord, RepositoryError>;
    fn delete(&self, id: StoryId) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("story not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Orders records newest first, breaking timestamp ties by id.
pub fn sort_newest_first(records: &mut [StoryRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}
