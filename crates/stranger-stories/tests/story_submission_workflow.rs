//! End-to-end scenarios for story submission and moderation through the public service facade,
//! using the bundled word list the server loads at startup.

mod common {
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use chrono::Utc;

    use stranger_stories::workflows::stories::{
        AcceptanceConfig, AcceptancePipeline, ProfanityFilter, RepositoryError, StoryId,
        StoryQuery, StoryRecord, StoryRepository, StoryService, StorySubmission,
        SubmissionCandidate,
    };

    #[derive(Default)]
    pub(super) struct VecRepository {
        records: Mutex<BTreeMap<StoryId, StoryRecord>>,
    }

    impl StoryRepository for VecRepository {
        fn insert(
            &self,
            candidate: SubmissionCandidate,
            approved: bool,
        ) -> Result<StoryRecord, RepositoryError> {
            let mut guard = self.records.lock().expect("repository mutex poisoned");
            let id = StoryId(guard.keys().last().map_or(1, |last| last.0 + 1));
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
            Ok(self
                .records
                .lock()
                .expect("repository mutex poisoned")
                .get(&id)
                .cloned())
        }

        fn list(&self, query: StoryQuery) -> Result<Vec<StoryRecord>, RepositoryError> {
            Ok(self
                .records
                .lock()
                .expect("repository mutex poisoned")
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
            self.records
                .lock()
                .expect("repository mutex poisoned")
                .remove(&id)
                .map(|_| ())
                .ok_or(RepositoryError::NotFound)
        }
    }

    pub(super) fn service() -> StoryService<VecRepository> {
        let words = ProfanityFilter::builtin().expect("bundled list loads");
        let pipeline = AcceptancePipeline::new(Arc::new(words), AcceptanceConfig::default())
            .expect("default thresholds valid");
        StoryService::new(Arc::new(VecRepository::default()), Arc::new(pipeline))
    }

    pub(super) fn submission(text: &str, category: &str) -> StorySubmission {
        StorySubmission {
            title: None,
            author_name: None,
            author_email: None,
            story_text: text.to_string(),
            category: category.to_string(),
        }
    }
}

use common::*;
use stranger_stories::workflows::stories::{Category, RejectionReason, StoryServiceError};

#[test]
fn accepted_story_waits_for_moderation_then_publishes() {
    let service = service();

    let record = service
        .submit(submission(
            "My grandmother kept every letter my grandfather sent from the war.",
            "Love",
        ))
        .expect("story accepted");
    assert!(!record.approved);
    assert!(service.published(None).expect("listing").is_empty());

    service.approve(record.id).expect("approve");
    let published = service.published(Some(Category::Love)).expect("listing");
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].id, record.id);
    assert!(service
        .published(Some(Category::Regret))
        .expect("listing")
        .is_empty());
}

#[test]
fn bundled_list_blocks_disguised_profanity() {
    let service = service();

    for text in [
        "That whole summer was complete BULLSHIT from start to finish.",
        "My boss was a real a$$hole about the schedule all year.",
    ] {
        match service.submit(submission(text, "Pain")) {
            Err(StoryServiceError::Rejected(RejectionReason::Profanity)) => {}
            other => panic!("expected profanity rejection for {text:?}, got {other:?}"),
        }
    }
}

#[test]
fn bundled_list_allows_innocent_substrings() {
    let service = service();

    let record = service
        .submit(submission(
            "We passed the class assessment and celebrated in Scunthorpe.",
            "Joy",
        ))
        .expect("no false positive");
    assert_eq!(record.category, Category::Joy);
}

#[test]
fn spam_is_rejected_before_storage() {
    let service = service();

    for text in [
        "aaaaaaaaaaaaaaaaaaaa",
        "!!!!###@@@$$$%%%^^^&&&",
        "Xqzvbnmfjhpl xqzvbnmfjhpl xqzvbnmfjhpl",
    ] {
        match service.submit(submission(text, "Other")) {
            Err(StoryServiceError::Rejected(RejectionReason::Spammy)) => {}
            other => panic!("expected spam rejection for {text:?}, got {other:?}"),
        }
    }
    assert!(service.all_for_review().expect("admin listing").is_empty());
}
