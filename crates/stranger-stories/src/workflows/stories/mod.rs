//! Anonymous story intake, screening, and moderation.
//!
//! Submissions are validated at the request boundary, screened by the acceptance gate, and
//! queued unapproved. Public endpoints only ever see approved stories.

pub mod acceptance;
pub mod domain;
pub(crate) mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use acceptance::{
    evaluate, AcceptanceConfig, AcceptancePipeline, AcceptanceVerdict, ProfanityFilter,
    RejectionReason, SpamSignal, ThresholdError, WordListError,
};
pub use domain::{
    AdminStoryView, Category, PublicStoryView, StoryId, StoryRecord, StorySubmission,
    SubmissionCandidate, UnknownCategory,
};
pub use intake::{IntakeGuard, IntakeLimits, IntakeViolation};
pub use repository::{RepositoryError, StoryQuery, StoryRepository};
pub use router::story_router;
pub use service::{StoryService, StoryServiceError};
