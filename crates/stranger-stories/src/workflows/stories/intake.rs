use super::domain::{Category, StorySubmission, SubmissionCandidate, UnknownCategory};

/// Schema-level problems with a submission, detected before the acceptance gate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error(transparent)]
    InvalidCategory(#[from] UnknownCategory),
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("author name must be at most {max} characters")]
    AuthorNameTooLong { max: usize },
    #[error("author email is not a valid address")]
    InvalidEmail,
    #[error("story text must be at least {min} characters")]
    StoryTooShort { min: usize },
    #[error("story text must be at most {max} characters")]
    StoryTooLong { max: usize },
}

/// Field limits enforced at the request boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeLimits {
    pub title_max: usize,
    pub author_name_max: usize,
    pub story_min: usize,
    pub story_max: usize,
}

impl Default for IntakeLimits {
    fn default() -> Self {
        Self {
            title_max: 255,
            author_name_max: 255,
            story_min: 10,
            story_max: 10_000,
        }
    }
}

/// Converts raw form payloads into validated candidates.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard {
    limits: IntakeLimits,
}

impl IntakeGuard {
    pub fn with_limits(limits: IntakeLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &IntakeLimits {
        &self.limits
    }

    pub fn candidate_from_submission(
        &self,
        submission: StorySubmission,
    ) -> Result<SubmissionCandidate, IntakeViolation> {
        let title = non_empty(submission.title);
        if exceeds(title.as_deref(), self.limits.title_max) {
            return Err(IntakeViolation::TitleTooLong {
                max: self.limits.title_max,
            });
        }

        let author_name = non_empty(submission.author_name);
        if exceeds(author_name.as_deref(), self.limits.author_name_max) {
            return Err(IntakeViolation::AuthorNameTooLong {
                max: self.limits.author_name_max,
            });
        }

        let author_email = non_empty(submission.author_email);
        if let Some(email) = author_email.as_deref() {
            if !looks_like_email(email) {
                return Err(IntakeViolation::InvalidEmail);
            }
        }

        let story_len = submission.story_text.chars().count();
        if story_len < self.limits.story_min {
            return Err(IntakeViolation::StoryTooShort {
                min: self.limits.story_min,
            });
        }
        if story_len > self.limits.story_max {
            return Err(IntakeViolation::StoryTooLong {
                max: self.limits.story_max,
            });
        }

        // Field shape errors are reported before an unknown category.
        let category: Category = submission.category.parse()?;

        Ok(SubmissionCandidate {
            title,
            author_name,
            author_email,
            story_text: submission.story_text,
            category,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn exceeds(value: Option<&str>, max: usize) -> bool {
    value.map(|v| v.chars().count() > max).unwrap_or(false)
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
