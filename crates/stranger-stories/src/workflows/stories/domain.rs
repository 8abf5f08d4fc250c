use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned identifier for a persisted story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(pub u64);

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of story categories offered on the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Love,
    Wisdom,
    Regret,
    Joy,
    Pain,
    Change,
    Other,
}

impl Category {
    pub const fn all() -> [Self; 7] {
        [
            Self::Love,
            Self::Wisdom,
            Self::Regret,
            Self::Joy,
            Self::Pain,
            Self::Change,
            Self::Other,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Love => "Love",
            Self::Wisdom => "Wisdom",
            Self::Regret => "Regret",
            Self::Joy => "Joy",
            Self::Pain => "Pain",
            Self::Change => "Change",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a category string is outside the closed set. Matching is exact.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| UnknownCategory(value.to_string()))
    }
}

/// Story payload exactly as received from the submission form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorySubmission {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
    pub story_text: String,
    pub category: String,
}

/// Submission that passed intake validation and is ready for the acceptance pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionCandidate {
    pub title: Option<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub story_text: String,
    pub category: Category,
}

/// Persisted story, pending or approved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRecord {
    pub id: StoryId,
    pub title: Option<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub story_text: String,
    pub category: Category,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoryRecord {
    pub fn public_view(&self) -> PublicStoryView {
        PublicStoryView {
            id: self.id,
            title: self.title.clone(),
            author_name: self.author_name.clone(),
            story_text: self.story_text.clone(),
            category: self.category,
            created_at: self.created_at,
            approved: self.approved,
        }
    }

    pub fn admin_view(&self) -> AdminStoryView {
        AdminStoryView {
            story: self.public_view(),
            author_email: self.author_email.clone(),
            updated_at: self.updated_at,
        }
    }
}

/// Public representation; never carries the author's e-mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicStoryView {
    pub id: StoryId,
    pub title: Option<String>,
    pub author_name: Option<String>,
    pub story_text: String,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub approved: bool,
}

/// Moderation representation including contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminStoryView {
    #[serde(flatten)]
    pub story: PublicStoryView,
    pub author_email: Option<String>,
    pub updated_at: DateTime<Utc>,
}
