//! Submission acceptance gate.
//!
//! A story passes through three checks in a fixed order, stopping at the first failure:
//! the disallowed-word list, the minimum trimmed length, and the legitimacy heuristics
//! (character repetition, non-standard symbols, vowel-less long words). Evaluation is pure;
//! the word list is built once at startup and shared read-only.

mod config;
mod heuristics;
mod profanity;

pub use config::{AcceptanceConfig, ThresholdError};
pub use heuristics::SpamSignal;
pub use profanity::{ProfanityFilter, WordListError};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Machine-readable cause of a rejected submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    Profanity,
    TooShort,
    Spammy,
}

impl RejectionReason {
    pub fn code(self) -> &'static str {
        match self {
            RejectionReason::Profanity => "profanity",
            RejectionReason::TooShort => "too_short",
            RejectionReason::Spammy => "spammy",
        }
    }

    pub fn message(self, config: &AcceptanceConfig) -> String {
        match self {
            RejectionReason::Profanity => {
                "Your story contains inappropriate language. Please revise and resubmit."
                    .to_string()
            }
            RejectionReason::TooShort => format!(
                "Your story must be at least {} characters long.",
                config.min_length
            ),
            RejectionReason::Spammy => {
                "Your submission doesn't look like a real story. Please try again.".to_string()
            }
        }
    }
}

/// Outcome of the acceptance gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum AcceptanceVerdict {
    Accepted,
    Rejected { reason: RejectionReason },
}

impl AcceptanceVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AcceptanceVerdict::Accepted)
    }

    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            AcceptanceVerdict::Accepted => None,
            AcceptanceVerdict::Rejected { reason } => Some(*reason),
        }
    }
}

impl From<RejectionReason> for AcceptanceVerdict {
    fn from(reason: RejectionReason) -> Self {
        AcceptanceVerdict::Rejected { reason }
    }
}

/// Evaluate `text` against the word list and thresholds.
pub fn evaluate(
    text: &str,
    profanity: &ProfanityFilter,
    config: &AcceptanceConfig,
) -> AcceptanceVerdict {
    if profanity.contains_profanity(text) {
        return RejectionReason::Profanity.into();
    }

    if text.trim().chars().count() < config.min_length {
        return RejectionReason::TooShort.into();
    }

    if let Some(signal) = heuristics::first_spam_signal(text, config) {
        debug!(?signal, "submission flagged by legitimacy heuristic");
        return RejectionReason::Spammy.into();
    }

    AcceptanceVerdict::Accepted
}

/// Acceptance gate bound to a loaded word list and validated thresholds.
#[derive(Debug, Clone)]
pub struct AcceptancePipeline {
    profanity: Arc<ProfanityFilter>,
    config: AcceptanceConfig,
}

impl AcceptancePipeline {
    pub fn new(
        profanity: Arc<ProfanityFilter>,
        config: AcceptanceConfig,
    ) -> Result<Self, ThresholdError> {
        config.validate()?;
        Ok(Self { profanity, config })
    }

    pub fn config(&self) -> &AcceptanceConfig {
        &self.config
    }

    pub fn evaluate(&self, text: &str) -> AcceptanceVerdict {
        evaluate(text, &self.profanity, &self.config)
    }

    /// User-facing explanation for a rejection under this pipeline's thresholds.
    pub fn message_for(&self, reason: RejectionReason) -> String {
        reason.message(&self.config)
    }
}
