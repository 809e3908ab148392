//! Reducer-style state of the shortening form.
//!
//! All transitions go through [`WorkflowState::apply`]. Each submission gets a
//! generation number; completions that carry an older generation are dropped,
//! which is how clear and superseding submissions cancel in-flight requests.

use std::time::Duration;

use shared::{
    domain::{SubmissionState, COPIED_DISPLAY_MILLIS},
    error::ShortenError,
};
use tokio::time::Instant;
use tracing::debug;

use crate::validate_long_url;

pub const COPIED_WINDOW: Duration = Duration::from_millis(COPIED_DISPLAY_MILLIS);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowAction {
    Edit(String),
    ValidateFail(ShortenError),
    SubmitStart,
    SubmitSuccess { generation: u64, short_url: String },
    SubmitError { generation: u64, error: ShortenError },
    Cancel,
    Clear,
    Copy { at: Instant },
    CopyExpire { at: Instant },
}

/// A validated request that is ready to be sent.
///
/// `url` is the input exactly as entered; parsing only gates the submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub generation: u64,
    pub url: String,
}

#[derive(Debug, Clone, Default)]
pub struct WorkflowState {
    long_url: String,
    short_url: String,
    error: Option<ShortenError>,
    copied_until: Option<Instant>,
    in_flight: Option<u64>,
    generation: u64,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn long_url(&self) -> &str {
        &self.long_url
    }

    /// Empty unless the last submission succeeded.
    pub fn short_url(&self) -> &str {
        &self.short_url
    }

    pub fn error(&self) -> Option<&ShortenError> {
        self.error.as_ref()
    }

    /// Empty when there is no error.
    pub fn error_message(&self) -> String {
        self.error.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_until.is_some_and(|deadline| now < deadline)
    }

    /// When the copied indication should revert, if it is armed.
    pub fn copied_deadline(&self) -> Option<Instant> {
        self.copied_until
    }

    pub fn submission_state(&self) -> SubmissionState {
        if self.is_loading() {
            SubmissionState::Loading
        } else if !self.short_url.is_empty() {
            SubmissionState::Success
        } else if self.error.is_some() {
            SubmissionState::Error
        } else {
            SubmissionState::Idle
        }
    }

    /// Applies one transition. Returns `false` when the action had no effect.
    pub fn apply(&mut self, action: WorkflowAction) -> bool {
        match action {
            WorkflowAction::Edit(text) => {
                self.long_url = text;
                true
            }
            WorkflowAction::ValidateFail(error) => {
                self.in_flight = None;
                self.short_url.clear();
                self.copied_until = None;
                self.error = Some(error);
                true
            }
            WorkflowAction::SubmitStart => {
                self.generation += 1;
                self.in_flight = Some(self.generation);
                self.short_url.clear();
                self.error = None;
                self.copied_until = None;
                true
            }
            WorkflowAction::SubmitSuccess {
                generation,
                short_url,
            } => {
                if !self.accepts(generation) {
                    return false;
                }
                self.in_flight = None;
                self.error = None;
                self.short_url = short_url;
                self.long_url.clear();
                true
            }
            WorkflowAction::SubmitError { generation, error } => {
                if !self.accepts(generation) {
                    return false;
                }
                self.in_flight = None;
                self.short_url.clear();
                self.error = Some(error);
                true
            }
            WorkflowAction::Cancel => self.in_flight.take().is_some(),
            WorkflowAction::Clear => {
                self.in_flight = None;
                self.long_url.clear();
                self.short_url.clear();
                self.error = None;
                self.copied_until = None;
                true
            }
            WorkflowAction::Copy { at } => {
                if self.short_url.is_empty() {
                    return false;
                }
                self.copied_until = Some(at + COPIED_WINDOW);
                true
            }
            WorkflowAction::CopyExpire { at } => match self.copied_until {
                Some(deadline) if at >= deadline => {
                    self.copied_until = None;
                    true
                }
                _ => false,
            },
        }
    }

    fn accepts(&self, generation: u64) -> bool {
        let current = self.in_flight == Some(generation);
        if !current {
            debug!(
                generation,
                in_flight = ?self.in_flight,
                "discarding stale submission result"
            );
        }
        current
    }

    /// Validates the current input and either records the failure or starts a submission.
    ///
    /// A submission started while another is in flight supersedes it.
    pub fn begin_submission(&mut self) -> Result<Submission, ShortenError> {
        match validate_long_url(&self.long_url) {
            Ok(_) => {
                self.apply(WorkflowAction::SubmitStart);
                Ok(Submission {
                    generation: self.generation,
                    url: self.long_url.clone(),
                })
            }
            Err(error) => {
                self.apply(WorkflowAction::ValidateFail(error.clone()));
                Err(error)
            }
        }
    }

    /// Records the outcome of submission `generation`. Returns `false` if it was stale.
    pub fn complete(&mut self, generation: u64, result: Result<String, ShortenError>) -> bool {
        match result {
            Ok(short_url) => self.apply(WorkflowAction::SubmitSuccess {
                generation,
                short_url,
            }),
            Err(error) => self.apply(WorkflowAction::SubmitError { generation, error }),
        }
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
