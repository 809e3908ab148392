use shared::error::ShortenError;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::{
    service::ShortenService,
    state::{WorkflowAction, WorkflowState},
};

#[derive(Debug, Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

/// Write-only access to the system clipboard.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Copies the current short link and arms the copied indication.
///
/// Returns `Ok(false)` when there is nothing to copy. A failed write leaves the
/// indication off.
pub fn copy_result(
    state: &mut WorkflowState,
    clipboard: &mut dyn ClipboardSink,
    at: Instant,
) -> Result<bool, ClipboardError> {
    if state.short_url().is_empty() {
        return Ok(false);
    }
    if let Err(err) = clipboard.write_text(state.short_url()) {
        warn!(error = %err, "failed to copy short link");
        return Err(err);
    }
    Ok(state.apply(WorkflowAction::Copy { at }))
}

/// Drives one shortening form: validation, the service call, and copy/clear.
pub struct ShortenWorkflow<S, C> {
    service: S,
    clipboard: C,
    state: WorkflowState,
}

impl<S: ShortenService, C: ClipboardSink> ShortenWorkflow<S, C> {
    pub fn new(service: S, clipboard: C) -> Self {
        Self {
            service,
            clipboard,
            state: WorkflowState::new(),
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        self.state.apply(WorkflowAction::Edit(text.into()));
    }

    /// Sets the input to `long_url` and submits it.
    ///
    /// Loading is off again once this returns. If the returned future is
    /// dropped early, call [`Self::cancel`] or [`Self::clear`].
    pub async fn submit(&mut self, long_url: impl Into<String>) -> Result<String, ShortenError> {
        self.edit(long_url);
        let submission = self.state.begin_submission()?;
        debug!(generation = submission.generation, "submitting long url");

        let result = self.service.shorten(&submission.url).await;
        self.state.complete(submission.generation, result.clone());
        result
    }

    pub fn cancel(&mut self) -> bool {
        self.state.apply(WorkflowAction::Cancel)
    }

    pub fn copy_result(&mut self) -> Result<bool, ClipboardError> {
        copy_result(&mut self.state, &mut self.clipboard, Instant::now())
    }

    /// Whether "Copied!" should be shown right now.
    pub fn is_copied(&self) -> bool {
        self.state.is_copied(Instant::now())
    }

    /// Drops the copied indication once its window has passed.
    pub fn expire_copied(&mut self) -> bool {
        self.state.apply(WorkflowAction::CopyExpire { at: Instant::now() })
    }

    pub fn clear(&mut self) {
        self.state.apply(WorkflowAction::Clear);
    }
}

#[cfg(test)]
#[path = "tests/workflow_tests.rs"]
mod tests;
