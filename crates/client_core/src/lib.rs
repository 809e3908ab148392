use tracing::debug;
use url::Url;

use shared::error::ShortenError;

pub mod config;
pub mod service;
pub mod state;
pub mod workflow;

pub use config::{load_settings, ServiceSettings};
pub use service::{HttpShortenService, ShortenService};
pub use state::{Submission, WorkflowAction, WorkflowState};
pub use workflow::{copy_result, ClipboardError, ClipboardSink, ShortenWorkflow};

/// Checks a user-supplied long URL before anything is sent.
///
/// Only the zero-length string counts as empty; whitespace is left to the URL
/// parser, which rejects it.
pub fn validate_long_url(input: &str) -> Result<Url, ShortenError> {
    if input.is_empty() {
        return Err(ShortenError::EmptyInput);
    }
    Url::parse(input).map_err(|err| {
        debug!(error = %err, "rejected long url");
        ShortenError::InvalidUrlFormat
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
