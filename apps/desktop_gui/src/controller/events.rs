//! UI/backend events and error modeling for desktop GUI controller.

use client_core::ClipboardError;
use shared::error::{ErrorCode, ShortenError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Info(String),
    ShortenFinished {
        generation: u64,
        result: Result<String, ShortenError>,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Service,
    Transport,
    Configuration,
    Clipboard,
    Unknown,
}

impl From<ErrorCode> for UiErrorCategory {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::Validation => Self::Validation,
            ErrorCode::Service => Self::Service,
            ErrorCode::Transport => Self::Transport,
            ErrorCode::Configuration => Self::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Submit,
    Copy,
}

/// A problem shown in the status banner rather than the form's error line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Unknown,
            context,
            message: message.into(),
        }
    }

    pub fn from_shorten_error(context: UiErrorContext, err: &ShortenError) -> Self {
        Self {
            category: err.code().into(),
            context,
            message: err.to_string(),
        }
    }

    pub fn from_clipboard_error(err: &ClipboardError) -> Self {
        Self {
            category: UiErrorCategory::Clipboard,
            context: UiErrorContext::Copy,
            message: format!("Could not copy the short link: {}", err.0),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Service => "Service",
        UiErrorCategory::Transport => "Network",
        UiErrorCategory::Configuration => "Configuration",
        UiErrorCategory::Clipboard => "Clipboard",
        UiErrorCategory::Unknown => "Unexpected",
    }
}
