//! Form controller: feeds user actions and backend events into the shared workflow reducer.

use client_core::{copy_result, ClipboardSink, WorkflowAction, WorkflowState};
use crossbeam_channel::Sender;
use tokio::time::Instant;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

pub struct FormController {
    state: WorkflowState,
    banner: Option<UiError>,
    status: String,
    cmd_tx: Sender<BackendCommand>,
}

impl FormController {
    pub fn new(cmd_tx: Sender<BackendCommand>) -> Self {
        Self {
            state: WorkflowState::new(),
            banner: None,
            status: String::new(),
            cmd_tx,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn banner(&self) -> Option<&UiError> {
        self.banner.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn edit(&mut self, text: String) {
        self.state.apply(WorkflowAction::Edit(text));
    }

    pub fn submit(&mut self) {
        if self.state.is_loading() {
            return;
        }
        let Ok(submission) = self.state.begin_submission() else {
            return;
        };
        let generation = submission.generation;
        let cmd = BackendCommand::Shorten {
            generation,
            url: submission.url,
        };
        if let Err(banner) = dispatch_backend_command(&self.cmd_tx, cmd) {
            self.state.apply(WorkflowAction::Cancel);
            self.banner = Some(banner);
        }
    }

    pub fn clear(&mut self) {
        if self.state.is_loading() {
            if let Err(banner) = dispatch_backend_command(&self.cmd_tx, BackendCommand::Cancel) {
                self.banner = Some(banner);
            }
        }
        self.state.apply(WorkflowAction::Clear);
        self.dismiss_copy_banner();
    }

    pub fn copy(&mut self, clipboard: &mut dyn ClipboardSink, now: Instant) {
        match copy_result(&mut self.state, clipboard, now) {
            Ok(_) => self.dismiss_copy_banner(),
            Err(err) => self.banner = Some(UiError::from_clipboard_error(&err)),
        }
    }

    fn dismiss_copy_banner(&mut self) {
        if self
            .banner
            .as_ref()
            .is_some_and(|banner| banner.context() == UiErrorContext::Copy)
        {
            self.banner = None;
        }
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.state.is_copied(now)
    }

    /// Resolves time-based transitions. Call once per frame.
    pub fn tick(&mut self, now: Instant) {
        self.state.apply(WorkflowAction::CopyExpire { at: now });
    }

    /// Next instant at which the view changes without input, if any.
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.state.copied_deadline()
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => self.status = message,
            UiEvent::ShortenFinished { generation, result } => {
                self.state.complete(generation, result);
            }
            UiEvent::Error(err) => self.banner = Some(err),
        }
    }
}
