//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext};

/// Queues `cmd` for the backend worker. On failure returns the banner to show.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), UiError> {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err(UiError::from_message(
            UiErrorContext::Submit,
            "UI command queue is full; please retry",
        )),
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend worker is gone");
            Err(UiError::from_message(
                UiErrorContext::BackendStartup,
                "Backend worker disconnected (possible startup/runtime failure); restart the app",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;

    use super::*;

    #[test]
    fn reports_full_queue() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        dispatch_backend_command(&cmd_tx, BackendCommand::Cancel).expect("first fits");
        let err = dispatch_backend_command(&cmd_tx, BackendCommand::Cancel).expect_err("full");
        assert!(err.message().contains("queue is full"));
    }

    #[test]
    fn reports_disconnected_worker() {
        let (cmd_tx, cmd_rx) = bounded(1);
        drop(cmd_rx);
        let err = dispatch_backend_command(&cmd_tx, BackendCommand::Cancel).expect_err("gone");
        assert_eq!(err.context(), UiErrorContext::BackendStartup);
    }
}
