//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{HttpShortenService, ServiceSettings, ShortenService};
use crossbeam_channel::{Receiver, Sender};
use shared::error::ShortenError;
use tokio::task::JoinHandle;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    settings: &ServiceSettings,
) -> thread::JoinHandle<()> {
    let service = HttpShortenService::from_settings(settings).map(|service| {
        let _ = ui_tx.try_send(UiEvent::Info(format!(
            "Using shortening service at {}",
            service.endpoint()
        )));
        Arc::new(service) as Arc<dyn ShortenService>
    });
    if let Err(err) = &service {
        tracing::warn!(error = %err, "shortening service is not configured");
        let _ = ui_tx.try_send(UiEvent::Error(UiError::from_shorten_error(
            UiErrorContext::BackendStartup,
            err,
        )));
    }
    spawn_backend_thread(cmd_rx, ui_tx, service)
}

/// Runs the worker until the UI drops its command sender.
///
/// Only one request is in flight: a new command aborts the previous task.
pub fn spawn_backend_thread(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    service: Result<Arc<dyn ShortenService>, ShortenError>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let mut in_flight: Option<JoinHandle<()>> = None;
        while let Ok(cmd) = cmd_rx.recv() {
            if let Some(task) = in_flight.take() {
                task.abort();
            }
            match cmd {
                BackendCommand::Shorten { generation, url } => match &service {
                    Ok(service) => {
                        let service = Arc::clone(service);
                        let ui_tx = ui_tx.clone();
                        in_flight = Some(runtime.spawn(async move {
                            let result = service.shorten(&url).await;
                            // Blocks until the UI drains; loading only clears on this event.
                            if ui_tx
                                .send(UiEvent::ShortenFinished { generation, result })
                                .is_err()
                            {
                                tracing::warn!(generation, "ui event queue closed; dropping result");
                            }
                        }));
                    }
                    Err(err) => {
                        let _ = ui_tx.send(UiEvent::ShortenFinished {
                            generation,
                            result: Err(err.clone()),
                        });
                    }
                },
                BackendCommand::Cancel => {
                    tracing::debug!("cancelled in-flight shortening request");
                }
            }
        }

        if let Some(task) = in_flight.take() {
            task.abort();
        }
        tracing::debug!("ui command channel closed; backend worker exiting");
    })
}
