//! The worker task: one loop serving conversion requests off a channel.
//!
//! Requests are handled sequentially; frame-level parallelism happens inside
//! the converter. Every error is caught here and answered as a tagged
//! `error` response carrying the request id — a failed request never goes
//! unanswered.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::core::{EngineState, WorkerConfig};
use crate::processing::ImageConverter;
use crate::utils::{ConverterError, ConverterResult};
use crate::worker::messages::{RequestEnvelope, RequestPayload, WorkerResponse};

/// Caller-side handle to a spawned worker.
pub struct WorkerHandle {
    requests: mpsc::Sender<RequestEnvelope>,
    responses: mpsc::Receiver<WorkerResponse>,
}

impl WorkerHandle {
    pub async fn send(&self, envelope: RequestEnvelope) -> ConverterResult<()> {
        self.requests
            .send(envelope)
            .await
            .map_err(|_| ConverterError::processing("worker is no longer running"))
    }

    pub async fn recv(&mut self) -> Option<WorkerResponse> {
        self.responses.recv().await
    }
}

/// The conversion worker: engine state plus the dispatch pipeline.
pub struct Worker {
    converter: ImageConverter,
    engine: EngineState,
}

impl Worker {
    /// Spawns the worker task and returns the caller's handle.
    ///
    /// The `ready` signal is emitted immediately and unconditionally, before
    /// — and independent of — engine initialization.
    pub fn spawn(config: WorkerConfig) -> WorkerHandle {
        let capacity = config.channel_capacity.max(1);
        let (request_tx, mut request_rx) = mpsc::channel::<RequestEnvelope>(capacity);
        let (response_tx, response_rx) = mpsc::channel::<WorkerResponse>(capacity);

        tokio::spawn(async move {
            let mut worker = Worker {
                converter: ImageConverter::new(&config),
                engine: EngineState::Uninitialized,
            };

            if response_tx
                .send(WorkerResponse::Ready { id: "0".to_string() })
                .await
                .is_err()
            {
                return;
            }

            while let Some(envelope) = request_rx.recv().await {
                let id = envelope.id;
                let response = match worker.handle(&id, envelope.payload).await {
                    Ok(response) => response,
                    Err(e) => {
                        warn!("request {id} failed: {e}");
                        WorkerResponse::Error {
                            id,
                            error: e.to_string(),
                        }
                    }
                };
                if response_tx.send(response).await.is_err() {
                    break;
                }
            }
            debug!("request channel closed, worker shutting down");
        });

        WorkerHandle {
            requests: request_tx,
            responses: response_rx,
        }
    }

    async fn handle(
        &mut self,
        id: &str,
        payload: RequestPayload,
    ) -> ConverterResult<WorkerResponse> {
        match payload {
            RequestPayload::Load(load) => {
                self.engine.load(&load.engine)?;
                Ok(WorkerResponse::Loaded { id: id.to_string() })
            }
            RequestPayload::Convert(request) => {
                self.engine.require_ready()?;
                let output = self.converter.convert(request).await?;
                let zip = output.is_zip();
                Ok(WorkerResponse::Finished {
                    id: id.to_string(),
                    output: output.into_bytes(),
                    zip,
                })
            }
            RequestPayload::Unknown(kind) => Err(ConverterError::UnsupportedRequest(kind)),
            RequestPayload::Invalid(reason) => Err(ConverterError::InvalidPayload(reason)),
        }
    }
}
