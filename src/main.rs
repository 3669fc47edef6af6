// This is the stdio entry point for the converter worker: JSON lines on
// stdin/stdout bridge the host to the worker channels. lib.rs serves as the
// public API for consuming this crate as a library.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tracing::{info, warn};

use image_converter::{RequestEnvelope, Worker, WorkerConfig, WorkerResponse};

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        // stdout carries protocol messages; logs go to stderr
        .with_writer(std::io::stderr)
        .compact();

    subscriber.init();

    info!("=== Converter worker starting ===");

    let mut handle = Worker::spawn(WorkerConfig::default());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    // The readiness signal precedes any request
    if let Some(ready) = handle.recv().await {
        write_response(&mut stdout, &ready).await;
    }

    // The worker answers every request exactly once, in order, so the
    // bridge can run in lockstep: read a line, forward it, relay the answer.
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("stdin read failed: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match RequestEnvelope::from_json(&line) {
            Ok(envelope) => {
                if handle.send(envelope).await.is_err() {
                    break;
                }
                match handle.recv().await {
                    Some(response) => write_response(&mut stdout, &response).await,
                    None => break,
                }
            }
            Err(e) => {
                // Only unparseable JSON lands here; there is no id to echo
                let error = WorkerResponse::Error {
                    id: "0".to_string(),
                    error: e.to_string(),
                };
                write_response(&mut stdout, &error).await;
            }
        }
    }

    info!("Worker exiting");
}

async fn write_response(stdout: &mut Stdout, response: &WorkerResponse) {
    match serde_json::to_string(response) {
        Ok(json) => {
            if stdout.write_all(json.as_bytes()).await.is_err() {
                return;
            }
            let _ = stdout.write_all(b"\n").await;
            let _ = stdout.flush().await;
        }
        Err(e) => warn!("failed to serialize response: {e}"),
    }
}
