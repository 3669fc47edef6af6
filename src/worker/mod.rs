mod handler;
mod messages;

pub use handler::{Worker, WorkerHandle};
pub use messages::{LoadPayload, RequestEnvelope, RequestPayload, WorkerResponse};
