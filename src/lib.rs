// Module declarations in dependency order
pub mod core;
pub mod processing;
pub mod utils;
pub mod worker;

// Public exports for external consumers
pub use crate::core::{ConversionOutput, ConversionRequest, EngineState, WorkerConfig};
pub use crate::processing::ImageConverter;
pub use crate::utils::{ConverterError, ConverterResult};
pub use crate::worker::{LoadPayload, RequestEnvelope, RequestPayload, Worker, WorkerHandle, WorkerResponse};

// This library file is used as a public API for consuming this crate as a library.
// The actual worker entry point is in main.rs.
