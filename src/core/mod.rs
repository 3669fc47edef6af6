//! Core types and worker state.
//!
//! This module contains the fundamental types used throughout the worker:
//! - [`ConversionRequest`]: One image conversion job
//! - [`ConversionOutput`]: A single image or a zip of several
//! - [`WorkerConfig`]: Worker tuning knobs
//! - [`EngineState`]: Lifecycle of the embedded image engine

mod state;
mod types;

pub use state::EngineState;
pub use types::{ConversionOutput, ConversionRequest, WorkerConfig};
