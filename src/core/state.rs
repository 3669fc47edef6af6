//! Engine lifecycle state.
//!
//! The engine must be loaded exactly once before the first conversion. The
//! lifecycle is an explicit state machine rather than a bare boolean so that
//! pre-init rejection and failed loads stay distinguishable and testable.

use tracing::debug;
use crate::utils::{ConverterError, ConverterResult};

/// Lifecycle of the embedded image engine, held by the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineState {
    /// No `load` request has been seen yet
    Uninitialized,
    /// A `load` request is being processed
    Initializing,
    /// The engine accepted its payload and is ready to convert
    Ready,
    /// The last `load` attempt failed; the reason is kept for diagnostics
    Failed(String),
}

impl EngineState {
    /// Errors unless the engine has finished loading successfully.
    pub fn require_ready(&self) -> ConverterResult<()> {
        match self {
            Self::Ready => Ok(()),
            Self::Failed(reason) => {
                debug!("conversion rejected, engine load previously failed: {reason}");
                Err(ConverterError::NotInitialized)
            }
            Self::Uninitialized | Self::Initializing => Err(ConverterError::NotInitialized),
        }
    }

    /// Validates the engine payload from a `load` request and advances to
    /// `Ready`, or records the failure and returns it.
    ///
    /// The native engine is linked in and needs no bytecode, but the protocol
    /// keeps the handshake: an empty payload is treated the same way the
    /// original treated a missing module.
    pub fn load(&mut self, engine: &[u8]) -> ConverterResult<()> {
        *self = Self::Initializing;

        if engine.is_empty() {
            let reason = "empty engine payload".to_string();
            *self = Self::Failed(reason.clone());
            return Err(ConverterError::initialization(reason));
        }

        debug!("image engine initialized ({} payload bytes)", engine.len());
        *self = Self::Ready;
        Ok(())
    }
}
