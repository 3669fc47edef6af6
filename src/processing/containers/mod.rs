//! Multi-image container extractors.
//!
//! Each adapter turns one container buffer into independent images (or raw
//! frame buffers) for the per-image converter:
//! - [`ico`]: Windows icon directories
//! - [`ani`]: Windows animated cursors (RIFF `ACON`)
//! - [`icns`]: Apple icon families

pub mod ani;
pub mod icns;
pub mod ico;
