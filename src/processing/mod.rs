//! Image conversion pipeline.
//!
//! # Architecture
//!
//! - [`ImageConverter`]: Dispatches a request to one of five conversion paths
//!   and drives bounded per-frame parallelism.
//! - [`engine`]: Decode/encode adapter over the embedded image engine,
//!   including the icon size clamp.
//! - [`containers`]: ICO, ANI, and ICNS extractors that turn one container
//!   buffer into independent frames.
//! - [`animated`]: GIF/WebP frame-sequence re-encoding.
//! - [`archive`]: In-memory zip assembly for multi-image results.

pub mod animated;
pub mod archive;
pub mod containers;
mod converter;
pub mod engine;

pub use converter::ImageConverter;
