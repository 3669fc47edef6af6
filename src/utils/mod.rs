//! Shared utilities: error types and format canonicalization.

mod error;
pub mod formats;

pub use error::{ConverterError, ConverterResult};
pub use formats::{bare_extension, engine_format, is_animated_pair, is_icon_target, normalize_extension};
