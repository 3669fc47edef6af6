//! Core types for conversion requests, results, and worker configuration.

use serde::{Deserialize, Serialize};

/// One image conversion job.
///
/// Format strings arrive raw off the wire; the dispatcher canonicalizes both
/// to lowercase dotted extensions before any routing decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    /// Declared format of `file` (extension string, e.g. "png" or ".ICO")
    pub source_format: String,
    /// Requested output format
    pub target_format: String,
    /// Raw source image bytes
    pub file: Vec<u8>,
    /// Quality level (1-100) forwarded to the encoder when it supports one
    #[serde(default)]
    pub compression_level: Option<u8>,
    /// Whether source metadata should be retained in the output
    #[serde(default = "default_keep_metadata")]
    pub keep_metadata: bool,
}

fn default_keep_metadata() -> bool {
    true
}

/// Result of a conversion: one image, or a zip of several.
#[derive(Debug, Clone)]
pub enum ConversionOutput {
    /// A single converted image
    Single(Vec<u8>),
    /// A zip archive of converted images (multi-frame source containers)
    Archive(Vec<u8>),
}

impl ConversionOutput {
    /// True when the bytes are a zip archive rather than one image.
    pub fn is_zip(&self) -> bool {
        matches!(self, Self::Archive(_))
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Single(bytes) | Self::Archive(bytes) => bytes,
        }
    }
}

/// Worker tuning knobs.
///
/// Everything has a workable default; hosts only override what they measure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkerConfig {
    /// Maximum frame conversions running concurrently on the blocking pool
    pub max_parallel_frames: usize,
    /// Request/response channel depth
    pub channel_capacity: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            max_parallel_frames: 4,
            channel_capacity: 16,
        }
    }
}
