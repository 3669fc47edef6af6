//! Extension normalization and engine format resolution.
//!
//! Conversion requests carry raw extension strings (possibly missing the
//! leading dot, mixed case, or a known alias). Everything downstream of the
//! dispatcher works on the canonical `.<lowercase>` form produced here.

use image::ImageFormat;
use crate::utils::{ConverterError, ConverterResult};

/// Alias table applied after lowercasing: both sides are canonical dotted
/// extensions. JFIF files are JPEG payloads; `.fit` is the short FITS suffix.
const ALIASES: &[(&str, &str)] = &[(".jfif", ".jpeg"), (".fit", ".fits")];

/// Canonicalizes a raw extension string to `.<lowercase-extension>`.
///
/// Idempotent: feeding the output back in returns it unchanged.
pub fn normalize_extension(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    let dotted = if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    };

    for (alias, canonical) in ALIASES {
        if dotted == *alias {
            return (*canonical).to_string();
        }
    }
    dotted
}

/// Returns the dot-less extension used for archive entry names (`.png` → `png`).
pub fn bare_extension(canonical: &str) -> &str {
    canonical.strip_prefix('.').unwrap_or(canonical)
}

/// Resolves a canonical dotted extension to the engine's format enum.
///
/// Errors with a `Format` variant when the engine has no codec for the
/// extension (e.g. `.fits`, which the original engine handled but this one
/// does not).
pub fn engine_format(canonical: &str) -> ConverterResult<ImageFormat> {
    ImageFormat::from_extension(bare_extension(canonical)).ok_or_else(|| {
        ConverterError::format(format!("Unsupported image format: {canonical}"))
    })
}

/// True when `canonical` names the Windows icon container.
pub fn is_icon_target(canonical: &str) -> bool {
    canonical == ".ico"
}

/// True when both sides of a conversion are animation-capable formats that
/// the engine can re-encode as a frame sequence.
pub fn is_animated_pair(from: &str, to: &str) -> bool {
    matches!(from, ".gif" | ".webp") && matches!(to, ".gif" | ".webp")
}
