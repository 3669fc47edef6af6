//! Thin adapter over the embedded image engine (the `image` crate).
//!
//! Decode, optional icon-size clamping, and encode for one image. Quality is
//! forwarded to the JPEG encoder; the remaining encoders in this engine take
//! no quality parameter. The engine decodes pixels only, so output never
//! carries source metadata regardless of the `keep_metadata` flag (the flag
//! is honored for protocol compatibility).

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::utils::{engine_format, is_icon_target, ConverterError, ConverterResult};

/// ICO frames larger than this are rejected by the encoder, so inputs are
/// downscaled to fit before encoding.
pub const ICON_SIZE_CAP: u32 = 256;

const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Per-image encoding options carried from the conversion request.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Quality level (1-100) when the target encoder supports one
    pub quality: Option<u8>,
    /// Retain source metadata (no-op for this engine; see module docs)
    pub keep_metadata: bool,
}

/// Decodes `buf` using the declared source format.
pub fn decode_image(buf: &[u8], source: &str) -> ConverterResult<DynamicImage> {
    let format = engine_format(source)?;
    image::load_from_memory_with_format(buf, format).map_err(|e| {
        ConverterError::processing(format!("Failed to decode {source} input: {e}"))
    })
}

/// Encodes one decoded image to the canonical target extension.
///
/// Applies the icon size clamp for `.ico` targets and the quality level when
/// one was supplied. Encoding failures propagate to the caller.
pub fn encode_image(
    img: DynamicImage,
    target: &str,
    opts: &EncodeOptions,
) -> ConverterResult<Vec<u8>> {
    let format = engine_format(target)?;

    let img = if is_icon_target(target) {
        clamp_icon_dimensions(img)
    } else {
        img
    };

    let mut buf = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg => {
            let quality = opts.quality.unwrap_or(DEFAULT_JPEG_QUALITY).clamp(1, 100);
            let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
            // JPEG carries no alpha channel
            img.to_rgb8()
                .write_with_encoder(encoder)
                .map_err(|e| ConverterError::processing(format!("JPEG encode failed: {e}")))?;
        }
        _ => {
            img.write_to(&mut buf, format).map_err(|e| {
                ConverterError::processing(format!("{target} encode failed: {e}"))
            })?;
        }
    }

    Ok(buf.into_inner())
}

/// Uniformly downscales `img` so both dimensions fit the icon cap.
///
/// scale = cap / max(w, h), each side rounded and floored at 1 px, which
/// keeps the aspect ratio within one pixel of the source.
fn clamp_icon_dimensions(img: DynamicImage) -> DynamicImage {
    let (w, h) = (img.width(), img.height());
    if w <= ICON_SIZE_CAP && h <= ICON_SIZE_CAP {
        return img;
    }

    let scale = f64::from(ICON_SIZE_CAP) / f64::from(w.max(h));
    let new_w = ((f64::from(w) * scale).round() as u32).max(1);
    let new_h = ((f64::from(h) * scale).round() as u32).max(1);

    debug!("icon clamp: {w}×{h} → {new_w}×{new_h}");
    img.resize_exact(new_w, new_h, FilterType::Lanczos3)
}
