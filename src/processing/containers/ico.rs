//! ICO/CUR container splitting.
//!
//! The icon directory exposes an explicit entry count, so frames are probed
//! by index rather than decoded until failure. Individual entries that fail
//! to decode are skipped; a container with zero decodable frames is a hard
//! parse error.

use std::io::Cursor;

use image::{DynamicImage, RgbaImage};
use tracing::warn;

use crate::utils::{ConverterError, ConverterResult};

/// Splits an ICO/CUR buffer into its embedded frames, in directory order.
pub fn split_frames(buf: &[u8]) -> ConverterResult<Vec<DynamicImage>> {
    let dir = ico::IconDir::read(Cursor::new(buf))
        .map_err(|e| ConverterError::container(format!("Failed to read ICO -- {e}")))?;

    let mut frames = Vec::with_capacity(dir.entries().len());
    for (index, entry) in dir.entries().iter().enumerate() {
        match entry.decode() {
            Ok(icon) => frames.push(to_dynamic_image(&icon)?),
            Err(e) => warn!("skipping undecodable ICO frame {index}: {e}"),
        }
    }

    if frames.is_empty() {
        return Err(ConverterError::container(
            "Failed to read ICO -- no images found inside?",
        ));
    }
    Ok(frames)
}

/// Decodes one standalone ICO-style frame buffer (as found inside an ANI
/// container) into its first embedded image.
pub fn decode_frame(buf: &[u8]) -> ConverterResult<DynamicImage> {
    let dir = ico::IconDir::read(Cursor::new(buf))
        .map_err(|e| ConverterError::container(format!("Failed to decode ANI frame -- {e}")))?;

    let entry = dir.entries().first().ok_or_else(|| {
        ConverterError::container("Failed to decode ANI frame -- empty icon directory")
    })?;
    let icon = entry
        .decode()
        .map_err(|e| ConverterError::container(format!("Failed to decode ANI frame -- {e}")))?;
    to_dynamic_image(&icon)
}

fn to_dynamic_image(icon: &ico::IconImage) -> ConverterResult<DynamicImage> {
    RgbaImage::from_raw(icon.width(), icon.height(), icon.rgba_data().to_vec())
        .map(DynamicImage::ImageRgba8)
        .ok_or_else(|| ConverterError::processing("ICO frame pixel buffer has wrong length"))
}
