//! ICNS (Apple icon family) extraction.
//!
//! The family header records each element's icon type, and with it the pixel
//! format, so every element decodes directly; no trial-and-error over pixel
//! layouts is needed. Elements the parser cannot decode (unknown or
//! mask-only types) are skipped with a warning.

use std::io::Cursor;

use image::DynamicImage;
use tracing::warn;

use crate::utils::{ConverterError, ConverterResult};

/// Extracts every decodable image from an ICNS buffer, largest types in
/// family order. A family that fails to parse is a hard error; an empty
/// result is not.
pub fn extract_images(buf: &[u8]) -> ConverterResult<Vec<DynamicImage>> {
    let family = icns::IconFamily::read(Cursor::new(buf))
        .map_err(|e| ConverterError::container(format!("Failed to read ICNS -- {e}")))?;

    let mut images = Vec::new();
    for icon_type in family.available_icons() {
        match family.get_icon_with_type(icon_type) {
            Ok(icon) => {
                // Route through PNG so the engine owns all pixel-layout handling
                let mut png = Vec::new();
                if let Err(e) = icon.write_png(&mut png) {
                    warn!("skipping ICNS element {icon_type:?}: {e}");
                    continue;
                }
                match image::load_from_memory(&png) {
                    Ok(img) => images.push(img),
                    Err(e) => warn!("skipping ICNS element {icon_type:?}: {e}"),
                }
            }
            Err(e) => warn!("skipping ICNS element {icon_type:?}: {e}"),
        }
    }

    Ok(images)
}
