//! Zip assembly for multi-image results.
//!
//! Multi-frame conversions answer with one contiguous zip buffer; nothing is
//! streamed. Entries follow the `image<index>.<ext>` convention.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::utils::{bare_extension, ConverterResult};

/// Builds the archive entry name for frame `index` with the canonical
/// dotted target extension.
pub fn entry_name(index: usize, target: &str) -> String {
    format!("image{index}.{}", bare_extension(target))
}

/// Packs converted frames into a single in-memory zip buffer, preserving
/// frame order.
pub fn build_zip(frames: Vec<Vec<u8>>, target: &str) -> ConverterResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (index, bytes) in frames.iter().enumerate() {
        writer.start_file(entry_name(index, target), options)?;
        writer.write_all(bytes)?;
    }

    Ok(writer.finish()?.into_inner())
}
