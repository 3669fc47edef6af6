//! ANI (Windows animated cursor) container parsing.
//!
//! An ANI file is a RIFF form of type `ACON`: an `anih` header chunk with
//! frame counts and timing, and a `LIST`/`fram` block whose `icon` chunks
//! each hold a complete ICO/CUR file for one frame. This parser collects the
//! raw frame buffers and the header; frame pixel decoding is left to the
//! ICO splitter.

use crate::utils::{ConverterError, ConverterResult};

/// Fields of the `anih` header chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AniHeader {
    /// Number of stored frames
    pub num_frames: u32,
    /// Number of animation steps (>= frames when a `seq ` chunk is present)
    pub num_steps: u32,
    /// Default per-step display rate in 1/60ths of a second
    pub display_rate: u32,
}

/// A parsed ANI container: header plus raw per-frame ICO buffers.
#[derive(Debug, Clone)]
pub struct AniFile {
    pub header: Option<AniHeader>,
    pub frames: Vec<Vec<u8>>,
}

const ANIH_SIZE: usize = 36;

/// Parses an ANI buffer. Any structural violation is a hard error.
pub fn parse(buf: &[u8]) -> ConverterResult<AniFile> {
    if buf.len() < 12 || &buf[0..4] != b"RIFF" || &buf[8..12] != b"ACON" {
        return Err(ConverterError::container(
            "Failed to parse ANI -- not a RIFF ACON file",
        ));
    }

    let mut header = None;
    let mut frames = Vec::new();

    let mut offset = 12;
    while offset < buf.len() {
        let (id, data, next) = read_chunk(buf, offset)?;
        match id {
            b"anih" => header = Some(parse_header(data)?),
            b"LIST" if data.len() >= 4 && &data[0..4] == b"fram" => {
                collect_icon_chunks(&data[4..], &mut frames)?;
            }
            // seq, rate, INFO and vendor chunks carry no pixel data
            _ => {}
        }
        offset = next;
    }

    Ok(AniFile { header, frames })
}

fn parse_header(data: &[u8]) -> ConverterResult<AniHeader> {
    if data.len() < ANIH_SIZE {
        return Err(ConverterError::container(
            "Failed to parse ANI -- truncated anih header",
        ));
    }
    Ok(AniHeader {
        num_frames: read_u32(data, 4),
        num_steps: read_u32(data, 8),
        display_rate: read_u32(data, 28),
    })
}

fn collect_icon_chunks(list: &[u8], frames: &mut Vec<Vec<u8>>) -> ConverterResult<()> {
    let mut offset = 0;
    while offset < list.len() {
        let (id, data, next) = read_chunk(list, offset)?;
        if id == b"icon" {
            frames.push(data.to_vec());
        }
        offset = next;
    }
    Ok(())
}

/// Reads the chunk starting at `offset`, returning its id, payload, and the
/// word-aligned offset of the next chunk.
fn read_chunk(buf: &[u8], offset: usize) -> ConverterResult<(&[u8; 4], &[u8], usize)> {
    if offset + 8 > buf.len() {
        return Err(ConverterError::container(
            "Failed to parse ANI -- truncated chunk header",
        ));
    }
    let id: &[u8; 4] = buf[offset..offset + 4].try_into().expect("4-byte slice");
    let size = read_u32(buf, offset + 4) as usize;
    let start = offset + 8;
    let end = start.checked_add(size).filter(|&e| e <= buf.len()).ok_or_else(|| {
        ConverterError::container("Failed to parse ANI -- chunk overruns file")
    })?;

    // RIFF chunks are word-aligned: odd sizes are followed by a pad byte
    let next = end + (size & 1);
    Ok((id, &buf[start..end], next))
}

fn read_u32(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(buf[offset..offset + 4].try_into().expect("4-byte slice"))
}
