//! Animated GIF/WebP re-encoding.
//!
//! Decodes the full frame sequence with per-frame delays and re-encodes it
//! as one animated output. GIF output uses the engine's encoder; animated
//! WebP needs a dedicated encoder fed cumulative frame timestamps.

use std::io::Cursor;

use image::codecs::gif::{GifDecoder, GifEncoder, Repeat};
use image::codecs::webp::WebPDecoder;
use image::{AnimationDecoder, Frame};
use tracing::debug;

use crate::utils::{ConverterError, ConverterResult};

/// Re-encodes an animated buffer from one animation-capable format to
/// another, preserving frame order and timing.
pub fn reencode(buf: &[u8], from: &str, to: &str) -> ConverterResult<Vec<u8>> {
    let frames = decode_frames(buf, from)?;
    if frames.is_empty() {
        return Err(ConverterError::processing(
            "animated source contained no frames",
        ));
    }
    debug!("re-encoding {} animation frames {from} → {to}", frames.len());

    match to {
        ".gif" => encode_gif(frames),
        ".webp" => encode_webp(frames),
        other => Err(ConverterError::format(format!(
            "not an animated target format: {other}"
        ))),
    }
}

fn decode_frames(buf: &[u8], from: &str) -> ConverterResult<Vec<Frame>> {
    let frames = match from {
        ".gif" => GifDecoder::new(Cursor::new(buf))
            .map_err(|e| ConverterError::processing(format!("Failed to decode GIF: {e}")))?
            .into_frames(),
        ".webp" => WebPDecoder::new(Cursor::new(buf))
            .map_err(|e| ConverterError::processing(format!("Failed to decode WebP: {e}")))?
            .into_frames(),
        other => {
            return Err(ConverterError::format(format!(
                "not an animated source format: {other}"
            )))
        }
    };

    frames
        .collect_frames()
        .map_err(|e| ConverterError::processing(format!("Failed to collect frames: {e}")))
}

fn encode_gif(frames: Vec<Frame>) -> ConverterResult<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut out);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| ConverterError::processing(format!("GIF encode failed: {e}")))?;
        encoder
            .encode_frames(frames)
            .map_err(|e| ConverterError::processing(format!("GIF encode failed: {e}")))?;
    }
    Ok(out)
}

fn encode_webp(frames: Vec<Frame>) -> ConverterResult<Vec<u8>> {
    let (width, height) = frames[0].buffer().dimensions();
    let mut encoder = webp_animation::Encoder::new((width, height))
        .map_err(|e| ConverterError::processing(format!("WebP encode failed: {e:?}")))?;

    let mut timestamp_ms: i32 = 0;
    for frame in &frames {
        if frame.buffer().dimensions() != (width, height) {
            return Err(ConverterError::processing(
                "animated WebP frames must share one canvas size",
            ));
        }
        encoder
            .add_frame(frame.buffer().as_raw(), timestamp_ms)
            .map_err(|e| ConverterError::processing(format!("WebP encode failed: {e:?}")))?;
        timestamp_ms += frame_delay_ms(frame);
    }

    let data = encoder
        .finalize(timestamp_ms)
        .map_err(|e| ConverterError::processing(format!("WebP encode failed: {e:?}")))?;
    Ok(data.to_vec())
}

fn frame_delay_ms(frame: &Frame) -> i32 {
    let (numer, denom) = frame.delay().numer_denom_ms();
    if denom == 0 {
        return 100;
    }
    // The muxer rejects zero-length frames
    ((numer / denom) as i32).max(1)
}
