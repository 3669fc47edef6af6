//! Conversion dispatch.
//!
//! [`ImageConverter`] inspects the normalized source/target pair and routes
//! the request through one of five paths: ICO frame splitting, ANI frame
//! parsing, ICNS extraction, animated GIF/WebP re-encoding, or plain
//! single-image conversion. Multi-frame paths fan out over the blocking
//! thread pool, bounded by a semaphore, and fail as a whole when any frame
//! fails.

use std::sync::Arc;

use image::DynamicImage;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::core::{ConversionOutput, ConversionRequest, WorkerConfig};
use crate::processing::engine::EncodeOptions;
use crate::processing::{animated, archive, containers, engine};
use crate::utils::{is_animated_pair, normalize_extension, ConverterError, ConverterResult};

/// Routes conversion requests and drives per-frame parallelism.
#[derive(Clone)]
pub struct ImageConverter {
    frame_permits: Arc<Semaphore>,
}

impl ImageConverter {
    pub fn new(config: &WorkerConfig) -> Self {
        Self {
            frame_permits: Arc::new(Semaphore::new(config.max_parallel_frames.max(1))),
        }
    }

    /// Converts one request to a single buffer or a zip archive.
    pub async fn convert(&self, request: ConversionRequest) -> ConverterResult<ConversionOutput> {
        let from = normalize_extension(&request.source_format);
        let to = normalize_extension(&request.target_format);
        let opts = EncodeOptions {
            quality: request.compression_level,
            keep_metadata: request.keep_metadata,
        };
        debug!("convert {from} → {to} ({} input bytes)", request.file.len());

        match from.as_str() {
            ".ico" => {
                let frames = containers::ico::split_frames(&request.file)?;
                self.archive_frames(frames, &to, &opts).await
            }
            ".ani" => {
                let parsed = containers::ani::parse(&request.file)?;
                if let Some(header) = parsed.header {
                    debug!(
                        "ANI: {} frames, {} steps, rate {}/60 s",
                        header.num_frames, header.num_steps, header.display_rate
                    );
                }
                let mut frames = Vec::with_capacity(parsed.frames.len());
                for frame_buf in &parsed.frames {
                    // Each stored frame is a complete ICO/CUR file
                    frames.push(containers::ico::decode_frame(frame_buf)?);
                }
                self.archive_frames(frames, &to, &opts).await
            }
            ".icns" => {
                let images = containers::icns::extract_images(&request.file)?;
                self.archive_frames(images, &to, &opts).await
            }
            _ if is_animated_pair(&from, &to) => {
                let file = request.file;
                let (from, to) = (from.clone(), to.clone());
                let out = tokio::task::spawn_blocking(move || {
                    animated::reencode(&file, &from, &to)
                })
                .await
                .map_err(|e| ConverterError::processing(format!("Task panicked: {e}")))??;
                Ok(ConversionOutput::Single(out))
            }
            _ => {
                let file = request.file;
                let (from, to) = (from.clone(), to.clone());
                let out = tokio::task::spawn_blocking(move || {
                    let img = engine::decode_image(&file, &from)?;
                    engine::encode_image(img, &to, &opts)
                })
                .await
                .map_err(|e| ConverterError::processing(format!("Task panicked: {e}")))??;
                Ok(ConversionOutput::Single(out))
            }
        }
    }

    /// Converts a frame collection and packs the results into a zip.
    async fn archive_frames(
        &self,
        frames: Vec<DynamicImage>,
        to: &str,
        opts: &EncodeOptions,
    ) -> ConverterResult<ConversionOutput> {
        let converted = self.convert_frames(frames, to, opts).await?;
        Ok(ConversionOutput::Archive(archive::build_zip(converted, to)?))
    }

    /// Fans frame conversions out over the blocking pool and awaits them all.
    ///
    /// Every task is issued and every handle awaited before a failure is
    /// reported, so no frame conversion outlives the request; the first
    /// failure fails the whole request.
    async fn convert_frames(
        &self,
        frames: Vec<DynamicImage>,
        to: &str,
        opts: &EncodeOptions,
    ) -> ConverterResult<Vec<Vec<u8>>> {
        let total = frames.len();
        let mut handles = Vec::with_capacity(total);

        for (index, img) in frames.into_iter().enumerate() {
            let permit = Arc::clone(&self.frame_permits).acquire_owned().await?;
            let to = to.to_string();
            let opts = opts.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                let _permit = permit;
                engine::encode_image(img, &to, &opts).map_err(|e| {
                    warn!("frame {index}/{total} conversion failed: {e}");
                    e
                })
            }));
        }

        let mut converted = Vec::with_capacity(total);
        let mut first_error = None;
        for handle in handles {
            match handle.await {
                Ok(Ok(bytes)) => converted.push(bytes),
                Ok(Err(e)) => first_error = first_error.or(Some(e)),
                Err(e) => {
                    first_error = first_error
                        .or_else(|| Some(ConverterError::processing(format!("Frame task panicked: {e}"))))
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(converted),
        }
    }
}
