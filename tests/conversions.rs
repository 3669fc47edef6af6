//! Conversion pipeline behavior, exercised through [`ImageConverter`].

mod common;

use image::ImageFormat;
use image_converter::{ConversionOutput, ConversionRequest, ImageConverter, WorkerConfig};

fn converter() -> ImageConverter {
    ImageConverter::new(&WorkerConfig::default())
}

fn request(from: &str, to: &str, file: Vec<u8>) -> ConversionRequest {
    ConversionRequest {
        source_format: from.to_string(),
        target_format: to.to_string(),
        file,
        compression_level: None,
        keep_metadata: true,
    }
}

#[tokio::test]
async fn single_conversion_preserves_pixel_dimensions() {
    let bmp = common::encoded_image(37, 21, ImageFormat::Bmp);
    let output = converter()
        .convert(request(".bmp", ".png", bmp))
        .await
        .unwrap();

    let ConversionOutput::Single(bytes) = output else {
        panic!("expected single-image output");
    };
    let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (37, 21));
}

#[tokio::test]
async fn jfif_target_is_treated_as_jpeg() {
    let png = common::encoded_image(10, 10, ImageFormat::Png);
    let output = converter()
        .convert(request("png", ".JFIF", png))
        .await
        .unwrap();

    let bytes = output.into_bytes();
    assert!(image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg).is_ok());
}

#[tokio::test]
async fn oversized_input_is_clamped_for_ico_targets() {
    let png = common::encoded_image(800, 500, ImageFormat::Png);
    let output = converter()
        .convert(request(".png", ".ico", png))
        .await
        .unwrap();

    let decoded =
        image::load_from_memory_with_format(&output.into_bytes(), ImageFormat::Ico).unwrap();
    assert!(decoded.width() <= 256 && decoded.height() <= 256);

    let expected_h = (f64::from(decoded.width()) * 500.0 / 800.0).round() as i64;
    assert!((i64::from(decoded.height()) - expected_h).abs() <= 1);
}

#[tokio::test]
async fn ani_frames_convert_into_an_archive() {
    let ani = common::ani_with_frames(&[16, 24]);
    let output = converter()
        .convert(request(".ani", ".png", ani))
        .await
        .unwrap();

    assert!(output.is_zip());
    let bytes = output.into_bytes();
    assert_eq!(common::zip_entry_names(&bytes), ["image0.png", "image1.png"]);

    let first = common::zip_entry(&bytes, "image0.png");
    let decoded = image::load_from_memory_with_format(&first, ImageFormat::Png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (16, 16));
}

#[tokio::test]
async fn icns_family_converts_into_an_archive() {
    let icns = common::icns_family(&[32]);
    let output = converter()
        .convert(request(".icns", ".png", icns))
        .await
        .unwrap();

    assert!(output.is_zip());
    let bytes = output.into_bytes();
    let names = common::zip_entry_names(&bytes);
    assert_eq!(names.len(), 1);
    assert_eq!(names[0], "image0.png");

    let entry = common::zip_entry(&bytes, "image0.png");
    let decoded = image::load_from_memory_with_format(&entry, ImageFormat::Png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (32, 32));
}

#[tokio::test]
async fn corrupt_icns_is_a_tagged_error() {
    let err = converter()
        .convert(request(".icns", ".png", b"garbage".to_vec()))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read ICNS"));
}

#[tokio::test]
async fn animated_gif_round_trips_as_a_single_output() {
    use image::codecs::gif::{GifDecoder, GifEncoder, Repeat};
    use image::{AnimationDecoder, Delay, Frame, RgbaImage};
    use std::io::Cursor;
    use std::time::Duration;

    let mut gif = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut gif);
        encoder.set_repeat(Repeat::Infinite).unwrap();
        for i in 0..3u32 {
            let buffer = RgbaImage::from_pixel(12, 12, image::Rgba([(i * 80) as u8, 0, 0, 255]));
            let frame = Frame::from_parts(
                buffer,
                0,
                0,
                Delay::from_saturating_duration(Duration::from_millis(80)),
            );
            encoder.encode_frames([frame]).unwrap();
        }
    }

    let output = converter()
        .convert(request(".gif", ".gif", gif))
        .await
        .unwrap();

    // Animated re-encode answers one buffer, never an archive
    let ConversionOutput::Single(bytes) = output else {
        panic!("expected single-image output");
    };
    let decoded = GifDecoder::new(Cursor::new(bytes.as_slice())).unwrap();
    assert_eq!(decoded.into_frames().collect_frames().unwrap().len(), 3);
}

#[tokio::test]
async fn gif_to_png_takes_the_single_image_path() {
    let gif = common::encoded_image(14, 14, ImageFormat::Gif);
    let output = converter()
        .convert(request(".gif", ".png", gif))
        .await
        .unwrap();
    assert!(!output.is_zip());
}

#[tokio::test]
async fn unsupported_source_format_is_rejected() {
    let err = converter()
        .convert(request(".fit", ".png", vec![0u8; 4]))
        .await
        .unwrap_err();
    // `.fit` normalizes to `.fits`, which this engine has no codec for
    assert!(err.to_string().contains("Unsupported image format"));
}

#[tokio::test]
async fn declared_source_format_mismatch_fails() {
    let png = common::encoded_image(8, 8, ImageFormat::Png);
    let err = converter()
        .convert(request(".jpeg", ".png", png))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to decode"));
}
