//! In-memory fixtures shared by the integration suites.
//!
//! Everything is generated with the same libraries the worker uses; the
//! tests ship no binary assets.

#![allow(dead_code)]

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};

/// A solid-color image encoded to `format`.
pub fn encoded_image(w: u32, h: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        w,
        h,
        image::Rgba([200, 40, 90, 255]),
    ));
    let mut buf = Cursor::new(Vec::new());
    match format {
        // JPEG rejects alpha
        ImageFormat::Jpeg => img.to_rgb8().write_to(&mut buf, format).unwrap(),
        _ => img.write_to(&mut buf, format).unwrap(),
    }
    buf.into_inner()
}

/// An ICO container with one square frame per entry in `sizes`.
pub fn multi_frame_ico(sizes: &[u32]) -> Vec<u8> {
    let mut dir = ico::IconDir::new(ico::ResourceType::Icon);
    for &size in sizes {
        let pixels = vec![0x7fu8; (size * size * 4) as usize];
        let icon = ico::IconImage::from_rgba_data(size, size, pixels);
        dir.add_entry(ico::IconDirEntry::encode(&icon).unwrap());
    }
    let mut buf = Vec::new();
    dir.write(&mut buf).unwrap();
    buf
}

/// An ICO container declaring zero entries.
pub fn empty_ico() -> Vec<u8> {
    let mut buf = Vec::new();
    ico::IconDir::new(ico::ResourceType::Icon)
        .write(&mut buf)
        .unwrap();
    buf
}

/// A minimal ANI container whose frames are complete single-image ICO files.
pub fn ani_with_frames(frame_sizes: &[u32]) -> Vec<u8> {
    fn chunk(id: &[u8; 4], data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(id);
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(data);
        if data.len() % 2 == 1 {
            out.push(0);
        }
        out
    }

    let mut anih = vec![0u8; 36];
    anih[0..4].copy_from_slice(&36u32.to_le_bytes());
    anih[4..8].copy_from_slice(&(frame_sizes.len() as u32).to_le_bytes());
    anih[8..12].copy_from_slice(&(frame_sizes.len() as u32).to_le_bytes());
    anih[28..32].copy_from_slice(&6u32.to_le_bytes());

    let mut fram = b"fram".to_vec();
    for &size in frame_sizes {
        fram.extend_from_slice(&chunk(b"icon", &multi_frame_ico(&[size])));
    }

    let mut body = b"ACON".to_vec();
    body.extend_from_slice(&chunk(b"anih", &anih));
    body.extend_from_slice(&chunk(b"LIST", &fram));

    let mut out = b"RIFF".to_vec();
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(&body);
    out
}

/// An ICNS family holding one square RGBA icon per entry in `sizes`.
pub fn icns_family(sizes: &[u32]) -> Vec<u8> {
    let mut family = icns::IconFamily::new();
    for &size in sizes {
        let pixels = vec![0x40u8; (size * size * 4) as usize];
        let icon = icns::Image::from_data(icns::PixelFormat::RGBA, size, size, pixels).unwrap();
        family.add_icon(&icon).unwrap();
    }
    let mut buf = Vec::new();
    family.write(&mut buf).unwrap();
    buf
}

/// Names of all entries in a zip buffer, in archive order.
pub fn zip_entry_names(buf: &[u8]) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(buf.to_vec())).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

/// Contents of the named entry in a zip buffer.
pub fn zip_entry(buf: &[u8], name: &str) -> Vec<u8> {
    use std::io::Read;
    let mut archive = zip::ZipArchive::new(Cursor::new(buf.to_vec())).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut contents = Vec::new();
    file.read_to_end(&mut contents).unwrap();
    contents
}
