//! core/tags/art.rs
//! Cover art: reading the embedded picture, and normalizing new ones.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, load_from_memory};

use super::{FrameValue, LEGACY_PICTURE_FRAME_ID, PICTURE_FRAME_ID, TagStore};
use crate::core::error::Result;
use crate::core::types::CoverImage;

/// New covers are always stored as JPEG.
pub const COVER_MIME_TYPE: &str = "image/jpeg";

pub const DEFAULT_COVER_QUALITY: u8 = 90;

/// First embedded picture that looks like an image (APIC, or PIC in v2.2 tags).
///
/// Never fails: a frame we can't make sense of is logged and skipped,
/// the rest of the tag is still usable.
pub fn read_cover(store: &impl TagStore) -> Option<CoverImage> {
    for id in [PICTURE_FRAME_ID, LEGACY_PICTURE_FRAME_ID] {
        for frame in store.frames(id) {
            match frame {
                FrameValue::Picture(cover) => match image::guess_format(&cover.data) {
                    Ok(_) => return Some(cover),
                    Err(e) => log::warn!(
                        "ignoring {id} frame ({}, {} bytes): {e}",
                        cover.mime_type,
                        cover.data.len()
                    ),
                },
                other => log::warn!("ignoring unreadable {id} frame ({})", other.kind()),
            }
        }
    }
    None
}

/// Decode any supported image and re-encode it as a JPEG cover.
///
/// Alpha is dropped (JPEG has none).
pub fn import_cover(bytes: &[u8], quality: u8) -> Result<CoverImage> {
    let decoded = load_from_memory(bytes)?;
    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());

    let mut data = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut data, quality.clamp(1, 100));
    rgb.write_with_encoder(encoder)?;

    log::debug!(
        "imported cover {}x{} ({} -> {} bytes)",
        rgb.width(),
        rgb.height(),
        bytes.len(),
        data.len()
    );

    Ok(CoverImage {
        mime_type: COVER_MIME_TYPE.to_string(),
        data,
    })
}
