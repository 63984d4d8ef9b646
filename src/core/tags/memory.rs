//! core/tags/memory.rs
//! Test helpers: an in-memory [`TagStore`] and throwaway MP3 files.

use std::io::Write;

use tempfile::NamedTempFile;

use super::util::is_valid_frame_id;
use super::{FrameValue, TagStore};
use crate::core::error::{Error, Result};
use crate::core::types::CanonicalFields;

/// A frame list plus canonical fields, no file behind it.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    pub canonical: CanonicalFields,
    pub frames: Vec<(String, FrameValue)>,
    pub saves: usize,
}

impl MemoryStore {
    pub(crate) fn count(&self, id: &str) -> usize {
        self.frames.iter().filter(|(fid, _)| fid == id).count()
    }
}

impl TagStore for MemoryStore {
    fn canonical(&self) -> CanonicalFields {
        self.canonical.clone()
    }

    fn set_canonical(&mut self, fields: &CanonicalFields) {
        self.canonical = fields.clone();
    }

    fn frames(&self, id: &str) -> Vec<FrameValue> {
        self.frames
            .iter()
            .filter(|(fid, _)| fid == id)
            .map(|(_, v)| v.clone())
            .collect()
    }

    fn add_frame(&mut self, id: &str, value: FrameValue) -> Result<()> {
        if !is_valid_frame_id(id) {
            return Err(Error::InvalidFrameId(id.to_string()));
        }
        self.frames.push((id.to_string(), value));
        Ok(())
    }

    fn remove_frames(&mut self, id: &str) -> usize {
        let before = self.frames.len();
        self.frames.retain(|(fid, _)| fid != id);
        before - self.frames.len()
    }

    fn save(&mut self) -> Result<()> {
        self.saves += 1;
        Ok(())
    }
}

/// A temp file with an `.mp3` name and a few bytes of fake MPEG audio.
/// No tag, so the first write has to insert one.
pub(crate) fn fake_mp3() -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("sonora-")
        .suffix(".mp3")
        .tempfile()
        .unwrap();
    let mut audio = vec![0xFF, 0xFB, 0x90, 0x64];
    audio.resize(417, 0);
    file.write_all(&audio).unwrap();
    file.flush().unwrap();
    file
}

/// A tiny PNG, decodable by the `image` crate.
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x * 40) as u8, (y * 40) as u8, 128, 255])
    });
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}
