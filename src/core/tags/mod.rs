//! core/tags/mod.rs
//!
//! ID3 tag read/write utilities.
//!
//! Everything goes through the [`TagStore`] trait so the reconciliation
//! logic doesn't care which tagging library sits underneath.
//!
//! Public API:
//! - [`Id3File`] opens an MP3 and implements [`TagStore`] on top of the `id3` crate.
//! - [`read_snapshot`] turns a store into a [`TagSnapshot`].
//! - [`reconcile`] writes a snapshot back into a store (caller saves).
//! - [`import_cover`] re-encodes arbitrary image bytes into a cover.

mod art;
mod id3_file;
mod read;
mod util;
mod write;

#[cfg(test)]
pub(crate) mod memory;

pub use art::{DEFAULT_COVER_QUALITY, import_cover};
pub use id3_file::{Id3File, Id3Version, strip};
pub use read::read_snapshot;
pub use write::reconcile;

pub(crate) use util::parse_slash_pair_u32;

use super::error::Result;
use super::types::{CanonicalFields, CoverImage};

/// Frame id of attached pictures (v2.3/2.4).
pub const PICTURE_FRAME_ID: &str = "APIC";

/// Frame id of attached pictures in old v2.2 tags.
pub const LEGACY_PICTURE_FRAME_ID: &str = "PIC";

/// Decoded content of one frame, as far as this crate cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameValue {
    Text(String),
    Picture(CoverImage),
    /// Some other frame kind; we never write these.
    Other,
}

impl FrameValue {
    pub fn kind(&self) -> &'static str {
        match self {
            FrameValue::Text(_) => "text",
            FrameValue::Picture(_) => "picture",
            FrameValue::Other => "other",
        }
    }
}

/// What the editor needs from a tag container.
pub trait TagStore {
    fn canonical(&self) -> CanonicalFields;

    /// Empty strings clear the corresponding field.
    fn set_canonical(&mut self, fields: &CanonicalFields);

    /// All frames with this id, in tag order.
    fn frames(&self, id: &str) -> Vec<FrameValue>;

    fn add_frame(&mut self, id: &str, value: FrameValue) -> Result<()>;

    /// Returns how many frames were removed.
    fn remove_frames(&mut self, id: &str) -> usize;

    /// Commit the whole tag in one go.
    fn save(&mut self) -> Result<()>;
}
