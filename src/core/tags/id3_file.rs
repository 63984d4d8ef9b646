//! core/tags/id3_file.rs
//! [`TagStore`] backed by the `id3` crate.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use id3::frame::{Comment, Content, Picture, PictureType};
use id3::{Frame, Tag, TagLike, Version};

use super::util::{is_valid_frame_id, join_text_values};
use super::{FrameValue, PICTURE_FRAME_ID, TagStore};
use crate::core::error::{Error, Result};
use crate::core::library::ensure_supported;
use crate::core::types::{CanonicalFields, CoverImage};

/// Which ID3v2 revision to write on save.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Id3Version {
    V23,
    #[default]
    V24,
}

impl Id3Version {
    /// v2.4 stores the recording date in TDRC, v2.3 only knows TYER.
    fn year_frame_id(self) -> &'static str {
        match self {
            Id3Version::V23 => "TYER",
            Id3Version::V24 => "TDRC",
        }
    }
}

impl From<Id3Version> for Version {
    fn from(v: Id3Version) -> Self {
        match v {
            Id3Version::V23 => Version::Id3v23,
            Id3Version::V24 => Version::Id3v24,
        }
    }
}

impl fmt::Display for Id3Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id3Version::V23 => f.write_str("2.3"),
            Id3Version::V24 => f.write_str("2.4"),
        }
    }
}

impl FromStr for Id3Version {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "2.3" | "v2.3" => Ok(Id3Version::V23),
            "2.4" | "v2.4" => Ok(Id3Version::V24),
            other => Err(format!("unknown ID3 version {other:?} (expected 2.3 or 2.4)")),
        }
    }
}

/// An open MP3 (or any file carrying an ID3v2 tag).
///
/// The tag lives in memory until [`TagStore::save`] is called.
#[derive(Debug)]
pub struct Id3File {
    path: PathBuf,
    tag: Tag,
    version: Id3Version,
}

impl Id3File {
    /// Open `path`. A file without a tag opens with an empty one;
    /// a missing file or a broken tag is an error.
    pub fn open(path: impl Into<PathBuf>, version: Id3Version) -> Result<Self> {
        let path = path.into();

        // Check existence ourselves so "no such file" is a plain IO error.
        std::fs::metadata(&path)?;

        let tag = match Tag::read_from_path(&path) {
            Ok(tag) => tag,
            Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => {
                log::debug!("{}: no ID3v2 tag, starting empty", path.display());
                Tag::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self { path, tag, version })
    }

    fn text(&self, id: &str) -> String {
        match self.tag.get(id).map(Frame::content) {
            Some(Content::Text(s)) => join_text_values(s),
            _ => String::new(),
        }
    }

    fn set_text_or_remove(&mut self, id: &str, value: &str) {
        if value.is_empty() {
            let _ = self.tag.remove(id);
        } else {
            self.tag.set_text(id, value);
        }
    }

    /// The comment frame the canonical "comment" maps to:
    /// the one without description, else the first one.
    fn main_comment(&self) -> Option<&Comment> {
        let mut first = None;
        for c in self.tag.comments() {
            if c.description.is_empty() {
                return Some(c);
            }
            first.get_or_insert(c);
        }
        first
    }

    fn set_comment(&mut self, text: &str) {
        let target = self.main_comment().cloned();

        if let Some(old) = &target {
            self.tag
                .remove_comment(Some(old.description.as_str()), Some(old.text.as_str()));
        }

        if text.is_empty() {
            return;
        }

        // Keep lang/description of the frame we replaced.
        let (lang, description) = target
            .map(|c| (c.lang, c.description))
            .unwrap_or_else(|| ("eng".to_string(), String::new()));
        let _ = self.tag.add_frame(Comment {
            lang,
            description,
            text: text.to_string(),
        });
    }
}

impl TagStore for Id3File {
    fn canonical(&self) -> CanonicalFields {
        let year = match self.text("TDRC") {
            s if s.is_empty() => self.text("TYER"),
            s => s,
        };

        CanonicalFields {
            title: self.text("TIT2"),
            artist: self.text("TPE1"),
            album: self.text("TALB"),
            year,
            // Raw TCON: we don't translate "(13)" style numeric genres.
            genre: self.text("TCON"),
            comment: self
                .main_comment()
                .map(|c| c.text.clone())
                .unwrap_or_default(),
        }
    }

    fn set_canonical(&mut self, fields: &CanonicalFields) {
        self.set_text_or_remove("TIT2", &fields.title);
        self.set_text_or_remove("TPE1", &fields.artist);
        self.set_text_or_remove("TALB", &fields.album);
        self.set_text_or_remove("TCON", &fields.genre);

        // Year may sit in either frame; keep exactly one.
        let _ = self.tag.remove("TYER");
        let _ = self.tag.remove("TDRC");
        if !fields.year.is_empty() {
            self.tag.set_text(self.version.year_frame_id(), &fields.year);
        }

        self.set_comment(&fields.comment);
    }

    fn frames(&self, id: &str) -> Vec<FrameValue> {
        self.tag
            .frames()
            .filter(|f| f.id() == id)
            .map(|f| match f.content() {
                Content::Text(s) => FrameValue::Text(join_text_values(s)),
                Content::Picture(p) => FrameValue::Picture(CoverImage {
                    mime_type: p.mime_type.clone(),
                    data: p.data.clone(),
                }),
                _ => FrameValue::Other,
            })
            .collect()
    }

    fn add_frame(&mut self, id: &str, value: FrameValue) -> Result<()> {
        if !is_valid_frame_id(id) {
            return Err(Error::InvalidFrameId(id.to_string()));
        }

        match value {
            FrameValue::Text(text) if id.starts_with('T') && id != "TXXX" => {
                let _ = self.tag.add_frame(Frame::text(id, text));
            }
            FrameValue::Picture(cover) if id == PICTURE_FRAME_ID => {
                let _ = self.tag.add_frame(Picture {
                    mime_type: cover.mime_type,
                    picture_type: PictureType::CoverFront,
                    description: String::new(),
                    data: cover.data,
                });
            }
            other => {
                return Err(Error::UnsupportedFrameValue {
                    id: id.to_string(),
                    kind: other.kind(),
                });
            }
        }
        Ok(())
    }

    fn remove_frames(&mut self, id: &str) -> usize {
        self.tag.remove(id).len()
    }

    fn save(&mut self) -> Result<()> {
        self.tag.write_to_path(&self.path, self.version.into())?;
        log::debug!("{}: wrote ID3v{} tag", self.path.display(), self.version);
        Ok(())
    }
}

/// Remove the whole ID3v2 tag from a file.
/// Returns false if there was no tag to begin with.
pub fn strip(path: &Path) -> Result<bool> {
    ensure_supported(path)?;
    std::fs::metadata(path)?;
    let removed = Tag::remove_from_path(path)?;
    Ok(removed)
}
