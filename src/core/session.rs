//! core/session.rs
//!
//! One open file being edited.
//!
//! - `original` = what's on disk (as of the last load/save)
//! - `current`  = what the user has typed so far
//! - dirty      = `original.diff(&current)` is non-empty
//!
//! The file itself isn't held open: save re-opens it, reconciles,
//! commits, then re-reads so `original` always reflects the disk.

use std::path::{Path, PathBuf};

use super::error::{Error, Result};
use super::history::History;
use super::library::ensure_supported;
use super::tags::{
    DEFAULT_COVER_QUALITY, Id3File, Id3Version, TagStore, import_cover, parse_slash_pair_u32,
    read_snapshot, reconcile,
};
use super::types::{CoverImage, Field, SnapshotDiff, TagSnapshot};

/// How files get written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    pub version: Id3Version,
    /// JPEG quality (1-100) for imported covers.
    pub cover_quality: u8,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            version: Id3Version::default(),
            cover_quality: DEFAULT_COVER_QUALITY,
        }
    }
}

/// Read a file's tag into a fresh snapshot.
pub fn load_snapshot(path: &Path, options: SaveOptions) -> Result<TagSnapshot> {
    ensure_supported(path)?;
    let store = Id3File::open(path, options.version)?;
    Ok(read_snapshot(&store))
}

/// Track and disc must be "", "n" or "n/total".
/// Everything else is free text.
pub fn validate(snap: &TagSnapshot) -> Result<()> {
    let invalid: Vec<&'static str> = [Field::Track, Field::Disc]
        .into_iter()
        .filter(|&f| parse_slash_pair_u32(snap.get(f)).is_err())
        .map(Field::name)
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidFields(invalid))
    }
}

#[derive(Debug)]
pub struct EditSession {
    path: PathBuf,
    options: SaveOptions,
    original: TagSnapshot,
    current: TagSnapshot,
    history: History<TagSnapshot>,
}

impl EditSession {
    pub fn open(path: impl Into<PathBuf>, options: SaveOptions) -> Result<Self> {
        let path = path.into();
        let original = load_snapshot(&path, options)?;
        log::info!("opened {}", path.display());

        Ok(Self {
            path,
            options,
            current: original.clone(),
            original,
            history: History::default(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn original(&self) -> &TagSnapshot {
        &self.original
    }

    pub fn current(&self) -> &TagSnapshot {
        &self.current
    }

    pub fn diff(&self) -> SnapshotDiff {
        self.original.diff(&self.current)
    }

    pub fn is_dirty(&self) -> bool {
        !self.diff().is_empty()
    }

    /// Returns false for no-op edits (nothing gets recorded).
    ///
    /// Track and disc are stored trimmed, other fields exactly as given.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        let mut value = value.into();
        if matches!(field, Field::Track | Field::Disc) {
            value = value.trim().to_string();
        }
        let mut next = self.current.clone();
        next.set(field, value);
        self.replace_current(next)
    }

    pub fn set_cover(&mut self, cover: Option<CoverImage>) -> bool {
        let mut next = self.current.clone();
        next.cover = cover;
        self.replace_current(next)
    }

    /// Decode + re-encode `bytes` and use the result as the cover.
    pub fn import_cover(&mut self, bytes: &[u8]) -> Result<bool> {
        let cover = import_cover(bytes, self.options.cover_quality)?;
        Ok(self.set_cover(Some(cover)))
    }

    /// Throw away all edits. Undoable.
    pub fn revert(&mut self) -> bool {
        self.replace_current(self.original.clone())
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.current)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.current)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Write `current` to disk. Returns false if there was nothing to save.
    ///
    /// On failure the session is untouched, so the user can fix and retry.
    pub fn save(&mut self) -> Result<bool> {
        let diff = self.diff();
        if diff.is_empty() {
            log::debug!("{}: nothing to save", self.path.display());
            return Ok(false);
        }
        validate(&self.current)?;

        let mut store = Id3File::open(&self.path, self.options.version)?;
        reconcile(&mut store, &self.current)?;
        store.save()?;

        let fresh = load_snapshot(&self.path, self.options)?;
        log::info!(
            "saved {} ({} field(s) changed{})",
            self.path.display(),
            diff.fields.len(),
            if diff.cover.is_some() { ", cover" } else { "" }
        );

        self.original = fresh.clone();
        self.current = fresh;
        self.history.clear();
        Ok(true)
    }

    fn replace_current(&mut self, next: TagSnapshot) -> bool {
        if next == self.current {
            return false;
        }
        let prev = std::mem::replace(&mut self.current, next);
        self.history.record(prev);
        true
    }
}
