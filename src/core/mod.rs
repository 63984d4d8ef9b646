//! core/mod.rs
//!
//! The brain of the app:
//! - Read/write tags (metadata IO, behind the `TagStore` trait)
//! - Track edits to one file (`EditSession`: dirty state, undo/redo, save)
//! - Apply the same edits to many files (batch)
//! - Remember user preferences
//!
//! No printing, no argument parsing. The front end (main.rs) only
//! calls into here and shows the results.

pub mod error;
pub mod history;
pub mod library;
pub mod session;
pub mod settings;
pub mod tags;
pub mod types;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use error::Result;
use session::{EditSession, SaveOptions};
use types::{CoverImage, Field, SnapshotDiff, TagSnapshot};

/// What to do with the cover in a batch edit.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum CoverEdit {
    #[default]
    Keep,
    Remove,
    Replace(CoverImage),
}

/// Edits to apply to one or more files.
/// Fields that aren't listed keep their current value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Edits {
    pub fields: BTreeMap<Field, String>,
    pub cover: CoverEdit,
}

/// Outcome of saving one file.
#[derive(Debug, Clone)]
pub struct SaveReport {
    /// What actually changed on disk (empty = file was already up to date).
    pub diff: SnapshotDiff,
    /// The tag as re-read after the write.
    pub snapshot: TagSnapshot,
}

/// Open, edit, save one file.
pub fn apply_edits(path: &Path, edits: &Edits, options: SaveOptions) -> Result<SaveReport> {
    let mut session = EditSession::open(path, options)?;

    for (&field, value) in &edits.fields {
        session.set_field(field, value.as_str());
    }
    match &edits.cover {
        CoverEdit::Keep => {}
        CoverEdit::Remove => {
            session.set_cover(None);
        }
        CoverEdit::Replace(cover) => {
            session.set_cover(Some(cover.clone()));
        }
    }

    let diff = session.diff();
    if !session.save()? {
        log::info!("{}: already up to date", path.display());
    }
    Ok(SaveReport {
        diff,
        snapshot: session.current().clone(),
    })
}

/// Batch version of [`apply_edits`].
///
/// - Every file is committed on its own
/// - One failure doesn't stop the others
/// - Results come back in input order
pub fn apply_edits_many(
    paths: &[PathBuf],
    edits: &Edits,
    options: SaveOptions,
) -> Vec<(PathBuf, Result<SaveReport>)> {
    paths
        .iter()
        .map(|path| {
            let res = apply_edits(path, edits, options);
            if let Err(e) = &res {
                log::warn!("{}: {e}", path.display());
            }
            (path.clone(), res)
        })
        .collect()
}
