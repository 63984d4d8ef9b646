//! Core data types shared between the tag IO layer and the front end.
//!
//! Rule of thumb:
//! - These structs should be “boring bags of data”
//! - No filesystem code
//! - No tag parsing code
//!
//! `TagSnapshot` represents the editable metadata of ONE audio file.
//! `SnapshotDiff` is what you get when you compare two of them.

use std::collections::BTreeMap;
use std::fmt;

/// Every field the editor knows about.
///
/// Canonical fields go through the generic tag setters.
/// Extended fields are only reachable by frame id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Artist,
    Album,
    Year,
    Genre,
    Comment,
    Track,
    Disc,
    Composer,
    AlbumArtist,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Title,
        Field::Artist,
        Field::Album,
        Field::Year,
        Field::Genre,
        Field::Comment,
        Field::Track,
        Field::Disc,
        Field::Composer,
        Field::AlbumArtist,
    ];

    pub const EXTENDED: [Field; 4] = [
        Field::Track,
        Field::Disc,
        Field::Composer,
        Field::AlbumArtist,
    ];

    /// Stable lowercase name (used by the CLI and in messages).
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Artist => "artist",
            Field::Album => "album",
            Field::Year => "year",
            Field::Genre => "genre",
            Field::Comment => "comment",
            Field::Track => "track",
            Field::Disc => "disc",
            Field::Composer => "composer",
            Field::AlbumArtist => "album-artist",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Frame id for extended fields, `None` for canonical ones.
    pub fn extended_frame_id(self) -> Option<&'static str> {
        match self {
            Field::Track => Some("TRCK"),
            Field::Disc => Some("TPOS"),
            Field::Composer => Some("TCOM"),
            Field::AlbumArtist => Some("TPE2"),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The six fields the generic tag abstraction exposes directly.
/// Empty string = "not set".
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CanonicalFields {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub genre: String,
    pub comment: String,
}

/// An embedded picture: raw bytes plus MIME type (like "image/jpeg").
#[derive(Clone, PartialEq, Eq)]
pub struct CoverImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

// Don't dump the whole image into debug logs.
impl fmt::Debug for CoverImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverImage")
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Editable metadata of one file.
///
/// - Every field always has a value; missing frames read as "".
/// - At most one cover.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TagSnapshot {
    values: BTreeMap<Field, String>,
    pub cover: Option<CoverImage>,
}

impl TagSnapshot {
    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Returns true if the stored value actually changed.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.get(field) == value {
            return false;
        }
        if value.is_empty() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, value);
        }
        true
    }

    pub fn canonical(&self) -> CanonicalFields {
        CanonicalFields {
            title: self.get(Field::Title).to_owned(),
            artist: self.get(Field::Artist).to_owned(),
            album: self.get(Field::Album).to_owned(),
            year: self.get(Field::Year).to_owned(),
            genre: self.get(Field::Genre).to_owned(),
            comment: self.get(Field::Comment).to_owned(),
        }
    }

    pub fn set_canonical(&mut self, fields: CanonicalFields) {
        let CanonicalFields {
            title,
            artist,
            album,
            year,
            genre,
            comment,
        } = fields;
        self.set(Field::Title, title);
        self.set(Field::Artist, artist);
        self.set(Field::Album, album);
        self.set(Field::Year, year);
        self.set(Field::Genre, genre);
        self.set(Field::Comment, comment);
    }

    /// Compare `self` (the baseline) against `current`.
    pub fn diff(&self, current: &TagSnapshot) -> SnapshotDiff {
        let fields = Field::ALL
            .into_iter()
            .filter_map(|field| {
                let old = self.get(field);
                let new = current.get(field);
                (old != new).then(|| FieldChange {
                    field,
                    old: old.to_owned(),
                    new: new.to_owned(),
                })
            })
            .collect();

        let cover = match (&self.cover, &current.cover) {
            (None, None) => None,
            (Some(_), None) => Some(CoverChange::Removed),
            (None, Some(_)) => Some(CoverChange::Added),
            (Some(a), Some(b)) if a != b => Some(CoverChange::Replaced),
            (Some(_), Some(_)) => None,
        };

        SnapshotDiff { fields, cover }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: Field,
    pub old: String,
    pub new: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverChange {
    Added,
    Replaced,
    Removed,
}

/// What changed between a baseline and the current edits.
/// Empty diff = nothing to save.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SnapshotDiff {
    pub fields: Vec<FieldChange>,
    pub cover: Option<CoverChange>,
}

impl SnapshotDiff {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.cover.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cover(byte: u8) -> CoverImage {
        CoverImage {
            mime_type: "image/jpeg".to_string(),
            data: vec![byte; 4],
        }
    }

    #[test]
    fn missing_field_reads_empty() {
        let snap = TagSnapshot::default();
        assert_eq!(snap.get(Field::Composer), "");
    }

    #[test]
    fn set_reports_effective_changes_only() {
        let mut snap = TagSnapshot::default();
        assert!(snap.set(Field::Title, "Intro"));
        assert!(!snap.set(Field::Title, "Intro"));
        assert!(snap.set(Field::Title, ""));
        assert!(!snap.set(Field::Title, ""));
        assert_eq!(snap, TagSnapshot::default());
    }

    #[test]
    fn field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::from_name("lyrics"), None);
    }

    #[test]
    fn only_extended_fields_have_frame_ids() {
        let extended: Vec<Field> = Field::ALL
            .into_iter()
            .filter(|f| f.extended_frame_id().is_some())
            .collect();
        assert_eq!(extended, Field::EXTENDED.to_vec());
    }

    #[test]
    fn diff_lists_changed_fields_in_order() {
        let mut base = TagSnapshot::default();
        base.set(Field::Title, "A");
        base.set(Field::Track, "1");

        let mut cur = base.clone();
        cur.set(Field::Track, "2");
        cur.set(Field::Artist, "B");

        let diff = base.diff(&cur);
        assert_eq!(
            diff.fields,
            vec![
                FieldChange {
                    field: Field::Artist,
                    old: String::new(),
                    new: "B".to_string(),
                },
                FieldChange {
                    field: Field::Track,
                    old: "1".to_string(),
                    new: "2".to_string(),
                },
            ]
        );
        assert_eq!(diff.cover, None);
    }

    #[test]
    fn diff_classifies_cover_changes() {
        let none = TagSnapshot::default();
        let mut a = TagSnapshot::default();
        a.cover = Some(cover(1));
        let mut b = TagSnapshot::default();
        b.cover = Some(cover(2));

        assert_eq!(none.diff(&a).cover, Some(CoverChange::Added));
        assert_eq!(a.diff(&none).cover, Some(CoverChange::Removed));
        assert_eq!(a.diff(&b).cover, Some(CoverChange::Replaced));
        assert!(a.diff(&a.clone()).is_empty());
    }

    #[test]
    fn canonical_round_trips_through_snapshot() {
        let fields = CanonicalFields {
            title: "Título".to_string(),
            artist: "Björk".to_string(),
            album: String::new(),
            year: "1997".to_string(),
            genre: "Electronic".to_string(),
            comment: "line one\nline two".to_string(),
        };
        let mut snap = TagSnapshot::default();
        snap.set_canonical(fields.clone());
        assert_eq!(snap.canonical(), fields);
    }
}
