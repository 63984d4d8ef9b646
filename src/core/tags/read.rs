//! core/tags/read.rs
//! Read a [`TagStore`] into a [`TagSnapshot`].

use super::art::read_cover;
use super::{FrameValue, TagStore};
use crate::core::types::{Field, TagSnapshot};

pub fn read_snapshot(store: &impl TagStore) -> TagSnapshot {
    let mut snap = TagSnapshot::default();
    snap.set_canonical(store.canonical());

    for field in Field::EXTENDED {
        if let Some(id) = field.extended_frame_id() {
            snap.set(field, first_text(store, id));
        }
    }

    snap.cover = read_cover(store);
    snap
}

/// First text frame with this id wins; duplicates are ignored.
fn first_text(store: &impl TagStore, id: &str) -> String {
    store
        .frames(id)
        .into_iter()
        .find_map(|f| match f {
            FrameValue::Text(s) => Some(s),
            _ => None,
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tags::memory::{MemoryStore, png_bytes};
    use crate::core::types::{CanonicalFields, CoverImage};

    #[test]
    fn reads_everything() {
        let mut store = MemoryStore::default();
        store.canonical = CanonicalFields {
            title: "Song".to_string(),
            year: "2001".to_string(),
            ..Default::default()
        };
        store.frames = vec![
            ("TRCK".to_string(), FrameValue::Text("3/12".to_string())),
            ("TRCK".to_string(), FrameValue::Text("4".to_string())),
            ("TPE2".to_string(), FrameValue::Text("Various".to_string())),
            (
                "APIC".to_string(),
                FrameValue::Picture(CoverImage {
                    mime_type: "image/jpeg".to_string(),
                    data: png_bytes(2, 2),
                }),
            ),
        ];

        let snap = read_snapshot(&store);
        assert_eq!(snap.get(Field::Title), "Song");
        assert_eq!(snap.get(Field::Year), "2001");
        assert_eq!(snap.get(Field::Track), "3/12");
        assert_eq!(snap.get(Field::AlbumArtist), "Various");
        assert_eq!(snap.get(Field::Disc), "");
        assert_eq!(snap.get(Field::Composer), "");
        assert_eq!(snap.cover.unwrap().data, png_bytes(2, 2));
    }

    #[test]
    fn non_text_extended_frame_reads_empty() {
        let mut store = MemoryStore::default();
        store.frames = vec![("TCOM".to_string(), FrameValue::Other)];
        assert_eq!(read_snapshot(&store).get(Field::Composer), "");
    }
}
