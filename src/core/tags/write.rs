//! core/tags/write.rs
//! Merge a [`TagSnapshot`] into a [`TagStore`].
//!
//! Semantics:
//! - Canonical fields: always written, "" clears.
//! - Extended fields: all frames with the id are removed, then one new
//!   frame is inserted if the value is non-empty ("" clears).
//! - Cover: all picture frames are removed, then exactly one front cover
//!   is inserted if the snapshot has one.
//!
//! Nothing touches the disk here; the caller decides when to `save()`.

use super::{FrameValue, LEGACY_PICTURE_FRAME_ID, PICTURE_FRAME_ID, TagStore};
use crate::core::error::Result;
use crate::core::types::{Field, TagSnapshot};

pub fn reconcile(store: &mut impl TagStore, snap: &TagSnapshot) -> Result<()> {
    store.set_canonical(&snap.canonical());

    for field in Field::EXTENDED {
        let Some(id) = field.extended_frame_id() else {
            continue;
        };
        let value = snap.get(field);

        let removed = store.remove_frames(id);
        if !value.is_empty() {
            store.add_frame(id, FrameValue::Text(value.to_string()))?;
        } else if removed > 0 {
            log::debug!("cleared {field} ({id})");
        }
    }

    let removed =
        store.remove_frames(PICTURE_FRAME_ID) + store.remove_frames(LEGACY_PICTURE_FRAME_ID);
    if removed > 1 {
        log::debug!("dropping {removed} picture frames, keeping at most one");
    }
    if let Some(cover) = &snap.cover {
        store.add_frame(PICTURE_FRAME_ID, FrameValue::Picture(cover.clone()))?;
    }

    Ok(())
}
