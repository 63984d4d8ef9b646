//! Sonora tag library
//!
//! Reading and editing ID3v2 tags in `.mp3` files. The `sonora-tag`
//! binary is a thin front end over this; a GUI can drive the same
//! `EditSession` in `core::session` (dirty tracking, undo/redo, save).

pub mod core;
