//! core/error.rs
//!
//! One error type for every file operation.
//! The front end only ever shows `to_string()` to the user.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("tag error: {0}")]
    Tag(#[from] id3::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("{path:?}: unsupported file type (expected .mp3)")]
    UnsupportedFile { path: PathBuf },

    #[error("invalid frame id {0:?}")]
    InvalidFrameId(String),

    #[error("frame {id} cannot hold a {kind} value")]
    UnsupportedFrameValue { id: String, kind: &'static str },

    #[error("not saved: invalid {}", .0.join(", "))]
    InvalidFields(Vec<&'static str>),

    #[error("no embedded cover image")]
    NoCover,
}

pub type Result<T> = std::result::Result<T, Error>;
