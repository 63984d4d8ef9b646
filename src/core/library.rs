use std::path::Path;

use super::error::{Error, Result};

/// Extensions we'll open. MP3-only: that's where ID3v2 lives.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3"];

pub fn is_supported_audio(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| AUDIO_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)))
        .unwrap_or(false)
}

pub fn ensure_supported(path: &Path) -> Result<()> {
    if is_supported_audio(path) {
        Ok(())
    } else {
        Err(Error::UnsupportedFile {
            path: path.to_path_buf(),
        })
    }
}
