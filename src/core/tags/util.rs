//! core/tags/util.rs
//! Small parsing helpers shared by tag reading/writing.

/// Separator used when a text frame carries several values.
pub(crate) const MULTI_VALUE_SEPARATOR: &str = "; ";

/// ID3v2.3/2.4 frame ids are exactly four chars of A-Z / 0-9.
pub(crate) fn is_valid_frame_id(id: &str) -> bool {
    id.len() == 4
        && id
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

/// Text frames store multiple values NUL-separated.
/// - "a\0b" -> "a; b"
/// - trailing/duplicate NULs are dropped
pub(crate) fn join_text_values(raw: &str) -> String {
    if !raw.contains('\0') {
        return raw.to_string();
    }
    raw.split('\0')
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(MULTI_VALUE_SEPARATOR)
}

/// Parse strings like:
/// - "3" -> Some((3, None))
/// - "3/12" -> Some((3, Some(12)))
/// - "" -> None
///
/// Anything else is `Err(())` so callers can report the field.
pub(crate) fn parse_slash_pair_u32(s: &str) -> Result<Option<(u32, Option<u32>)>, ()> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }

    let mut parts = s.splitn(2, '/');
    let n = parts
        .next()
        .and_then(|p| p.trim().parse::<u32>().ok())
        .ok_or(())?;
    let total = match parts.next() {
        None => None,
        Some(p) => Some(p.trim().parse::<u32>().map_err(|_| ())?),
    };
    Ok(Some((n, total)))
}
