//! Comment normalisation applied before inference.
//!
//! Mirrors the preprocessing the model was trained with: lowercase text with
//! surrounding whitespace stripped.

/// Normalise a raw comment for classification.
///
/// Returns `None` when the comment is empty or whitespace-only, which callers
/// report as invalid input rather than running a zero-token inference.
pub fn normalize_comment(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize_comment("  You ARE Awful  ").as_deref(), Some("you are awful"));
    }

    #[test]
    fn interior_whitespace_preserved() {
        assert_eq!(normalize_comment("a  b").as_deref(), Some("a  b"));
    }

    #[test]
    fn empty_is_invalid() {
        assert_eq!(normalize_comment(""), None);
    }

    #[test]
    fn whitespace_only_is_invalid() {
        assert_eq!(normalize_comment(" \t\r\n "), None);
    }

    #[test]
    fn already_normalized_passes_through() {
        assert_eq!(normalize_comment("fine as is").as_deref(), Some("fine as is"));
    }
}
