//! Href parsing helpers.
//!
//! Hypermedia resources identify themselves by self link. The numeric
//! identifier of a persisted resource is the trailing path segment of that
//! link; unpersisted resources carry a non-numeric trailer (e.g., `/new`)
//! and therefore have no identifier.

/// Derive a resource identifier from a self-link href.
///
/// Returns the trailing path segment iff it is purely numeric. A
/// non-numeric trailer yields `None`, which is a valid outcome (an
/// unpersisted resource), not an error.
///
/// ```
/// use wt_core::id_from_href;
///
/// assert_eq!(id_from_href("/api/v3/work_packages/17"), Some("17".to_string()));
/// assert_eq!(id_from_href("/api/v3/work_packages/new"), None);
/// ```
#[must_use]
pub fn id_from_href(href: &str) -> Option<String> {
    let segment = href.trim_end_matches('/').rsplit('/').next()?;
    if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
        Some(segment.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numeric_trailing_segment() {
        assert_eq!(id_from_href("/api/v3/queries/42"), Some("42".to_string()));
    }

    #[test]
    fn non_numeric_trailing_segment() {
        assert_eq!(id_from_href("/api/v3/queries/new"), None);
        assert_eq!(id_from_href("/api/v3/queries/42a"), None);
    }

    #[test]
    fn trailing_slash_is_ignored() {
        assert_eq!(id_from_href("/api/v3/queries/42/"), Some("42".to_string()));
    }

    #[test]
    fn empty_href() {
        assert_eq!(id_from_href(""), None);
        assert_eq!(id_from_href("/"), None);
    }
}
