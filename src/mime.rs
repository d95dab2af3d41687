//! Content-type vocabulary for `consumes`/`produces` lists.
//!
//! The set is closed. [`ALL`] is a matching wildcard: it may appear in an
//! accept position or a `produces` list, but a request must never carry it
//! as its actual content type.

/// Any content type is acceptable.
pub const ALL: &str = "*/*";
/// No content type.
pub const NONE: &str = "";
/// `text/plain`
pub const TEXT: &str = "text/plain";
/// `text/html`
pub const HTML: &str = "text/html";
/// `application/json`
pub const JSON: &str = "application/json";
/// `application/xml`
pub const XML: &str = "application/xml";
/// `application/octet-stream`
pub const OCTET_STREAM: &str = "application/octet-stream";
/// `application/x-www-form-urlencoded`
pub const URL_ENCODED: &str = "application/x-www-form-urlencoded";
/// `multipart/form-data`
pub const FORM_DATA: &str = "multipart/form-data";

/// Every concrete type in the vocabulary, wildcard excluded.
pub const CONCRETE: [&str; 7] = [
    TEXT,
    HTML,
    JSON,
    XML,
    OCTET_STREAM,
    URL_ENCODED,
    FORM_DATA,
];

/// The one-element "accept anything" list.
pub fn any() -> Vec<String> {
    vec![ALL.to_string()]
}

/// Whether `content_type` is the wildcard.
#[inline]
pub fn is_wildcard(content_type: &str) -> bool {
    content_type == ALL
}

/// Whether `content_type` may be advertised as a request's actual type.
pub fn is_advertisable(content_type: &str) -> bool {
    CONCRETE.contains(&content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_is_not_advertisable() {
        assert!(is_wildcard(ALL));
        assert!(!is_advertisable(ALL));
        assert!(!is_advertisable(NONE));
    }

    #[test]
    fn test_concrete_types_are_advertisable() {
        for ct in CONCRETE {
            assert!(is_advertisable(ct), "{ct}");
            assert!(!is_wildcard(ct));
        }
        assert!(!is_advertisable("image/png"));
    }

    #[test]
    fn test_any_list() {
        assert_eq!(any(), vec!["*/*".to_string()]);
    }
}
