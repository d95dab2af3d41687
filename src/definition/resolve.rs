//! Path joining and content-type inheritance for flattened descriptors.

use super::{Definition, Method, RpcAction};

/// Append `child` to `parent` with exactly one `/` at the seam.
///
/// The result always starts with `/`. An empty child keeps the parent's
/// path, including a trailing `/` (runs of trailing slashes collapse to
/// one). A trailing `/` on the child is preserved.
///
/// ```
/// use wirebind::definition::join_path;
///
/// assert_eq!(join_path("/api/v1/", "/users"), "/api/v1/users");
/// assert_eq!(join_path("/", "users"), "/users");
/// assert_eq!(join_path("/api", ""), "/api");
/// assert_eq!(join_path("/api/", ""), "/api/");
/// assert_eq!(join_path("", ""), "/");
/// ```
pub fn join_path(parent: &str, child: &str) -> String {
    let base = parent.trim_end_matches('/');
    let child = child.trim_start_matches('/');

    let mut path = String::with_capacity(base.len() + child.len() + 2);
    if !base.starts_with('/') {
        path.push('/');
    }
    path.push_str(base);
    if child.is_empty() {
        if parent.ends_with('/') && !path.ends_with('/') {
            path.push('/');
        }
    } else {
        if !path.ends_with('/') {
            path.push('/');
        }
        path.push_str(child);
    }
    path
}

/// Nearest non-empty list wins; lists are never merged.
pub(crate) fn inherit<'a>(own: &'a [String], enclosing: &'a [String]) -> &'a [String] {
    if own.is_empty() {
        enclosing
    } else {
        own
    }
}

/// One definition with its resolved path and content types.
#[derive(Debug, Clone)]
pub struct Route<'a> {
    /// Full path from the root descriptor.
    pub path: String,
    /// Verb.
    pub method: Method,
    /// Effective accepted request content types.
    pub consumes: Vec<String>,
    /// Effective response content types.
    pub produces: Vec<String>,
    /// The definition itself.
    pub definition: &'a Definition,
}

/// One RPC action with its resolved path and content types.
#[derive(Debug, Clone)]
pub struct RpcRoute<'a> {
    /// Full path from the root descriptor.
    pub path: String,
    /// Effective accepted request content types.
    pub consumes: Vec<String>,
    /// Effective response content types.
    pub produces: Vec<String>,
    /// The action itself.
    pub action: &'a RpcAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("/api", "users"), "/api/users");
        assert_eq!(join_path("/api/", "/users"), "/api/users");
        assert_eq!(join_path("/api//", "//users"), "/api/users");
        assert_eq!(join_path("api", "users/"), "/api/users/");
        assert_eq!(join_path("/", "/"), "/");
        assert_eq!(join_path("", "users"), "/users");
    }

    #[test]
    fn test_join_path_empty_child_keeps_parent() {
        assert_eq!(join_path("/api", ""), "/api");
        assert_eq!(join_path("/api/", ""), "/api/");
        assert_eq!(join_path("/api//", ""), "/api/");
        assert_eq!(join_path("/api/", "/"), "/api/");
        assert_eq!(join_path("api/", ""), "/api/");
        assert_eq!(join_path("/", ""), "/");
        assert_eq!(join_path("", ""), "/");
    }

    #[test]
    fn test_inherit_prefers_own_list() {
        let own = vec!["application/json".to_string()];
        let enclosing = vec!["*/*".to_string()];
        assert_eq!(inherit(&own, &enclosing), own.as_slice());
        assert_eq!(inherit(&[], &enclosing), enclosing.as_slice());
    }
}
