//! Path segment joining.

/// Join two path segments with exactly one `/` between them.
///
/// Only the trailing slash of `a` and the leading slash of `b` are looked at.
/// Interior slashes, `.` and `..` are left untouched.
///
/// ```
/// use search_client::path_join;
///
/// assert_eq!(path_join("a/", "/b"), "a/b");
/// assert_eq!(path_join("a", "b"), "a/b");
/// ```
pub fn path_join(a: &str, b: &str) -> String {
    match (a.ends_with('/'), b.strip_prefix('/')) {
        (true, Some(rest)) => format!("{a}{rest}"),
        (true, None) | (false, Some(_)) => format!("{a}{b}"),
        (false, None) => format!("{a}/{b}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_drops_duplicate_separator() {
        assert_eq!(path_join("a/", "/b"), "a/b");
    }

    #[test]
    fn test_join_keeps_single_separator() {
        assert_eq!(path_join("a/", "b"), "a/b");
        assert_eq!(path_join("a", "/b"), "a/b");
    }

    #[test]
    fn test_join_inserts_separator() {
        assert_eq!(path_join("a", "b"), "a/b");
    }

    #[test]
    fn test_join_empty_left_operand() {
        assert_eq!(path_join("", "b"), "/b");
        assert_eq!(path_join("", "/b"), "/b");
    }

    #[test]
    fn test_join_leaves_interior_slashes() {
        assert_eq!(path_join("a//", "//b"), "a///b");
        assert_eq!(
            path_join("http://host:9200/", "/_cluster/health"),
            "http://host:9200/_cluster/health"
        );
    }
}
