/// Extract a short type name from the full module path.
///
/// Given `"trackscore_pipeline::components::SearchFilter"`, returns `"SearchFilter"`.
pub fn short_type_name(full: &str) -> &str {
    full.rsplit("::").next().unwrap_or(full)
}

/// Normalize free-text search input: trimmed, lower-cased, `None` when blank.
pub fn normalize_search(input: Option<&str>) -> Option<String> {
    input
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_strips_module_path() {
        assert_eq!(short_type_name("a::b::SortSelector"), "SortSelector");
        assert_eq!(short_type_name("Plain"), "Plain");
    }

    #[test]
    fn blank_search_is_none() {
        assert_eq!(normalize_search(Some("   ")), None);
        assert_eq!(normalize_search(None), None);
        assert_eq!(normalize_search(Some(" Pune ")), Some("pune".to_string()));
    }
}
