/// A hostname prefix that restricts which cluster nodes are exported.
///
/// Matching is a case-sensitive prefix test, so `web` keeps `web-1:8091`
/// and drops `db-1:8091`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeNameFilter(String);

impl NodeNameFilter {
    /// Builds a filter from an optional configuration value. Absent and
    /// empty values both mean "export every node".
    pub fn from_option(value: Option<String>) -> Option<Self> {
        value.filter(|v| !v.is_empty()).map(Self)
    }

    /// Returns the prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the hostname is kept by this filter.
    pub fn matches(&self, hostname: &str) -> bool {
        hostname.starts_with(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_means_no_filter() {
        assert_eq!(NodeNameFilter::from_option(None), None);
        assert_eq!(NodeNameFilter::from_option(Some(String::new())), None);
    }

    #[test]
    fn test_prefix_match_is_case_sensitive() {
        let filter = NodeNameFilter::from_option(Some("web".to_string())).unwrap();
        assert!(filter.matches("web-1:8091"));
        assert!(filter.matches("web"));
        assert!(!filter.matches("db-1:8091"));
        assert!(!filter.matches("Web-1:8091"));
        assert!(!filter.matches("my-web-1:8091"));
    }
}
