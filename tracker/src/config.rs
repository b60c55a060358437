use std::time::Duration;

/// Path of the search endpoint, relative to the base URL.
pub const SEARCH_PATH: &str = "/api/search";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for the query client and the front-end.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Scheme, host and port of the search API, e.g. `http://127.0.0.1:5000`.
    pub base_url: String,
    /// Upper bound for one search request, connect through body.
    pub timeout: Duration,
    /// Reject obviously invalid titles/locations before sending anything.
    /// Off by default: empty fields are forwarded untouched.
    pub validate_input: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            validate_input: false,
        }
    }
}

impl TrackerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_input = enabled;
        self
    }

    pub fn search_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), SEARCH_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_service() {
        let config = TrackerConfig::default();
        assert_eq!(config.search_url(), "http://127.0.0.1:5000/api/search");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(!config.validate_input);
    }

    #[test]
    fn test_trailing_slash_is_tolerated() {
        let config = TrackerConfig::new("http://jobs.internal:8080/");
        assert_eq!(config.search_url(), "http://jobs.internal:8080/api/search");
    }

    #[test]
    fn test_builder_overrides() {
        let config = TrackerConfig::new("http://localhost:1")
            .with_timeout(Duration::from_millis(250))
            .with_validation(true);
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert!(config.validate_input);
    }
}
