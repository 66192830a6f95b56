//! Run configuration for a suite.

/// Which tests a suite runs and how it reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Keyword matched as a substring of `Entity::method`; `None` selects everything
    pub filter: Option<String>,
    /// Stop after the first failed or errored test
    pub stop_on_fail: bool,
    /// Report one line per test instead of one character
    pub verbose: bool,
}

impl RunConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Only run tests whose `Entity::method` contains `keyword`
    pub fn with_filter(mut self, keyword: Option<String>) -> Self {
        self.filter = keyword.filter(|k| !k.is_empty());
        self
    }

    /// Stop after the first failed or errored test
    pub fn with_stop_on_fail(mut self, stop_on_fail: bool) -> Self {
        self.stop_on_fail = stop_on_fail;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Whether `entity::method` passes the keyword filter.
    pub fn selects(&self, entity: &str, method: &str) -> bool {
        match &self.filter {
            None => true,
            Some(keyword) => format!("{entity}::{method}").contains(keyword.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selects_everything() {
        let config = RunConfig::default();
        assert!(config.selects("WasRun", "test_method"));
        assert!(!config.stop_on_fail);
        assert!(!config.verbose);
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(RunConfig::new(), RunConfig::default());
    }

    #[test]
    fn test_filter_matches_method_name() {
        let config = RunConfig::new().with_filter(Some("broken".into()));
        assert!(config.selects("WasRun", "test_broken_method"));
        assert!(!config.selects("WasRun", "test_method"));
    }

    #[test]
    fn test_filter_matches_entity_path() {
        let config = RunConfig::new().with_filter(Some("WontRun::".into()));
        assert!(config.selects("WontRun", "test_method"));
        assert!(!config.selects("WasRun", "test_method"));
    }

    #[test]
    fn test_empty_filter_is_no_filter() {
        let config = RunConfig::new().with_filter(Some(String::new()));
        assert_eq!(config.filter, None);
        assert!(config.selects("Anything", "test_at_all"));
    }

    #[test]
    fn test_builder_chain_all() {
        let config = RunConfig::new()
            .with_filter(Some("suite".into()))
            .with_stop_on_fail(true)
            .with_verbose(true);

        assert_eq!(config.filter.as_deref(), Some("suite"));
        assert!(config.stop_on_fail);
        assert!(config.verbose);
    }

    #[test]
    fn test_builder_override() {
        let config = RunConfig::new().with_verbose(true).with_verbose(false);
        assert!(!config.verbose); // Last value wins
    }
}
