//! Search endpoint configuration
//!
//! Defaults target the public HN Algolia API. `from_env` layers the
//! `HNSEARCH_*` variables on top; the CLI layers its flags on top of that.

use once_cell::sync::Lazy;
use thiserror::Error;
use url::Url;

pub const DEFAULT_QUERY: &str = "Redux";
pub const DEFAULT_HITS_PER_PAGE: u32 = 100;
pub const MAX_HITS_PER_PAGE: u32 = 1000;

pub const ENV_API_BASE: &str = "HNSEARCH_API_BASE";
pub const ENV_HITS_PER_PAGE: &str = "HNSEARCH_HITS_PER_PAGE";
pub const ENV_DEFAULT_QUERY: &str = "HNSEARCH_DEFAULT_QUERY";

const PATH_SEARCH: &str = "search";

static DEFAULT_API_BASE: Lazy<Url> = Lazy::new(|| {
    Url::parse("https://hn.algolia.com/api/v1/").expect("default API base is a valid URL")
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid API base URL {value:?}: {reason}")]
    InvalidApiBase { value: String, reason: String },
    #[error("Invalid hits per page {0:?} (expected 1..=1000)")]
    InvalidHitsPerPage(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    api_base: Url,
    pub hits_per_page: u32,
    pub default_query: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.clone(),
            hits_per_page: DEFAULT_HITS_PER_PAGE,
            default_query: DEFAULT_QUERY.to_string(),
        }
    }
}

impl SearchConfig {
    /// Defaults overridden by the `HNSEARCH_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(base) = lookup(ENV_API_BASE) {
            config.set_api_base(&base)?;
        }
        if let Some(hpp) = lookup(ENV_HITS_PER_PAGE) {
            config.set_hits_per_page(&hpp)?;
        }
        if let Some(query) = lookup(ENV_DEFAULT_QUERY) {
            config.default_query = query;
        }
        Ok(config)
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Replace the API base. A trailing slash is added so that the search
    /// path joins under it instead of replacing its last segment.
    pub fn set_api_base(&mut self, value: &str) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidApiBase {
            value: value.to_string(),
            reason,
        };
        let mut url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(invalid("not a base URL".to_string()));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        self.api_base = url;
        Ok(())
    }

    pub fn set_hits_per_page(&mut self, value: &str) -> Result<(), ConfigError> {
        let hpp: u32 = value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidHitsPerPage(value.to_string()))?;
        if hpp == 0 || hpp > MAX_HITS_PER_PAGE {
            return Err(ConfigError::InvalidHitsPerPage(value.to_string()));
        }
        self.hits_per_page = hpp;
        Ok(())
    }

    /// `{api_base}/search?query=..&page=..&hitsPerPage=..`
    pub fn search_url(&self, query: &str, page: u32) -> Url {
        let mut url = self
            .api_base
            .join(PATH_SEARCH)
            .unwrap_or_else(|_| self.api_base.clone());
        url.query_pairs_mut()
            .clear()
            .append_pair("query", query)
            .append_pair("page", &page.to_string())
            .append_pair("hitsPerPage", &self.hits_per_page.to_string());
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.api_base().as_str(), "https://hn.algolia.com/api/v1/");
        assert_eq!(config.hits_per_page, 100);
        assert_eq!(config.default_query, "Redux");
    }

    #[test]
    fn test_search_url_encodes_query() {
        let config = SearchConfig::default();
        let url = config.search_url("rust & go", 2);
        assert_eq!(
            url.as_str(),
            "https://hn.algolia.com/api/v1/search?query=rust+%26+go&page=2&hitsPerPage=100"
        );
    }

    #[test]
    fn test_api_base_without_trailing_slash() {
        let mut config = SearchConfig::default();
        config.set_api_base("http://localhost:8080/api/v1").unwrap();
        assert_eq!(
            config.search_url("x", 0).as_str(),
            "http://localhost:8080/api/v1/search?query=x&page=0&hitsPerPage=100"
        );
    }

    #[test]
    fn test_env_overrides() {
        let config = SearchConfig::from_lookup(lookup(&[
            (ENV_API_BASE, "http://127.0.0.1:9000/"),
            (ENV_HITS_PER_PAGE, "20"),
            (ENV_DEFAULT_QUERY, "rust"),
        ]))
        .unwrap();
        assert_eq!(config.api_base().as_str(), "http://127.0.0.1:9000/");
        assert_eq!(config.hits_per_page, 20);
        assert_eq!(config.default_query, "rust");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            SearchConfig::from_lookup(lookup(&[(ENV_HITS_PER_PAGE, "0")])),
            Err(ConfigError::InvalidHitsPerPage(_))
        ));
        assert!(matches!(
            SearchConfig::from_lookup(lookup(&[(ENV_HITS_PER_PAGE, "lots")])),
            Err(ConfigError::InvalidHitsPerPage(_))
        ));
        assert!(matches!(
            SearchConfig::from_lookup(lookup(&[(ENV_API_BASE, "not a url")])),
            Err(ConfigError::InvalidApiBase { .. })
        ));
        assert!(matches!(
            SearchConfig::from_lookup(lookup(&[(ENV_API_BASE, "mailto:me@example.com")])),
            Err(ConfigError::InvalidApiBase { .. })
        ));
    }
}
