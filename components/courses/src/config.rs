//! Course client configuration.

use serde::Deserialize;
use std::env;

/// Endpoint prefix and paging defaults for [`CoursesService`](crate::CoursesService).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for every endpoint, without trailing slash
    pub api_prefix: String,
    /// Page size used when a lesson query does not set one
    pub default_page_size: u32,
    /// Page size used to fetch every lesson of a course at once
    pub all_lessons_page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_prefix: "/api".to_string(),
            default_page_size: 3,
            all_lessons_page_size: 1000,
        }
    }
}

impl ClientConfig {
    /// Loads the configuration from `COURSES_API_PREFIX`,
    /// `COURSES_DEFAULT_PAGE_SIZE` and `COURSES_ALL_LESSONS_PAGE_SIZE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration through `lookup`. Missing or unparsable values
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            api_prefix: lookup("COURSES_API_PREFIX")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_prefix),
            default_page_size: lookup("COURSES_DEFAULT_PAGE_SIZE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_page_size),
            all_lessons_page_size: lookup("COURSES_ALL_LESSONS_PAGE_SIZE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.all_lessons_page_size),
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_prefix, path)
    }
}
