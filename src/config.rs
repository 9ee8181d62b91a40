//! Client configuration.
//!
//! The backend URL is resolved with precedence `--api-url` flag, then the
//! `KHOJ_API_URL` environment variable, then [`DEFAULT_API_URL`].

/// Backend used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Environment variable overriding the backend URL.
pub const API_URL_ENV: &str = "KHOJ_API_URL";

/// Connection settings shared by every API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a config for a specific backend URL.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: normalize_url(base_url.as_ref()),
        }
    }

    /// Resolve the config from an optional command-line flag and the environment.
    pub fn resolve(flag: Option<&str>) -> Self {
        let from_env = std::env::var(API_URL_ENV).ok();
        let chosen = flag
            .filter(|url| !url.trim().is_empty())
            .map(str::to_string)
            .or_else(|| from_env.filter(|url| !url.trim().is_empty()));

        match chosen {
            Some(url) => {
                tracing::debug!("Using backend URL {}", url);
                Self::new(url)
            }
            None => Self::default(),
        }
    }

    /// Join an API path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
