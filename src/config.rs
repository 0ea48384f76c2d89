use std::time::Duration;

/// Base address of the opportunity backend.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8085";

/// Request timeout applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Builds a config pointing at `api_base_url` with the default timeout.
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    /// Loads the configuration, starting from the fixed defaults.
    ///
    /// `MEI_MENTOR_API_URL` and `MEI_MENTOR_TIMEOUT_SECS` override the defaults when
    /// set (an optional `.env` file is read first).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let config = Self {
            api_base_url: match std::env::var("MEI_MENTOR_API_URL") {
                Ok(url) => Self::validate_base_url(&url)?,
                Err(_) => defaults.api_base_url,
            },
            request_timeout: match std::env::var("MEI_MENTOR_TIMEOUT_SECS") {
                Ok(secs) => secs
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|s| *s > 0)
                    .map(Duration::from_secs)
                    .ok_or_else(|| {
                        anyhow::anyhow!("MEI_MENTOR_TIMEOUT_SECS must be a positive number")
                    })?,
                Err(_) => defaults.request_timeout,
            },
        };

        tracing::debug!("API base URL: {}", config.api_base_url);
        tracing::debug!("Request timeout: {:?}", config.request_timeout);

        Ok(config)
    }

    /// Checks a backend base URL and returns it without the trailing `/`.
    ///
    /// Applied to every override, whether it comes from the environment or the
    /// command line.
    pub fn validate_base_url(url: &str) -> anyhow::Result<String> {
        let url = url.trim();
        if url.is_empty() {
            anyhow::bail!("API base URL cannot be empty");
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            anyhow::bail!("API base URL must start with http:// or https://");
        }
        url::Url::parse(url)
            .map_err(|e| anyhow::anyhow!("API base URL is not a valid URL: {}", e))?;
        Ok(url.trim_end_matches('/').to_string())
    }
}
