use std::time::Duration;

use crate::job::Credential;
use crate::lro::PollPolicy;

/// Default REST base for the Gemini API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-3.0-generate-002";
pub const DEFAULT_VIDEO_MODEL: &str = "veo-2.0-generate-001";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
/// Whole-transfer limit for generated asset downloads.
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 600;

/// Gemini client configuration loaded from environment variables.
///
/// The API key is optional at load time; operations that need it fail
/// on first use instead.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<Credential>,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub video_model: String,
    /// Poll cadence and cap for video jobs.
    pub poll: PollPolicy,
    /// Per-request HTTP timeout for REST calls.
    pub request_timeout: Duration,
    /// Total timeout for downloading a generated asset.
    pub download_timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            video_model: DEFAULT_VIDEO_MODEL.to_string(),
            poll: PollPolicy::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            download_timeout: Duration::from_secs(DEFAULT_DOWNLOAD_TIMEOUT_SECS),
        }
    }
}

impl GeminiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                                            |
    /// |----------------------------|----------------------------------------------------|
    /// | `API_KEY`                  | falls back to `GEMINI_API_KEY`, else unset         |
    /// | `GEMINI_BASE_URL`          | `https://generativelanguage.googleapis.com/v1beta` |
    /// | `GEMINI_TEXT_MODEL`        | `gemini-2.5-flash`                                 |
    /// | `GEMINI_IMAGE_MODEL`       | `imagen-3.0-generate-002`                          |
    /// | `GEMINI_VIDEO_MODEL`       | `veo-2.0-generate-001`                             |
    /// | `VIDEO_POLL_INTERVAL_SECS` | `10`                                               |
    /// | `VIDEO_MAX_POLLS`          | `30`                                               |
    /// | `REQUEST_TIMEOUT_SECS`     | `60`                                               |
    /// | `DOWNLOAD_TIMEOUT_SECS`    | `600`                                              |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("API_KEY")
            .or_else(|| non_empty("GEMINI_API_KEY"))
            .map(|key| Credential::new(key.trim()));

        let base_url = non_empty("GEMINI_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let interval_secs = parse_u64(&non_empty, "VIDEO_POLL_INTERVAL_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.poll.interval);
        let max_polls = match non_empty("VIDEO_MAX_POLLS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| ConfigError::Invalid {
                var: "VIDEO_MAX_POLLS",
                value: raw,
                expected: "u32",
            })?,
            None => defaults.poll.max_polls,
        };
        let request_timeout = parse_u64(&non_empty, "REQUEST_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);
        let download_timeout = parse_u64(&non_empty, "DOWNLOAD_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.download_timeout);

        Ok(Self {
            api_key,
            base_url,
            text_model: non_empty("GEMINI_TEXT_MODEL").unwrap_or(defaults.text_model),
            image_model: non_empty("GEMINI_IMAGE_MODEL").unwrap_or(defaults.image_model),
            video_model: non_empty("GEMINI_VIDEO_MODEL").unwrap_or(defaults.video_model),
            poll: PollPolicy {
                interval: interval_secs,
                max_polls,
            },
            request_timeout,
            download_timeout,
        })
    }
}

fn parse_u64<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|raw| {
            raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                var,
                value: raw,
                expected: "u64",
            })
        })
        .transpose()
}
