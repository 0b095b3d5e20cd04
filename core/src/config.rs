//! Client configuration.
//!
//! The base origin is always passed in explicitly; nothing in the crate
//! reads a global URL. `from_env` is a convenience for binaries and tests.

use serde::Deserialize;

use crate::error::ApiError;

/// Origin used when nothing else is configured (local development backend).
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Environment variable read by [`ClientConfig::from_env`].
pub const BASE_URL_ENV: &str = "HEALTHFEED_BASE_URL";

/// Image shown for records that carry no image.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/800x400?text=No+Image";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Scheme + host (+ port), without a trailing slash.
    pub base_url: String,
    pub placeholder_image: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            placeholder_image: PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Read the base origin from `HEALTHFEED_BASE_URL`, falling back to
    /// [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    /// Parse a JSON configuration document. Missing keys take defaults.
    pub fn from_json(raw: &str) -> Result<Self, ApiError> {
        let mut config: ClientConfig =
            serde_json::from_str(raw).map_err(|e| ApiError::InvalidConfig(e.to_string()))?;
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ApiError::InvalidConfig(format!(
                "base URL must be http(s): {:?}",
                self.base_url
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_strips_trailing_slashes() {
        let config = ClientConfig::new("http://api.example.org//");
        assert_eq!(config.base_url, "http://api.example.org");
        assert_eq!(config.placeholder_image, PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn json_fills_missing_keys() {
        let config = ClientConfig::from_json(r#"{"baseUrl":"https://cms.example.org/"}"#).unwrap();
        assert_eq!(config.base_url, "https://cms.example.org");
        assert_eq!(config.placeholder_image, PLACEHOLDER_IMAGE_URL);

        let config = ClientConfig::from_json("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn json_rejects_non_http_origin() {
        let err = ClientConfig::from_json(r#"{"baseUrl":"ftp://files"}"#).unwrap_err();
        assert!(matches!(err, ApiError::InvalidConfig(_)));

        let err = ClientConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ApiError::InvalidConfig(_)));
    }

    #[test]
    fn env_overrides_default_origin() {
        std::env::set_var(BASE_URL_ENV, " https://blog.example.org/ ");
        assert_eq!(ClientConfig::from_env().base_url, "https://blog.example.org");

        std::env::set_var(BASE_URL_ENV, "");
        assert_eq!(ClientConfig::from_env(), ClientConfig::default());
        std::env::remove_var(BASE_URL_ENV);
    }
}
