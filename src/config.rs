use serde::Deserialize;

use crate::error::{Error, Result};
use crate::http::HttpVersion;

/// Settings for building, parsing and cookie handling.
///
/// Nothing reads this from a global: pass it to
/// [`CookieRegistry::from_config`](crate::http::cookie::CookieRegistry::from_config)
/// and [`RequestParser::new`](crate::http::parser::RequestParser::new).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    /// Mixed into every cookie name before hashing.
    pub cookie_prefix: String,
    pub cookie_domain: Option<String>,
    pub cookie_path: Option<String>,

    /// Highest protocol version the request parser accepts.
    pub http_version: HttpVersion,
    pub max_path_size: usize,
    pub max_header_size: usize,
    pub max_body_size: usize,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            cookie_prefix: "rustynet".to_string(),
            cookie_domain: None,
            cookie_path: None,

            http_version: HttpVersion::V1_1,
            max_path_size: 1024,
            max_header_size: 8192,
            max_body_size: 1024 * 1024, // 1 MB
        }
    }
}

impl MessageConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<MessageConfig>(content).map_err(|err| Error::invalid("config", err.to_string()))
    }

    /// Loads `path`, falling back to the defaults when the file is missing or
    /// malformed.
    pub fn from_file(path: &str) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path, %err, "failed to read config, falling back to defaults");
                return MessageConfig::default();
            }
        };

        match Self::from_toml(&content) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path, %err, "failed to deserialize config, falling back to defaults");
                MessageConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = MessageConfig::from_toml(
            r#"
            cookie_prefix = "app"
            cookie_path = "/"
            http_version = "V2_0"
            "#,
        )
        .unwrap();
        assert_eq!(config.cookie_prefix, "app");
        assert_eq!(config.cookie_path.as_deref(), Some("/"));
        assert_eq!(config.cookie_domain, None);
        assert_eq!(config.http_version, HttpVersion::V2_0);
        assert_eq!(config.max_header_size, 8192);
    }

    #[test]
    fn test_bad_toml() {
        assert!(MessageConfig::from_toml("max_body_size = \"big\"").is_err());
        let config = MessageConfig::from_file("/nonexistent/rustynet.toml");
        assert_eq!(config.cookie_prefix, "rustynet");
    }
}
