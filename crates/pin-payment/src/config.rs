use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

pub const LIVE_API_URL: &str = "https://api.pin.net.au";
pub const TEST_API_URL: &str = "https://test-api.pin.net.au";

/// Connection settings for an [`ApiClient`](crate::client::ApiClient).
///
/// Captured once when the client is built; the client never re-reads it.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Origin of the API. Resource paths are absolute, so any path
    ///  component of this URL is replaced rather than prefixed
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// Secret API key, sent as the basic-auth user name
    pub secret_key: String,
    /// Optional request timeout in milliseconds,
    ///  if not set then the transport default applies
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

fn default_api_url() -> Url {
    Url::parse(LIVE_API_URL).expect("hardcoded URL must parse")
}

impl Config {
    pub fn new(api_url: Url, secret_key: impl Into<String>) -> Self {
        Self {
            api_url,
            secret_key: secret_key.into(),
            timeout_ms: None,
        }
    }

    /// Config pointing at the live endpoint.
    pub fn live(secret_key: impl Into<String>) -> Self {
        Self::new(default_api_url(), secret_key)
    }

    /// Config pointing at the test (sandbox) endpoint.
    pub fn test(secret_key: impl Into<String>) -> Self {
        let url = Url::parse(TEST_API_URL).expect("hardcoded URL must parse");
        Self::new(url, secret_key)
    }

    /// Set the request timeout. Sub-millisecond timeouts round up to 1ms.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.timeout_ms = Some(millis.max(1));
        self
    }

    /// A zero timeout is treated as unset.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms
            .filter(|millis| *millis > 0)
            .map(Duration::from_millis)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        if config.secret_key.trim().is_empty() {
            return Err(ConfigError::MissingSecretKey);
        }
        if config.timeout_ms == Some(0) {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url.as_str())
            .field("secret_key", &"[redacted]")
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("secret_key must not be empty")]
    MissingSecretKey,
    #[error("timeout_ms must be greater than zero")]
    ZeroTimeout,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_toml_defaults_to_live_endpoint() {
        let config = Config::from_toml(r#"secret_key = "sk_abc""#).unwrap();
        assert_eq!(config.api_url.as_str(), "https://api.pin.net.au/");
        assert_eq!(config.secret_key, "sk_abc");
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_from_toml_with_all_fields() {
        let toml = r#"
            api_url = "https://test-api.pin.net.au"
            secret_key = "sk_test"
            timeout_ms = 30000
        "#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.api_url.host_str(), Some("test-api.pin.net.au"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_from_toml_rejects_blank_key() {
        let err = Config::from_toml(r#"secret_key = "  ""#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSecretKey));
    }

    #[test]
    fn test_from_toml_rejects_bad_url() {
        let toml = r#"
            api_url = "not a url"
            secret_key = "sk_test"
        "#;
        assert!(matches!(
            Config::from_toml(toml).unwrap_err(),
            ConfigError::Toml(_)
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url = \"{}\"", TEST_API_URL).unwrap();
        writeln!(file, "secret_key = \"sk_file\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.secret_key, "sk_file");
        assert_eq!(config.api_url.as_str(), "https://test-api.pin.net.au/");
    }

    #[test]
    fn test_from_missing_file() {
        let err = Config::from_file("/nonexistent/pin.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_with_timeout() {
        let config = Config::test("sk_test").with_timeout(Duration::from_secs(10));
        assert_eq!(config.timeout_ms, Some(10_000));
        assert_eq!(config.api_url.as_str(), "https://test-api.pin.net.au/");
    }

    #[test]
    fn test_sub_second_timeout_is_kept() {
        let config = Config::test("sk_test").with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout(), Some(Duration::from_millis(500)));

        let config = Config::test("sk_test").with_timeout(Duration::from_micros(10));
        assert_eq!(config.timeout(), Some(Duration::from_millis(1)));

        let config = Config::test("sk_test").with_timeout(Duration::ZERO);
        assert_eq!(config.timeout(), Some(Duration::from_millis(1)));
    }

    #[test]
    fn test_zero_timeout_is_rejected_or_ignored() {
        let toml = r#"
            secret_key = "sk_test"
            timeout_ms = 0
        "#;
        assert!(matches!(
            Config::from_toml(toml).unwrap_err(),
            ConfigError::ZeroTimeout
        ));

        let mut config = Config::test("sk_test");
        config.timeout_ms = Some(0);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config::test("sk_very_secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk_very_secret"));
        assert!(debug.contains("test-api.pin.net.au"));
    }
}
