use crate::submit::{SubmitMethod, DEFAULT_TIMEOUT};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub endpoint: EndpointConfig,
}

/// Remote store endpoint settings. The URL differs per deployment and is
/// never compiled in.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    /// Deployment URL of the sheet-backed store.
    pub url: String,

    /// Wire contract: script callback (GET) or direct POST.
    #[serde(default)]
    pub method: SubmitMethod,

    /// Submission bound as a humantime string (e.g. "30s", "1m").
    /// Defaults to 30s when omitted.
    #[serde(default)]
    pub timeout: Option<String>,
}

impl EndpointConfig {
    /// Parse the configured timeout, falling back to the 30 s default.
    pub fn submit_timeout(&self) -> Result<Duration> {
        match &self.timeout {
            None => Ok(DEFAULT_TIMEOUT),
            Some(raw) => humantime::parse_duration(raw)
                .with_context(|| format!("endpoint.timeout: invalid duration '{}'", raw)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_parse() {
        let yaml = r#"
endpoint:
  url: https://script.example.com/store/exec
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.endpoint.url, "https://script.example.com/store/exec");
        assert_eq!(config.endpoint.method, SubmitMethod::Callback);
        assert_eq!(config.endpoint.submit_timeout().unwrap(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
endpoint:
  url: https://script.example.com/store/exec
  method: post
  timeout: 10s
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.endpoint.method, SubmitMethod::Post);
        assert_eq!(
            config.endpoint.submit_timeout().unwrap(),
            Duration::from_secs(10)
        );
    }

    #[test]
    fn test_invalid_timeout_is_an_error() {
        let config = EndpointConfig {
            url: "https://example.com".to_string(),
            method: SubmitMethod::Callback,
            timeout: Some("soon".to_string()),
        };
        let err = config.submit_timeout().unwrap_err();
        assert!(err.to_string().contains("endpoint.timeout"));
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            endpoint: EndpointConfig {
                url: "https://script.example.com/store/exec".to_string(),
                method: SubmitMethod::Post,
                timeout: Some("45s".to_string()),
            },
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
