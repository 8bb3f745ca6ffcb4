//! Reporter configuration from environment variables.

use std::time::Duration;

use hyper::Uri;

use crate::error::ConfigError;

pub const DEFAULT_LEADERBOARD_URL: &str = "http://127.0.0.1:8080/leaderboard";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Leaderboard endpoint; POST submits, GET `?game=` lists.
    pub url: String,
    /// Offline mode: scores go to an in-memory sink.
    pub disabled: bool,
    pub timeout: Duration,
    /// Name offered at game over.
    pub player: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_LEADERBOARD_URL.to_string(),
            disabled: false,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            player: None,
        }
    }
}

impl ReportConfig {
    /// Read `ARCADE_LEADERBOARD_URL`, `ARCADE_REPORT_DISABLED`,
    /// `ARCADE_REPORT_TIMEOUT_MS` and `ARCADE_PLAYER`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("ARCADE_LEADERBOARD_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_LEADERBOARD_URL.to_string());
        validate_url(&url)?;

        let disabled = lookup("ARCADE_REPORT_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let timeout_ms = match lookup("ARCADE_REPORT_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(ConfigError::InvalidValue {
                    var: "ARCADE_REPORT_TIMEOUT_MS",
                    value: raw,
                })?,
            None => DEFAULT_TIMEOUT_MS,
        };

        let player = lookup("ARCADE_PLAYER")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Ok(Self {
            url,
            disabled,
            timeout: Duration::from_millis(timeout_ms),
            player,
        })
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        validate_url(&url)?;
        self.url = url;
        Ok(self)
    }
}

/// The plain HTTP connector only speaks `http://` with a host.
pub(crate) fn validate_url(url: &str) -> Result<Uri, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };
    let uri = url.parse::<Uri>().map_err(|e| invalid(&e.to_string()))?;
    if uri.scheme_str() != Some("http") {
        return Err(invalid("only http:// endpoints are supported"));
    }
    if uri.host().is_none() {
        return Err(invalid("missing host"));
    }
    if uri.query().is_some() {
        return Err(invalid("query string is added per request"));
    }
    Ok(uri)
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ReportConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ReportConfig::default());
    }

    #[test]
    fn test_reads_all_vars() {
        let config = ReportConfig::from_lookup(lookup(&[
            ("ARCADE_LEADERBOARD_URL", "http://scores.local:9000/api"),
            ("ARCADE_REPORT_DISABLED", "TRUE"),
            ("ARCADE_REPORT_TIMEOUT_MS", "250"),
            ("ARCADE_PLAYER", "  Ann "),
        ]))
        .unwrap();
        assert_eq!(config.url, "http://scores.local:9000/api");
        assert!(config.disabled);
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.player.as_deref(), Some("Ann"));
    }

    #[test]
    fn test_blank_player_is_none() {
        let config = ReportConfig::from_lookup(lookup(&[("ARCADE_PLAYER", "   ")])).unwrap();
        assert_eq!(config.player, None);
    }

    #[test]
    fn test_bad_timeout_is_an_error() {
        for raw in ["abc", "0", "-5"] {
            let err = ReportConfig::from_lookup(lookup(&[("ARCADE_REPORT_TIMEOUT_MS", raw)]));
            assert!(matches!(err, Err(ConfigError::InvalidValue { .. })), "{raw}");
        }
    }

    #[test]
    fn test_url_validation() {
        assert!(validate_url("http://127.0.0.1:8080/leaderboard").is_ok());
        assert!(validate_url("https://example.com/x").is_err());
        assert!(validate_url("not a url").is_err());
        assert!(validate_url("http://h/x?game=a").is_err());
    }

    #[test]
    fn test_with_url_overrides() {
        let config = ReportConfig::default()
            .with_url("http://other:1/lb")
            .unwrap();
        assert_eq!(config.url, "http://other:1/lb");
        assert!(ReportConfig::default().with_url("ftp://x").is_err());
    }
}
