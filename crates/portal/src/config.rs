//! Portal configuration.
//!
//! Landing routes are deliberately absent: they are constants owned by the
//! routing layer (`medportal_auth::routes`).

use anyhow::Context;
use serde::{Deserialize, Serialize};

use medportal_auth::SessionKeys;
use medportal_observability::{LogConfig, LogFormat};

/// Which browser storage area the login flow writes the session to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageArea {
    #[default]
    Local,
    Session,
}

impl core::str::FromStr for StorageArea {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(StorageArea::Local),
            "session" => Ok(StorageArea::Session),
            other => {
                anyhow::bail!("unknown storage area '{other}' (expected 'local' or 'session')")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub session_keys: SessionKeys,
    pub storage_area: StorageArea,
    pub log: LogConfig,
}

impl PortalConfig {
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("failed to parse portal configuration")
    }

    /// Build configuration from the environment, falling back to defaults.
    ///
    /// - `PORTAL_STORAGE_AREA`: `local` | `session`
    /// - `PORTAL_SESSION_KEYS`: JSON object overriding any of the session keys
    /// - `PORTAL_LOG_FORMAT`: `json` | `pretty`
    /// - `RUST_LOG`: log filter
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("PORTAL_STORAGE_AREA") {
            match raw.parse() {
                Ok(area) => config.storage_area = area,
                Err(e) => tracing::warn!(error = %e, "ignoring PORTAL_STORAGE_AREA"),
            }
        }

        if let Some(raw) = lookup("PORTAL_SESSION_KEYS") {
            match serde_json::from_str::<SessionKeys>(&raw) {
                Ok(keys) => config.session_keys = keys,
                Err(e) => tracing::warn!(error = %e, "ignoring malformed PORTAL_SESSION_KEYS"),
            }
        }

        if let Some(raw) = lookup("PORTAL_LOG_FORMAT") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "json" => config.log.format = LogFormat::Json,
                "pretty" => config.log.format = LogFormat::Pretty,
                other => tracing::warn!(format = %other, "ignoring PORTAL_LOG_FORMAT"),
            }
        }

        config.log.filter = lookup("RUST_LOG");
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = PortalConfig::from_lookup(lookup(&[]));
        assert_eq!(config, PortalConfig::default());
        assert_eq!(config.session_keys.token, "token");
        assert_eq!(config.storage_area, StorageArea::Local);
    }

    #[test]
    fn environment_overrides() {
        let config = PortalConfig::from_lookup(lookup(&[
            ("PORTAL_STORAGE_AREA", "Session"),
            ("PORTAL_SESSION_KEYS", r#"{"token":"accessToken","role":"userRole"}"#),
            ("PORTAL_LOG_FORMAT", "pretty"),
            ("RUST_LOG", "debug"),
        ]));

        assert_eq!(config.storage_area, StorageArea::Session);
        assert_eq!(config.session_keys.token, "accessToken");
        assert_eq!(config.session_keys.role, "userRole");
        assert_eq!(config.session_keys.email, "email");
        assert_eq!(config.log.format, LogFormat::Pretty);
        assert_eq!(config.log.filter.as_deref(), Some("debug"));
    }

    #[test]
    fn malformed_values_fall_back() {
        let config = PortalConfig::from_lookup(lookup(&[
            ("PORTAL_STORAGE_AREA", "cookie"),
            ("PORTAL_SESSION_KEYS", "not json"),
            ("PORTAL_LOG_FORMAT", "xml"),
        ]));
        assert_eq!(config, PortalConfig::default());
    }

    #[test]
    fn parses_json_document() {
        let config = PortalConfig::from_json(
            r#"{"storage_area":"session","log":{"format":"pretty","filter":"warn"}}"#,
        )
        .unwrap();
        assert_eq!(config.storage_area, StorageArea::Session);
        assert_eq!(config.log.filter.as_deref(), Some("warn"));
        assert_eq!(config.session_keys, SessionKeys::default());

        assert!(PortalConfig::from_json("{").is_err());
    }
}
