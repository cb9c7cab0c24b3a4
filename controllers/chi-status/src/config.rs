//! Controller configuration from environment variables.

use crate::error::ControllerError;
use status_sync::SyncConfig;
use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_CONCURRENCY: u16 = 3;

/// Runtime configuration of the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Namespace to watch; all namespaces when `None`
    pub namespace: Option<String>,
    /// IP of the operator pod, recorded in every status
    pub operator_ip: String,
    /// Retry policy for status writes
    pub sync: SyncConfig,
    /// Maximum number of concurrent reconciliations
    pub concurrency: u16,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ControllerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a variable if set
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ControllerError> {
        let max_attempts = parse_or(&lookup, "STATUS_UPDATE_MAX_ATTEMPTS", SyncConfig::default().max_attempts)?;
        if max_attempts == 0 {
            return Err(ControllerError::InvalidConfig(
                "STATUS_UPDATE_MAX_ATTEMPTS must be at least 1".to_string(),
            ));
        }
        let retry_interval_secs = parse_or(
            &lookup,
            "STATUS_UPDATE_RETRY_INTERVAL_SECS",
            SyncConfig::default().retry_interval.as_secs(),
        )?;

        Ok(Self {
            namespace: lookup("WATCH_NAMESPACE").filter(|ns| !ns.is_empty()),
            operator_ip: lookup("OPERATOR_POD_IP").unwrap_or_default(),
            sync: SyncConfig {
                max_attempts,
                retry_interval: Duration::from_secs(retry_interval_secs),
            },
            concurrency: parse_or(&lookup, "RECONCILE_CONCURRENCY", DEFAULT_CONCURRENCY)?,
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ControllerError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| {
            ControllerError::InvalidConfig(format!("{key} must be a non-negative integer, got {raw:?}"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ControllerError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.namespace, None);
        assert_eq!(config.operator_ip, "");
        assert_eq!(config.sync, SyncConfig::default());
        assert_eq!(config.concurrency, 3);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("WATCH_NAMESPACE", "clickhouse"),
            ("OPERATOR_POD_IP", "10.0.0.5"),
            ("STATUS_UPDATE_MAX_ATTEMPTS", "5"),
            ("STATUS_UPDATE_RETRY_INTERVAL_SECS", "2"),
            ("RECONCILE_CONCURRENCY", "8"),
        ])
        .unwrap();
        assert_eq!(config.namespace.as_deref(), Some("clickhouse"));
        assert_eq!(config.operator_ip, "10.0.0.5");
        assert_eq!(config.sync.max_attempts, 5);
        assert_eq!(config.sync.retry_interval, Duration::from_secs(2));
        assert_eq!(config.concurrency, 8);
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        assert!(matches!(
            load(&[("STATUS_UPDATE_MAX_ATTEMPTS", "lots")]),
            Err(ControllerError::InvalidConfig(_))
        ));
        assert!(matches!(
            load(&[("STATUS_UPDATE_MAX_ATTEMPTS", "0")]),
            Err(ControllerError::InvalidConfig(_))
        ));
        assert!(matches!(
            load(&[("RECONCILE_CONCURRENCY", "-1")]),
            Err(ControllerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_empty_namespace_means_all() {
        assert_eq!(load(&[("WATCH_NAMESPACE", "")]).unwrap().namespace, None);
    }
}
