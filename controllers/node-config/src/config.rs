//! Controller configuration, read from environment variables at start-up.

use crate::error::ControllerError;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.cast.ai";
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Per-operation time budgets handed to the reconciler through `OperationContext`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub create: Duration,
    pub read: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Timeouts {
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            create: timeout,
            read: timeout,
            update: timeout,
            delete: timeout,
        }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::uniform(DEFAULT_OPERATION_TIMEOUT)
    }
}

/// Controller configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub api_token: String,
    /// Namespace to watch; `None` watches the `default` namespace
    pub namespace: Option<String>,
    pub timeouts: Timeouts,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ControllerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ControllerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("FLEET_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_token = lookup("FLEET_API_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                ControllerError::InvalidConfig(
                    "FLEET_API_TOKEN environment variable is required".to_string(),
                )
            })?;
        let namespace = lookup("WATCH_NAMESPACE").filter(|ns| !ns.is_empty());

        let timeouts = match lookup("FLEET_OPERATION_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_parse_error| {
                    ControllerError::InvalidConfig(format!(
                        "FLEET_OPERATION_TIMEOUT_SECS must be a positive integer, got {:?}",
                        raw
                    ))
                })?;
                if secs == 0 {
                    return Err(ControllerError::InvalidConfig(
                        "FLEET_OPERATION_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Timeouts::uniform(Duration::from_secs(secs))
            }
            None => Timeouts::default(),
        };

        Ok(Self {
            api_url,
            api_token,
            namespace,
            timeouts,
        })
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
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply() {
        let config = Config::from_lookup(lookup(&[("FLEET_API_TOKEN", "t")])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.namespace, None);
        assert_eq!(config.timeouts, Timeouts::default());
        assert_eq!(config.timeouts.create, Duration::from_secs(60));
    }

    #[test]
    fn test_token_is_required() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ControllerError::InvalidConfig(_)));
    }

    #[test]
    fn test_timeout_override() {
        let config = Config::from_lookup(lookup(&[
            ("FLEET_API_TOKEN", "t"),
            ("FLEET_API_URL", "http://fleet:8080"),
            ("WATCH_NAMESPACE", "infra"),
            ("FLEET_OPERATION_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://fleet:8080");
        assert_eq!(config.namespace.as_deref(), Some("infra"));
        assert_eq!(config.timeouts.delete, Duration::from_secs(5));
    }

    #[test]
    fn test_bad_timeout_rejected() {
        for raw in ["abc", "0", "-1"] {
            let err = Config::from_lookup(lookup(&[
                ("FLEET_API_TOKEN", "t"),
                ("FLEET_OPERATION_TIMEOUT_SECS", raw),
            ]))
            .unwrap_err();
            assert!(matches!(err, ControllerError::InvalidConfig(_)), "{raw}");
        }
    }
}
