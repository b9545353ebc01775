//! Server configuration read from the environment

use std::env;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_MAX_ELEMENTS: usize = 1_000_000;

/// Runtime settings, fixed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// tracing filter directive
    pub log_filter: String,
    /// ANSI colours in log output
    pub log_ansi: bool,
    /// Largest number of scalars the convert tool accepts per call
    pub max_elements: usize,
    /// Settings that were ignored, logged once the subscriber is up
    pub rejected: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_ansi: false,
            max_elements: DEFAULT_MAX_ELEMENTS,
            rejected: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Read `PROPSIM_LOG` (falling back to `RUST_LOG`), `PROPSIM_LOG_ANSI`
    /// and `PROPSIM_MAX_ELEMENTS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = ServerConfig::default();
        let mut rejected = Vec::new();

        let log_filter = match lookup("PROPSIM_LOG").or_else(|| lookup("RUST_LOG")) {
            Some(raw) if raw.trim().is_empty() => defaults.log_filter,
            Some(raw) => match EnvFilter::try_new(&raw) {
                Ok(_) => raw,
                Err(_) => {
                    rejected.push(format!("log filter {:?}", raw));
                    defaults.log_filter
                }
            },
            None => defaults.log_filter,
        };

        let log_ansi = match lookup("PROPSIM_LOG_ANSI") {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    rejected.push(format!("PROPSIM_LOG_ANSI={}", raw));
                    defaults.log_ansi
                }
            },
            None => defaults.log_ansi,
        };

        let max_elements = match lookup("PROPSIM_MAX_ELEMENTS") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    rejected.push(format!("PROPSIM_MAX_ELEMENTS={}", raw));
                    defaults.max_elements
                }
            },
            None => defaults.max_elements,
        };

        ServerConfig { log_filter, log_ansi, max_elements, rejected }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_log_filter_precedence() {
        let config = ServerConfig::from_lookup(lookup(&[("RUST_LOG", "debug")]));
        assert_eq!(config.log_filter, "debug");

        let config = ServerConfig::from_lookup(lookup(&[
            ("RUST_LOG", "debug"),
            ("PROPSIM_LOG", "propsim_units=trace"),
        ]));
        assert_eq!(config.log_filter, "propsim_units=trace");
    }

    #[test]
    fn test_invalid_log_filter_is_rejected() {
        let config = ServerConfig::from_lookup(lookup(&[("PROPSIM_LOG", "propsim_units=loud")]));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.rejected, vec!["log filter \"propsim_units=loud\"".to_string()]);
    }

    #[test]
    fn test_ansi_flag() {
        assert!(ServerConfig::from_lookup(lookup(&[("PROPSIM_LOG_ANSI", "TRUE")])).log_ansi);

        let config = ServerConfig::from_lookup(lookup(&[("PROPSIM_LOG_ANSI", "no")]));
        assert!(!config.log_ansi);
        assert!(config.rejected.is_empty());

        let config = ServerConfig::from_lookup(lookup(&[("PROPSIM_LOG_ANSI", "sometimes")]));
        assert!(!config.log_ansi);
        assert_eq!(config.rejected, vec!["PROPSIM_LOG_ANSI=sometimes".to_string()]);
    }

    #[test]
    fn test_max_elements() {
        let config = ServerConfig::from_lookup(lookup(&[("PROPSIM_MAX_ELEMENTS", "64")]));
        assert_eq!(config.max_elements, 64);

        for bad in ["0", "-3", "lots"] {
            let config = ServerConfig::from_lookup(lookup(&[("PROPSIM_MAX_ELEMENTS", bad)]));
            assert_eq!(config.max_elements, DEFAULT_MAX_ELEMENTS);
            assert_eq!(config.rejected, vec![format!("PROPSIM_MAX_ELEMENTS={}", bad)]);
        }
    }
}
