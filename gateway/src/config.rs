use std::path::PathBuf;

use country_info::{FetcherConfig, DEFAULT_BASE_URL};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} (keeping default)")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Development mode: verbose default log filter
    pub debug: bool,
    pub country_api_url: String,
    pub country_api_timeout_sec: u64,
    /// Load the table from disk instead of the embedded copy
    pub dataset_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8050,
            debug: true,
            country_api_url: DEFAULT_BASE_URL.into(),
            country_api_timeout_sec: 10,
            dataset_path: None,
        }
    }
}

impl Settings {
    /// Defaults overridden from the process environment
    pub fn from_env() -> (Self, Vec<ConfigError>) {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        let mut errors = Vec::new();

        if let Some(v) = lookup("DASHBOARD_HOST") {
            settings.host = v;
        }

        // First valid key wins; an invalid one falls through to the next
        for key in ["DASHBOARD_PORT", "PORT"] {
            let Some(v) = lookup(key) else { continue };
            match v.parse::<u16>() {
                Ok(port) => {
                    settings.port = port;
                    break;
                }
                Err(_) => errors.push(ConfigError::InvalidValue { key, value: v }),
            }
        }

        if let Some(v) = lookup("DASHBOARD_DEBUG") {
            match parse_bool(&v) {
                Some(debug) => settings.debug = debug,
                None => errors.push(ConfigError::InvalidValue {
                    key: "DASHBOARD_DEBUG",
                    value: v,
                }),
            }
        }

        if let Some(v) = lookup("DASHBOARD_COUNTRY_API_URL") {
            settings.country_api_url = v;
        }

        if let Some(v) = lookup("DASHBOARD_COUNTRY_API_TIMEOUT_SEC") {
            match v.parse::<u64>() {
                Ok(secs) if secs > 0 => settings.country_api_timeout_sec = secs,
                _ => errors.push(ConfigError::InvalidValue {
                    key: "DASHBOARD_COUNTRY_API_TIMEOUT_SEC",
                    value: v,
                }),
            }
        }

        if let Some(v) = lookup("DASHBOARD_DATASET_PATH") {
            if !v.trim().is_empty() {
                settings.dataset_path = Some(PathBuf::from(v));
            }
        }

        (settings, errors)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            base_url: self.country_api_url.clone(),
            timeout_sec: self.country_api_timeout_sec,
            ..FetcherConfig::default()
        }
    }

    /// Filter used when `RUST_LOG` is unset
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "map_dashboard=debug,country_info=debug,tower_http=debug,info"
        } else {
            "info"
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> (Settings, Vec<ConfigError>) {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let (settings, errors) = load(&[]);
        assert!(errors.is_empty());
        assert_eq!(settings.bind_addr(), "127.0.0.1:8050");
        assert!(settings.debug);
        assert_eq!(settings.country_api_url, "https://restcountries.com/v3.1");
        assert_eq!(settings.dataset_path, None);
    }

    #[test]
    fn environment_overrides_defaults() {
        let (settings, errors) = load(&[
            ("DASHBOARD_HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("DASHBOARD_DEBUG", "off"),
            ("DASHBOARD_COUNTRY_API_URL", "http://localhost:1234"),
            ("DASHBOARD_COUNTRY_API_TIMEOUT_SEC", "3"),
            ("DASHBOARD_DATASET_PATH", "/tmp/gapminder.json"),
        ]);
        assert!(errors.is_empty());
        assert_eq!(settings.bind_addr(), "0.0.0.0:9000");
        assert!(!settings.debug);
        assert_eq!(settings.default_log_filter(), "info");

        let fetcher = settings.fetcher_config();
        assert_eq!(fetcher.base_url, "http://localhost:1234");
        assert_eq!(fetcher.timeout_sec, 3);
        assert_eq!(settings.dataset_path, Some(PathBuf::from("/tmp/gapminder.json")));
    }

    #[test]
    fn dashboard_port_wins_over_port() {
        let (settings, _) = load(&[("DASHBOARD_PORT", "8100"), ("PORT", "9000")]);
        assert_eq!(settings.port, 8100);
    }

    #[test]
    fn invalid_dashboard_port_falls_back_to_port() {
        let (settings, errors) = load(&[("DASHBOARD_PORT", "bad"), ("PORT", "9000")]);
        assert_eq!(settings.port, 9000);
        assert_eq!(
            errors,
            vec![ConfigError::InvalidValue {
                key: "DASHBOARD_PORT",
                value: "bad".into()
            }]
        );
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let (settings, errors) = load(&[
            ("DASHBOARD_PORT", "eighty"),
            ("DASHBOARD_DEBUG", "maybe"),
            ("DASHBOARD_COUNTRY_API_TIMEOUT_SEC", "0"),
        ]);
        assert_eq!(settings.port, 8050);
        assert!(settings.debug);
        assert_eq!(settings.country_api_timeout_sec, 10);
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors[0],
            ConfigError::InvalidValue {
                key: "DASHBOARD_PORT",
                value: "eighty".into()
            }
        );
    }
}
