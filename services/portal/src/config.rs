//! services/portal/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use bachelor_point_core::{AuthFlowConfig, Language, ListingFormConfig};
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub log_level: Level,
    pub resend_cooldown_secs: u32,
    pub service_timeout: Duration,
    pub submit_timeout: Duration,
    /// Delay the mock adapters add to every call, standing in for the network.
    pub simulated_latency: Duration,
    /// When set, the mock verifier accepts any well-formed code.
    pub otp_accept_any: bool,
    pub default_language: Language,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let resend_cooldown_secs = parse_or(&lookup, "RESEND_COOLDOWN_SECS", 60u32)?;
        let service_timeout =
            Duration::from_secs(parse_or(&lookup, "SERVICE_TIMEOUT_SECS", 10u64)?);
        let submit_timeout =
            Duration::from_secs(parse_or(&lookup, "SUBMIT_TIMEOUT_SECS", 30u64)?);
        let simulated_latency =
            Duration::from_millis(parse_or(&lookup, "SIMULATED_LATENCY_MS", 2000u64)?);
        let otp_accept_any = parse_or(&lookup, "OTP_ACCEPT_ANY", false)?;
        let default_language = parse_or(&lookup, "DEFAULT_LANGUAGE", Language::En)?;

        if service_timeout.is_zero() {
            return Err(ConfigError::InvalidValue(
                "SERVICE_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        if submit_timeout.is_zero() {
            return Err(ConfigError::InvalidValue(
                "SUBMIT_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            log_level,
            resend_cooldown_secs,
            service_timeout,
            submit_timeout,
            simulated_latency,
            otp_accept_any,
            default_language,
        })
    }

    pub fn auth_flow_config(&self) -> AuthFlowConfig {
        AuthFlowConfig {
            resend_cooldown_secs: self.resend_cooldown_secs,
            service_timeout: self.service_timeout,
            ..AuthFlowConfig::default()
        }
    }

    pub fn listing_form_config(&self) -> ListingFormConfig {
        ListingFormConfig {
            submit_timeout: self.submit_timeout,
            ..ListingFormConfig::default()
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| {
                ConfigError::InvalidValue(key.to_string(), format!("'{}': {}", raw, e))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.resend_cooldown_secs, 60);
        assert_eq!(config.service_timeout, Duration::from_secs(10));
        assert_eq!(config.submit_timeout, Duration::from_secs(30));
        assert_eq!(config.simulated_latency, Duration::from_millis(2000));
        assert!(!config.otp_accept_any);
        assert_eq!(config.default_language, Language::En);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("RUST_LOG", "debug"),
            ("RESEND_COOLDOWN_SECS", "30"),
            ("SIMULATED_LATENCY_MS", "0"),
            ("OTP_ACCEPT_ANY", "true"),
            ("DEFAULT_LANGUAGE", "bn"),
        ]))
        .unwrap();
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.auth_flow_config().resend_cooldown_secs, 30);
        assert!(config.simulated_latency.is_zero());
        assert!(config.otp_accept_any);
        assert_eq!(config.default_language, Language::Bn);
        assert_eq!(config.listing_form_config().max_images, 10);
    }

    fn rejected_key(pairs: &[(&str, &str)]) -> String {
        match Config::from_lookup(lookup_from(pairs)) {
            Err(ConfigError::InvalidValue(key, _)) => key,
            other => panic!("expected an invalid value, got {:?}", other),
        }
    }

    #[test]
    fn invalid_values_name_the_variable() {
        assert_eq!(
            rejected_key(&[("RESEND_COOLDOWN_SECS", "soon")]),
            "RESEND_COOLDOWN_SECS"
        );
        assert_eq!(rejected_key(&[("DEFAULT_LANGUAGE", "fr")]), "DEFAULT_LANGUAGE");
        assert_eq!(
            rejected_key(&[("SERVICE_TIMEOUT_SECS", "0")]),
            "SERVICE_TIMEOUT_SECS"
        );
        assert_eq!(rejected_key(&[("RUST_LOG", "loud")]), "RUST_LOG");
    }
}
