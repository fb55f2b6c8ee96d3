//! Environment configuration
//!
//! [`EnvReader`] collects every missing required variable instead of failing
//! on the first one, so a misconfigured deployment reports all gaps at once.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<String>),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: String, reason: String },
}

/// Reads configuration values from a lookup function (the process
/// environment in production, a map in tests).
pub struct EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    lookup: F,
    missing: Vec<String>,
}

impl EnvReader<fn(&str) -> Option<String>> {
    pub fn from_env() -> Self {
        fn lookup(name: &str) -> Option<String> {
            std::env::var(name).ok()
        }
        EnvReader::new(lookup as fn(&str) -> Option<String>)
    }
}

impl EnvReader<Box<dyn Fn(&str) -> Option<String>>> {
    pub fn from_map(values: HashMap<String, String>) -> Self {
        EnvReader::new(Box::new(move |name: &str| values.get(name).cloned())
            as Box<dyn Fn(&str) -> Option<String>>)
    }
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn new(lookup: F) -> Self {
        Self {
            lookup,
            missing: Vec::new(),
        }
    }

    /// Value of `name`, or `None` when unset or blank.
    pub fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Value of `name`. A missing value is recorded and an empty string
    /// returned; [`EnvReader::finish`] reports it.
    pub fn required(&mut self, name: &str) -> String {
        match self.optional(name) {
            Some(value) => value,
            None => {
                self.missing.push(name.to_string());
                String::new()
            }
        }
    }

    /// Parse `name` if set, else use `default`.
    pub fn parse_or<T>(&self, name: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.optional(name) {
            Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
                name: name.to_string(),
                reason: e.to_string(),
            }),
            None => Ok(default),
        }
    }

    /// Fails with every missing required name collected so far.
    pub fn finish(self) -> Result<(), ConfigError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Missing(self.missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(pairs: &[(&str, &str)]) -> EnvReader<Box<dyn Fn(&str) -> Option<String>>> {
        EnvReader::from_map(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_collects_all_missing() {
        let mut env = reader(&[("A", "1"), ("BLANK", "   ")]);
        assert_eq!(env.required("A"), "1");
        env.required("BLANK");
        env.required("C");
        assert_eq!(
            env.finish(),
            Err(ConfigError::Missing(vec!["BLANK".to_string(), "C".to_string()]))
        );
    }

    #[test]
    fn test_parse_or() {
        let env = reader(&[("PORT", "8080"), ("BAD", "eight")]);
        assert_eq!(env.parse_or("PORT", 1u16), Ok(8080));
        assert_eq!(env.parse_or("UNSET", 3u16), Ok(3));
        assert!(matches!(
            env.parse_or("BAD", 1u16),
            Err(ConfigError::Invalid { name, .. }) if name == "BAD"
        ));
    }

    #[test]
    fn test_finish_ok() {
        let mut env = reader(&[("A", " value ")]);
        assert_eq!(env.required("A"), "value");
        assert!(env.finish().is_ok());
    }
}
