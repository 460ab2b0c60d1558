//! Environment configuration helpers
//!
//! Deployment settings arrive as environment variables. Unset and empty
//! variables are treated the same way.

use std::str::FromStr;
use thiserror::Error;

/// Error raised when an environment variable holds an unusable value
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The value could not be parsed into the expected type
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Read a variable, returning `None` when unset or empty
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Read a variable, falling back to `default`
pub fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

/// Read and parse a variable, returning `None` when unset
pub fn env_parse<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.clone(),
                    reason: e.to_string(),
                })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable names; tests run in parallel.

    #[test]
    fn test_env_opt_treats_empty_as_unset() {
        // SAFETY: variable is unique to this test
        unsafe {
            std::env::set_var("AGENT_UTILS_TEST_EMPTY", "  ");
        }
        assert_eq!(env_opt("AGENT_UTILS_TEST_EMPTY"), None);
        assert_eq!(env_or("AGENT_UTILS_TEST_EMPTY", "logs/"), "logs/");
    }

    #[test]
    fn test_env_parse() {
        // SAFETY: variables are unique to this test
        unsafe {
            std::env::set_var("AGENT_UTILS_TEST_NUM", "42");
            std::env::set_var("AGENT_UTILS_TEST_BAD", "forty-two");
        }
        assert_eq!(env_parse::<u32>("AGENT_UTILS_TEST_NUM").unwrap(), Some(42));
        assert_eq!(env_parse::<u32>("AGENT_UTILS_TEST_UNSET").unwrap(), None);

        let err = env_parse::<u32>("AGENT_UTILS_TEST_BAD").unwrap_err();
        assert!(err.to_string().contains("AGENT_UTILS_TEST_BAD"));
    }
}
