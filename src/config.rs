use std::{path::PathBuf, time::Duration};

use crate::domain::error::ConfigError;

const DEFAULT_SUBMIT_TIMEOUT_MS: u64 = 15_000;
const DEFAULT_USERS_COLLECTION: &str = "users";

/// Runtime settings for the sign-up flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Upper bound on one document store write
    pub submit_timeout: Duration,
    pub users_collection: String,
    /// Where the file-backed session store keeps its data
    pub session_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            submit_timeout: Duration::from_millis(DEFAULT_SUBMIT_TIMEOUT_MS),
            users_collection: DEFAULT_USERS_COLLECTION.to_string(),
            session_file: None,
        }
    }
}

impl AppConfig {
    /// Read settings from the process environment, loading `.env` first if
    /// one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        tolerate_missing(dotenvy::dotenv())?;
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Build settings from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let submit_timeout = match lookup("SUBMIT_TIMEOUT_MS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "SUBMIT_TIMEOUT_MS",
                        value,
                    });
                }
            },
            None => defaults.submit_timeout,
        };

        let users_collection = match lookup("USERS_COLLECTION") {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::Invalid {
                    key: "USERS_COLLECTION",
                    value,
                });
            }
            Some(value) => value,
            None => defaults.users_collection,
        };

        let session_file = lookup("SESSION_FILE")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            submit_timeout,
            users_collection,
            session_file,
        })
    }
}

/// A missing `.env` is fine, an unreadable or malformed one is not
fn tolerate_missing<T>(result: Result<T, dotenvy::Error>) -> Result<(), ConfigError> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::*;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.submit_timeout, Duration::from_secs(15));
        assert_eq!(config.users_collection, "users");
    }

    #[test]
    fn test_values_from_lookup() {
        let config = AppConfig::from_lookup(lookup(&[
            ("SUBMIT_TIMEOUT_MS", "2500"),
            ("USERS_COLLECTION", "members"),
            ("SESSION_FILE", "/tmp/session.json"),
        ]))
        .unwrap();

        assert_eq!(config.submit_timeout, Duration::from_millis(2500));
        assert_eq!(config.users_collection, "members");
        assert_eq!(config.session_file, Some(PathBuf::from("/tmp/session.json")));
    }

    #[rstest]
    #[case("0")]
    #[case("-5")]
    #[case("soon")]
    fn test_invalid_timeout_negative(#[case] value: &str) {
        let result = AppConfig::from_lookup(lookup(&[("SUBMIT_TIMEOUT_MS", value)]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: "SUBMIT_TIMEOUT_MS",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_dotenv_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let result = dotenvy::from_path(dir.path().join(".env"));
        assert!(tolerate_missing(result).is_ok());
    }

    #[test]
    fn test_malformed_dotenv_negative() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "THIS LINE IS NOT VALID\n").unwrap();

        let result = tolerate_missing(dotenvy::from_path(&path));
        assert!(matches!(result, Err(ConfigError::DotEnv(_))));
    }

    #[test]
    fn test_blank_collection_negative() {
        let result = AppConfig::from_lookup(lookup(&[("USERS_COLLECTION", "  ")]));
        assert!(result.is_err());
    }
}
