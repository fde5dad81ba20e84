//! Configuration validation rules.
//!
//! This module provides validation logic for `CacheSettings` values
//! after they have been loaded from environment, files, or defaults.

use thiserror::Error;

use crate::config::CacheSettings;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl CacheSettings {
    /// Validate settings values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_entries` is 0
    /// - `ttl_ms` is not positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_entries == 0 {
            return Err(ConfigError::Invalid {
                field: "max_entries".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.ttl_ms <= 0 {
            return Err(ConfigError::Invalid { field: "ttl_ms".into(), reason: "must be positive".into() });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_max_entries_zero() {
        let settings = CacheSettings { max_entries: 0, ..Default::default() };
        let result = settings.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_entries"));
    }

    #[test]
    fn test_validate_ttl_zero() {
        let settings = CacheSettings { ttl_ms: 0, ..Default::default() };
        let result = settings.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "ttl_ms"));
    }

    #[test]
    fn test_validate_negative_ttl() {
        let settings = CacheSettings { ttl_ms: -900_000, ..Default::default() };
        assert!(settings.validate().is_err());
    }
}
