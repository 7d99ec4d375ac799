//! Configuration validation.
//!
//! Serde handles the syntax; this module checks value ranges and the few
//! strings that end up inside response headers. Every problem is reported,
//! not just the first.

use thiserror::Error;

use crate::config::schema::BinConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.host must not be empty")]
    EmptyHost,

    #[error("auth.realm must not be empty")]
    EmptyRealm,

    #[error("auth.realm must be printable ASCII without '\"' or '\\': {0:?}")]
    InvalidRealm(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &BinConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }

    let realm = &config.auth.realm;
    if realm.is_empty() {
        errors.push(ValidationError::EmptyRealm);
    } else if !realm
        .bytes()
        .all(|b| (b' '..=b'~').contains(&b) && b != b'"' && b != b'\\')
    {
        errors.push(ValidationError::InvalidRealm(realm.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&BinConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = BinConfig::default();
        config.listener.host = " ".into();
        config.auth.realm = String::new();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyHost,
                ValidationError::EmptyRealm,
                ValidationError::ZeroRequestTimeout,
            ]
        );
    }

    #[test]
    fn test_realm_with_quote_rejected() {
        let mut config = BinConfig::default();
        config.auth.realm = "bad\"realm".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::InvalidRealm("bad\"realm".into())]);
    }
}
