// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashSet;

use crate::config::Config;
use crate::errors::ValidationError;

/// Validate a search configuration.
///
/// Collects every problem rather than stopping at the first, so a user can
/// fix a config file in one pass.
///
/// # Arguments
/// * `cfg` - The configuration to validate
///
/// # Returns
/// * `Ok(())` if the configuration is usable
/// * `Err(Vec<ValidationError>)` listing each problem found
pub fn validate_config(cfg: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if cfg.engines.is_empty() {
        errors.push(ValidationError::NoEngines);
    }

    if cfg.timeout_ms == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    let mut seen = HashSet::new();
    for (index, engine) in cfg.engines.iter().enumerate() {
        if engine.name.trim().is_empty() {
            errors.push(ValidationError::EmptyEngineName { index });
            continue;
        }
        if !seen.insert(engine.name.as_str()) {
            let duplicate = ValidationError::DuplicateEngineName {
                name: engine.name.clone(),
            };
            // Report each duplicated name once
            if !errors.contains(&duplicate) {
                errors.push(duplicate);
            }
        }
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
    use crate::config::EngineConfig;

    fn engine(name: &str) -> EngineConfig {
        EngineConfig {
            name: name.to_string(),
            latency_ms: 10,
            fail: None,
        }
    }

    fn config(engines: Vec<EngineConfig>) -> Config {
        Config {
            query: None,
            timeout_ms: None,
            engines,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&config(vec![engine("a"), engine("b")])).is_ok());
    }

    #[test]
    fn test_no_engines() {
        let errors = validate_config(&config(vec![])).unwrap_err();
        assert_eq!(errors, vec![ValidationError::NoEngines]);
    }

    #[test]
    fn test_zero_timeout() {
        let mut cfg = config(vec![engine("a")]);
        cfg.timeout_ms = Some(0);
        let errors = validate_config(&cfg).unwrap_err();
        assert_eq!(errors, vec![ValidationError::ZeroTimeout]);
    }

    #[test]
    fn test_empty_name() {
        let errors = validate_config(&config(vec![engine("a"), engine("  ")])).unwrap_err();
        assert_eq!(errors, vec![ValidationError::EmptyEngineName { index: 1 }]);
    }

    #[test]
    fn test_duplicate_reported_once() {
        let errors =
            validate_config(&config(vec![engine("x"), engine("x"), engine("x")])).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateEngineName {
                name: "x".to_string()
            }]
        );
    }

    #[test]
    fn test_multiple_errors_collected() {
        let mut cfg = config(vec![engine(""), engine("dup"), engine("dup")]);
        cfg.timeout_ms = Some(0);
        let errors = validate_config(&cfg).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
