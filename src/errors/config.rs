// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors that can occur during search configuration validation
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    /// No engines were configured
    #[error("At least one engine must be configured")]
    NoEngines,

    /// An engine has an empty name
    #[error("Engine at position {index} has an empty name")]
    EmptyEngineName { index: usize },

    /// Two engines share a name
    #[error("Duplicate engine name: '{name}'")]
    DuplicateEngineName { name: String },

    /// A zero timeout would cancel every search before it starts
    #[error("timeout_ms must be greater than zero")]
    ZeroTimeout,
}

/// Errors raised while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
