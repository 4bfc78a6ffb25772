//! Core error types used across the system

use thiserror::Error;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing path parameter '{param}' for {template}")]
    MissingPathParam {
        param: String,
        template: String,
    },
}

impl CoreError {
    pub fn configuration(message: impl Into<String>) -> Self {
        CoreError::Configuration(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn missing_path_param(param: impl Into<String>, template: impl Into<String>) -> Self {
        CoreError::MissingPathParam {
            param: param.into(),
            template: template.into(),
        }
    }
}
