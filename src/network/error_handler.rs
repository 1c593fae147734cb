//! Centralized error classification

use crate::api::ApiError;
use crate::logging::LogLevel;

/// Maps backend errors to the level they are logged at.
#[derive(Debug, Clone, Default)]
pub struct ErrorHandler;

impl ErrorHandler {
    pub fn new() -> Self {
        Self
    }

    /// Classify error and determine appropriate log level
    pub fn classify_error(&self, error: &ApiError) -> LogLevel {
        match error {
            // Authentication errors - critical
            ApiError::Unauthorized => LogLevel::Error,
            ApiError::Http { status: 403, .. } => LogLevel::Error,

            // Absence of an optional resource
            ApiError::Http { status: 404, .. } => LogLevel::Debug,

            // Server errors - temporary issues
            ApiError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Network issues - usually temporary
            ApiError::Transport(_) => LogLevel::Warn,

            // Backend and client disagree on a shape
            ApiError::Decode(_) => LogLevel::Warn,

            ApiError::Validation { .. } | ApiError::Http { .. } => LogLevel::Warn,
        }
    }
}
