//! Error types for FleetScope
//!
//! This module provides structured error handling using thiserror,
//! replacing ad-hoc String-based errors with proper typed errors.

use thiserror::Error;

/// Main error type for FleetScope operations
#[derive(Error, Debug)]
pub enum FleetError {
    /// File I/O error (store file access)
    #[error("Failed to access store file: {0}")]
    StoreIo(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Store format error: {0}")]
    Json(#[from] serde_json::Error),

    /// Device not found in the store
    #[error("Device '{id}' not found in store")]
    DeviceNotFound { id: String },

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for FleetScope operations
pub type Result<T> = std::result::Result<T, FleetError>;

/// UI-friendly error message formatting
impl FleetError {
    /// Detail part of the status-bar message (pairs with `title`)
    pub fn user_message(&self) -> String {
        match self {
            FleetError::StoreIo(e) => e.to_string(),
            FleetError::Json(e) => e.to_string(),
            FleetError::DeviceNotFound { id } => format!("device '{}' not found", id),
            FleetError::Custom(msg) => msg.clone(),
        }
    }

    /// Short category shown ahead of the detail in the status bar
    pub fn title(&self) -> &'static str {
        match self {
            FleetError::StoreIo(_) => "Store Error",
            FleetError::Json(_) => "Format Error",
            FleetError::DeviceNotFound { .. } => "Unknown Device",
            FleetError::Custom(_) => "Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FleetError::DeviceNotFound {
            id: "ESP32S3-001001".to_string(),
        };
        assert_eq!(err.user_message(), "device 'ESP32S3-001001' not found");
        assert_eq!(err.title(), "Unknown Device");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let fleet_err: FleetError = io_err.into();
        assert!(matches!(fleet_err, FleetError::StoreIo(_)));
        assert_eq!(fleet_err.title(), "Store Error");
    }
}
