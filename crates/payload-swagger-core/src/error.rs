//! Unified error types for the payload-swagger core library.
//!
//! Document generation itself never fails: unknown field shapes degrade to
//! permissive schema fragments. The variants here cover the edges around it,
//! loading and validating the host configuration, and the host integration
//! reporting that it had nowhere to mount the explorer.
//!
//! # Example
//!
//! ```rust
//! use payload_swagger_core::error::{Result, SwaggerError};
//! use std::path::Path;
//!
//! fn require_config(path: &Path) -> Result<()> {
//!     if !path.exists() {
//!         return Err(SwaggerError::ConfigNotFound(path.to_path_buf()));
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// The unified error type for payload-swagger operations.
#[derive(Debug, Error)]
pub enum SwaggerError {
    // =========================================================================
    // CONFIGURATION ERRORS
    // =========================================================================
    /// The host configuration file was not found at the expected path.
    #[error("Host configuration not found at: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// The host configuration exists but could not be parsed.
    #[error("Failed to parse host configuration: {0}")]
    ConfigParseError(String),

    /// The host configuration file has an extension we cannot read.
    #[error("Unsupported configuration format: '{0}'. Use a .json or .toml file.")]
    UnsupportedConfigFormat(String),

    /// The configuration was parsed but describes an inconsistent set of collections.
    #[error("Configuration validation failed: {0}")]
    ConfigValidationError(String),

    // =========================================================================
    // HOST INTEGRATION ERRORS
    // =========================================================================
    /// The host has no request router to mount the API explorer on.
    #[error("Host request router is unavailable; API explorer was not mounted")]
    RouterUnavailable,

    // =========================================================================
    // SERIALIZATION & I/O ERRORS
    // =========================================================================
    /// The generated document could not be serialized.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// A low-level I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A specialized [`Result`] type for payload-swagger operations.
pub type Result<T> = std::result::Result<T, SwaggerError>;

impl SwaggerError {
    /// Returns `true` if this error is related to the host configuration.
    #[inline]
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound(_)
                | Self::ConfigParseError(_)
                | Self::UnsupportedConfigFormat(_)
                | Self::ConfigValidationError(_)
        )
    }

    /// Returns `true` if this error is related to I/O or serialization.
    #[inline]
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::SerializeError(_) | Self::IoError(_))
    }

    /// Returns `true` if host startup can log this error and carry on.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::RouterUnavailable)
    }

    /// Returns a machine-readable error code.
    #[inline]
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigNotFound(_) => "CONFIG_NOT_FOUND",
            Self::ConfigParseError(_) => "CONFIG_PARSE_ERROR",
            Self::UnsupportedConfigFormat(_) => "UNSUPPORTED_CONFIG_FORMAT",
            Self::ConfigValidationError(_) => "CONFIG_VALIDATION_ERROR",
            Self::RouterUnavailable => "ROUTER_UNAVAILABLE",
            Self::SerializeError(_) => "SERIALIZE_ERROR",
            Self::IoError(_) => "IO_ERROR",
        }
    }
}

impl From<toml::de::Error> for SwaggerError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigParseError(err.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================
