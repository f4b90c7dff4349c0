//! Error handling for GCanvas
//!
//! Drawing calls never fail: degenerate geometry is normalized, an empty restore
//! stack is a no-op and fill exhaustion is a stop condition. The variants here are
//! reserved for contract violations the caller can control:
//! - Tool errors (non-positive or non-finite tool diameter)
//! - Depth errors (negative or non-finite depth values)
//! - Font errors (unparsable shorthand, no usable face)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for GCanvas operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Tool diameter must be a positive, finite number
    #[error("Invalid tool diameter: {0} (must be > 0)")]
    InvalidToolDiameter(f64),

    /// A cutting depth value is negative or not finite
    #[error("Invalid {name}: {value} (must be >= 0)")]
    InvalidDepth {
        /// Name of the offending setting.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// Text could not be rendered
    #[error("Font error: {0}")]
    Font(String),
}

impl Error {
    /// Create a font error from a message
    pub fn font(msg: impl Into<String>) -> Self {
        Error::Font(msg.into())
    }

    /// Check if this error rejects a tool or depth parameter
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidToolDiameter(_) | Error::InvalidDepth { .. }
        )
    }
}

/// Result type alias for GCanvas operations
pub type Result<T> = std::result::Result<T, Error>;

/// Validate a tool diameter.
pub fn validate_tool_diameter(diameter: f64) -> Result<f64> {
    if diameter.is_finite() && diameter > 0.0 {
        Ok(diameter)
    } else {
        Err(Error::InvalidToolDiameter(diameter))
    }
}

/// Validate a depth-like value (depth, depth of cut).
pub fn validate_depth(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidDepth {
            name: name.to_string(),
            value,
        })
    }
}
