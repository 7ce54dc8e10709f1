//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level GPIO errors
//!
//! Display operations never fail on their own account: brightness is
//! clamped, positions are masked and numbers too wide for the display are
//! truncated. The only runtime error is a GPIO error reported by the line
//! backend. A missing acknowledgment from the chip is reported through
//! [`Ack`](crate::interface::Ack), not as an error.
//!
//! ## Example
//!
//! ```
//! use tm1637::{Builder, BuilderError, Digits};
//!
//! // Missing digit count
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDigits)));
//!
//! // Invalid digit count
//! let result = Digits::new(6); // More than the chip drives
//! assert!(result.is_err());
//! ```

use crate::interface::DisplayInterface;

/// Maximum number of digit positions driven by the TM1637
///
/// The chip has six grid outputs, but the common modules wire four.
pub const MAX_DIGITS: u8 = 4;

/// Maximum brightness level accepted by the display control command
pub const MAX_BRIGHTNESS: u8 = 7;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// Digit count was not specified
    ///
    /// [`Builder::digits()`](crate::config::Builder::digits) must be called before building.
    MissingDigits,
    /// Invalid digit count provided
    ///
    /// See [`Digits::new()`](crate::config::Digits::new) for constraints.
    InvalidDigits {
        /// Number of digits requested
        digits: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDigits => write!(f, "Digit count must be specified"),
            Self::InvalidDigits { digits } => {
                write!(f, "Invalid digit count {digits} (must be 1 to {MAX_DIGITS})")
            }
        }
    }
}

impl core::error::Error for BuilderError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_builder_error_messages() {
        assert_eq!(
            BuilderError::MissingDigits.to_string(),
            "Digit count must be specified"
        );
        assert_eq!(
            BuilderError::InvalidDigits { digits: 0 }.to_string(),
            "Invalid digit count 0 (must be 1 to 4)"
        );
    }
}
