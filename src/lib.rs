//! TM1637 Seven-Segment Display Driver
//!
//! A driver for the TM1637 LED controller found on the common four-digit
//! seven-segment modules. The chip speaks a two-wire protocol that is not
//! I2C, so the driver bit-bangs it over two GPIO lines.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support (open-drain pins and delays)
//! - Register-level port lines for MCUs without a HAL pin type
//! - Digits, raw segments, colon, signed decimal numbers
//! - Brightness and on/off control
//! - Acknowledgment reporting for bus fault detection
//! - Optional `critical-section` guard around each bus transaction
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use tm1637::{Builder, Digits, Display, Interface, OpenDrainLine};
//!
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let clk = MockPin;
//! # let dio = MockPin;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(OpenDrainLine::new(clk), OpenDrainLine::new(dio));
//! let digits = match Digits::new(4) {
//!     Ok(digits) => digits,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().digits(digits).brightness(5).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config);
//! let _ = display.init(&mut delay);
//! let _ = display.clear(&mut delay);
//!
//! // "12:34"
//! let _ = display.display_number_decimal(1234, false, 0, &mut delay);
//! let _ = display.display_colon(true, &mut delay);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// TM1637 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Bus interface abstraction and bit-banging implementation
pub mod interface;
/// GPIO line abstraction
pub mod line;
/// Decimal number layout
pub mod number;
/// Seven-segment patterns
pub mod segment;

pub use config::{Brightness, Builder, Config, Digits, MAX_BRIGHTNESS, MAX_DIGITS};
pub use display::Display;
pub use error::{BuilderError, Error};
pub use interface::{Ack, BUS_DELAY_US, DisplayInterface, Interface, InterfaceError};
pub use line::{Line, OpenDrainLine, Port, PortLine};
pub use segment::Segments;
