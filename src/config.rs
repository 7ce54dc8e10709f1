//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_BRIGHTNESS, MAX_DIGITS};

/// Number of digit positions wired on the module
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Digits(u8);

impl Digits {
    /// Create a digit count with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDigits` if `digits` is 0 or greater
    /// than [`MAX_DIGITS`].
    pub fn new(digits: u8) -> Result<Self, BuilderError> {
        if digits == 0 || digits > MAX_DIGITS {
            return Err(BuilderError::InvalidDigits { digits });
        }
        Ok(Self(digits))
    }

    /// The digit count
    pub fn get(self) -> u8 {
        self.0
    }

    /// The digit count as a buffer length
    pub fn count(self) -> usize {
        self.0 as usize
    }
}

/// Display brightness, always within `0..=MAX_BRIGHTNESS`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Brightness(u8);

impl Brightness {
    /// Dimmest setting
    pub const MIN: Self = Self(0);
    /// Brightest setting
    pub const MAX: Self = Self(MAX_BRIGHTNESS);

    /// Create a brightness level, clamping to [`MAX_BRIGHTNESS`]
    pub const fn new(level: u8) -> Self {
        if level > MAX_BRIGHTNESS {
            Self(MAX_BRIGHTNESS)
        } else {
            Self(level)
        }
    }

    /// The brightness level
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl From<u8> for Brightness {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}

/// Display configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Number of digit positions
    pub digits: Digits,
    /// Initial brightness
    pub brightness: Brightness,
    /// Whether the display is switched on at init
    pub enabled: bool,
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use tm1637::{Builder, Digits};
///
/// let digits = match Digits::new(4) {
///     Ok(digits) => digits,
///     Err(_) => return,
/// };
/// let config = match Builder::new().digits(digits).brightness(5).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.brightness.get(), 5);
/// assert!(config.enabled);
/// ```
#[must_use]
pub struct Builder {
    /// Number of digit positions (required)
    digits: Option<Digits>,
    /// Initial brightness
    brightness: Brightness,
    /// Whether the display is switched on at init
    enabled: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            digits: None,
            brightness: Brightness::MAX,
            enabled: true,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of digit positions (required)
    pub fn digits(mut self, digits: Digits) -> Self {
        self.digits = Some(digits);
        self
    }

    /// Set the initial brightness, clamped to [`MAX_BRIGHTNESS`]
    pub fn brightness(mut self, level: u8) -> Self {
        self.brightness = Brightness::new(level);
        self
    }

    /// Set whether the display is on after init
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDigits` if the digit count was not set
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            digits: self.digits.ok_or(BuilderError::MissingDigits)?,
            brightness: self.brightness,
            enabled: self.enabled,
        })
    }
}
