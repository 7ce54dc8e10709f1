//! TM1637 command definitions
//!
//! Every TM1637 instruction is a single byte whose top two bits select the
//! command class. The remaining bits are mode selectors that are combined
//! with bitwise OR:
//!
//! | Class           | Byte   | Selector bits                              |
//! |-----------------|--------|--------------------------------------------|
//! | Data command    | `0x40` | write, auto/fixed address                  |
//! | Display control | `0x80` | on/off (`0x08`), brightness (`0x00..0x07`) |
//! | Address command | `0xC0` | position (`0x00..0x03`)                    |
//!
//! A data command is sent as its own transaction. An address command is
//! always followed by the data byte(s) in the same transaction.
//!
//! ## Example
//!
//! ```
//! use tm1637::command;
//!
//! assert_eq!(command::data_command(command::DATA_FIXED_ADDRESS), 0x44);
//! assert_eq!(command::address_command(6), 0xC2);
//! assert_eq!(command::display_control(true, 5), 0x8D);
//! ```

use crate::error::MAX_BRIGHTNESS;

// Command classes

/// Data command class (0x40)
///
/// Selects the addressing mode for the data that follows.
pub const CMD_DATA: u8 = 0x40;

/// Display control command class (0x80)
///
/// Turns the display on or off and sets the pulse width (brightness).
pub const CMD_DISPLAY: u8 = 0x80;

/// Address command class (0xC0)
///
/// Sets the display register address for the data byte(s) that follow.
pub const CMD_ADDRESS: u8 = 0xC0;

// Data command selectors

/// Write data to the display registers
pub const DATA_WRITE: u8 = 0x00;

/// Automatic address increment after each data byte
pub const DATA_AUTO_INCREMENT: u8 = 0x00;

/// Fixed address: each data byte targets the addressed position
pub const DATA_FIXED_ADDRESS: u8 = 0x04;

// Display control selectors

/// Display off
pub const DISPLAY_OFF: u8 = 0x00;

/// Display on
pub const DISPLAY_ON: u8 = 0x08;

/// Position bits of an address command
///
/// Positions are masked, never range checked: position 5 addresses digit 1.
pub const ADDRESS_MASK: u8 = 0x03;

/// Encode a data command with the given selector bits
pub const fn data_command(mode: u8) -> u8 {
    CMD_DATA | mode
}

/// Encode an address command for `position`, masked to `0..=3`
pub const fn address_command(position: u8) -> u8 {
    CMD_ADDRESS | (position & ADDRESS_MASK)
}

/// Encode a display control command
///
/// `brightness` is clamped to [`MAX_BRIGHTNESS`].
pub const fn display_control(enabled: bool, brightness: u8) -> u8 {
    let on = if enabled { DISPLAY_ON } else { DISPLAY_OFF };
    let level = if brightness > MAX_BRIGHTNESS {
        MAX_BRIGHTNESS
    } else {
        brightness
    };
    CMD_DISPLAY | on | level
}
