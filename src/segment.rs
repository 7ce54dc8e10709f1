//! Seven-segment patterns
//!
//! A segment pattern is one byte with one bit per physical segment. Bit 7
//! drives the decimal point, which on clock-style modules is wired to the
//! colon at position 1.
//!
//! ```text
//!      -- A --
//!     |       |
//!     F       B
//!     |       |
//!      -- G --
//!     |       |
//!     E       C
//!     |       |
//!      -- D --   DP
//! ```
//!
//! ## Example
//!
//! ```
//! use tm1637::segment::{self, SEG_B, SEG_C, SEG_E, SEG_F, SEG_G};
//!
//! assert_eq!(segment::digit_to_segments(1), SEG_B | SEG_C);
//! assert_eq!(segment::digit_to_segments(10), segment::BLANK);
//!
//! // Patterns outside the digit table are built from the segment bits
//! let letter_h = SEG_B | SEG_C | SEG_E | SEG_F | SEG_G;
//! assert_eq!(letter_h, 0b0111_0110);
//! ```

use crate::config::Digits;
use crate::error::MAX_DIGITS;

/// Segment A (top)
pub const SEG_A: u8 = 0x01;
/// Segment B (top right)
pub const SEG_B: u8 = 0x02;
/// Segment C (bottom right)
pub const SEG_C: u8 = 0x04;
/// Segment D (bottom)
pub const SEG_D: u8 = 0x08;
/// Segment E (bottom left)
pub const SEG_E: u8 = 0x10;
/// Segment F (top left)
pub const SEG_F: u8 = 0x20;
/// Segment G (middle)
pub const SEG_G: u8 = 0x40;
/// Decimal point, or the colon at position 1
pub const SEG_DP: u8 = 0x80;

/// All segments off
pub const BLANK: u8 = 0x00;

/// Minus sign
pub const MINUS: u8 = SEG_G;

/// Digit position that carries the colon on clock-style modules
pub const COLON_POSITION: u8 = 1;

/// Patterns for the digits 0-9
pub const DIGITS: [u8; 10] = [
    0x3F, // 0
    0x06, // 1
    0x5B, // 2
    0x4F, // 3
    0x66, // 4
    0x6D, // 5
    0x7D, // 6
    0x07, // 7
    0x7F, // 8
    0x6F, // 9
];

/// Look up the pattern for `digit`
///
/// Anything outside 0-9 renders blank.
pub fn digit_to_segments(digit: u8) -> u8 {
    DIGITS.get(digit as usize).copied().unwrap_or(BLANK)
}

/// Patterns for every position of a display
///
/// Fixed capacity of [`MAX_DIGITS`] with a runtime length equal to the
/// configured digit count. Positions start blank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segments {
    patterns: [u8; MAX_DIGITS as usize],
    len: usize,
}

impl Segments {
    /// All-blank patterns for `digits` positions
    pub fn blank(digits: Digits) -> Self {
        Self {
            patterns: [BLANK; MAX_DIGITS as usize],
            len: digits.count(),
        }
    }

    /// Number of positions
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no positions
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pattern at `position`, if it exists
    pub fn get(&self, position: usize) -> Option<u8> {
        self.as_slice().get(position).copied()
    }

    /// Set the pattern at `position`
    ///
    /// Positions past the length are ignored.
    pub fn set(&mut self, position: usize, pattern: u8) {
        if let Some(slot) = self.patterns[..self.len].get_mut(position) {
            *slot = pattern;
        }
    }

    /// OR `bits` into the pattern at `position`
    ///
    /// Positions past the length are ignored.
    pub fn merge(&mut self, position: usize, bits: u8) {
        if let Some(slot) = self.patterns[..self.len].get_mut(position) {
            *slot |= bits;
        }
    }

    /// The patterns, leftmost position first
    pub fn as_slice(&self) -> &[u8] {
        &self.patterns[..self.len]
    }
}
