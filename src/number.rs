//! Decimal number layout
//!
//! Turns a signed integer into right-aligned segment patterns for the
//! configured number of digits. Layout is pure; writing the result to the
//! chip is [`Display::display_number_decimal`](crate::Display::display_number_decimal).
//!
//! ## Example
//!
//! ```
//! use tm1637::{number::decimal_segments, Digits};
//!
//! let digits = match Digits::new(4) {
//!     Ok(digits) => digits,
//!     Err(_) => return,
//! };
//!
//! // "85.00"
//! let segments = decimal_segments(8500, false, 1, digits);
//! assert_eq!(segments.as_slice(), &[0x7F, 0xED, 0x3F, 0x3F]);
//!
//! // "-234"
//! let segments = decimal_segments(-234, false, 0, digits);
//! assert_eq!(segments.as_slice(), &[0x40, 0x5B, 0x4F, 0x66]);
//! ```

use crate::config::Digits;
use crate::segment::{BLANK, MINUS, SEG_DP, Segments, digit_to_segments};

/// Lay out `value` right-aligned across `digits` positions
///
/// * Negative values put a minus sign in position 0 and render the
///   magnitude in the remaining positions.
/// * Leading zeros are blank unless `leading_zero` is set. Zero itself
///   always shows a `0` in the last position.
/// * A non-zero `dot_position` sets the decimal point of that position.
///   Position 0 cannot carry a dot, and positions past the display are
///   ignored.
///
/// Values too wide for the display lose their high-order digits without
/// any error.
pub fn decimal_segments(
    value: i32,
    leading_zero: bool,
    dot_position: u8,
    digits: Digits,
) -> Segments {
    let mut segments = Segments::blank(digits);
    let last = digits.count() - 1;

    if value == 0 && !leading_zero {
        segments.set(last, digit_to_segments(0));
    } else {
        let first = if value < 0 {
            segments.set(0, MINUS);
            1
        } else {
            0
        };

        let mut rest = value.unsigned_abs();
        for position in (first..=last).rev() {
            let digit = (rest % 10) as u8;
            let pattern = if rest == 0 && !leading_zero {
                BLANK
            } else {
                digit_to_segments(digit)
            };
            segments.set(position, pattern);
            rest /= 10;
        }
    }

    if dot_position != 0 {
        segments.merge(dot_position as usize, SEG_DP);
    }

    segments
}
