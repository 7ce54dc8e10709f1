//! Core display operations

use embedded_hal::delay::DelayNs;

use crate::command::{
    ADDRESS_MASK, DATA_AUTO_INCREMENT, DATA_FIXED_ADDRESS, DATA_WRITE, address_command,
    data_command, display_control,
};
use crate::config::{Brightness, Config, Digits};
use crate::error::Error;
use crate::interface::{Ack, DisplayInterface};
use crate::number::decimal_segments;
use crate::segment::{BLANK, COLON_POSITION, SEG_DP, digit_to_segments};

type DisplayResult<I> = core::result::Result<Ack, Error<I>>;

/// Core display driver for the TM1637
///
/// One instance per physical display. The instance owns the interface and
/// remembers the display control state and the colon bit, so several
/// displays can be driven side by side.
///
/// Every operation returns the combined [`Ack`] of the transactions it
/// sent. A missing acknowledgment is reported, never treated as an error.
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Whether the display is switched on
    enabled: bool,
    /// Current brightness
    brightness: Brightness,
    /// Last pattern written to the colon position by digit/colon writes
    colon_segments: u8,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// Nothing is sent until [`init`](Self::init) is called.
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            enabled: config.enabled,
            brightness: config.brightness,
            config,
            colon_segments: BLANK,
        }
    }

    /// Configure the bus and send the configured display control
    ///
    /// Must run before any other operation.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface.init().map_err(Error::Interface)?;
        log::debug!(
            "TM1637 init: {} digits, enabled {}, brightness {}",
            self.config.digits.get(),
            self.enabled,
            self.brightness.get()
        );
        self.send_display_control(delay)
    }

    /// Switch the display on or off, keeping the brightness
    pub fn set_enabled<D: DelayNs>(&mut self, enabled: bool, delay: &mut D) -> DisplayResult<I> {
        self.enabled = enabled;
        self.send_display_control(delay)
    }

    /// Set the brightness, clamped to 0-7, keeping the on/off state
    pub fn set_brightness<D: DelayNs>(&mut self, level: u8, delay: &mut D) -> DisplayResult<I> {
        self.brightness = Brightness::new(level);
        self.send_display_control(delay)
    }

    /// Write a raw segment pattern to one position
    ///
    /// The position is masked to 0-3, not range checked. Sends a fixed
    /// address data command, then the address and pattern together.
    pub fn display_segments<D: DelayNs>(
        &mut self,
        position: u8,
        pattern: u8,
        delay: &mut D,
    ) -> DisplayResult<I> {
        let mode = self.send_command(data_command(DATA_WRITE | DATA_FIXED_ADDRESS), delay)?;
        let write = self.send_data(address_command(position), &[pattern], delay)?;
        Ok(mode.and(write))
    }

    /// Write patterns to consecutive positions starting at `start`
    ///
    /// Uses auto-increment mode, so all patterns travel in a single
    /// transaction after the start address. `start` is masked like any
    /// position, and patterns that would land past the last configured
    /// digit are not sent. The colon state is not consulted.
    pub fn display_segments_from<D: DelayNs>(
        &mut self,
        start: u8,
        patterns: &[u8],
        delay: &mut D,
    ) -> DisplayResult<I> {
        let remaining = self
            .config
            .digits
            .count()
            .saturating_sub((start & ADDRESS_MASK) as usize);
        let count = patterns.len().min(remaining);
        let mode = self.send_command(data_command(DATA_WRITE | DATA_AUTO_INCREMENT), delay)?;
        let write = self.send_data(address_command(start), &patterns[..count], delay)?;
        Ok(mode.and(write))
    }

    /// Show a decimal digit at a position
    ///
    /// Digits outside 0-9 render blank. At the colon position the current
    /// colon state is kept.
    pub fn display_digit<D: DelayNs>(
        &mut self,
        position: u8,
        digit: u8,
        delay: &mut D,
    ) -> DisplayResult<I> {
        let mut segments = digit_to_segments(digit);
        if Self::is_colon_position(position) {
            segments |= self.colon_segments & SEG_DP;
            self.colon_segments = segments;
        }
        self.display_segments(position, segments, delay)
    }

    /// Switch the colon on or off, keeping the digit at its position
    ///
    /// The colon position starts out blank, so a first `display_colon(true)`
    /// before any digit or number lights only the colon.
    pub fn display_colon<D: DelayNs>(&mut self, on: bool, delay: &mut D) -> DisplayResult<I> {
        if on {
            self.colon_segments |= SEG_DP;
        } else {
            self.colon_segments &= !SEG_DP;
        }
        self.display_segments(COLON_POSITION, self.colon_segments, delay)
    }

    /// Show a signed decimal number right-aligned across all digits
    ///
    /// Leading zeros are blank unless `leading_zero` is set. A non-zero
    /// `dot_position` lights the decimal point of that position. Numbers
    /// too wide for the display silently lose their high-order digits.
    /// See [`decimal_segments`] for the layout rules.
    ///
    /// The colon stays as it was. A dot at the colon position is the colon
    /// segment, so it leaves the colon on.
    pub fn display_number_decimal<D: DelayNs>(
        &mut self,
        value: i32,
        leading_zero: bool,
        dot_position: u8,
        delay: &mut D,
    ) -> DisplayResult<I> {
        let mut segments = decimal_segments(value, leading_zero, dot_position, self.config.digits);
        let colon = COLON_POSITION as usize;
        if let Some(pattern) = segments.get(colon) {
            self.colon_segments = pattern | (self.colon_segments & SEG_DP);
            segments.set(colon, self.colon_segments);
        }

        let mut ack = Ack::Acknowledged;
        for (position, &pattern) in (0u8..).zip(segments.as_slice()) {
            ack = ack.and(self.display_segments(position, pattern, delay)?);
        }
        Ok(ack)
    }

    /// Blank every position, including the colon
    pub fn clear<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.colon_segments = BLANK;
        let mut ack = Ack::Acknowledged;
        for position in 0..self.config.digits.get() {
            ack = ack.and(self.display_segments(position, BLANK, delay)?);
        }
        Ok(ack)
    }

    /// Number of digit positions
    pub fn digits(&self) -> Digits {
        self.config.digits
    }

    /// Current brightness
    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Whether the display is switched on
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the colon is currently on
    pub fn colon(&self) -> bool {
        self.colon_segments & SEG_DP != 0
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give the interface back
    pub fn release(self) -> I {
        self.interface
    }

    fn is_colon_position(position: u8) -> bool {
        address_command(position) == address_command(COLON_POSITION)
    }

    fn send_display_control<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        let command = display_control(self.enabled, self.brightness.get());
        log::debug!("TM1637 display control {command:#04x}");
        self.send_command(command, delay)
    }

    /// Send a command to the display controller
    fn send_command<D: DelayNs>(&mut self, cmd: u8, delay: &mut D) -> DisplayResult<I> {
        self.interface
            .send_command(cmd, delay)
            .map_err(Error::Interface)
    }

    /// Send an address command and data to the display controller
    fn send_data<D: DelayNs>(
        &mut self,
        address: u8,
        data: &[u8],
        delay: &mut D,
    ) -> DisplayResult<I> {
        self.interface
            .send_data(address, data, delay)
            .map_err(Error::Interface)
    }
}
