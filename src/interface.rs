//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the bit-banging
//! [`Interface`] struct that speaks the TM1637 two-wire protocol over two
//! [`Line`]s.
//!
//! ## Bus Protocol
//!
//! The bus looks like I2C but is not: there is no device address, bytes are
//! sent LSB first, and the start condition is a falling DIO while CLK is
//! high. Every level change is followed by [`BUS_DELAY_US`].
//!
//! - **Start**: DIO high, CLK high, wait, DIO low
//! - **Byte**: 8 times (CLK low, wait, DIO = bit, CLK high, wait), then a
//!   9th clock during which the TM1637 pulls DIO low to acknowledge
//! - **Stop**: CLK low, wait, DIO low, wait, CLK high, wait, DIO high
//!
//! A transaction is a start, one or more bytes, and a stop. An address
//! command and the data bytes it addresses share one transaction.
//!
//! ## Example
//!
//! ```
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use tm1637::command;
//! use tm1637::line::Line;
//! use tm1637::{DisplayInterface, Interface};
//! # struct MockLine;
//! # impl Line for MockLine {
//! #     type Error = Infallible;
//! #     fn set_output(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_input(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! let mut interface = Interface::new(MockLine, MockLine);
//! let _ = interface.init();
//!
//! // Fixed address mode, then write 0x3F ("0") to position 2
//! let _ = interface.send_command(command::data_command(command::DATA_FIXED_ADDRESS), &mut delay);
//! let _ = interface.send_data(command::address_command(2), &[0x3F], &mut delay);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;

use crate::line::Line;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Protocol delay unit in microseconds
///
/// Applied after each level change on the bus. This is the chip's minimum
/// timing margin and must not be shortened.
pub const BUS_DELAY_US: u32 = 5;

/// Acknowledgment reported by the TM1637 for the bytes of a transfer
///
/// The chip acknowledges a byte by pulling DIO low during the 9th clock.
/// A missing acknowledgment usually means the display is not connected.
/// The driver never retries or fails on it; callers that care can check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ack {
    /// Every byte was acknowledged
    Acknowledged,
    /// At least one byte was not acknowledged
    NotAcknowledged,
}

impl Ack {
    /// Whether every byte was acknowledged
    pub fn is_acknowledged(self) -> bool {
        self == Self::Acknowledged
    }

    /// Combine the acknowledgments of two transfers
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        if self.is_acknowledged() && other.is_acknowledged() {
            Self::Acknowledged
        } else {
            Self::NotAcknowledged
        }
    }

    fn from_level(dio_high: bool) -> Self {
        if dio_high {
            Self::NotAcknowledged
        } else {
            Self::Acknowledged
        }
    }
}

/// Trait for hardware interface to the TM1637 controller
///
/// This trait abstracts over the transport, allowing the
/// [`Display`](crate::display::Display) to be driven by the provided
/// bit-banging [`Interface`] or by anything else that can frame TM1637
/// transactions.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Configure both lines as outputs and drive them low
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO operation fails.
    fn init(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Send a single command byte as its own transaction
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO operation fails.
    fn send_command<D: DelayNs>(
        &mut self,
        command: u8,
        delay: &mut D,
    ) -> InterfaceResult<Ack, Self::Error>;

    /// Send an address command followed by data bytes in one transaction
    ///
    /// # Arguments
    ///
    /// * `address` - Address command byte
    /// * `data` - Segment patterns for the addressed position(s)
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO operation fails.
    fn send_data<D: DelayNs>(
        &mut self,
        address: u8,
        data: &[u8],
        delay: &mut D,
    ) -> InterfaceResult<Ack, Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over the clock and data line error types.
#[derive(Debug)]
pub enum InterfaceError<ClkErr, DioErr> {
    /// Clock line error
    Clock(ClkErr),
    /// Data line error
    Data(DioErr),
}

impl<ClkErr: Debug, DioErr: Debug> core::fmt::Display for InterfaceError<ClkErr, DioErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Clock(e) => write!(f, "Clock line error: {e:?}"),
            Self::Data(e) => write!(f, "Data line error: {e:?}"),
        }
    }
}

impl<ClkErr: Debug, DioErr: Debug> core::error::Error for InterfaceError<ClkErr, DioErr> {}

type BusResult<T, CLK, DIO> =
    InterfaceResult<T, InterfaceError<<CLK as Line>::Error, <DIO as Line>::Error>>;

/// Bit-banging interface implementation for the TM1637
///
/// Owns the clock and data lines for its whole lifetime.
///
/// ## Type Parameters
///
/// * `CLK` - Clock line implementing [`Line`]
/// * `DIO` - Data line implementing [`Line`]
///
/// With the `critical-section` feature enabled, every transaction runs
/// inside [`critical_section::with`] so interrupts cannot stretch the bus
/// timing halfway through.
#[derive(Debug)]
pub struct Interface<CLK, DIO> {
    clk: CLK,
    dio: DIO,
}

impl<CLK, DIO> Interface<CLK, DIO>
where
    CLK: Line,
    DIO: Line,
{
    /// Create a new Interface from the clock and data lines
    pub fn new(clk: CLK, dio: DIO) -> Self {
        Self { clk, dio }
    }

    /// Give the lines back as `(clk, dio)`
    pub fn release(self) -> (CLK, DIO) {
        (self.clk, self.dio)
    }

    /// Put a start condition on the bus
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO operation fails.
    pub fn start<D: DelayNs>(&mut self, delay: &mut D) -> BusResult<(), CLK, DIO> {
        self.dio_high()?;
        self.clk_high()?;
        delay.delay_us(BUS_DELAY_US);
        self.dio_low()
    }

    /// Put a stop condition on the bus, leaving both lines high
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO operation fails.
    pub fn stop<D: DelayNs>(&mut self, delay: &mut D) -> BusResult<(), CLK, DIO> {
        self.clk_low()?;
        delay.delay_us(BUS_DELAY_US);
        self.dio_low()?;
        delay.delay_us(BUS_DELAY_US);
        self.clk_high()?;
        delay.delay_us(BUS_DELAY_US);
        self.dio_high()
    }

    /// Clock out one byte LSB first and sample the acknowledgment
    ///
    /// Must be called between [`start`](Self::start) and [`stop`](Self::stop).
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO operation fails.
    pub fn write_byte<D: DelayNs>(&mut self, byte: u8, delay: &mut D) -> BusResult<Ack, CLK, DIO> {
        let mut value = byte;
        for _ in 0..8 {
            self.clk_low()?;
            delay.delay_us(BUS_DELAY_US);
            if value & 0x01 != 0 {
                self.dio_high()?;
            } else {
                self.dio_low()?;
            }
            self.clk_high()?;
            delay.delay_us(BUS_DELAY_US);
            value >>= 1;
        }

        // Release DIO for the acknowledgment clock
        self.clk_low()?;
        self.dio.set_input().map_err(InterfaceError::Data)?;
        self.dio_high()?;
        delay.delay_us(BUS_DELAY_US);

        let released = self.dio.is_high().map_err(InterfaceError::Data)?;
        if released {
            // Nobody pulled DIO low; hold it low ourselves so the 9th
            // clock cannot be mistaken for a stop condition.
            self.dio.set_output().map_err(InterfaceError::Data)?;
            self.dio_low()?;
        }
        delay.delay_us(BUS_DELAY_US);

        self.clk_high()?;
        delay.delay_us(BUS_DELAY_US);
        self.clk_low()?;
        delay.delay_us(BUS_DELAY_US);

        self.dio.set_output().map_err(InterfaceError::Data)?;

        Ok(Ack::from_level(released))
    }

    fn transaction<D: DelayNs>(
        &mut self,
        first: u8,
        rest: &[u8],
        delay: &mut D,
    ) -> BusResult<Ack, CLK, DIO> {
        #[cfg(feature = "critical-section")]
        let ack = critical_section::with(|_| self.framed(first, rest, delay))?;
        #[cfg(not(feature = "critical-section"))]
        let ack = self.framed(first, rest, delay)?;

        log::trace!("TM1637 tx {first:#04x} {rest:02x?}");
        if !ack.is_acknowledged() {
            log::debug!("TM1637 did not acknowledge transaction {first:#04x}");
        }
        Ok(ack)
    }

    fn framed<D: DelayNs>(
        &mut self,
        first: u8,
        rest: &[u8],
        delay: &mut D,
    ) -> BusResult<Ack, CLK, DIO> {
        self.start(delay)?;
        let mut ack = self.write_byte(first, delay)?;
        for &byte in rest {
            ack = ack.and(self.write_byte(byte, delay)?);
        }
        self.stop(delay)?;
        Ok(ack)
    }

    fn clk_high(&mut self) -> BusResult<(), CLK, DIO> {
        self.clk.set_high().map_err(InterfaceError::Clock)
    }

    fn clk_low(&mut self) -> BusResult<(), CLK, DIO> {
        self.clk.set_low().map_err(InterfaceError::Clock)
    }

    fn dio_high(&mut self) -> BusResult<(), CLK, DIO> {
        self.dio.set_high().map_err(InterfaceError::Data)
    }

    fn dio_low(&mut self) -> BusResult<(), CLK, DIO> {
        self.dio.set_low().map_err(InterfaceError::Data)
    }
}

impl<CLK, DIO> DisplayInterface for Interface<CLK, DIO>
where
    CLK: Line,
    DIO: Line,
{
    type Error = InterfaceError<CLK::Error, DIO::Error>;

    fn init(&mut self) -> InterfaceResult<(), Self::Error> {
        self.clk.set_output().map_err(InterfaceError::Clock)?;
        self.dio.set_output().map_err(InterfaceError::Data)?;
        self.clk_low()?;
        self.dio_low()
    }

    fn send_command<D: DelayNs>(
        &mut self,
        command: u8,
        delay: &mut D,
    ) -> InterfaceResult<Ack, Self::Error> {
        self.transaction(command, &[], delay)
    }

    fn send_data<D: DelayNs>(
        &mut self,
        address: u8,
        data: &[u8],
        delay: &mut D,
    ) -> InterfaceResult<Ack, Self::Error> {
        self.transaction(address, data, delay)
    }
}
