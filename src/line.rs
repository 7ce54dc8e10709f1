//! GPIO line abstraction
//!
//! The TM1637 bus needs two lines: CLK, which is only ever driven, and DIO,
//! which is driven for data bits and released for the acknowledgment bit.
//! The [`Line`] trait captures that capability set; the bit-banging
//! [`Interface`](crate::interface::Interface) is written against it.
//!
//! Two backends are provided:
//!
//! - [`PortLine`] - a port handle plus a bit mask, for register ports with
//!   direction set/clear, output set/clear and input registers (the layout
//!   of AVR `PORTx` blocks). The application implements [`Port`] for its
//!   register block.
//! - [`OpenDrainLine`] - an adapter over any `embedded-hal` v1.0 pin that is
//!   both [`InputPin`] and [`OutputPin`], typically configured open-drain
//!   with a pull-up.
//!
//! ## Example
//!
//! ```
//! use core::cell::Cell;
//! use tm1637::line::{Line, Port, PortLine};
//!
//! struct Regs {
//!     dir: Cell<u8>,
//!     out: Cell<u8>,
//! }
//!
//! impl Port for Regs {
//!     fn set_direction(&self, mask: u8) { self.dir.set(self.dir.get() | mask); }
//!     fn clear_direction(&self, mask: u8) { self.dir.set(self.dir.get() & !mask); }
//!     fn set_output(&self, mask: u8) { self.out.set(self.out.get() | mask); }
//!     fn clear_output(&self, mask: u8) { self.out.set(self.out.get() & !mask); }
//!     fn input(&self) -> u8 { self.out.get() }
//! }
//!
//! let porta = Regs { dir: Cell::new(0), out: Cell::new(0) };
//! let mut clk = PortLine::new(&porta, 7);
//! let mut dio = PortLine::new(&porta, 6);
//!
//! let _ = clk.set_output();
//! let _ = dio.set_output();
//! let _ = clk.set_high();
//! assert_eq!(porta.dir.get(), 0b1100_0000);
//! assert_eq!(porta.out.get(), 0b1000_0000);
//! ```

use core::convert::Infallible;
use core::fmt::Debug;
use embedded_hal::digital::{InputPin, OutputPin};

/// A single bus line with direction and level control
///
/// Implementations perform the register effect immediately; nothing is
/// buffered between calls.
pub trait Line {
    /// Error type for line operations
    type Error: Debug;

    /// Switch the line to output direction
    fn set_output(&mut self) -> Result<(), Self::Error>;

    /// Switch the line to input direction
    fn set_input(&mut self) -> Result<(), Self::Error>;

    /// Drive the line high
    fn set_high(&mut self) -> Result<(), Self::Error>;

    /// Drive the line low
    fn set_low(&mut self) -> Result<(), Self::Error>;

    /// Sample the line level
    fn is_high(&mut self) -> Result<bool, Self::Error>;
}

/// Register-level access to an 8-bit GPIO port
///
/// Mirrors the set/clear register layout of AVR `PORTx` blocks: writing a
/// mask only touches the bits set in it. Methods take `&self` because port
/// registers are shared hardware; implement this for your PAC register
/// block or a handle to it.
pub trait Port {
    /// Make the masked pins outputs (`DIRSET`)
    fn set_direction(&self, mask: u8);

    /// Make the masked pins inputs (`DIRCLR`)
    fn clear_direction(&self, mask: u8);

    /// Drive the masked pins high (`OUTSET`)
    fn set_output(&self, mask: u8);

    /// Drive the masked pins low (`OUTCLR`)
    fn clear_output(&self, mask: u8);

    /// Read the input register (`IN`)
    fn input(&self) -> u8;
}

impl<P: Port + ?Sized> Port for &P {
    fn set_direction(&self, mask: u8) {
        (**self).set_direction(mask);
    }

    fn clear_direction(&self, mask: u8) {
        (**self).clear_direction(mask);
    }

    fn set_output(&self, mask: u8) {
        (**self).set_output(mask);
    }

    fn clear_output(&self, mask: u8) {
        (**self).clear_output(mask);
    }

    fn input(&self) -> u8 {
        (**self).input()
    }
}

/// A line bound to one bit of a [`Port`]
///
/// Immutable once constructed. Two `PortLine`s for the clock and data lines
/// may share a port, but must not share a bit.
#[derive(Debug)]
pub struct PortLine<P> {
    port: P,
    mask: u8,
}

impl<P: Port> PortLine<P> {
    /// Bind `bit` (0-7) of `port`
    ///
    /// Out-of-range bit indices wrap into 0-7.
    pub fn new(port: P, bit: u8) -> Self {
        Self {
            port,
            mask: 1 << (bit & 0x07),
        }
    }

    /// The bit mask this line drives
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Give the port handle back
    pub fn release(self) -> P {
        self.port
    }
}

impl<P: Port> Line for PortLine<P> {
    type Error = Infallible;

    fn set_output(&mut self) -> Result<(), Self::Error> {
        self.port.set_direction(self.mask);
        Ok(())
    }

    fn set_input(&mut self) -> Result<(), Self::Error> {
        self.port.clear_direction(self.mask);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.port.set_output(self.mask);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.port.clear_output(self.mask);
        Ok(())
    }

    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.port.input() & self.mask != 0)
    }
}

/// A line backed by an open-drain `embedded-hal` pin
///
/// An open-drain pin has no separate direction: driving it high releases
/// the line, so the pull-up (or the TM1637 pulling low) sets the level.
/// [`Line::set_input`] therefore releases the line and [`Line::set_output`]
/// is a no-op.
#[derive(Debug)]
pub struct OpenDrainLine<P> {
    pin: P,
}

impl<P> OpenDrainLine<P>
where
    P: InputPin + OutputPin,
{
    /// Wrap an open-drain pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P, E> Line for OpenDrainLine<P>
where
    P: InputPin<Error = E> + OutputPin<Error = E>,
    E: Debug,
{
    type Error = E;

    fn set_output(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_input(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high()
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high()
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()
    }

    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_high()
    }
}
