//! End-to-end tests against a simulated TM1637
//!
//! The simulated chip watches the CLK and DIO levels written through the
//! port registers, decodes start/stop conditions and bytes exactly as the
//! real chip does, acknowledges each byte by pulling DIO low, and executes
//! the decoded commands into its display registers.

use core::cell::{Cell, RefCell};
use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use tm1637::segment::{BLANK, DIGITS, MINUS, SEG_DP};
use tm1637::{
    Ack, BUS_DELAY_US, Builder, Digits, Display, Interface, OpenDrainLine, Port, PortLine,
};

const CLK_BIT: u8 = 7;
const DIO_BIT: u8 = 6;
const CLK: u8 = 1 << CLK_BIT;
const DIO: u8 = 1 << DIO_BIT;

#[derive(Debug, Default)]
struct Decoder {
    receiving: bool,
    bits: u8,
    count: u8,
    bytes: Vec<u8>,
}

#[derive(Debug, Default)]
struct ChipState {
    registers: [u8; 6],
    address: usize,
    fixed_address: bool,
    display_on: bool,
    brightness: u8,
    transactions: Vec<Vec<u8>>,
}

/// A TM1637 hanging off bits 7 (CLK) and 6 (DIO) of a port
#[derive(Debug, Default)]
struct SimulatedChip {
    dir: Cell<u8>,
    out: Cell<u8>,
    absent: Cell<bool>,
    decoder: RefCell<Decoder>,
    state: RefCell<ChipState>,
}

impl SimulatedChip {
    fn new() -> Self {
        let chip = Self::default();
        chip.out.set(CLK | DIO);
        chip
    }

    fn absent() -> Self {
        let chip = Self::new();
        chip.absent.set(true);
        chip
    }

    fn registers(&self) -> [u8; 4] {
        let registers = self.state.borrow().registers;
        [registers[0], registers[1], registers[2], registers[3]]
    }

    fn transactions(&self) -> Vec<Vec<u8>> {
        self.state.borrow().transactions.clone()
    }

    fn pulling_dio_low(&self) -> bool {
        let decoder = self.decoder.borrow();
        !self.absent.get() && decoder.receiving && decoder.count == 8
    }

    fn drive(&self, out: u8) {
        let before = self.out.get();
        self.out.set(out);

        let (clk_was, dio_was) = (before & CLK != 0, before & DIO != 0);
        let (clk, dio) = (out & CLK != 0, out & DIO != 0);

        let mut decoder = self.decoder.borrow_mut();
        if clk_was && clk && dio_was && !dio {
            *decoder = Decoder {
                receiving: true,
                ..Decoder::default()
            };
        } else if clk_was && clk && !dio_was && dio {
            if decoder.receiving {
                let bytes = core::mem::take(&mut decoder.bytes);
                decoder.receiving = false;
                drop(decoder);
                self.execute(bytes);
            }
        } else if !clk_was && clk && decoder.receiving {
            if decoder.count < 8 {
                if dio {
                    decoder.bits |= 1 << decoder.count;
                }
                decoder.count += 1;
            } else {
                let byte = decoder.bits;
                decoder.bytes.push(byte);
                decoder.bits = 0;
                decoder.count = 0;
            }
        }
    }

    fn execute(&self, bytes: Vec<u8>) {
        let mut state = self.state.borrow_mut();
        if let Some((&command, data)) = bytes.split_first() {
            match command & 0xC0 {
                0x40 => state.fixed_address = command & 0x04 != 0,
                0x80 => {
                    state.display_on = command & 0x08 != 0;
                    state.brightness = command & 0x07;
                }
                0xC0 => {
                    state.address = (command & 0x07) as usize % 6;
                    for &pattern in data {
                        let address = state.address;
                        state.registers[address] = pattern;
                        if !state.fixed_address {
                            state.address = (address + 1) % 6;
                        }
                    }
                }
                _ => {}
            }
        }
        state.transactions.push(bytes);
    }
}

impl Port for SimulatedChip {
    fn set_direction(&self, mask: u8) {
        self.dir.set(self.dir.get() | mask);
    }

    fn clear_direction(&self, mask: u8) {
        self.dir.set(self.dir.get() & !mask);
    }

    fn set_output(&self, mask: u8) {
        self.drive(self.out.get() | mask);
    }

    fn clear_output(&self, mask: u8) {
        self.drive(self.out.get() & !mask);
    }

    fn input(&self) -> u8 {
        if self.pulling_dio_low() {
            self.out.get() & !DIO
        } else {
            self.out.get()
        }
    }
}

/// An open-drain HAL pin wired to the simulated chip
#[derive(Debug)]
struct ChipPin<'a> {
    chip: &'a SimulatedChip,
    mask: u8,
}

impl ErrorType for ChipPin<'_> {
    type Error = Infallible;
}

impl OutputPin for ChipPin<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.chip.clear_output(self.mask);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.chip.set_output(self.mask);
        Ok(())
    }
}

impl InputPin for ChipPin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.chip.input() & self.mask != 0)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.chip.input() & self.mask == 0)
    }
}

#[derive(Default)]
struct RecordingDelay {
    calls: usize,
    shortest_ns: Option<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.shortest_ns = Some(self.shortest_ns.map_or(ns, |shortest| shortest.min(ns)));
    }
}

type PortDisplay<'a> = Display<Interface<PortLine<&'a SimulatedChip>, PortLine<&'a SimulatedChip>>>;

fn port_display(chip: &SimulatedChip, digits: u8) -> PortDisplay<'_> {
    let interface = Interface::new(PortLine::new(chip, CLK_BIT), PortLine::new(chip, DIO_BIT));
    let config = Builder::new()
        .digits(Digits::new(digits).unwrap())
        .brightness(5)
        .build()
        .unwrap();
    Display::new(interface, config)
}

#[test]
fn init_configures_display_control() {
    let chip = SimulatedChip::new();
    let mut display = port_display(&chip, 4);
    let mut delay = RecordingDelay::default();

    let ack = display.init(&mut delay).unwrap();

    assert_eq!(ack, Ack::Acknowledged);
    assert_eq!(chip.dir.get(), CLK | DIO);
    assert_eq!(chip.transactions(), vec![vec![0x8Du8]]);
    let state = chip.state.borrow();
    assert!(state.display_on);
    assert_eq!(state.brightness, 5);
}

#[test]
fn display_segments_is_two_transactions() {
    let chip = SimulatedChip::new();
    let mut display = port_display(&chip, 4);
    let mut delay = RecordingDelay::default();
    display.init(&mut delay).unwrap();

    display
        .display_segments(2, 0b0111_0110, &mut delay)
        .unwrap();

    assert_eq!(
        chip.transactions()[1..],
        [vec![0x44u8], vec![0xC2, 0b0111_0110]]
    );
    assert_eq!(chip.registers(), [0, 0, 0b0111_0110, 0]);
}

#[test]
fn position_is_masked_not_checked() {
    let chip = SimulatedChip::new();
    let mut display = port_display(&chip, 4);
    let mut delay = RecordingDelay::default();
    display.init(&mut delay).unwrap();

    display.display_segments(6, 0x3F, &mut delay).unwrap();

    assert_eq!(chip.transactions().last(), Some(&vec![0xC2, 0x3F]));
}

#[test]
fn number_renders_on_chip() {
    let chip = SimulatedChip::new();
    let mut display = port_display(&chip, 4);
    let mut delay = RecordingDelay::default();
    display.init(&mut delay).unwrap();

    display
        .display_number_decimal(-234, false, 0, &mut delay)
        .unwrap();
    assert_eq!(chip.registers(), [MINUS, DIGITS[2], DIGITS[3], DIGITS[4]]);

    display
        .display_number_decimal(0, false, 3, &mut delay)
        .unwrap();
    assert_eq!(chip.registers(), [BLANK, BLANK, BLANK, DIGITS[0] | SEG_DP]);

    display
        .display_number_decimal(8500, false, 1, &mut delay)
        .unwrap();
    assert_eq!(
        chip.registers(),
        [DIGITS[8], DIGITS[5] | SEG_DP, DIGITS[0], DIGITS[0]]
    );
}

#[test]
fn number_then_colon_keeps_digit() {
    let chip = SimulatedChip::new();
    let mut display = port_display(&chip, 4);
    let mut delay = RecordingDelay::default();
    display.init(&mut delay).unwrap();
    display.clear(&mut delay).unwrap();

    display
        .display_number_decimal(1234, false, 0, &mut delay)
        .unwrap();
    display.display_colon(true, &mut delay).unwrap();

    // "12:34"
    assert_eq!(chip.registers(), [0x06, 0xDB, 0x4F, 0x66]);

    display
        .display_number_decimal(5678, false, 0, &mut delay)
        .unwrap();
    assert_eq!(
        chip.registers(),
        [DIGITS[5], DIGITS[6] | SEG_DP, DIGITS[7], DIGITS[8]]
    );
}

#[test]
fn auto_increment_stops_at_last_digit() {
    let chip = SimulatedChip::new();
    let mut display = port_display(&chip, 4);
    let mut delay = RecordingDelay::default();
    display.init(&mut delay).unwrap();
    display.clear(&mut delay).unwrap();

    display
        .display_segments_from(2, &[DIGITS[1], DIGITS[2], DIGITS[3], DIGITS[4]], &mut delay)
        .unwrap();

    assert_eq!(chip.registers(), [BLANK, BLANK, DIGITS[1], DIGITS[2]]);
    assert_eq!(chip.state.borrow().registers[4..], [0, 0]);
}

#[test]
fn colon_survives_digit_updates() {
    let chip = SimulatedChip::new();
    let mut display = port_display(&chip, 4);
    let mut delay = RecordingDelay::default();
    display.init(&mut delay).unwrap();
    display.clear(&mut delay).unwrap();

    display.display_colon(true, &mut delay).unwrap();
    for digit in 0..10 {
        display.display_digit(1, digit, &mut delay).unwrap();
        assert_eq!(chip.registers()[1], DIGITS[digit as usize] | SEG_DP);
    }

    display.display_colon(false, &mut delay).unwrap();
    assert_eq!(chip.registers()[1], DIGITS[9]);
}

#[test]
fn brightness_is_clamped_on_the_wire() {
    let chip = SimulatedChip::new();
    let mut display = port_display(&chip, 4);
    let mut delay = RecordingDelay::default();
    display.init(&mut delay).unwrap();

    for level in 0..=u8::MAX {
        display.set_brightness(level, &mut delay).unwrap();
        let state = chip.state.borrow();
        assert_eq!(state.brightness, level.min(7));
        assert!(state.display_on);
    }

    display.set_enabled(false, &mut delay).unwrap();
    let state = chip.state.borrow();
    assert!(!state.display_on);
    assert_eq!(state.brightness, 7);
}

#[test]
fn auto_increment_writes_all_positions_at_once() {
    let chip = SimulatedChip::new();
    let mut display = port_display(&chip, 4);
    let mut delay = RecordingDelay::default();
    display.init(&mut delay).unwrap();

    display
        .display_segments_from(0, &[DIGITS[1], DIGITS[2], DIGITS[3], DIGITS[4]], &mut delay)
        .unwrap();

    assert_eq!(
        chip.transactions()[1..],
        [
            vec![0x40u8],
            vec![0xC0, DIGITS[1], DIGITS[2], DIGITS[3], DIGITS[4]],
        ]
    );
    assert_eq!(chip.registers(), [DIGITS[1], DIGITS[2], DIGITS[3], DIGITS[4]]);
}

#[test]
fn missing_chip_is_reported_through_ack() {
    let chip = SimulatedChip::absent();
    let mut display = port_display(&chip, 4);
    let mut delay = RecordingDelay::default();

    assert_eq!(display.init(&mut delay).unwrap(), Ack::NotAcknowledged);
    assert_eq!(
        display.display_digit(0, 1, &mut delay).unwrap(),
        Ack::NotAcknowledged
    );
}

#[test]
fn bus_is_idle_after_every_operation() {
    let chip = SimulatedChip::new();
    let mut display = port_display(&chip, 4);
    let mut delay = RecordingDelay::default();
    display.init(&mut delay).unwrap();
    display.clear(&mut delay).unwrap();

    assert_eq!(chip.out.get() & (CLK | DIO), CLK | DIO);
    assert_eq!(chip.dir.get() & DIO, DIO);
    assert!(!chip.decoder.borrow().receiving);
}

#[test]
fn delays_never_shorter_than_protocol_unit() {
    let chip = SimulatedChip::new();
    let mut display = port_display(&chip, 4);
    let mut delay = RecordingDelay::default();
    display.init(&mut delay).unwrap();
    display.display_number_decimal(1234, true, 0, &mut delay).unwrap();

    assert!(delay.calls > 0);
    assert_eq!(delay.shortest_ns, Some(BUS_DELAY_US * 1_000));
}

#[test]
fn displays_keep_separate_state() {
    let left_chip = SimulatedChip::new();
    let right_chip = SimulatedChip::new();
    let mut left = port_display(&left_chip, 4);
    let mut right = port_display(&right_chip, 2);
    let mut delay = RecordingDelay::default();
    left.init(&mut delay).unwrap();
    right.init(&mut delay).unwrap();

    left.display_colon(true, &mut delay).unwrap();
    right.display_digit(1, 7, &mut delay).unwrap();
    left.display_digit(1, 7, &mut delay).unwrap();

    assert_eq!(left_chip.registers()[1], DIGITS[7] | SEG_DP);
    assert_eq!(right_chip.registers()[1], DIGITS[7]);

    right.clear(&mut delay).unwrap();
    assert_eq!(right_chip.transactions().len(), 1 + 2 + 2 * 2);
}

#[test]
fn open_drain_pins_drive_the_same_protocol() {
    let chip = SimulatedChip::new();
    let clk = ChipPin { chip: &chip, mask: CLK };
    let dio = ChipPin { chip: &chip, mask: DIO };
    let interface = Interface::new(OpenDrainLine::new(clk), OpenDrainLine::new(dio));
    let config = Builder::new()
        .digits(Digits::new(4).unwrap())
        .build()
        .unwrap();
    let mut display = Display::new(interface, config);
    let mut delay = RecordingDelay::default();

    assert!(display.init(&mut delay).unwrap().is_acknowledged());
    display
        .display_number_decimal(42, true, 2, &mut delay)
        .unwrap();

    assert_eq!(
        chip.registers(),
        [DIGITS[0], DIGITS[0], DIGITS[4] | SEG_DP, DIGITS[2]]
    );
    assert_eq!(chip.state.borrow().brightness, 7);
}
