//! Bit-banged two-wire bus for the matrix controller.
//!
//! The bus is write-only. A frame starts with a falling edge on DIO while CLK
//! is high and ends with a rising edge on DIO while CLK is high. Between the
//! two, DIO is sampled on every rising CLK edge, most significant bit first.
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::digital::PinState;

use crate::command::Command;
use crate::error::Error;
use crate::error::FrameError;
use crate::FRAME_BYTES;

/// Data setup and clock high time for each bit.
pub const BIT_HOLD_US: u32 = 2;
/// Clock low time before a start condition.
pub const START_SETUP_US: u32 = 1;
/// Clock low time before a stop condition.
pub const STOP_SETUP_US: u32 = 2;
/// Clock high time before DIO is released at a stop condition.
pub const STOP_HOLD_US: u32 = 1;

/// Owns the clock and data pins plus the delay used for bit timing.
pub struct Bus<CLK, DIO, D> {
    clk: CLK,
    dio: DIO,
    delay: D,
}

impl<CLK, DIO, D> Bus<CLK, DIO, D>
where
    CLK: OutputPin,
    DIO: OutputPin<Error = CLK::Error>,
    D: DelayNs,
{
    pub fn new(clk: CLK, dio: DIO, delay: D) -> Self {
        Self { clk, dio, delay }
    }

    /// Give the pins and delay back.
    pub fn release(self) -> (CLK, DIO, D) {
        (self.clk, self.dio, self.delay)
    }

    pub(crate) fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn clk(&mut self, state: PinState) -> Result<(), Error<CLK::Error>> {
        self.clk.set_state(state).map_err(Error::Pin)
    }

    fn dio(&mut self, state: PinState) -> Result<(), Error<CLK::Error>> {
        self.dio.set_state(state).map_err(Error::Pin)
    }

    pub fn send_bit(&mut self, bit: bool) -> Result<(), Error<CLK::Error>> {
        self.clk(PinState::Low)?;
        self.dio(bit.into())?;
        self.delay.delay_us(BIT_HOLD_US);
        self.clk(PinState::High)?;
        self.delay.delay_us(BIT_HOLD_US);
        Ok(())
    }

    /// Shift out `byte`, bit 7 first.
    pub fn send_byte(&mut self, byte: u8) -> Result<(), Error<CLK::Error>> {
        for i in (0..8).rev() {
            self.send_bit((byte >> i) & 1 != 0)?;
        }
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), Error<CLK::Error>> {
        self.clk(PinState::Low)?;
        self.delay.delay_us(START_SETUP_US);
        self.clk(PinState::High)?;
        self.dio(PinState::High)?;
        self.dio(PinState::Low)?;
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), Error<CLK::Error>> {
        self.clk(PinState::Low)?;
        self.delay.delay_us(STOP_SETUP_US);
        self.dio(PinState::Low)?;
        self.clk(PinState::High)?;
        self.delay.delay_us(STOP_HOLD_US);
        self.dio(PinState::High)?;
        Ok(())
    }

    /// Send `bytes` as one start/stop bracketed frame.
    pub fn send_frame(&mut self, bytes: &[u8]) -> Result<(), Error<CLK::Error>> {
        self.start()?;
        for &byte in bytes {
            self.send_byte(byte)?;
        }
        self.stop()
    }

    /// Send a single command byte in its own frame.
    pub fn send_command(&mut self, cmd: Command) -> Result<(), Error<CLK::Error>> {
        trace!("command {:#x}", cmd.byte());
        self.send_frame(&[cmd.byte()])
    }

    /// Write a full 16 column image: data command, address plus payload, then
    /// display on. Anything other than 16 bytes is rejected before a pin is
    /// touched.
    pub fn write_frame(&mut self, data: &[u8]) -> Result<(), Error<CLK::Error>> {
        if data.len() != FRAME_BYTES {
            warn!("frame must be {} bytes, got {}", FRAME_BYTES, data.len());
            return Err(FrameError::InvalidDimensions.into());
        }
        trace!("write frame");
        self.send_command(Command::DATA_AUTO_INCREMENT)?;
        self.start()?;
        self.send_byte(Command::ADDRESS_ZERO.byte())?;
        for &byte in data {
            self.send_byte(byte)?;
        }
        self.stop()?;
        self.send_command(Command::DISPLAY_ON)
    }
}
