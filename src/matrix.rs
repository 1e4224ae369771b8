use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::command::Command;
use crate::error::Error;
use crate::error::FrameError;
use crate::framebuffer::Frame;
use crate::framebuffer::Grid;
use crate::patterns::Pattern;
use crate::protocol::Bus;
use crate::scroll::Direction;
use crate::scroll::ScrollBitmap;
use crate::scroll::SCROLL_CAPACITY;

/// Driver for one 8x16 matrix.
///
/// Owns the clock pin, the data pin, a delay provider and the frame buffer.
/// Pixel and drawing calls only touch the buffer; call [`Matrix::render`] to
/// push it to the display. Every method takes `&mut self`, so callers that
/// share a matrix between tasks or threads must wrap it in their own mutex.
pub struct Matrix<CLK, DIO, D> {
    bus: Bus<CLK, DIO, D>,
    frame: Frame,
}

impl<CLK, DIO, D> Matrix<CLK, DIO, D>
where
    CLK: OutputPin,
    DIO: OutputPin<Error = CLK::Error>,
    D: DelayNs,
{
    /// Creates a new driver. Nothing is sent until [`Matrix::init`].
    pub fn new(clk: CLK, dio: DIO, delay: D) -> Self {
        Self {
            bus: Bus::new(clk, dio, delay),
            frame: Frame::new(),
        }
    }

    /// Give the pins and delay back.
    pub fn release(self) -> (CLK, DIO, D) {
        self.bus.release()
    }

    /// Turn the display on and blank it.
    pub fn init(&mut self) -> Result<(), Error<CLK::Error>> {
        debug!("init matrix");
        self.bus.send_command(Command::TURN_ON)?;
        self.clear()
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Direct access to the buffer, e.g. as an `embedded-graphics` target.
    pub fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    /// Send the buffer to the display.
    pub fn render(&mut self) -> Result<(), Error<CLK::Error>> {
        self.bus.write_frame(self.frame.as_bytes())
    }

    /// Blank the buffer and the display.
    pub fn clear(&mut self) -> Result<(), Error<CLK::Error>> {
        self.frame.clear();
        self.render()
    }

    /// Set one pixel in the buffer. Out of range coordinates are rejected and
    /// leave the buffer as it was.
    pub fn set_pixel(&mut self, row: usize, col: usize, on: bool) -> Result<(), FrameError> {
        self.frame.set_pixel(row, col, on).inspect_err(|_| {
            warn!("pixel ({}, {}) is off the matrix", row, col);
        })
    }

    pub fn pixel(&self, row: usize, col: usize) -> Option<bool> {
        self.frame.pixel(row, col)
    }

    /// Fill (or clear) a rectangle in the buffer, see
    /// [`Frame::draw_rectangle`].
    pub fn draw_rectangle(&mut self, x: usize, y: usize, w: usize, h: usize, on: bool) {
        self.frame.draw_rectangle(x, y, w, h, on);
    }

    /// Horizontal or vertical line in the buffer, see [`Frame::draw_line`].
    pub fn draw_line(
        &mut self,
        start_row: usize,
        start_col: usize,
        end_row: usize,
        end_col: usize,
        on: bool,
    ) -> Result<(), FrameError> {
        self.frame
            .draw_line(start_row, start_col, end_row, end_col, on)
            .inspect_err(|_| warn!("diagonal lines are not supported"))
    }

    /// Replace the buffer with `frame` and show it.
    pub fn display(&mut self, frame: &Frame) -> Result<(), Error<CLK::Error>> {
        self.frame = *frame;
        self.render()
    }

    /// Show 16 bytes of wire format data.
    pub fn display_bytes(&mut self, data: &[u8]) -> Result<(), Error<CLK::Error>> {
        let frame = Frame::from_slice(data).inspect_err(|_| {
            warn!("pattern must be 16 bytes, got {}", data.len());
        })?;
        self.display(&frame)
    }

    /// Show an 8x16 grid, `grid[row][col]`.
    pub fn load_image(&mut self, grid: &Grid) -> Result<(), Error<CLK::Error>> {
        self.display(&Frame::from_grid(grid))
    }

    /// Parse and show the `*`/`.` text form. A malformed pattern changes
    /// neither the buffer nor the display.
    pub fn display_pattern_str(&mut self, text: &str) -> Result<(), Error<CLK::Error>> {
        let frame = Frame::parse(text).inspect_err(|e| {
            warn!("bad pattern: {}", e);
        })?;
        self.display(&frame)
    }

    pub fn display_pattern(&mut self, pattern: Pattern) -> Result<(), Error<CLK::Error>> {
        self.display(&pattern.frame())
    }

    /// Show a built in pattern by name (`"heart"`, `"smiley"`, `"arrow"`).
    pub fn display_named(&mut self, name: &str) -> Result<(), Error<CLK::Error>> {
        let pattern: Pattern = name.parse().inspect_err(|_| {
            warn!("pattern '{}' not found", name);
        })?;
        self.display_pattern(pattern)
    }

    /// Brightness 0..=7. Anything higher is rejected without sending.
    pub fn set_brightness(&mut self, level: u8) -> Result<(), Error<CLK::Error>> {
        let Some(cmd) = Command::brightness_level(level) else {
            warn!("brightness must be between 0 and 7, got {}", level);
            return Err(FrameError::OutOfRange.into());
        };
        self.bus.send_command(cmd)
    }

    pub fn turn_on(&mut self) -> Result<(), Error<CLK::Error>> {
        self.bus.send_command(Command::TURN_ON)
    }

    pub fn turn_off(&mut self) -> Result<(), Error<CLK::Error>> {
        self.bus.send_command(Command::DISPLAY_OFF)
    }

    /// Scroll `text` across the display, waiting `speed_ms` after each step.
    /// Blocks until the text has left the display; the buffer is blank
    /// afterwards.
    pub fn scroll_text(
        &mut self,
        text: &str,
        speed_ms: u32,
        direction: Direction,
    ) -> Result<(), Error<CLK::Error>> {
        let bitmap = Self::scroll_bitmap(text)?;
        for frame in bitmap.frames(direction) {
            self.display(&frame)?;
            self.bus.delay_ms(speed_ms);
        }
        Ok(())
    }

    /// Same as [`Matrix::scroll_text`], but waits between steps with an async
    /// delay so other tasks can run.
    pub async fn scroll_text_async<P>(
        &mut self,
        text: &str,
        speed_ms: u32,
        direction: Direction,
        pacer: &mut P,
    ) -> Result<(), Error<CLK::Error>>
    where
        P: embedded_hal_async::delay::DelayNs,
    {
        let bitmap = Self::scroll_bitmap(text)?;
        for frame in bitmap.frames(direction) {
            self.display(&frame)?;
            pacer.delay_ms(speed_ms).await;
        }
        Ok(())
    }

    fn scroll_bitmap(text: &str) -> Result<ScrollBitmap<SCROLL_CAPACITY>, FrameError> {
        if text.is_empty() {
            warn!("nothing to scroll");
            return Err(FrameError::EmptyInput);
        }
        debug!("scroll {} chars", text.chars().count());
        ScrollBitmap::new(text).inspect_err(|_| warn!("text too long to scroll"))
    }

    /// Show each frame in turn, waiting `delay_ms` after each one.
    pub fn play_sequence(
        &mut self,
        frames: &[Frame],
        delay_ms: u32,
    ) -> Result<(), Error<CLK::Error>> {
        if frames.is_empty() {
            warn!("empty pattern sequence");
            return Err(FrameError::EmptyInput.into());
        }
        for frame in frames {
            self.display(frame)?;
            self.bus.delay_ms(delay_ms);
        }
        Ok(())
    }

    /// Async version of [`Matrix::play_sequence`].
    pub async fn play_sequence_async<P>(
        &mut self,
        frames: &[Frame],
        delay_ms: u32,
        pacer: &mut P,
    ) -> Result<(), Error<CLK::Error>>
    where
        P: embedded_hal_async::delay::DelayNs,
    {
        if frames.is_empty() {
            warn!("empty pattern sequence");
            return Err(FrameError::EmptyInput.into());
        }
        for frame in frames {
            self.display(frame)?;
            pacer.delay_ms(delay_ms).await;
        }
        Ok(())
    }
}
