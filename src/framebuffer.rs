//! Column-major frame buffer for the 8x16 matrix.
//!
//! Byte `c` holds hardware column `c`; bit `r` of that byte is logical row
//! `r`. This is exactly the payload the controller expects after the address
//! command, so a [`Frame`] can be sent without conversion.
use core::convert::Infallible;
use core::fmt;
use core::str::FromStr;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::OriginDimensions;
use embedded_graphics::prelude::Size;
use embedded_graphics::Pixel;

use crate::error::FrameError;
use crate::COLS;
use crate::FRAME_BYTES;
use crate::ROWS;

/// Logical 8x16 image, `grid[row][col]`.
pub type Grid = [[bool; COLS]; ROWS];

const LIT: char = '*';
const UNLIT: char = '.';

/// Frame buffer holding one full matrix image.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Frame {
    data: [u8; FRAME_BYTES],
}

impl Frame {
    /// Create a blank frame
    pub const fn new() -> Self {
        Self {
            data: [0; FRAME_BYTES],
        }
    }

    /// Wrap 16 bytes that are already in wire format.
    pub const fn from_bytes(data: [u8; FRAME_BYTES]) -> Self {
        Self { data }
    }

    /// Like [`Frame::from_bytes`] but for a slice of unknown length.
    pub fn from_slice(data: &[u8]) -> Result<Self, FrameError> {
        let data: [u8; FRAME_BYTES] = data
            .try_into()
            .map_err(|_| FrameError::InvalidDimensions)?;
        Ok(Self { data })
    }

    pub const fn as_bytes(&self) -> &[u8; FRAME_BYTES] {
        &self.data
    }

    /// Column `col` as a byte, bit `r` = row `r`.
    pub fn column(&self, col: usize) -> Option<u8> {
        self.data.get(col).copied()
    }

    pub fn set_column(&mut self, col: usize, bits: u8) -> Result<(), FrameError> {
        let slot = self.data.get_mut(col).ok_or(FrameError::OutOfRange)?;
        *slot = bits;
        Ok(())
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.data = [0; FRAME_BYTES];
    }

    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }

    /// Set or clear one pixel. Out of range coordinates leave the frame
    /// untouched.
    pub fn set_pixel(&mut self, row: usize, col: usize, on: bool) -> Result<(), FrameError> {
        if row >= ROWS || col >= COLS {
            return Err(FrameError::OutOfRange);
        }
        let mask = 1u8 << row;
        if on {
            self.data[col] |= mask;
        } else {
            self.data[col] &= !mask;
        }
        Ok(())
    }

    pub fn pixel(&self, row: usize, col: usize) -> Option<bool> {
        if row >= ROWS {
            return None;
        }
        self.column(col).map(|bits| bits & (1 << row) != 0)
    }

    /// Flip one pixel and return its new state.
    pub fn toggle_pixel(&mut self, row: usize, col: usize) -> Result<bool, FrameError> {
        let on = !self.pixel(row, col).ok_or(FrameError::OutOfRange)?;
        self.set_pixel(row, col, on)?;
        Ok(on)
    }

    pub fn from_grid(grid: &Grid) -> Self {
        let mut frame = Self::new();
        for (row, cells) in grid.iter().enumerate() {
            for (col, &on) in cells.iter().enumerate() {
                if on {
                    frame.data[col] |= 1 << row;
                }
            }
        }
        frame
    }

    pub fn to_grid(&self) -> Grid {
        let mut grid = [[false; COLS]; ROWS];
        for (row, cells) in grid.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = self.data[col] & (1 << row) != 0;
            }
        }
        grid
    }

    /// Parse the 8 line `*`/`.` text form.
    ///
    /// Surrounding whitespace and whitespace around each line is ignored.
    /// Everything is validated before the first bit is set.
    pub fn parse(text: &str) -> Result<Self, FrameError> {
        let mut lines = [""; ROWS];
        let mut count = 0;
        for line in text.trim().split('\n') {
            if count == ROWS {
                return Err(FrameError::InvalidDimensions);
            }
            lines[count] = line.trim();
            count += 1;
        }
        if count != ROWS {
            return Err(FrameError::InvalidDimensions);
        }
        for line in &lines {
            if line.chars().count() != COLS {
                return Err(FrameError::InvalidDimensions);
            }
            if line.chars().any(|c| c != LIT && c != UNLIT) {
                return Err(FrameError::InvalidCharacter);
            }
        }

        let mut frame = Self::new();
        for (row, line) in lines.iter().enumerate() {
            for (col, c) in line.bytes().enumerate() {
                if c == LIT as u8 {
                    frame.data[col] |= 1 << row;
                }
            }
        }
        Ok(frame)
    }

    /// Fill (or clear) the `w` x `h` rectangle whose top left corner is at
    /// column `x`, row `y`. The part outside the matrix is ignored.
    pub fn draw_rectangle(&mut self, x: usize, y: usize, w: usize, h: usize, on: bool) {
        let cols = x.min(COLS)..x.saturating_add(w).min(COLS);
        let rows = y.min(ROWS)..y.saturating_add(h).min(ROWS);
        let mask = rows.fold(0u8, |mask, row| mask | (1 << row));
        for col in cols {
            if on {
                self.data[col] |= mask;
            } else {
                self.data[col] &= !mask;
            }
        }
    }

    /// Draw a horizontal or vertical line between two inclusive end points,
    /// clipped to the matrix. Diagonal lines are rejected; draw those through
    /// [`embedded_graphics`] instead.
    pub fn draw_line(
        &mut self,
        start_row: usize,
        start_col: usize,
        end_row: usize,
        end_col: usize,
        on: bool,
    ) -> Result<(), FrameError> {
        let (r0, r1) = (start_row.min(end_row), start_row.max(end_row));
        let (c0, c1) = (start_col.min(end_col), start_col.max(end_col));
        if r0 == r1 {
            self.draw_rectangle(c0, r0, (c1 - c0).saturating_add(1), 1, on);
        } else if c0 == c1 {
            self.draw_rectangle(c0, r0, 1, (r1 - r0).saturating_add(1), on);
        } else {
            return Err(FrameError::DiagonalLine);
        }
        Ok(())
    }
}

impl From<[u8; FRAME_BYTES]> for Frame {
    fn from(data: [u8; FRAME_BYTES]) -> Self {
        Self::from_bytes(data)
    }
}

impl From<&Grid> for Frame {
    fn from(grid: &Grid) -> Self {
        Self::from_grid(grid)
    }
}

impl FromStr for Frame {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// Writes the 8 line `*`/`.` form accepted by [`Frame::parse`].
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            if row > 0 {
                f.write_str("\n")?;
            }
            for bits in &self.data {
                let c = if bits & (1 << row) != 0 { LIT } else { UNLIT };
                fmt::Write::write_char(f, c)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Frame").field(&self.data).finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Frame {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Frame({=[u8]:#x})", self.data[..])
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(COLS as u32, ROWS as u32)
    }
}

/// x is the column, y is the row.
impl DrawTarget for Frame {
    type Color = BinaryColor;

    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if p.x < 0 || p.y < 0 {
                continue;
            }
            let _ = self.set_pixel(p.y as usize, p.x as usize, c.is_on());
        }
        Ok(())
    }
}
