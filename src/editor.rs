//! Cursor based pattern editor.
//!
//! Input handling is up to the application: map buttons or gestures to the
//! `move_*` and [`PatternEditor::toggle`] calls and hand
//! [`PatternEditor::frame`] to [`crate::Matrix::display`] when done.
use crate::error::FrameError;
use crate::framebuffer::Frame;
use crate::COLS;
use crate::ROWS;

/// Side of the square preview grid.
pub const PREVIEW_SIZE: usize = 5;

/// Editable frame plus a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatternEditor {
    frame: Frame,
    row: usize,
    col: usize,
}

impl PatternEditor {
    /// Blank frame, cursor in the top left corner.
    pub const fn new() -> Self {
        Self {
            frame: Frame::new(),
            row: 0,
            col: 0,
        }
    }

    /// Start from an existing frame.
    pub const fn with_frame(frame: Frame) -> Self {
        Self {
            frame,
            row: 0,
            col: 0,
        }
    }

    /// Start from pattern text, leniently: the text must have 8 lines, but a
    /// line that is not 16 characters long loads as blank and anything other
    /// than `*` is unlit.
    pub fn with_pattern(text: &str) -> Result<Self, FrameError> {
        let text = text.trim();
        if text.split('\n').count() != ROWS {
            warn!("editor pattern must have {} rows", ROWS);
            return Err(FrameError::InvalidDimensions);
        }
        let mut frame = Frame::new();
        for (row, line) in text.split('\n').enumerate() {
            let line = line.trim();
            if line.chars().count() != COLS {
                continue;
            }
            for (col, c) in line.chars().enumerate() {
                if c == '*' {
                    frame.set_pixel(row, col, true)?;
                }
            }
        }
        Ok(Self::with_frame(frame))
    }

    /// Clear the frame and home the cursor.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// `(row, col)` of the cursor.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn set_cursor(&mut self, row: usize, col: usize) -> Result<(), FrameError> {
        if row >= ROWS || col >= COLS {
            return Err(FrameError::OutOfRange);
        }
        self.row = row;
        self.col = col;
        Ok(())
    }

    pub fn move_up(&mut self) {
        self.row = self.row.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        self.row = (self.row + 1).min(ROWS - 1);
    }

    pub fn move_left(&mut self) {
        self.col = self.col.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.col = (self.col + 1).min(COLS - 1);
    }

    /// Flip the pixel under the cursor, returns its new state.
    pub fn toggle(&mut self) -> bool {
        // the cursor never leaves the grid
        self.frame.toggle_pixel(self.row, self.col).unwrap_or(false)
    }

    pub fn is_lit(&self) -> bool {
        self.frame.pixel(self.row, self.col).unwrap_or(false)
    }

    /// Nearest-neighbour 5x5 thumbnail, for boards with a small status
    /// display. `preview[r][c]` samples row `r * 8 / 5`, column `c * 16 / 5`.
    pub fn preview(&self) -> [[bool; PREVIEW_SIZE]; PREVIEW_SIZE] {
        let mut out = [[false; PREVIEW_SIZE]; PREVIEW_SIZE];
        for (r, cells) in out.iter_mut().enumerate() {
            for (c, cell) in cells.iter_mut().enumerate() {
                let row = r * ROWS / PREVIEW_SIZE;
                let col = c * COLS / PREVIEW_SIZE;
                *cell = self.frame.pixel(row, col).unwrap_or(false);
            }
        }
        out
    }

    /// Cursor position on the preview grid.
    pub fn preview_cursor(&self) -> (usize, usize) {
        (self.row % PREVIEW_SIZE, self.col % PREVIEW_SIZE)
    }
}
