//! Scrolling text.
//!
//! A message is rendered once into a [`ScrollBitmap`]: a strip of columns in
//! wire format, padded with a full screen of blank columns on each side so
//! the text enters and leaves the display completely. [`ScrollFrames`] then
//! slides a 16 column window over the strip and yields one [`Frame`] per
//! step. Pacing is left to the caller.
use heapless::Vec;

use crate::error::FrameError;
use crate::font;
use crate::framebuffer::Frame;
use crate::COLS;

/// Blank columns before and after the text.
pub const PAD_COLUMNS: usize = COLS;
/// Blank columns between two characters.
pub const GAP_COLUMNS: usize = 1;
/// Capacity used by [`crate::Matrix::scroll_text`]; 80 characters fit.
pub const SCROLL_CAPACITY: usize = 512;

/// Which way the text travels across the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Text enters on the right and moves left
    #[default]
    Left,
    /// Text enters on the left and moves right
    Right,
}

/// Column strip for a message, at most `N` columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollBitmap<const N: usize> {
    columns: Vec<u8, N>,
}

impl<const N: usize> ScrollBitmap<N> {
    /// Render `text`. Characters without a glyph scroll as blanks.
    pub fn new(text: &str) -> Result<Self, FrameError> {
        let mut columns = Vec::new();
        let pad = [0u8; PAD_COLUMNS];
        columns
            .extend_from_slice(&pad)
            .map_err(|_| FrameError::BitmapOverflow)?;
        for (i, c) in text.chars().enumerate() {
            if i > 0 {
                columns
                    .extend_from_slice(&[0u8; GAP_COLUMNS])
                    .map_err(|_| FrameError::BitmapOverflow)?;
            }
            columns
                .extend_from_slice(&font::glyph(c))
                .map_err(|_| FrameError::BitmapOverflow)?;
        }
        columns
            .extend_from_slice(&pad)
            .map_err(|_| FrameError::BitmapOverflow)?;
        Ok(Self { columns })
    }

    /// Number of columns `text` needs, padding included.
    pub fn required_columns(text: &str) -> usize {
        let chars = text.chars().count();
        2 * PAD_COLUMNS + chars * font::GLYPH_WIDTH + chars.saturating_sub(1) * GAP_COLUMNS
    }

    pub fn columns(&self) -> &[u8] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn frames(&self, direction: Direction) -> ScrollFrames<'_> {
        ScrollFrames::new(&self.columns, direction)
    }
}

/// Where a [`ScrollFrames`] iterator is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollState {
    Idle,
    /// Next frame starts at this column of the strip
    Scrolling(isize),
}

/// Window positions over a column strip, one [`Frame`] per step.
///
/// Scrolling left visits offsets `0..=len - 16`; scrolling right visits
/// `len - 16` down to `-16`. Columns outside the strip are blank. Dropping
/// the iterator early is how a scroll is cancelled.
#[derive(Debug, Clone)]
pub struct ScrollFrames<'a> {
    columns: &'a [u8],
    offset: isize,
    step: isize,
    remaining: usize,
}

impl<'a> ScrollFrames<'a> {
    pub fn new(columns: &'a [u8], direction: Direction) -> Self {
        let last = columns.len() as isize - COLS as isize;
        let (offset, step, remaining) = match direction {
            Direction::Left => (0, 1, last + 1),
            Direction::Right => (last, -1, last + COLS as isize + 1),
        };
        Self {
            columns,
            offset,
            step,
            remaining: remaining.max(0) as usize,
        }
    }

    pub fn state(&self) -> ScrollState {
        if self.remaining == 0 {
            ScrollState::Idle
        } else {
            ScrollState::Scrolling(self.offset)
        }
    }

    fn frame_at(&self, offset: isize) -> Frame {
        let mut data = [0u8; COLS];
        for (i, slot) in data.iter_mut().enumerate() {
            let idx = offset + i as isize;
            if idx >= 0 {
                *slot = self.columns.get(idx as usize).copied().unwrap_or(0);
            }
        }
        Frame::from_bytes(data)
    }
}

impl Iterator for ScrollFrames<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let frame = self.frame_at(self.offset);
        self.offset += self.step;
        self.remaining -= 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ScrollFrames<'_> {}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec as StdVec;

    use super::*;

    type Bitmap = ScrollBitmap<SCROLL_CAPACITY>;

    #[test]
    fn test_bitmap_hi() {
        let bitmap = Bitmap::new("HI").unwrap();
        assert_eq!(bitmap.len(), 16 + 5 + 1 + 5 + 16);
        assert_eq!(bitmap.len(), Bitmap::required_columns("HI"));
        let cols = bitmap.columns();
        assert!(cols[..16].iter().all(|&c| c == 0));
        assert_eq!(cols[16..21], font::glyph('H'));
        assert_eq!(cols[21], 0);
        assert_eq!(cols[22..27], font::glyph('I'));
        assert!(cols[27..].iter().all(|&c| c == 0));
        assert_eq!(cols[16..21], [0x7F, 0x08, 0x08, 0x08, 0x7F]);
    }

    #[test]
    fn test_bitmap_case_and_unknown_characters() {
        assert_eq!(Bitmap::new("hi"), Bitmap::new("HI"));
        let bitmap = Bitmap::new("A1B").unwrap();
        assert_eq!(bitmap.len(), 32 + 3 * 5 + 2);
        assert!(bitmap.columns()[22..27].iter().all(|&c| c == 0));
        assert_eq!(bitmap.columns()[28..33], font::glyph('B'));
    }

    #[test]
    fn test_bitmap_empty_text_is_padding() {
        let bitmap = Bitmap::new("").unwrap();
        assert_eq!(bitmap.len(), 32);
        assert_eq!(Bitmap::required_columns(""), 32);
        assert!(bitmap.columns().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_bitmap_overflow() {
        assert_eq!(ScrollBitmap::<40>::new("HI"), Err(FrameError::BitmapOverflow));
        assert_eq!(ScrollBitmap::<20>::new(""), Err(FrameError::BitmapOverflow));
        assert!(ScrollBitmap::<43>::new("HI").is_ok());
    }

    #[test]
    fn test_scroll_left_offsets() {
        let bitmap = Bitmap::new("HI").unwrap();
        let mut frames = bitmap.frames(Direction::Left);
        assert_eq!(frames.len(), 43 - 16 + 1);
        assert_eq!(frames.state(), ScrollState::Scrolling(0));

        let all: StdVec<Frame> = frames.by_ref().collect();
        assert_eq!(frames.state(), ScrollState::Idle);
        assert!(all[0].is_blank());
        // offset 16: H at the left edge
        assert_eq!(all[16].as_bytes()[..5], font::glyph('H'));
        assert_eq!(all[16].as_bytes()[6..11], font::glyph('I'));
        // offset 1: first H column in the rightmost display column
        assert_eq!(all[1].column(15), Some(0x7F));
        assert!(all.last().unwrap().is_blank());
    }

    #[test]
    fn test_scroll_right_offsets() {
        let bitmap = Bitmap::new("HI").unwrap();
        let frames = bitmap.frames(Direction::Right);
        assert_eq!(frames.state(), ScrollState::Scrolling(27));
        assert_eq!(frames.len(), 27 + 16 + 1);

        let all: StdVec<Frame> = frames.collect();
        assert_eq!(all.len(), 44);
        assert!(all[0].is_blank());
        // offset 16 is 11 steps in
        assert_eq!(all[11].as_bytes()[..5], font::glyph('H'));
        // offset 0 and everything past it only shows leading pad
        for frame in &all[27..] {
            assert!(frame.is_blank());
        }
    }

    #[test]
    fn test_window_outside_strip_is_blank() {
        let columns = [0xFFu8; 4];
        let all: StdVec<Frame> = ScrollFrames::new(&columns, Direction::Right).collect();
        // offsets -12 down to -16
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].as_bytes()[12..], [0xFF; 4]);
        assert!(all[0].as_bytes()[..12].iter().all(|&c| c == 0));
        assert_eq!(all[1].as_bytes()[13..], [0xFF; 3]);
        assert!(all[4].is_blank());

        assert_eq!(ScrollFrames::new(&columns, Direction::Left).count(), 0);
        assert_eq!(ScrollFrames::new(&[], Direction::Left).count(), 0);
    }
}
