//! 8 row font and the row-major/column-major bit transforms.
//!
//! Glyphs are stored the way they are drawn: one byte per row, most
//! significant bit on the left. The matrix wants one byte per column with
//! bit `r` for row `r`, so glyphs go through [`transpose_row_major`] before
//! they hit the wire.
use crate::error::FrameError;
use crate::ROWS;

/// Visible width of every glyph, in columns.
pub const GLYPH_WIDTH: usize = 5;
/// First transposed column that carries glyph pixels; columns before it and
/// after `GLYPH_OFFSET + GLYPH_WIDTH` are always blank.
const GLYPH_OFFSET: usize = 1;

const SPACE: [u8; ROWS] = [0x00; ROWS];

#[rustfmt::skip]
const LETTERS: [[u8; ROWS]; 26] = [
    [0x38, 0x44, 0x44, 0x7C, 0x44, 0x44, 0x44, 0x00], // A
    [0x78, 0x44, 0x44, 0x78, 0x44, 0x44, 0x78, 0x00], // B
    [0x38, 0x44, 0x40, 0x40, 0x40, 0x44, 0x38, 0x00], // C
    [0x78, 0x44, 0x44, 0x44, 0x44, 0x44, 0x78, 0x00], // D
    [0x7C, 0x40, 0x40, 0x78, 0x40, 0x40, 0x7C, 0x00], // E
    [0x7C, 0x40, 0x40, 0x78, 0x40, 0x40, 0x40, 0x00], // F
    [0x38, 0x44, 0x40, 0x40, 0x4C, 0x44, 0x38, 0x00], // G
    [0x44, 0x44, 0x44, 0x7C, 0x44, 0x44, 0x44, 0x00], // H
    [0x38, 0x10, 0x10, 0x10, 0x10, 0x10, 0x38, 0x00], // I
    [0x04, 0x04, 0x04, 0x04, 0x44, 0x44, 0x38, 0x00], // J
    [0x44, 0x48, 0x50, 0x60, 0x50, 0x48, 0x44, 0x00], // K
    [0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0x7C, 0x00], // L
    [0x44, 0x6C, 0x54, 0x44, 0x44, 0x44, 0x44, 0x00], // M
    [0x44, 0x44, 0x64, 0x54, 0x4C, 0x44, 0x44, 0x00], // N
    [0x38, 0x44, 0x44, 0x44, 0x44, 0x44, 0x38, 0x00], // O
    [0x78, 0x44, 0x44, 0x78, 0x40, 0x40, 0x40, 0x00], // P
    [0x38, 0x44, 0x44, 0x44, 0x54, 0x48, 0x34, 0x00], // Q
    [0x78, 0x44, 0x44, 0x78, 0x50, 0x48, 0x44, 0x00], // R
    [0x38, 0x44, 0x40, 0x38, 0x04, 0x44, 0x38, 0x00], // S
    [0x7C, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x00], // T
    [0x44, 0x44, 0x44, 0x44, 0x44, 0x44, 0x38, 0x00], // U
    [0x44, 0x44, 0x44, 0x44, 0x28, 0x10, 0x00, 0x00], // V
    [0x44, 0x44, 0x44, 0x54, 0x6C, 0x44, 0x44, 0x00], // W
    [0x44, 0x44, 0x28, 0x10, 0x28, 0x44, 0x44, 0x00], // X
    [0x44, 0x44, 0x28, 0x10, 0x10, 0x10, 0x10, 0x00], // Y
    [0x7C, 0x04, 0x08, 0x10, 0x20, 0x40, 0x7C, 0x00], // Z
];

/// Row-major bitmap for `c`. Lower case letters use the upper case glyph and
/// anything the font does not cover is blank.
pub fn rows(c: char) -> &'static [u8; ROWS] {
    let c = c.to_ascii_uppercase();
    if c.is_ascii_uppercase() {
        &LETTERS[(c as u8 - b'A') as usize]
    } else {
        &SPACE
    }
}

/// `true` if the font has a real glyph for `c` (space included).
pub fn has_glyph(c: char) -> bool {
    c == ' ' || c.is_ascii_alphabetic()
}

/// The visible columns of `c` in wire format (bit `r` = row `r`).
pub fn glyph(c: char) -> [u8; GLYPH_WIDTH] {
    let mut block = [0u8; 8];
    // one byte per row and 8 rows in, 8 columns out: lengths always match
    let _ = transpose_row_major(rows(c), 1, &mut block);
    let mut out = [0u8; GLYPH_WIDTH];
    out.copy_from_slice(&block[GLYPH_OFFSET..GLYPH_OFFSET + GLYPH_WIDTH]);
    out
}

/// Convert an 8 row, row-major bitmap into one byte per column.
///
/// `pattern` holds `total_columns` bytes per row (MSB = leftmost pixel), so
/// it spans `8 * total_columns` pixel columns. Bit `r` of `out[c]` is bit
/// `7 - c % 8` of `pattern[r * total_columns + c / 8]`. Both slices must be
/// exactly `8 * total_columns` long.
pub fn transpose_row_major(
    pattern: &[u8],
    total_columns: usize,
    out: &mut [u8],
) -> Result<(), FrameError> {
    let len = checked_len(total_columns)?;
    if pattern.len() != len || out.len() != len {
        return Err(FrameError::InvalidDimensions);
    }
    for (col, slot) in out.iter_mut().enumerate() {
        let mut byte = 0u8;
        for row in 0..ROWS {
            if pattern[row * total_columns + col / 8] & (1 << (7 - col % 8)) != 0 {
                byte |= 1 << row;
            }
        }
        *slot = byte;
    }
    Ok(())
}

/// Inverse of [`transpose_row_major`].
pub fn transpose_column_major(
    columns: &[u8],
    total_columns: usize,
    out: &mut [u8],
) -> Result<(), FrameError> {
    let len = checked_len(total_columns)?;
    if columns.len() != len || out.len() != len {
        return Err(FrameError::InvalidDimensions);
    }
    out.fill(0);
    for (col, &bits) in columns.iter().enumerate() {
        for row in 0..ROWS {
            if bits & (1 << row) != 0 {
                out[row * total_columns + col / 8] |= 1 << (7 - col % 8);
            }
        }
    }
    Ok(())
}

fn checked_len(total_columns: usize) -> Result<usize, FrameError> {
    total_columns
        .checked_mul(ROWS)
        .ok_or(FrameError::InvalidDimensions)
}
