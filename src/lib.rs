//! Driver for 8 row x 16 column LED dot-matrix modules with a TM1640 style
//! controller, bit-banged over two GPIO pins.
//!
//! ## How the module works
//!
//! The controller has no chip select and no acknowledge. It listens on two
//! lines:
//! - **CLK** – data is sampled on each rising edge
//! - **DIN** – serial data, most significant bit first
//!
//! A transfer starts when DIN falls while CLK is high and ends when DIN rises
//! while CLK is high. Writing an image is three transfers: a data command
//! selecting auto-increment addressing (`0x40`), the start address (`0xC0`)
//! followed by 16 column bytes, and a display control command (`0x88`,
//! display on). Each column byte covers one physical column, bit 0 being the
//! top row.
//!
//! ## Layers
//!
//! - [`protocol::Bus`] does the bit-banging on top of
//!   [`embedded_hal::digital::OutputPin`] and [`embedded_hal::delay::DelayNs`].
//! - [`Frame`] is the 16 byte column buffer with pixel, drawing and pattern
//!   string conversions. It is also an `embedded-graphics` draw target.
//! - [`scroll`] turns text into frames through the [`font`] table.
//! - [`Matrix`] ties it together.
//!
//! ```ignore
//! let mut matrix = Matrix::new(clk, din, delay);
//! matrix.init()?;
//! matrix.set_pixel(0, 0, true)?;
//! matrix.render()?;
//! matrix.scroll_text("HELLO", 100, Direction::Left)?;
//! ```
//!
//! ## Feature flags
//!
//! - `log`: emit diagnostics through the `log` crate
//! - `defmt`: emit diagnostics through `defmt` and implement `defmt::Format`
//!   for the public types
#![no_std]

#[macro_use]
mod fmt;

pub mod command;
pub mod editor;
mod error;
pub mod font;
pub mod framebuffer;
mod matrix;
pub mod patterns;
pub mod protocol;
pub mod scroll;

#[cfg(test)]
mod mock;

pub use error::Error;
pub use error::FrameError;
pub use framebuffer::Frame;
pub use matrix::Matrix;
pub use patterns::Pattern;
pub use scroll::Direction;

/// Rows on the matrix.
pub const ROWS: usize = 8;
/// Columns on the matrix.
pub const COLS: usize = 16;
/// Bytes in one frame, one per column.
pub const FRAME_BYTES: usize = COLS;
