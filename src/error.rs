use core::fmt;

/// Rejection reasons for frame, pattern and command inputs.
///
/// None of these are fatal: the rejected call has no effect on the buffer or
/// on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Wrong number of bytes, rows or columns
    InvalidDimensions,
    /// A pattern string contained something other than `*` or `.`
    InvalidCharacter,
    /// A coordinate or brightness level outside the valid range
    OutOfRange,
    /// `draw_line` only handles horizontal and vertical segments
    DiagonalLine,
    /// Empty text or an empty pattern sequence
    EmptyInput,
    /// The scroll bitmap does not fit in its capacity
    BitmapOverflow,
    /// No predefined pattern with that name
    UnknownPattern,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            FrameError::InvalidDimensions => "pattern must be 8 rows of 16 columns (16 bytes)",
            FrameError::InvalidCharacter => "pattern characters must be '*' or '.'",
            FrameError::OutOfRange => "value out of range",
            FrameError::DiagonalLine => "only horizontal or vertical lines are supported",
            FrameError::EmptyInput => "input is empty",
            FrameError::BitmapOverflow => "scroll bitmap capacity exceeded",
            FrameError::UnknownPattern => "unknown pattern name",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for FrameError {}

/// Errors returned by [`crate::Matrix`] and [`crate::protocol::Bus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Driving the clock or data pin failed
    Pin(E),
    /// The request was rejected before anything was sent
    Frame(FrameError),
}

impl<E> From<FrameError> for Error<E> {
    fn from(e: FrameError) -> Self {
        Error::Frame(e)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Pin(e) => write!(f, "pin error: {e:?}"),
            Error::Frame(e) => write!(f, "{e}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}
