use core::str::FromStr;

use crate::error::FrameError;
use crate::framebuffer::Frame;

/// Built in images, already in wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pattern {
    Heart,
    Smiley,
    Arrow,
}

#[rustfmt::skip]
const HEART: [u8; 16] = [
    0b0000_0000, 0b0110_0110, 0b1111_1111, 0b1111_1111,
    0b1111_1111, 0b0111_1110, 0b0011_1100, 0b0001_1000,
    0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_0000,
    0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_0000,
];

#[rustfmt::skip]
const SMILEY: [u8; 16] = [
    0b0000_0000, 0b0000_0000, 0b0001_1000, 0b0001_1000,
    0b0000_0000, 0b0010_0100, 0b0001_1000, 0b0000_0000,
    0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_0000,
    0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_0000,
];

#[rustfmt::skip]
const ARROW: [u8; 16] = [
    0b0000_1000, 0b0001_1100, 0b0011_1110, 0b0111_1111,
    0b0001_1100, 0b0001_1100, 0b0001_1100, 0b0001_1100,
    0b0001_1100, 0b0001_1100, 0b0001_1100, 0b0001_1100,
    0b0001_1100, 0b0001_1100, 0b0001_1100, 0b0000_0000,
];

impl Pattern {
    pub const ALL: [Pattern; 3] = [Pattern::Heart, Pattern::Smiley, Pattern::Arrow];

    pub const fn name(self) -> &'static str {
        match self {
            Pattern::Heart => "heart",
            Pattern::Smiley => "smiley",
            Pattern::Arrow => "arrow",
        }
    }

    pub const fn frame(self) -> Frame {
        Frame::from_bytes(match self {
            Pattern::Heart => HEART,
            Pattern::Smiley => SMILEY,
            Pattern::Arrow => ARROW,
        })
    }
}

impl FromStr for Pattern {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or(FrameError::UnknownPattern)
    }
}

impl From<Pattern> for Frame {
    fn from(p: Pattern) -> Self {
        p.frame()
    }
}
