use bitfield::bitfield;

/// Command class in bits 7..6 of every command byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Class {
    Data = 0b01,
    Display = 0b10,
    Address = 0b11,
}

bitfield! {
    /// A controller command byte.
    ///
    /// The fields overlap: `address` is only meaningful for
    /// [`Class::Address`] commands, `display_on`/`brightness` only for
    /// [`Class::Display`] commands.
    #[derive(Clone, Copy, Default, PartialEq, Eq)]
    #[repr(transparent)]
    pub struct Command(u8);
    impl Debug;
    u8;
    pub class, set_class: 7, 6;
    pub address, set_address: 3, 0;
    pub display_on, set_display_on: 3;
    pub brightness, set_brightness: 2, 0;
}

#[cfg(feature = "defmt")]
impl defmt::Format for Command {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Command({=u8:#x})", self.0)
    }
}

impl Command {
    /// Data command: write to display, auto-increment address (`0x40`).
    pub const DATA_AUTO_INCREMENT: Command = Command(0b0100_0000);
    /// Address command: start at grid 0 (`0xC0`).
    pub const ADDRESS_ZERO: Command = Command(0b1100_0000);
    /// Display on, default brightness (`0x88`).
    pub const DISPLAY_ON: Command = Command(0b1000_1000);
    /// Alternate turn-on command sent during initialization (`0xA0`).
    pub const TURN_ON: Command = Command(0b1010_0000);
    /// Display off (`0x80`).
    pub const DISPLAY_OFF: Command = Command(0b1000_0000);

    /// Highest brightness level accepted by [`Command::brightness_level`].
    pub const MAX_BRIGHTNESS: u8 = 7;

    pub const fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    pub const fn byte(self) -> u8 {
        self.0
    }

    /// Display on at `level` (`0x88 | level`), or `None` if `level > 7`.
    pub fn brightness_level(level: u8) -> Option<Self> {
        if level > Self::MAX_BRIGHTNESS {
            return None;
        }
        let mut cmd = Self::default();
        cmd.set_class(Class::Display as u8);
        cmd.set_display_on(true);
        cmd.set_brightness(level);
        Some(cmd)
    }

    /// Address command for grid `addr` (0..=15).
    pub fn grid_address(addr: u8) -> Option<Self> {
        if addr > 0x0f {
            return None;
        }
        let mut cmd = Self::default();
        cmd.set_class(Class::Address as u8);
        cmd.set_address(addr);
        Some(cmd)
    }
}

impl From<Command> for u8 {
    fn from(cmd: Command) -> u8 {
        cmd.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_bytes() {
        assert_eq!(Command::DATA_AUTO_INCREMENT.byte(), 0x40);
        assert_eq!(Command::ADDRESS_ZERO.byte(), 0xC0);
        assert_eq!(Command::DISPLAY_ON.byte(), 0x88);
        assert_eq!(Command::TURN_ON.byte(), 0xA0);
        assert_eq!(Command::DISPLAY_OFF.byte(), 0x80);
    }

    #[test]
    fn test_brightness_levels() {
        for level in 0..=7u8 {
            let cmd = Command::brightness_level(level).unwrap();
            assert_eq!(cmd.byte(), 0b1000_1000 | level);
            assert_eq!(cmd.brightness(), level);
            assert!(cmd.display_on());
        }
        assert_eq!(Command::brightness_level(7).unwrap().byte(), 0b1000_1111);
        assert_eq!(Command::brightness_level(0).unwrap(), Command::DISPLAY_ON);
        assert!(Command::brightness_level(8).is_none());
        assert!(Command::brightness_level(u8::MAX).is_none());
    }

    #[test]
    fn test_grid_address() {
        assert_eq!(Command::grid_address(0), Some(Command::ADDRESS_ZERO));
        assert_eq!(Command::grid_address(15).unwrap().byte(), 0xCF);
        assert!(Command::grid_address(16).is_none());
    }

    #[test]
    fn test_fields_decode() {
        assert_eq!(Command::DATA_AUTO_INCREMENT.class(), Class::Data as u8);
        assert_eq!(Command::ADDRESS_ZERO.class(), Class::Address as u8);
        assert_eq!(Command::DISPLAY_OFF.class(), Class::Display as u8);
        assert!(!Command::DISPLAY_OFF.display_on());
    }
}
