//! VEML6040 register map
//!
//! Command codes are 8 bits, every register is a 16-bit little-endian word.

use crate::register::{Access, ByteOrder, Field, RegisterMap, RegisterTable};

/// Number of registers in the map
pub const REGISTER_COUNT: usize = 5;

/// Register image of the sensor
pub type Veml6040Registers = RegisterTable<Reg, REGISTER_COUNT>;

/// VEML6040 registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reg {
    /// Configuration
    Conf,
    /// Red channel count (read-only)
    Red,
    /// Green channel count (read-only)
    Green,
    /// Blue channel count (read-only)
    Blue,
    /// White channel count (read-only)
    White,
}

impl RegisterMap for Reg {
    const ALL: &'static [Self] = &[Self::Conf, Self::Red, Self::Green, Self::Blue, Self::White];
    const BYTE_ORDER: ByteOrder = ByteOrder::Little;

    fn index(self) -> usize {
        self as usize
    }

    fn address(self) -> u16 {
        match self {
            Self::Conf => 0x00,
            Self::Red => 0x08,
            Self::Green => 0x09,
            Self::Blue => 0x0A,
            Self::White => 0x0B,
        }
    }

    fn size(self) -> usize {
        2
    }

    fn name(self) -> &'static str {
        match self {
            Self::Conf => "CONF",
            Self::Red => "R_DATA",
            Self::Green => "G_DATA",
            Self::Blue => "B_DATA",
            Self::White => "W_DATA",
        }
    }

    fn access(self) -> Access {
        match self {
            Self::Conf => Access::ReadWrite,
            _ => Access::ReadOnly,
        }
    }
}

// CONF, all fields in the low (first) byte
/// Shutdown: 1 = disabled
pub const SD: Field = Field::bit(0, 0);
/// Force mode: 1 = one measurement per trigger
pub const AF: Field = Field::bit(0, 1);
/// Trigger one measurement in force mode
pub const TRIG: Field = Field::bit(0, 2);
/// Integration time
pub const IT: Field = Field::new(0, 4, 3);
