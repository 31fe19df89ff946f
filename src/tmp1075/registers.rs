//! TMP1075 register map
//!
//! Five 16-bit registers behind 8-bit pointers, payloads big-endian.

use crate::register::{Access, ByteOrder, Field, Override, RegisterMap, RegisterTable};

/// Number of registers in the map
pub const REGISTER_COUNT: usize = 5;

/// Register image of the sensor
pub type Tmp1075Registers = RegisterTable<Reg, REGISTER_COUNT>;

/// TMP1075 registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reg {
    /// Temperature result (read-only)
    Temp,
    /// Configuration
    Config,
    /// Low limit
    LowLimit,
    /// High limit
    HighLimit,
    /// Device identification (read-only)
    DeviceId,
}

impl RegisterMap for Reg {
    const ALL: &'static [Self] = &[
        Self::Temp,
        Self::Config,
        Self::LowLimit,
        Self::HighLimit,
        Self::DeviceId,
    ];
    const BYTE_ORDER: ByteOrder = ByteOrder::Big;

    fn index(self) -> usize {
        self as usize
    }

    fn address(self) -> u16 {
        match self {
            Self::Temp => 0x00,
            Self::Config => 0x01,
            Self::LowLimit => 0x02,
            Self::HighLimit => 0x03,
            Self::DeviceId => 0x0F,
        }
    }

    fn size(self) -> usize {
        2
    }

    fn name(self) -> &'static str {
        match self {
            Self::Temp => "TEMP",
            Self::Config => "CFGR",
            Self::LowLimit => "LLIM",
            Self::HighLimit => "HLIM",
            Self::DeviceId => "DIEID",
        }
    }

    fn access(self) -> Access {
        match self {
            Self::Temp | Self::DeviceId => Access::ReadOnly,
            _ => Access::ReadWrite,
        }
    }
}

/// Power-on register values
pub const DEFAULTS: &[Override<Reg>] = &[
    Override::new(Reg::Config, 0x00FF),
    Override::new(Reg::LowLimit, 0x4B00),
    Override::new(Reg::HighLimit, 0x5000),
];

/// Expected content of [`Reg::DeviceId`]
pub const DEVICE_ID: u16 = 0x7500;

// Configuration register, all fields in the high (first) byte
/// Shutdown mode
pub const SD: Field = Field::bit(0, 0);
/// Thermostat mode: 0 = comparator, 1 = interrupt
pub const TM: Field = Field::bit(0, 1);
/// ALERT pin polarity: 0 = active low
pub const POL: Field = Field::bit(0, 2);
/// Consecutive faults before ALERT asserts
pub const FAULTS: Field = Field::new(0, 3, 2);
/// Conversion rate
pub const RATE: Field = Field::new(0, 5, 2);
/// One-shot conversion start (shutdown mode only)
pub const OS: Field = Field::bit(0, 7);
