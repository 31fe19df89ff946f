//! BQ25890 register subset
//!
//! Only the registers the driver manages are mapped. The ADC result registers
//! are read-only; the control registers take their defaults from the charger
//! itself during `init()`.

use crate::register::{Access, ByteOrder, Field, RegisterMap, RegisterTable};

/// Number of registers in the map
pub const REGISTER_COUNT: usize = 7;

/// Register image of the charger
pub type Bq25890Registers = RegisterTable<Reg, REGISTER_COUNT>;

/// BQ25890 registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reg {
    /// Input source control
    Reg00,
    /// ADC and input detection control
    Reg02,
    /// Charger control
    Reg09,
    /// Battery voltage ADC (read-only)
    Reg0E,
    /// System voltage ADC (read-only)
    Reg0F,
    /// VBUS voltage ADC (read-only)
    Reg11,
    /// Charge current ADC (read-only)
    Reg12,
}

impl RegisterMap for Reg {
    const ALL: &'static [Self] = &[
        Self::Reg00,
        Self::Reg02,
        Self::Reg09,
        Self::Reg0E,
        Self::Reg0F,
        Self::Reg11,
        Self::Reg12,
    ];
    const BYTE_ORDER: ByteOrder = ByteOrder::Big;

    fn index(self) -> usize {
        self as usize
    }

    fn address(self) -> u16 {
        match self {
            Self::Reg00 => 0x00,
            Self::Reg02 => 0x02,
            Self::Reg09 => 0x09,
            Self::Reg0E => 0x0E,
            Self::Reg0F => 0x0F,
            Self::Reg11 => 0x11,
            Self::Reg12 => 0x12,
        }
    }

    fn size(self) -> usize {
        1
    }

    fn name(self) -> &'static str {
        match self {
            Self::Reg00 => "REG00",
            Self::Reg02 => "REG02",
            Self::Reg09 => "REG09",
            Self::Reg0E => "REG0E",
            Self::Reg0F => "REG0F",
            Self::Reg11 => "REG11",
            Self::Reg12 => "REG12",
        }
    }

    fn access(self) -> Access {
        match self {
            Self::Reg00 | Self::Reg02 | Self::Reg09 => Access::ReadWrite,
            _ => Access::ReadOnly,
        }
    }
}

// REG00
/// High impedance mode
pub const EN_HIZ: Field = Field::bit(0, 7);
/// ILIM pin current limit enable
pub const EN_ILIM: Field = Field::bit(0, 6);
/// Input current limit
pub const IINLIM: Field = Field::new(0, 0, 6);

// REG02
/// Start a single ADC conversion (self-clearing)
pub const CONV_START: Field = Field::bit(0, 7);
/// Continuous ADC conversion, one per second
pub const CONV_RATE: Field = Field::bit(0, 6);

// REG09
/// Force input current optimizer
pub const FORCE_ICO: Field = Field::bit(0, 7);
/// Slow safety timer during DPM or thermal regulation
pub const TMR2X_EN: Field = Field::bit(0, 6);
/// Turn BATFET off (ship mode)
pub const BATFET_DIS: Field = Field::bit(0, 5);
/// JEITA high temperature charge voltage: 0 = VREG - 200 mV, 1 = VREG
pub const JEITA_VSET: Field = Field::bit(0, 4);
/// Delay BATFET turn off by 10 s
pub const BATFET_DLY: Field = Field::bit(0, 3);
/// BATFET full system reset enable
pub const BATFET_RST_EN: Field = Field::bit(0, 2);

// ADC results
/// Thermal regulation status (REG0E)
pub const THERM_STAT: Field = Field::bit(0, 7);
/// Battery or system voltage code (REG0E, REG0F)
pub const VOLTAGE: Field = Field::new(0, 0, 7);
/// VBUS attached (REG11)
pub const VBUS_GD: Field = Field::bit(0, 7);
/// VBUS voltage code (REG11)
pub const VBUSV: Field = Field::new(0, 0, 7);
/// Charge current code (REG12)
pub const ICHGR: Field = Field::new(0, 0, 7);
