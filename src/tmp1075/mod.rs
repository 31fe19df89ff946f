//! TMP1075 digital temperature sensor
//!
//! 12-bit temperature with 0.0625 °C resolution, programmable alert limits
//! and a one-shot mode for low power operation.

pub mod registers;

pub use registers::{Reg, Tmp1075Registers};

use crate::interface::{self, Probe};
use crate::units::{ConversionError, LinearScale};
use crate::{DriverState, Error};
use device_driver::RegisterInterface;
use registers::{DEFAULTS, DEVICE_ID, FAULTS, OS, POL, RATE, SD, TM};

/// I2C address with A0, A1 and A2 low
pub const I2C_ADDRESS: u8 = 0x48;

/// Temperature of one LSB of the 12-bit result
pub const CELSIUS_PER_LSB: f32 = 0.0625;

/// Alert limit range, 12-bit two's complement left aligned in 16 bits
pub const LIMIT_SCALE: LinearScale = LinearScale::new(-128.0, 127.9375, CELSIUS_PER_LSB, 0.0);

/// Time between conversions in continuous mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionRate {
    /// 27.5 ms
    #[default]
    Ms27_5 = 0,
    /// 55 ms
    Ms55 = 1,
    /// 110 ms
    Ms110 = 2,
    /// 220 ms
    Ms220 = 3,
}

/// Consecutive out-of-limit conversions before ALERT asserts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultCount {
    /// One fault
    #[default]
    One = 0,
    /// Two faults
    Two = 1,
    /// Three faults
    Three = 2,
    /// Four faults
    Four = 3,
}

/// ALERT pin polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertPolarity {
    /// Active low
    #[default]
    ActiveLow,
    /// Active high
    ActiveHigh,
}

/// ALERT pin behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertMode {
    /// Asserted while the temperature is beyond the limits
    #[default]
    Comparator,
    /// Asserted until the next register read
    Interrupt,
}

/// Sensor configuration applied by `init()`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tmp1075Config {
    /// Continuous conversion rate
    pub conversion_rate: ConversionRate,
    /// Fault queue length
    pub fault_count: FaultCount,
    /// ALERT polarity
    pub alert_polarity: AlertPolarity,
    /// ALERT mode
    pub alert_mode: AlertMode,
    /// Low limit in °C
    pub low_limit_celsius: f32,
    /// High limit in °C
    pub high_limit_celsius: f32,
    /// Read every written register back and compare
    pub check_with_read: bool,
}

impl Default for Tmp1075Config {
    fn default() -> Self {
        Self {
            conversion_rate: ConversionRate::Ms27_5,
            fault_count: FaultCount::One,
            alert_polarity: AlertPolarity::ActiveLow,
            alert_mode: AlertMode::Comparator,
            low_limit_celsius: 75.0,
            high_limit_celsius: 80.0,
            check_with_read: false,
        }
    }
}

/// TMP1075 driver
pub struct Tmp1075<I> {
    interface: I,
    registers: Tmp1075Registers,
    check_with_read: bool,
    state: DriverState,
}

impl<I> Tmp1075<I>
where
    I: RegisterInterface<AddressType = u16> + Probe,
{
    /// Create a new driver with the register image set to its defaults
    pub fn new(interface: I) -> Self {
        let mut registers = Tmp1075Registers::new();
        registers.load(DEFAULTS);
        Self {
            interface,
            registers,
            check_with_read: false,
            state: DriverState::Constructed,
        }
    }

    /// Configure the sensor
    ///
    /// Checks that the device answers and identifies as a TMP1075, then
    /// writes configuration and both limits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyInitialized`] when called twice,
    /// [`Error::OutOfRange`] or [`Error::NotQuantized`] for invalid limits
    /// (before any bus traffic), [`Error::InvalidDevice`] on an unexpected id,
    /// or a bus error.
    pub fn init(&mut self, config: &Tmp1075Config) -> Result<(), Error<I::Error>> {
        self.state.ensure_constructed()?;

        let low = encode_limit(config.low_limit_celsius).map_err(ConversionError::into_error)?;
        let high = encode_limit(config.high_limit_celsius).map_err(ConversionError::into_error)?;

        self.registers.clear();
        self.registers.load(DEFAULTS);
        let cfg = self.registers.get_mut(Reg::Config);
        cfg.set_field(RATE, config.conversion_rate as u8);
        cfg.set_field(FAULTS, config.fault_count as u8);
        cfg.set_flag(POL, config.alert_polarity == AlertPolarity::ActiveHigh);
        cfg.set_flag(TM, config.alert_mode == AlertMode::Interrupt);
        cfg.set_flag(SD, false);
        self.registers.get_mut(Reg::LowLimit).bytes_mut().copy_from_slice(&low);
        self.registers.get_mut(Reg::HighLimit).bytes_mut().copy_from_slice(&high);
        self.check_with_read = config.check_with_read;

        self.interface.probe()?;

        interface::read(&mut self.interface, self.registers.get_mut(Reg::DeviceId))?;
        let id = self.registers.get(Reg::DeviceId).word();
        #[cfg(feature = "defmt")]
        defmt::debug!("TMP1075 device id {=u16:#06x}", id);
        if id != DEVICE_ID {
            return Err(Error::InvalidDevice(id));
        }

        interface::write_all(&mut self.interface, &self.registers, &[], self.check_with_read)?;

        self.state = DriverState::Initialized;
        Ok(())
    }

    /// Put the sensor into shutdown mode
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or a bus error.
    pub fn deinit(&mut self) -> Result<(), Error<I::Error>> {
        self.state.ensure_initialized()?;

        self.registers.set_flag(Reg::Config, SD, true);
        self.write(Reg::Config)?;

        self.registers.clear();
        self.registers.load(DEFAULTS);
        self.state = DriverState::Constructed;
        Ok(())
    }

    /// Read the last conversion result in °C
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or a bus error.
    pub fn temperature_celsius(&mut self) -> Result<f32, Error<I::Error>> {
        self.state.ensure_initialized()?;
        interface::read(&mut self.interface, self.registers.get_mut(Reg::Temp))?;
        Ok(decode_temperature(self.registers.get(Reg::Temp).word()))
    }

    /// Set the low alert limit in °C
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] outside -128 °C .. 127.9375 °C,
    /// [`Error::NotQuantized`] off the 0.0625 °C grid, or a bus error.
    pub fn set_low_limit_celsius(&mut self, celsius: f32) -> Result<(), Error<I::Error>> {
        self.set_limit(Reg::LowLimit, celsius)
    }

    /// Set the high alert limit in °C
    ///
    /// # Errors
    ///
    /// Same as [`set_low_limit_celsius()`](Self::set_low_limit_celsius).
    pub fn set_high_limit_celsius(&mut self, celsius: f32) -> Result<(), Error<I::Error>> {
        self.set_limit(Reg::HighLimit, celsius)
    }

    fn set_limit(&mut self, reg: Reg, celsius: f32) -> Result<(), Error<I::Error>> {
        self.state.ensure_initialized()?;
        let raw = encode_limit(celsius).map_err(ConversionError::into_error)?;
        self.registers.get_mut(reg).bytes_mut().copy_from_slice(&raw);
        self.write(reg)
    }

    /// Enter or leave shutdown mode
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or a bus error.
    pub fn set_shutdown(&mut self, shutdown: bool) -> Result<(), Error<I::Error>> {
        self.state.ensure_initialized()?;
        self.registers.set_flag(Reg::Config, SD, shutdown);
        self.write(Reg::Config)
    }

    /// Start a single conversion while in shutdown mode
    ///
    /// The one-shot bit always reads back as zero, so this write is never
    /// verified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or a bus error.
    pub fn trigger_one_shot(&mut self) -> Result<(), Error<I::Error>> {
        self.state.ensure_initialized()?;
        self.registers.set_flag(Reg::Config, OS, true);
        let result = interface::write(&mut self.interface, self.registers.get(Reg::Config), false);
        self.registers.set_flag(Reg::Config, OS, false);
        result
    }

    /// Register image
    pub const fn registers(&self) -> &Tmp1075Registers {
        &self.registers
    }

    /// Current lifecycle state
    pub const fn state(&self) -> DriverState {
        self.state
    }

    /// Consume the driver and return the bus interface
    pub fn release(self) -> I {
        self.interface
    }

    fn write(&mut self, reg: Reg) -> Result<(), Error<I::Error>> {
        interface::write(
            &mut self.interface,
            self.registers.get(reg),
            self.check_with_read,
        )
    }
}

/// Convert a raw temperature register value into °C
///
/// The result is a 12-bit two's complement value in the upper bits.
#[must_use]
pub fn decode_temperature(raw: u16) -> f32 {
    let counts = i16::from_be_bytes(raw.to_be_bytes()) >> 4;
    f32::from(counts) * CELSIUS_PER_LSB
}

fn encode_limit(celsius: f32) -> Result<[u8; 2], ConversionError> {
    let code = LIMIT_SCALE.encode(celsius)?;
    let counts = i16::try_from(code).map_err(|_| ConversionError::OutOfRange)?;
    Ok((counts << 4).to_be_bytes())
}
